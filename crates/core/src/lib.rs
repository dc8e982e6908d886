//! Shared data model and error types for the adlift analytics engine.

pub mod error;
pub mod types;

pub use error::{AdliftError, AdliftResult};
