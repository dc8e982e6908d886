//! Attribution and incrementality analytics for campaign reporting —
//! multi-touch credit allocation under five deterministic models, and
//! statistical lift evaluation for holdout and efficiency tests.

pub mod attribution;
pub mod incrementality;
pub mod stats;

pub use attribution::AttributionEngine;
pub use incrementality::IncrementalityEngine;
