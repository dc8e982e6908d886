use thiserror::Error;

pub type AdliftResult<T> = Result<T, AdliftError>;

#[derive(Error, Debug)]
pub enum AdliftError {
    #[error("Unsupported attribution model: {0}")]
    UnsupportedModel(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}
