use thiserror::Error;

/// Errors that can occur when decoding connection data.
#[derive(Debug, Error)]
pub enum Error {
    /// A connection record could not be decoded.
    #[error("invalid connection: {0}")]
    InvalidConnection(String),

    /// A connection identifier was empty or of an unsupported type.
    #[error("invalid connection id: {0}")]
    InvalidId(String),

    /// JSON parsing error.
    #[error("json parsing error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Result type for publicize-format operations.
pub type Result<T> = std::result::Result<T, Error>;
