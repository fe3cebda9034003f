//! Error types for the schedule Lambda.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while handling a schedule request.
#[derive(Error, Debug)]
pub enum Error {
    /// No route matched the method and path
    #[error("Endpoint not found")]
    EndpointNotFound,

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// AWS SDK error
    #[error("AWS error: {0}")]
    Aws(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Malformed request parameter
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Get HTTP status code for this error.
    ///
    /// Clients only ever see two buckets: a routing miss or a server failure.
    pub fn status_code(&self) -> u16 {
        match self {
            Error::EndpointNotFound => 404,
            _ => 500,
        }
    }
}
