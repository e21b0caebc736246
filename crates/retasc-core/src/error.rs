//! Error types for retasc.

use thiserror::Error;

/// Main error type for retasc operations.
#[derive(Error, Debug)]
pub enum Error {
    /// HTTP request failed before a response was received
    #[error("HTTP error: {0}")]
    Http(String),

    /// Credentials were rejected (401)
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Credentials lack permission (403)
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Resource does not exist (404)
    #[error("Not found: {0}")]
    NotFound(String),

    /// API rejected the request
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Server-side failure (5xx)
    #[error("Server error: {status} - {message}")]
    ServerError { status: u16, message: String },

    /// Response body could not be interpreted
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Serialization/deserialization failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic error
    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl Error {
    /// Map a non-success HTTP status and its response body to an error.
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match status {
            401 => Error::Unauthorized(message),
            403 => Error::Forbidden(message),
            404 => Error::NotFound(message),
            500..=599 => Error::ServerError { status, message },
            _ => Error::Api { status, message },
        }
    }
}

/// Result type alias for retasc operations.
pub type Result<T> = std::result::Result<T, Error>;
