//! Error types for the round-up engine.
//!
//! The pipeline itself cannot fail; every error here belongs to the request
//! boundary and aborts the request before any record is processed.

use thiserror::Error;

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, RoundupError>;

/// Errors that can occur while handling a request.
#[derive(Error, Debug)]
pub enum RoundupError {
    /// Failed to open or read the request body
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed request: bad JSON, unparseable date or amount, missing field
    #[error("Malformed request: {0}")]
    Json(#[from] serde_json::Error),

    /// Shared secret missing or not matching the configured one
    #[error("Missing or invalid API key")]
    Unauthorized,
}
