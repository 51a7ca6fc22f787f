//! Error types for the Antigravity server

use antigravity_core::CoreError;
use thiserror::Error;

/// Server error types
#[derive(Error, Debug)]
pub enum ServerError {
    /// Missing or malformed configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Logging could not be initialised
    #[error("Logging error: {0}")]
    LoggingError(String),

    /// Socket bind or serve failure
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Failure reported by the graph core or its store
    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Result type for server operations
pub type ServerResult<T> = Result<T, ServerError>;
