use thiserror::Error;

use antigravity_core::CoreError;
use antigravity_server::ServerError;

/// Error types for the test utilities
#[derive(Debug, Error)]
pub enum TestError {
    /// HTTP client error
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Fixture setup against the graph store failed
    #[error("Fixture error: {0}")]
    Fixture(#[from] CoreError),

    /// Server error
    #[error("Server error: {0}")]
    Server(#[from] ServerError),
}

/// Result type for test utilities
pub type TestResult<T> = Result<T, TestError>;
