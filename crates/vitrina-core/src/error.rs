use thiserror::Error;

/// Application-wide error types for vitrina.
#[derive(Error, Debug)]
pub enum AppError {
    /// URL rejected at enqueue time (malformed or unsupported scheme).
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// HTTP request failed (fetching a page, non-2xx response).
    #[error("HTTP error: {0}")]
    HttpError(String),

    /// Request timed out.
    #[error("Request timed out after {0} seconds")]
    Timeout(u64),

    /// Network/connection error.
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Database operation failed.
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// Startup configuration problem.
    #[error("Config error: {0}")]
    ConfigError(String),

    /// JSON serialization/deserialization failed.
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// Generic error.
    #[error("{0}")]
    Generic(String),
}

impl AppError {
    /// Returns true if this error came from the page-fetch transport.
    ///
    /// Transport errors are downgraded to a `failed` job by the worker;
    /// they never propagate out of the loop.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            AppError::HttpError(_) | AppError::Timeout(_) | AppError::NetworkError(_)
        )
    }
}
