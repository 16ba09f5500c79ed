//! API client error types

use thiserror::Error;

/// Errors surfaced by the inventory API client
#[derive(Error, Debug)]
pub enum ApiError {
    /// Server unreachable or connection dropped
    #[error("Network error: {0}")]
    Network(String),

    /// Request exceeded the configured timeout
    #[error("Request timed out")]
    Timeout,

    /// Non-2xx response; `message` is the server's `error`/`message` text
    #[error("{message}")]
    Status { status: u16, message: String },

    /// Response body did not match the expected shape
    #[error("Parse error: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ApiError::Timeout
        } else if e.is_decode() {
            ApiError::Decode(e.to_string())
        } else {
            ApiError::Network(e.to_string())
        }
    }
}

/// Result type alias for API calls
pub type ApiResult<T> = Result<T, ApiError>;
