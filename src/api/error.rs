//! API client error types.

use thiserror::Error;

/// Result type for DataForSEO API calls.
pub type ApiResult<T> = Result<T, ApiError>;

/// Errors returned by an [`ApiClient`](super::ApiClient).
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request could not be sent or the body could not be read.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success HTTP status.
    #[error("DataForSEO API returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// The request URL could not be built from the base URL and path.
    #[error("Invalid URL '{0}'")]
    InvalidUrl(String),

    /// The client configuration is unusable (e.g. credentials with invalid header characters).
    #[error("Client configuration error: {0}")]
    Config(String),
}

impl ApiError {
    /// Create a status error.
    pub fn status(status: u16, body: impl Into<String>) -> Self {
        Self::Status {
            status,
            body: body.into(),
        }
    }

    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// HTTP status code, when the API answered at all.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
