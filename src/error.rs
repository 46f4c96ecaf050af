use crate::routes::{HttpMethod, Operation};
use reqwest::StatusCode;
use thiserror::Error;

/// Failure of a single API request, forwarded as the HTTP layer reported it.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("API error ({status}): {body}")]
    Status { status: StatusCode, body: String },

    #[error("Failed to parse response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// A read handle was requested for a write operation or the reverse.
    #[error("{operation} is a {method} operation and cannot be used as a {handle}")]
    WrongHandle {
        operation: Operation,
        method: HttpMethod,
        handle: &'static str,
    },
}

impl ApiError {
    /// HTTP status of the failed response, if one was received.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Transport(e) => e.status(),
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Decode(_) | ApiError::WrongHandle { .. } => None,
        }
    }
}
