//! Error types for the API gateway and browser storage.
//!
//! ERROR HANDLING
//! ==============
//! Storage errors never leave the session core: they are logged and treated
//! as absence. API errors reach pages, which turn them into a user-facing
//! message through [`ApiError::user_message`].

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use std::time::Duration;

/// Failure of a request sent through the API gateway.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),
    #[error("request timed out after {}s", .0.as_secs())]
    Timeout(Duration),
    #[error("authorization rejected: {status}")]
    Unauthorized { status: u16, message: Option<String> },
    #[error("request failed: {status}")]
    Status { status: u16, message: Option<String> },
    #[error("invalid request body: {0}")]
    Encode(String),
    #[error("invalid response body: {0}")]
    Decode(String),
    #[error("not available on server")]
    Unavailable,
}

impl ApiError {
    /// Message to show the user: the server's own `message` when it sent one,
    /// otherwise `default`.
    pub fn user_message(&self, default: &str) -> String {
        match self {
            Self::Unauthorized { message: Some(message), .. } | Self::Status { message: Some(message), .. }
                if !message.trim().is_empty() =>
            {
                message.clone()
            }
            Self::Timeout(_) => "The server took too long to respond. Please try again.".to_owned(),
            _ => default.to_owned(),
        }
    }

    /// HTTP status carried by the error, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized { status, .. } | Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Failure of a cookie or `localStorage` operation.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage unavailable")]
    Unavailable,
    #[error("storage rejected operation: {0}")]
    Rejected(String),
    #[error("snapshot encoding failed: {0}")]
    Encode(#[from] serde_json::Error),
}
