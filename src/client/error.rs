//! Error types for the employee API client.

use thiserror::Error;

/// Shown when the server did not explain a failure.
pub const GENERIC_ERROR_MESSAGE: &str = "An error occurred. Please try again.";

#[derive(Debug, Error)]
pub enum ClientError {
    /// The request never produced a usable response.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("API error (status {status}): {}", .message.as_deref().unwrap_or("no message"))]
    Api {
        status: u16,
        /// The `error` field of the response body, when there was one.
        message: Option<String>,
    },

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl ClientError {
    /// The server's own message verbatim, or a generic retry prompt.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Api {
                message: Some(message),
                ..
            } => message.clone(),
            _ => GENERIC_ERROR_MESSAGE.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;
