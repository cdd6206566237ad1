//! REST client error types

use thiserror::Error;

/// Errors that can occur while building the client or issuing requests
#[derive(Debug, Error)]
pub enum HttpError {
    /// Node answered with a non-success status while [`crate::StatusPolicy::Reject`] is active
    #[error("HTTP error ({status}): {message}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body text
        message: String,
    },
    /// Failure reported by the transport (connect, timeout, body read)
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),
    /// Body could not be encoded or decoded as JSON
    #[error("Serialization error: {0}")]
    Serialization(String),
    /// Endpoint could not be joined onto the node URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
    /// Client options are malformed
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    /// Options file could not be loaded
    #[error("Settings error: {0}")]
    Settings(#[from] config::ConfigError),
}

impl HttpError {
    /// Whether the transport gave up waiting for the node
    pub fn is_timeout(&self) -> bool {
        matches!(self, HttpError::Transport(err) if err.is_timeout())
    }

    /// Whether the transport could not reach the node at all
    pub fn is_connect(&self) -> bool {
        matches!(self, HttpError::Transport(err) if err.is_connect())
    }

    /// HTTP status associated with the failure, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            HttpError::Status { status, .. } => Some(*status),
            HttpError::Transport(err) => err.status().map(|status| status.as_u16()),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for HttpError {
    fn from(err: serde_json::Error) -> Self {
        HttpError::Serialization(err.to_string())
    }
}

impl From<url::ParseError> for HttpError {
    fn from(err: url::ParseError) -> Self {
        HttpError::InvalidUrl(err.to_string())
    }
}
