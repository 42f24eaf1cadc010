//! Error types for the Lynx API client.

use thiserror::Error;

/// Result type using LynxError.
pub type Result<T> = std::result::Result<T, LynxError>;

/// Errors that can occur when talking to the Lynx API.
#[derive(Debug, Error)]
pub enum LynxError {
    /// Transport-level failure: timeout, connection refused, DNS, body read.
    #[error("network error: {0}")]
    Network(String),

    /// The API answered with a status code >= 400.
    #[error("status: {status}, body: {body}")]
    Api { status: u16, body: String },

    /// A model could not be encoded, or a response could not be decoded.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Missing or invalid connection parameters (API URL, API key).
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A value needed to build the request is missing or malformed.
    #[error("validation error: {0}")]
    Validation(String),
}

impl LynxError {
    /// HTTP status code for API errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            LynxError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True when the error was raised locally, before any request left the process.
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            LynxError::Configuration(_) | LynxError::Validation(_) | LynxError::Serialization(_)
        )
    }
}

impl From<serde_json::Error> for LynxError {
    fn from(err: serde_json::Error) -> Self {
        LynxError::Serialization(err.to_string())
    }
}

impl From<reqwest::Error> for LynxError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            LynxError::Network(format!("request timed out: {}", err))
        } else if err.is_builder() {
            LynxError::Configuration(err.to_string())
        } else {
            LynxError::Network(err.to_string())
        }
    }
}
