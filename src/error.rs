//! Client error types.

use crate::Response;
use thiserror::Error;

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the client.
#[derive(Debug, Error)]
pub enum Error {
    /// A required setting is missing or malformed. Fatal at construction.
    #[error("invalid configuration for `{key}`: {message}")]
    Configuration {
        /// Name of the offending setting.
        key: &'static str,
        /// What was wrong with it.
        message: String,
    },

    /// The root carries an explicit non-HTTPS scheme while `secure_only` is set.
    #[error("insecure scheme `{0}` rejected: root must use https")]
    InsecureScheme(String),

    /// `authorize` was called with no usable combination of arguments.
    #[error("invalid authorization arguments: {0}")]
    InvalidAuthorizationArgs(String),

    /// The transport failed to complete the exchange. Never retried.
    #[error("transport error: {0}")]
    Transport(String),

    /// The transport succeeded but the response status is outside the
    /// success range. Carries the full response so callers can inspect
    /// status and body.
    #[error("request failed with status {}", .0.status_u16())]
    UnsuccessfulResponse(Response),

    /// Body (de)serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A middleware stage failed, aborting the chain.
    #[error("middleware error: {0}")]
    Middleware(String),
}

impl Error {
    /// HTTP status code, when this error carries a response.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::UnsuccessfulResponse(response) => Some(response.status_u16()),
            _ => None,
        }
    }

    /// The rejected response, when this error carries one.
    pub fn response(&self) -> Option<&Response> {
        match self {
            Self::UnsuccessfulResponse(response) => Some(response),
            _ => None,
        }
    }

    /// Check if this is a transport-level failure.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}
