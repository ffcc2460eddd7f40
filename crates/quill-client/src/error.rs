//! Client error types.

use thiserror::Error;

/// Client error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Transport-level failure (no response, or an unreadable one).
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// URL parsing failed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The session's token is missing, expired, or was rejected.
    #[error("Session expired: {0}")]
    SessionExpired(String),

    /// Bad credentials on login or register. Unlike [`Error::SessionExpired`],
    /// this does not invalidate an existing session.
    #[error("Authentication failed: {0}")]
    AuthFailed(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Server returned a non-2xx response.
    #[error("Request failed ({status}): {message}")]
    RequestFailed {
        /// HTTP status code.
        status: u16,
        /// Server-provided message, or a generic fallback.
        message: String,
    },

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Credential store failure.
    #[error("Credential store error: {0}")]
    Store(#[from] quill_token::TokenError),
}

impl Error {
    /// Check if this is a not-found error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_))
    }

    /// Check if this is a session-expired error.
    pub fn is_session_expired(&self) -> bool {
        matches!(self, Error::SessionExpired(_))
    }

    /// Check if this is a bad-credentials error.
    pub fn is_auth_failed(&self) -> bool {
        matches!(self, Error::AuthFailed(_))
    }

    /// Check if this is a server error.
    pub fn is_server_error(&self) -> bool {
        matches!(self, Error::RequestFailed { status, .. } if *status >= 500)
    }
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error body shape returned by the server.
///
/// Different backends name the field `message`, `detail`, or `error`.
#[derive(Debug, serde::Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(alias = "detail", alias = "error")]
    pub message: String,
}
