//! Error types for session operations.

use thiserror::Error;

/// Result type for session operations.
pub type Result<T> = std::result::Result<T, SessionError>;

/// Errors surfaced by [`AuthSession`](crate::AuthSession).
#[derive(Debug, Error)]
pub enum SessionError {
    /// Client-side form check failed; no network call was made.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Bad credentials on login or register.
    #[error("Authentication failed: {0}")]
    AuthFailed(String),

    /// The operation requires an authenticated session.
    #[error("Not authenticated")]
    NotAuthenticated,

    /// Credential store failure.
    #[error("Credential store error: {0}")]
    Store(#[from] quill_token::TokenError),

    /// Any other API failure.
    #[error("API error: {0}")]
    Api(quill_client::Error),
}

impl From<quill_client::Error> for SessionError {
    fn from(e: quill_client::Error) -> Self {
        match e {
            quill_client::Error::AuthFailed(message) => SessionError::AuthFailed(message),
            other => SessionError::Api(other),
        }
    }
}

impl SessionError {
    /// Check if this is a client-side validation error.
    pub fn is_validation(&self) -> bool {
        matches!(self, SessionError::Validation(_))
    }

    /// Check if this is a bad-credentials error.
    pub fn is_auth_failed(&self) -> bool {
        matches!(self, SessionError::AuthFailed(_))
    }
}
