//! Error types for token storage.

/// Result type alias for this crate.
pub type Result<T> = std::result::Result<T, TokenError>;

/// Errors that can occur while persisting or loading credentials.
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    /// Underlying storage failed (filesystem, permissions, ...).
    #[error("Storage error: {0}")]
    Storage(String),

    /// Credential record could not be serialized or parsed.
    #[error("Serialization error: {0}")]
    Serialization(String),
}
