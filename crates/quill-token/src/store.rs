//! Durable single-slot credential storage.
//!
//! Exactly one set of credentials is active per session; last write wins.
//! Two implementations share one interface: [`FileTokenStore`] for
//! deployments and [`InMemoryTokenStore`] for tests. Which one backs a
//! client is chosen at composition time.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use quill_types::User;

use crate::claims;
use crate::error::{Result, TokenError};

/// Credential file name within the data directory.
pub const SESSION_FILE: &str = "auth-session.json";

/// The durable credential record.
///
/// Carries the bearer token, when it was stored, and optionally the user it
/// belongs to so a session can be restored offline before the profile is
/// re-fetched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredCredentials {
    /// The bearer token.
    pub token: String,
    /// When the credentials were written.
    pub stored_at: chrono::DateTime<chrono::Utc>,
    /// The user the token belongs to, for offline bootstrap.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
}

impl StoredCredentials {
    /// Create a record stamped with the current time.
    pub fn new(token: impl Into<String>, user: Option<User>) -> Self {
        Self {
            token: token.into(),
            stored_at: chrono::Utc::now(),
            user,
        }
    }
}

// ============================================================================
// TokenStore Trait
// ============================================================================

/// Trait for credential storage backends.
#[async_trait]
pub trait TokenStore: Send + Sync + std::fmt::Debug {
    /// Persist credentials, replacing any previous record.
    async fn store(&self, credentials: &StoredCredentials) -> Result<()>;

    /// Load the current credentials, if any.
    async fn retrieve(&self) -> Result<Option<StoredCredentials>>;

    /// Delete the stored credentials.
    async fn remove(&self) -> Result<()>;

    /// Whether any credentials are stored (without loading them).
    fn has_credentials(&self) -> bool;

    /// Whether a token is stored and not yet expired.
    async fn is_valid(&self) -> bool {
        match self.retrieve().await {
            Ok(Some(credentials)) => !claims::is_expired(&credentials.token),
            _ => false,
        }
    }
}

/// Shared token store for use across async contexts.
pub type SharedTokenStore = Arc<dyn TokenStore>;

/// Create a shared file-backed store rooted at `data_dir`.
pub fn create_file_store(data_dir: &Path) -> SharedTokenStore {
    Arc::new(FileTokenStore::new(data_dir))
}

/// Create a shared in-memory store (for tests and ephemeral sessions).
pub fn create_memory_store() -> SharedTokenStore {
    Arc::new(InMemoryTokenStore::new())
}

// ============================================================================
// FileTokenStore
// ============================================================================

/// File-backed credential store for production use.
///
/// Writes through to a single JSON file and keeps an in-memory read cache.
#[derive(Debug)]
pub struct FileTokenStore {
    session_path: PathBuf,
    cached: Arc<RwLock<Option<StoredCredentials>>>,
}

impl FileTokenStore {
    /// Create a store writing to [`SESSION_FILE`] under `data_dir`.
    pub fn new(data_dir: &Path) -> Self {
        Self {
            session_path: data_dir.join(SESSION_FILE),
            cached: Arc::new(RwLock::new(None)),
        }
    }

    /// Create a store with a custom file path.
    pub fn with_path(session_path: PathBuf) -> Self {
        Self {
            session_path,
            cached: Arc::new(RwLock::new(None)),
        }
    }

    /// The backing file path.
    pub fn session_path(&self) -> &Path {
        &self.session_path
    }
}

#[async_trait]
impl TokenStore for FileTokenStore {
    async fn store(&self, credentials: &StoredCredentials) -> Result<()> {
        if let Some(parent) = self.session_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                TokenError::Storage(format!("Failed to create credential directory: {}", e))
            })?;
        }

        let json = serde_json::to_string_pretty(credentials).map_err(|e| {
            TokenError::Serialization(format!("Failed to serialize credentials: {}", e))
        })?;

        std::fs::write(&self.session_path, json)
            .map_err(|e| TokenError::Storage(format!("Failed to write credential file: {}", e)))?;

        let mut cache = self.cached.write().await;
        *cache = Some(credentials.clone());

        tracing::debug!(path = %self.session_path.display(), "Credentials saved");
        Ok(())
    }

    async fn retrieve(&self) -> Result<Option<StoredCredentials>> {
        {
            let cache = self.cached.read().await;
            if cache.is_some() {
                return Ok(cache.clone());
            }
        }

        if !self.session_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&self.session_path)
            .map_err(|e| TokenError::Storage(format!("Failed to read credential file: {}", e)))?;

        let credentials: StoredCredentials = serde_json::from_str(&content).map_err(|e| {
            TokenError::Serialization(format!("Failed to parse credential file: {}", e))
        })?;

        let mut cache = self.cached.write().await;
        *cache = Some(credentials.clone());

        Ok(Some(credentials))
    }

    async fn remove(&self) -> Result<()> {
        if self.session_path.exists() {
            std::fs::remove_file(&self.session_path).map_err(|e| {
                TokenError::Storage(format!("Failed to delete credential file: {}", e))
            })?;
        }

        let mut cache = self.cached.write().await;
        *cache = None;

        tracing::debug!(path = %self.session_path.display(), "Credentials removed");
        Ok(())
    }

    fn has_credentials(&self) -> bool {
        self.session_path.exists()
    }
}

// ============================================================================
// InMemoryTokenStore
// ============================================================================

/// In-memory credential store for testing.
#[derive(Debug, Default)]
pub struct InMemoryTokenStore {
    credentials: RwLock<Option<StoredCredentials>>,
}

impl InMemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-seeded with credentials.
    pub fn with_credentials(credentials: StoredCredentials) -> Self {
        Self {
            credentials: RwLock::new(Some(credentials)),
        }
    }
}

#[async_trait]
impl TokenStore for InMemoryTokenStore {
    async fn store(&self, credentials: &StoredCredentials) -> Result<()> {
        let mut slot = self.credentials.write().await;
        *slot = Some(credentials.clone());
        Ok(())
    }

    async fn retrieve(&self) -> Result<Option<StoredCredentials>> {
        let slot = self.credentials.read().await;
        Ok(slot.clone())
    }

    async fn remove(&self) -> Result<()> {
        let mut slot = self.credentials.write().await;
        *slot = None;
        Ok(())
    }

    fn has_credentials(&self) -> bool {
        self.credentials
            .try_read()
            .map(|slot| slot.is_some())
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
    use tempfile::tempdir;

    fn make_token(exp: i64) -> String {
        let claims = serde_json::json!({"user_id": "u1", "exp": exp});
        let payload = URL_SAFE_NO_PAD.encode(claims.to_string().as_bytes());
        format!("h.{}.s", payload)
    }

    #[tokio::test]
    async fn test_file_store_starts_empty() {
        let temp = tempdir().unwrap();
        let store = FileTokenStore::new(temp.path());
        assert!(!store.has_credentials());
        assert!(store.retrieve().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_file_store_round_trip() {
        let temp = tempdir().unwrap();
        let store = FileTokenStore::new(temp.path());

        let credentials = StoredCredentials::new("a.b.c", None);
        store.store(&credentials).await.unwrap();
        assert!(store.has_credentials());

        let loaded = store.retrieve().await.unwrap().unwrap();
        assert_eq!(loaded.token, "a.b.c");
    }

    #[tokio::test]
    async fn test_file_store_survives_new_instance() {
        let temp = tempdir().unwrap();

        let store = FileTokenStore::new(temp.path());
        store
            .store(&StoredCredentials::new("a.b.c", None))
            .await
            .unwrap();

        // A fresh instance with a cold cache reads from disk.
        let reopened = FileTokenStore::new(temp.path());
        let loaded = reopened.retrieve().await.unwrap().unwrap();
        assert_eq!(loaded.token, "a.b.c");
    }

    #[tokio::test]
    async fn test_file_store_remove_deletes_file() {
        let temp = tempdir().unwrap();
        let store = FileTokenStore::new(temp.path());

        store
            .store(&StoredCredentials::new("a.b.c", None))
            .await
            .unwrap();
        assert!(store.session_path().exists());

        store.remove().await.unwrap();
        assert!(!store.session_path().exists());
        assert!(store.retrieve().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_last_write_wins() {
        let store = InMemoryTokenStore::new();

        store
            .store(&StoredCredentials::new("first.t.k", None))
            .await
            .unwrap();
        store
            .store(&StoredCredentials::new("second.t.k", None))
            .await
            .unwrap();

        let loaded = store.retrieve().await.unwrap().unwrap();
        assert_eq!(loaded.token, "second.t.k");
    }

    #[tokio::test]
    async fn test_is_valid_with_future_token() {
        let token = make_token(chrono::Utc::now().timestamp() + 3600);
        let store = InMemoryTokenStore::with_credentials(StoredCredentials::new(token, None));
        assert!(store.is_valid().await);
    }

    #[tokio::test]
    async fn test_is_valid_with_expired_token() {
        let token = make_token(chrono::Utc::now().timestamp() - 10);
        let store = InMemoryTokenStore::with_credentials(StoredCredentials::new(token, None));
        assert!(!store.is_valid().await);
    }

    #[tokio::test]
    async fn test_is_valid_with_no_credentials() {
        let store = InMemoryTokenStore::new();
        assert!(!store.is_valid().await);
    }
}
