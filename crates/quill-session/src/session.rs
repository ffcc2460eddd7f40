//! Auth session implementation.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::RwLock;

use quill_client::QuillClient;
use quill_token::{SharedTokenStore, StoredCredentials, TokenStore, claims};
use quill_types::{AuthResponse, LoginRequest, RegisterRequest, UpdateProfileRequest, User};

use crate::config::SessionConfig;
use crate::error::{Result, SessionError};
use crate::monitor::SessionMonitor;
use crate::state::SessionState;
use crate::status::SessionStatus;
use crate::validate;

/// The auth session: current user, token lifecycle, expiry monitoring.
///
/// Cheap to clone; clones share state. Owns the [`User`] while logged in
/// and destroys it on logout. Construction wires the client's 401 detection
/// and the monitor's clock-based detection onto the same idempotent
/// cleanup.
#[derive(Clone)]
pub struct AuthSession {
    inner: Arc<SessionInner>,
}

pub(crate) struct SessionInner {
    pub(crate) client: QuillClient,
    pub(crate) store: SharedTokenStore,
    pub(crate) state: RwLock<SessionState>,
    /// Set when the session ended involuntarily; surfaced as a transient
    /// notice and cleared by the next successful login.
    pub(crate) session_expired: AtomicBool,
    pub(crate) monitor: SessionMonitor,
    pub(crate) config: SessionConfig,
}

impl SessionInner {
    /// In-memory half of expiry cleanup. The credential store is cleared by
    /// whichever path detected the dead session. Safe to invoke twice.
    pub(crate) fn mark_expired(&self) {
        {
            let mut state = self.state.write();
            match &*state {
                SessionState::Authenticated(_) | SessionState::Authenticating => {
                    *state = SessionState::Expired;
                    self.session_expired.store(true, Ordering::SeqCst);
                }
                SessionState::Expired | SessionState::Anonymous => {}
            }
        }
        self.monitor.stop();
    }
}

impl AuthSession {
    /// Create a session over `client` with the default monitor interval.
    pub fn new(client: QuillClient) -> Self {
        Self::with_config(client, SessionConfig::default())
    }

    /// Create a session with a custom configuration.
    pub fn with_config(client: QuillClient, config: SessionConfig) -> Self {
        let store = client.token_store();
        let inner = Arc::new(SessionInner {
            client: client.clone(),
            store,
            state: RwLock::new(SessionState::Anonymous),
            session_expired: AtomicBool::new(false),
            monitor: SessionMonitor::new(),
            config,
        });

        // The gateway's 401 path converges here; it has already cleared the
        // credential store by the time listeners fire.
        let weak = Arc::downgrade(&inner);
        client.on_session_expired(move || {
            if let Some(inner) = weak.upgrade() {
                inner.mark_expired();
            }
        });

        Self { inner }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // State accessors
    // ─────────────────────────────────────────────────────────────────────────

    /// The current session state.
    pub fn state(&self) -> SessionState {
        self.inner.state.read().clone()
    }

    /// The logged-in user, if any.
    pub fn user(&self) -> Option<User> {
        self.inner.state.read().user().cloned()
    }

    /// Whether a user is logged in.
    pub fn is_authenticated(&self) -> bool {
        self.inner.state.read().is_authenticated()
    }

    /// Whether the session ended involuntarily since the last login.
    pub fn session_expired(&self) -> bool {
        self.inner.session_expired.load(Ordering::SeqCst)
    }

    /// Dismiss the session-expired notice.
    pub fn acknowledge_session_expired(&self) {
        self.inner.session_expired.store(false, Ordering::SeqCst);
    }

    /// The expiry monitor.
    pub fn monitor(&self) -> &SessionMonitor {
        &self.inner.monitor
    }

    /// Snapshot of the stored token's lifetime, for display.
    pub async fn status(&self) -> SessionStatus {
        match self.inner.store.retrieve().await {
            Ok(Some(credentials)) => SessionStatus::from_token(Some(&credentials.token)),
            _ => SessionStatus::inactive(),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Session lifecycle
    // ─────────────────────────────────────────────────────────────────────────

    /// Restore a previous session from durable storage.
    ///
    /// A valid stored token restores the persisted user immediately (offline
    /// bootstrap), then refreshes the profile from the server; a failed
    /// refresh invalidates the session. An expired stored token is cleared
    /// without a network call.
    pub async fn bootstrap(&self) -> Option<User> {
        let credentials = match self.inner.store.retrieve().await {
            Ok(Some(credentials)) => credentials,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read stored credentials");
                return None;
            }
        };

        if claims::is_expired(&credentials.token) {
            tracing::debug!("Stored token expired, clearing without a network call");
            if let Err(e) = self.inner.store.remove().await {
                tracing::warn!(error = %e, "Failed to clear credential store");
            }
            return None;
        }

        if let Some(user) = credentials.user.clone() {
            *self.inner.state.write() = SessionState::Authenticated(user);
        }

        match self.inner.client.auth().me().await {
            Ok(user) => {
                *self.inner.state.write() = SessionState::Authenticated(user.clone());
                let refreshed = StoredCredentials {
                    user: Some(user.clone()),
                    ..credentials
                };
                if let Err(e) = self.inner.store.store(&refreshed).await {
                    tracing::warn!(error = %e, "Failed to persist refreshed profile");
                }
                self.start_monitor();
                tracing::info!(user_id = %user.id, "Session restored");
                Some(user)
            }
            Err(e) => {
                tracing::debug!(error = %e, "Profile fetch failed, treating session as invalid");
                if let Err(e) = self.inner.store.remove().await {
                    tracing::warn!(error = %e, "Failed to clear credential store");
                }
                *self.inner.state.write() = SessionState::Anonymous;
                self.inner.session_expired.store(false, Ordering::SeqCst);
                self.inner.monitor.stop();
                None
            }
        }
    }

    /// Log in with email and password.
    ///
    /// Validation failures are reported before any network call. A failed
    /// login leaves the previous session state untouched.
    pub async fn login(&self, email: &str, password: &str) -> Result<User> {
        validate::require_non_empty(email, "Email")?;
        validate::require_email_shape(email)?;
        validate::require_non_empty(password, "Password")?;

        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };

        let prior = self.begin_authenticating();
        let outcome = match self.inner.client.auth().login(request).await {
            Ok(response) => self.complete_auth(response).await,
            Err(e) => Err(e.into()),
        };
        if outcome.is_err() {
            self.restore_state(prior);
        }
        outcome
    }

    /// Register a new account and log in.
    ///
    /// The server's uniqueness and validity checks are authoritative; the
    /// client only pre-validates the obvious cases.
    pub async fn register(&self, email: &str, password: &str, name: &str) -> Result<User> {
        validate::require_non_empty(email, "Email")?;
        validate::require_email_shape(email)?;
        validate::require_password_length(password)?;
        validate::require_non_empty(name, "Name")?;

        let request = RegisterRequest {
            email: email.to_string(),
            password: password.to_string(),
            name: name.to_string(),
        };

        let prior = self.begin_authenticating();
        let outcome = match self.inner.client.auth().register(request).await {
            Ok(response) => self.complete_auth(response).await,
            Err(e) => Err(e.into()),
        };
        if outcome.is_err() {
            self.restore_state(prior);
        }
        outcome
    }

    /// End the session.
    ///
    /// The server call is best-effort; local state is cleared regardless of
    /// its outcome.
    pub async fn logout(&self) {
        if let Err(e) = self.inner.client.auth().logout().await {
            tracing::debug!(error = %e, "Logout request failed, clearing local session anyway");
        }

        *self.inner.state.write() = SessionState::Anonymous;
        self.inner.session_expired.store(false, Ordering::SeqCst);
        if let Err(e) = self.inner.store.remove().await {
            tracing::warn!(error = %e, "Failed to clear credential store on logout");
        }
        self.inner.monitor.stop();
    }

    /// Update the logged-in user's display name and avatar.
    ///
    /// A failed update keeps the current profile and reports nothing: the
    /// caller can resubmit.
    pub async fn update_profile(&self, name: &str, profile_picture: Option<String>) -> Result<()> {
        let current = self.user().ok_or(SessionError::NotAuthenticated)?;
        validate::require_non_empty(name, "Name")?;

        let request = UpdateProfileRequest {
            name: name.to_string(),
            profile_picture,
        };

        match self.inner.client.auth().update_profile(request).await {
            Ok(updated) => {
                // Name and picture from the server; identity and created_at
                // stay as they were.
                let user = User {
                    name: updated.name,
                    profile_picture: updated.profile_picture,
                    ..current
                };
                *self.inner.state.write() = SessionState::Authenticated(user.clone());

                if let Ok(Some(mut credentials)) = self.inner.store.retrieve().await {
                    credentials.user = Some(user);
                    if let Err(e) = self.inner.store.store(&credentials).await {
                        tracing::warn!(error = %e, "Failed to persist updated profile");
                    }
                }
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "Profile update failed, keeping current profile");
                Ok(())
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Internals
    // ─────────────────────────────────────────────────────────────────────────

    fn begin_authenticating(&self) -> SessionState {
        std::mem::replace(&mut *self.inner.state.write(), SessionState::Authenticating)
    }

    fn restore_state(&self, prior: SessionState) {
        *self.inner.state.write() = prior;
    }

    async fn complete_auth(&self, response: AuthResponse) -> Result<User> {
        let user = response.user;
        let credentials = StoredCredentials::new(response.token, Some(user.clone()));
        self.inner.store.store(&credentials).await?;

        *self.inner.state.write() = SessionState::Authenticated(user.clone());
        self.inner.session_expired.store(false, Ordering::SeqCst);
        self.start_monitor();

        tracing::info!(user_id = %user.id, "Session established");
        Ok(user)
    }

    fn start_monitor(&self) {
        self.inner
            .monitor
            .start(Arc::downgrade(&self.inner), self.inner.config.check_interval);
    }
}
