//! Periodic session expiry monitoring.

use std::sync::Weak;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::task::JoinHandle;

use quill_token::{TokenStore as _, claims};

use crate::session::SessionInner;

/// Watches the stored token and ends the session when it goes stale.
///
/// Single-use per session: once expiry fires the task ends, and the next
/// login starts a fresh watch.
pub struct SessionMonitor {
    handle: Mutex<Option<JoinHandle<()>>>,
}

impl SessionMonitor {
    pub(crate) fn new() -> Self {
        Self {
            handle: Mutex::new(None),
        }
    }

    /// Whether a watch task is currently live.
    pub fn is_running(&self) -> bool {
        self.handle
            .lock()
            .as_ref()
            .map(|handle| !handle.is_finished())
            .unwrap_or(false)
    }

    /// Start watching the stored token, replacing any previous watch.
    ///
    /// The first check runs immediately, then every `check_interval`.
    pub(crate) fn start(&self, session: Weak<SessionInner>, check_interval: Duration) {
        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(check_interval);
            loop {
                ticker.tick().await;
                let Some(inner) = session.upgrade() else { break };
                if Self::check(&inner).await {
                    break;
                }
            }
        });

        let mut handle = self.handle.lock();
        if let Some(previous) = handle.replace(task) {
            previous.abort();
        }
    }

    /// Run one expiry check. Returns true when the session ended.
    async fn check(inner: &SessionInner) -> bool {
        let active = inner.state.read().is_authenticated();

        match inner.store.retrieve().await {
            Ok(Some(credentials)) => {
                if claims::is_expired(&credentials.token) {
                    tracing::debug!("Stored token expired, ending session");
                    if let Err(e) = inner.store.remove().await {
                        tracing::warn!(error = %e, "Failed to clear credential store on expiry");
                    }
                    inner.mark_expired();
                    return true;
                }
                false
            }
            Ok(None) if active => {
                tracing::debug!("Credentials missing while session active, ending session");
                inner.mark_expired();
                true
            }
            Ok(None) => false,
            Err(e) => {
                tracing::warn!(error = %e, "Session check failed");
                false
            }
        }
    }

    /// Abort the watch.
    pub(crate) fn stop(&self) {
        if let Some(handle) = self.handle.lock().take() {
            handle.abort();
        }
    }
}

impl std::fmt::Debug for SessionMonitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionMonitor")
            .field("running", &self.is_running())
            .finish()
    }
}
