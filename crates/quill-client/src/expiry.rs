//! Session-expiry notification.

use std::sync::Arc;

use parking_lot::RwLock;

/// Registry of session-expiry subscribers.
///
/// The gateway fires this when it detects a dead session, either by the
/// local expiry short-circuit or by a 401 from the server. A registry of
/// listeners rather than a single overwritable callback slot, so multiple
/// consumers can react to the same event. Callbacks must be idempotent:
/// both detection paths can fire for the same session.
#[derive(Clone, Default)]
pub struct ExpiryListeners {
    listeners: Arc<RwLock<Vec<Arc<dyn Fn() + Send + Sync>>>>,
}

impl ExpiryListeners {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback invoked on every expiry detection.
    pub fn subscribe(&self, listener: impl Fn() + Send + Sync + 'static) {
        self.listeners.write().push(Arc::new(listener));
    }

    /// Notify all subscribers.
    pub fn notify(&self) {
        let listeners: Vec<_> = self.listeners.read().iter().cloned().collect();
        tracing::debug!(count = listeners.len(), "Session expired, notifying listeners");
        for listener in listeners {
            listener();
        }
    }

    /// Number of registered listeners.
    pub fn len(&self) -> usize {
        self.listeners.read().len()
    }

    /// Whether any listeners are registered.
    pub fn is_empty(&self) -> bool {
        self.listeners.read().is_empty()
    }
}

impl std::fmt::Debug for ExpiryListeners {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExpiryListeners")
            .field("listeners", &self.len())
            .finish()
    }
}
