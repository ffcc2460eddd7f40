//! Configuration for session monitoring.

use std::time::Duration;

/// Default interval between session checks.
pub const DEFAULT_CHECK_INTERVAL: Duration = Duration::from_secs(60);

/// Configuration for the session monitor.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Interval between stored-token checks. The first check runs
    /// immediately when the monitor starts.
    pub check_interval: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            check_interval: DEFAULT_CHECK_INTERVAL,
        }
    }
}

impl SessionConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the interval between session checks.
    pub fn with_check_interval(mut self, interval: Duration) -> Self {
        self.check_interval = interval;
        self
    }
}
