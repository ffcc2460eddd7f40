//! Session status reporting.

use chrono::{DateTime, Utc};

use quill_token::claims;

/// A snapshot of the current session's token lifetime, for display.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionStatus {
    /// Whether a non-expired token is present.
    pub is_active: bool,
    /// Seconds until the token expires (0 when inactive).
    pub time_remaining: u64,
    /// When the token expires, if it decodes.
    pub expiration_date: Option<DateTime<Utc>>,
    /// Whether the token expires within the warning window.
    pub is_expiring_soon: bool,
}

impl SessionStatus {
    /// Snapshot for a session with no token.
    pub fn inactive() -> Self {
        Self {
            is_active: false,
            time_remaining: 0,
            expiration_date: None,
            is_expiring_soon: false,
        }
    }

    /// Build a snapshot from an optional stored token.
    pub fn from_token(token: Option<&str>) -> Self {
        match token {
            None => Self::inactive(),
            Some(token) => {
                let time_remaining = claims::time_remaining(token);
                Self {
                    is_active: time_remaining > 0,
                    time_remaining,
                    expiration_date: claims::expiration_date(token),
                    is_expiring_soon: claims::is_expiring_soon(token),
                }
            }
        }
    }

    /// Time remaining formatted for display.
    pub fn time_remaining_display(&self) -> String {
        format_time_remaining(self.time_remaining)
    }
}

/// Format a duration in seconds as a compact `2d 3h` / `5m 12s` string.
pub fn format_time_remaining(seconds: u64) -> String {
    let days = seconds / 86_400;
    let hours = (seconds % 86_400) / 3_600;
    let minutes = (seconds % 3_600) / 60;
    let secs = seconds % 60;

    if days > 0 {
        format!("{}d {}h", days, hours)
    } else if hours > 0 {
        format!("{}h {}m", hours, minutes)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, secs)
    } else {
        format!("{}s", secs)
    }
}
