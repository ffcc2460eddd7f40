//! Session state machine.

use quill_types::User;

/// The auth session's current state.
///
/// Transitions: `Anonymous → Authenticating → Authenticated` on login,
/// `Authenticated → Expired` on expiry detection, and anything back to
/// `Anonymous` on logout.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    /// No user logged in.
    Anonymous,
    /// A login or register call is in flight.
    Authenticating,
    /// Logged in.
    Authenticated(User),
    /// The session ended because the token expired or was rejected.
    Expired,
}

impl SessionState {
    /// Whether a user is logged in.
    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionState::Authenticated(_))
    }

    /// The logged-in user, if any.
    pub fn user(&self) -> Option<&User> {
        match self {
            SessionState::Authenticated(user) => Some(user),
            _ => None,
        }
    }
}
