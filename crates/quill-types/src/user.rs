//! User account type.

use serde::{Deserialize, Serialize};

use crate::Timestamp;

/// A registered user.
///
/// There is deliberately no password field: the wire record returned by
/// `/auth/login` and `/auth/register` may carry one, but it is dropped at
/// the deserialization boundary and never held client-side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// User ID.
    pub id: String,
    /// Email address (unique server-side).
    pub email: String,
    /// Display name.
    pub name: String,
    /// Optional avatar URL.
    #[serde(
        default,
        alias = "profilePicture",
        skip_serializing_if = "Option::is_none"
    )]
    pub profile_picture: Option<String>,
    /// Account creation time.
    #[serde(alias = "createdAt")]
    pub created_at: Timestamp,
}
