//! Comment type.

use serde::{Deserialize, Serialize};

use crate::Timestamp;

/// A comment on a post.
///
/// Many-to-one with [`Post`](crate::Post) via `post_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    /// Comment ID (server-assigned).
    pub id: String,
    /// Comment body.
    pub content: String,
    /// Parent post ID.
    #[serde(alias = "postId")]
    pub post_id: String,
    /// Author's user ID.
    #[serde(alias = "authorId")]
    pub author_id: String,
    /// Author's display name.
    #[serde(alias = "authorName")]
    pub author_name: String,
    /// Author's avatar URL, if any.
    #[serde(
        default,
        alias = "authorProfilePicture",
        skip_serializing_if = "Option::is_none"
    )]
    pub author_profile_picture: Option<String>,
    /// Creation time.
    #[serde(alias = "createdAt")]
    pub created_at: Timestamp,
    /// Last update time.
    #[serde(alias = "updatedAt")]
    pub updated_at: Timestamp,
}
