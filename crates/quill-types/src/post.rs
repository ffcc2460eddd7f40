//! Blog post type.

use serde::{Deserialize, Serialize};

use crate::Timestamp;

/// A markdown blog post.
///
/// Identity is immutable after creation; everything else is mutated only
/// through create/update/delete round trips against the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    /// Post ID (server-assigned).
    pub id: String,
    /// Post title.
    pub title: String,
    /// Markdown body.
    pub content: String,
    /// Short summary shown in listings.
    pub excerpt: String,
    /// Optional category label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Author's user ID.
    #[serde(alias = "authorId")]
    pub author_id: String,
    /// Author's display name (denormalized for listings).
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snake_case_wire_record() {
        let wire = r##"{
            "id": "p1",
            "title": "Hello",
            "content": "# Hello\nworld",
            "excerpt": "Hello",
            "category": "intro",
            "author_id": "u1",
            "author_name": "John Doe",
            "created_at": "2024-01-01T00:00:00Z",
            "updated_at": "2024-01-02T00:00:00Z"
        }"##;

        let post: Post = serde_json::from_str(wire).unwrap();
        assert_eq!(post.author_id, "u1");
        assert_eq!(post.category.as_deref(), Some("intro"));
    }

    #[test]
    fn test_camel_case_wire_record() {
        let wire = r#"{
            "id": "p2",
            "title": "Hi",
            "content": "hi",
            "excerpt": "hi",
            "authorId": "u2",
            "authorName": "Jane",
            "createdAt": "2024-01-01T00:00:00Z",
            "updatedAt": "2024-01-01T00:00:00Z"
        }"#;

        let post: Post = serde_json::from_str(wire).unwrap();
        assert_eq!(post.author_id, "u2");
        assert!(post.category.is_none());
    }
}
