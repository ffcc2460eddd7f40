//! Comments API.

use quill_types::{Comment, CreateCommentRequest, UpdateCommentRequest};

use crate::client::{Auth, QuillClient};
use crate::error::Result;

/// Comments API client.
pub struct CommentsApi {
    client: QuillClient,
}

impl CommentsApi {
    pub(crate) fn new(client: QuillClient) -> Self {
        Self { client }
    }

    /// List comments for a post.
    pub async fn list_for_post(&self, post_id: &str) -> Result<Vec<Comment>> {
        self.client
            .get(&format!("posts/{}/comments", post_id), Auth::None)
            .await
    }

    /// Create a comment on a post.
    pub async fn create(&self, post_id: &str, request: CreateCommentRequest) -> Result<Comment> {
        self.client
            .post(&format!("posts/{}/comments", post_id), &request, Auth::Required)
            .await
    }

    /// Update a comment.
    pub async fn update(&self, id: &str, request: UpdateCommentRequest) -> Result<Comment> {
        self.client
            .put(&format!("comments/{}", id), &request, Auth::Required)
            .await
    }

    /// Delete a comment.
    pub async fn delete(&self, id: &str) -> Result<()> {
        self.client
            .delete(&format!("comments/{}", id), Auth::Required)
            .await
    }
}
