//! Posts API.

use quill_types::{CreatePostRequest, Post, UpdatePostRequest};

use crate::client::{Auth, QuillClient};
use crate::error::Result;

/// Posts API client.
pub struct PostsApi {
    client: QuillClient,
}

impl PostsApi {
    pub(crate) fn new(client: QuillClient) -> Self {
        Self { client }
    }

    /// List all posts.
    pub async fn list(&self) -> Result<Vec<Post>> {
        self.client.get("posts", Auth::None).await
    }

    /// Get a post by ID.
    pub async fn get(&self, id: &str) -> Result<Post> {
        self.client.get(&format!("posts/{}", id), Auth::None).await
    }

    /// Create a new post.
    pub async fn create(&self, request: CreatePostRequest) -> Result<Post> {
        self.client.post("posts", &request, Auth::Required).await
    }

    /// Update a post.
    pub async fn update(&self, id: &str, request: UpdatePostRequest) -> Result<Post> {
        self.client
            .put(&format!("posts/{}", id), &request, Auth::Required)
            .await
    }

    /// Delete a post.
    pub async fn delete(&self, id: &str) -> Result<()> {
        self.client
            .delete(&format!("posts/{}", id), Auth::Required)
            .await
    }
}
