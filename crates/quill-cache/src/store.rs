//! Content store implementation.

use std::sync::Arc;

use parking_lot::RwLock;

use quill_client::{Error, QuillClient, Result};
use quill_types::{
    Comment, CreateCommentRequest, CreatePostRequest, Post, UpdateCommentRequest,
    UpdatePostRequest,
};

/// Collections guarded by one lock.
#[derive(Debug, Default)]
struct ContentInner {
    posts: Vec<Post>,
    comments: Vec<Comment>,
}

/// In-memory cache of posts and comments, synchronized through the API.
///
/// Lookups are synchronous and never touch the network; mutations round-trip
/// through the server and reconcile the cache afterwards. Cheap to clone;
/// clones share the collections.
#[derive(Clone)]
pub struct ContentStore {
    client: QuillClient,
    inner: Arc<RwLock<ContentInner>>,
}

impl ContentStore {
    /// Create an empty store over `client`.
    pub fn new(client: QuillClient) -> Self {
        Self {
            client,
            inner: Arc::new(RwLock::new(ContentInner::default())),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Refresh
    // ─────────────────────────────────────────────────────────────────────────

    /// Re-fetch all posts, replacing the whole collection.
    ///
    /// Full replace, not a merge: a post the server no longer returns
    /// disappears from the cache even if it was created locally since.
    pub async fn refresh_posts(&self) -> Result<()> {
        let posts = self.client.posts().list().await?;
        tracing::debug!(count = posts.len(), "Refreshed post collection");
        self.inner.write().posts = posts;
        Ok(())
    }

    /// Re-fetch the comments of one post.
    ///
    /// Cached comments for that post are replaced by the fresh set;
    /// comments for other posts are untouched.
    pub async fn refresh_comments(&self, post_id: &str) -> Result<()> {
        let fresh = self.client.comments().list_for_post(post_id).await?;
        tracing::debug!(post_id = %post_id, count = fresh.len(), "Refreshed comments");

        let mut inner = self.inner.write();
        inner.comments.retain(|comment| comment.post_id != post_id);
        inner.comments.extend(fresh);
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Post mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Create a post, then reconcile the post collection.
    pub async fn create_post(&self, request: CreatePostRequest) -> Result<Post> {
        let post = self.client.posts().create(request).await?;
        self.refresh_posts().await?;
        Ok(post)
    }

    /// Update a post, then reconcile the post collection.
    pub async fn update_post(&self, id: &str, request: UpdatePostRequest) -> Result<Post> {
        let post = self.client.posts().update(id, request).await?;
        self.refresh_posts().await?;
        Ok(post)
    }

    /// Delete a post and drop its comments from the cache.
    ///
    /// The comment cascade is client-side only; a shared backend must
    /// enforce the authoritative cascade itself.
    pub async fn delete_post(&self, id: &str) -> Result<()> {
        self.client.posts().delete(id).await?;
        self.refresh_posts().await?;
        self.inner
            .write()
            .comments
            .retain(|comment| comment.post_id != id);
        Ok(())
    }

    /// Fetch a single post and upsert it into the cache.
    ///
    /// A missing post is a valid terminal state, not an error: returns
    /// `Ok(None)` and leaves the cache untouched.
    pub async fn fetch_post_by_id(&self, id: &str) -> Result<Option<Post>> {
        match self.client.posts().get(id).await {
            Ok(post) => {
                let mut inner = self.inner.write();
                match inner.posts.iter_mut().find(|cached| cached.id == post.id) {
                    Some(cached) => *cached = post.clone(),
                    None => inner.posts.push(post.clone()),
                }
                Ok(Some(post))
            }
            Err(Error::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Comment mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Create a comment, then reconcile that post's comments.
    pub async fn create_comment(&self, post_id: &str, content: &str) -> Result<Comment> {
        let comment = self
            .client
            .comments()
            .create(
                post_id,
                CreateCommentRequest {
                    content: content.to_string(),
                },
            )
            .await?;
        self.refresh_comments(post_id).await?;
        Ok(comment)
    }

    /// Update a comment, then reconcile its post's comments.
    pub async fn update_comment(&self, id: &str, content: &str) -> Result<Comment> {
        let comment = self
            .client
            .comments()
            .update(
                id,
                UpdateCommentRequest {
                    content: content.to_string(),
                },
            )
            .await?;
        self.refresh_comments(&comment.post_id).await?;
        Ok(comment)
    }

    /// Delete a comment and drop it from the cache, no re-fetch.
    pub async fn delete_comment(&self, id: &str) -> Result<()> {
        self.client.comments().delete(id).await?;
        self.inner.write().comments.retain(|comment| comment.id != id);
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Lookups (never network)
    // ─────────────────────────────────────────────────────────────────────────

    /// All cached posts, in server order.
    pub fn posts(&self) -> Vec<Post> {
        self.inner.read().posts.clone()
    }

    /// Look up a cached post by ID.
    pub fn get_post_by_id(&self, id: &str) -> Option<Post> {
        self.inner
            .read()
            .posts
            .iter()
            .find(|post| post.id == id)
            .cloned()
    }

    /// Cached comments for a post.
    pub fn get_comments_by_post_id(&self, post_id: &str) -> Vec<Comment> {
        self.inner
            .read()
            .comments
            .iter()
            .filter(|comment| comment.post_id == post_id)
            .cloned()
            .collect()
    }
}
