//! Domain model and wire types for the Quill blogging platform.
//!
//! These types mirror the server's API contract. The server speaks
//! snake_case JSON; some deployments emit camelCase variants, which are
//! accepted via serde aliases on deserialization.

mod comment;
mod post;
mod user;
mod wire;

pub use comment::Comment;
pub use post::Post;
pub use user::User;
pub use wire::{
    AuthResponse, CreateCommentRequest, CreatePostRequest, LoginRequest, RegisterRequest,
    UpdateCommentRequest, UpdatePostRequest, UpdateProfileRequest,
};

/// Timestamp type used across the API (ISO 8601 on the wire).
pub type Timestamp = chrono::DateTime<chrono::Utc>;
