//! API endpoint implementations.

mod auth;
mod comments;
mod posts;

pub use auth::AuthApi;
pub use comments::CommentsApi;
pub use posts::PostsApi;
