//! In-memory content cache for the Quill client.
//!
//! [`ContentStore`] holds posts and comments as a soft cache of server
//! state: the server is the source of truth, and the cache only changes
//! after the server confirms a mutation. Writes reconcile by re-fetching
//! (refresh-after-write) rather than by optimistic local edits.
//!
//! # Example
//!
//! ```no_run
//! use quill_cache::ContentStore;
//! use quill_client::QuillClient;
//!
//! # async fn example() -> quill_client::Result<()> {
//! let client = QuillClient::builder()
//!     .base_url("http://localhost:8000")
//!     .build()?;
//!
//! let store = ContentStore::new(client);
//! store.refresh_posts().await?;
//!
//! for post in store.posts() {
//!     println!("{}: {}", post.id, post.title);
//! }
//! # Ok(())
//! # }
//! ```

mod store;

pub use store::ContentStore;

pub use quill_client::{Error, Result};
