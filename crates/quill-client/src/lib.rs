//! HTTP client SDK for the Quill blogging platform.
//!
//! This crate provides a typed client for the Quill REST API, with bearer
//! token handling and normalized errors.
//!
//! # Example
//!
//! ```no_run
//! use quill_client::QuillClient;
//! use quill_types::LoginRequest;
//!
//! # async fn example() -> quill_client::Result<()> {
//! let client = QuillClient::builder()
//!     .base_url("http://localhost:8000")
//!     .build()?;
//!
//! let auth = client.auth().login(LoginRequest {
//!     email: "john@example.com".to_string(),
//!     password: "password123".to_string(),
//! }).await?;
//! println!("Logged in as {}", auth.user.name);
//!
//! let posts = client.posts().list().await?;
//! println!("{} posts", posts.len());
//! # Ok(())
//! # }
//! ```
//!
//! # Session expiry
//!
//! The client detects dead sessions two ways: a stored token that has
//! already expired short-circuits the request locally, and a 401 from the
//! server clears the store. Both paths notify every listener registered via
//! [`QuillClient::on_session_expired`].

pub mod api;
pub mod client;
pub mod error;
pub mod expiry;

pub use client::{Auth, ClientBuilder, QuillClient};
pub use error::{Error, Result};
pub use expiry::ExpiryListeners;
