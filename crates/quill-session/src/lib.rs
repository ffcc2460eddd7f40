//! Auth session management for the Quill client.
//!
//! [`AuthSession`] owns the current user and drives login, registration,
//! logout, and profile updates through `quill-client`. A background
//! [`SessionMonitor`] watches the stored token and ends the session when it
//! expires; the gateway's 401 handling converges on the same cleanup.
//!
//! # Example
//!
//! ```no_run
//! use quill_client::QuillClient;
//! use quill_session::AuthSession;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = QuillClient::builder()
//!     .base_url("http://localhost:8000")
//!     .build()?;
//!
//! let session = AuthSession::new(client);
//! let user = session.login("john@example.com", "password123").await?;
//! println!("Welcome back, {}", user.name);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod monitor;
pub mod session;
pub mod state;
pub mod status;
pub mod validate;

pub use config::SessionConfig;
pub use error::{Result, SessionError};
pub use monitor::SessionMonitor;
pub use session::AuthSession;
pub use state::SessionState;
pub use status::SessionStatus;
