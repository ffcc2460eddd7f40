//! Bearer token handling for the Quill client.
//!
//! Two concerns live here:
//!
//! - [`claims`]: decoding a token's claims segment to check expiration.
//!   No signature verification happens client-side; tokens are
//!   server-issued and the codec is an expiry convenience, not a security
//!   boundary.
//! - [`store`]: durable single-slot credential storage, with a file-backed
//!   implementation for deployments and an in-memory one for tests.

pub mod claims;
pub mod error;
pub mod store;

pub use claims::{TokenClaims, decode, expiration_date, is_expired, is_expiring_soon, time_remaining};
pub use error::{Result, TokenError};
pub use store::{
    FileTokenStore, InMemoryTokenStore, SharedTokenStore, StoredCredentials, TokenStore,
    create_file_store, create_memory_store,
};
