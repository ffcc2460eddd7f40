//! Token claims decoding and expiry checks.
//!
//! Tokens are three dot-separated base64url segments (header, claims,
//! signature). Only the claims segment is read here, without verifying the
//! signature: enough to decide when to drop a session locally, and nothing
//! more.

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Time-to-expiry threshold below which a token counts as expiring soon.
pub const EXPIRY_WARNING_SECS: i64 = 300;

/// Claims embedded in a bearer token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject: the authenticated user's ID.
    #[serde(alias = "userId", alias = "sub")]
    pub user_id: String,
    /// Issued-at, epoch seconds.
    #[serde(default)]
    pub iat: i64,
    /// Expiration, epoch seconds.
    pub exp: i64,
}

/// Decode a token's claims segment.
///
/// Returns `None` on any malformed structure: wrong segment count, invalid
/// base64url, or an unparseable claims record. Never panics.
pub fn decode(token: &str) -> Option<TokenClaims> {
    let segments: Vec<&str> = token.split('.').collect();
    if segments.len() != 3 {
        return None;
    }

    let payload = URL_SAFE_NO_PAD.decode(segments[1]).ok()?;
    serde_json::from_slice(&payload).ok()
}

/// Whether the token is expired.
///
/// A token that fails to decode counts as expired.
pub fn is_expired(token: &str) -> bool {
    match decode(token) {
        Some(claims) => Utc::now().timestamp() >= claims.exp,
        None => true,
    }
}

/// Whether the token expires within [`EXPIRY_WARNING_SECS`].
///
/// A token that fails to decode counts as expiring.
pub fn is_expiring_soon(token: &str) -> bool {
    match decode(token) {
        Some(claims) => claims.exp - Utc::now().timestamp() < EXPIRY_WARNING_SECS,
        None => true,
    }
}

/// Seconds until the token expires, clamped at zero.
pub fn time_remaining(token: &str) -> u64 {
    match decode(token) {
        Some(claims) => (claims.exp - Utc::now().timestamp()).max(0) as u64,
        None => 0,
    }
}

/// The token's expiration instant, if it decodes.
pub fn expiration_date(token: &str) -> Option<DateTime<Utc>> {
    let claims = decode(token)?;
    DateTime::from_timestamp(claims.exp, 0)
}
