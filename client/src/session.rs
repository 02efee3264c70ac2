//! # Session and Header Provider
//!
//! Holds the bearer token for the current login and builds request headers
//! from it. The slot is an explicit object with a single writer (the
//! login/logout flow) and many readers (every authenticated request), instead
//! of ambient storage read from arbitrary call sites.
//!
//! ## Token shape
//!
//! The backend issues JWT-style tokens (`header.payload.signature`). The
//! payload segment is base64-encoded JSON carrying `{"id": ..., "email": ...}`;
//! [`Session::identity`] decodes it on demand. A malformed token simply yields
//! no identity, never an error.
//!
//! ## Header rules
//!
//! - Authenticated requests carry the token in the `apikey` header.
//! - If auth is required but no token is present, headers are still returned
//!   without the auth field: the caller decides whether that is fatal, the
//!   server answers 401/403 if it is.
//! - When the body is a multipart form (`content_type == None`), no
//!   `Content-Type` header is set at all. The transport layer fills in the
//!   boundary; setting the header manually corrupts it and the server rejects
//!   the upload.

use std::sync::Arc;

use base64::engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD};
use base64::Engine as _;
use parking_lot::RwLock;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use serde::Deserialize;

/// Header carrying the bearer token on authenticated calls.
pub const AUTH_HEADER: &str = "apikey";

/// Identity decoded from the token payload segment.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Identity {
    pub id: i64,
    pub email: String,
}

/// Process-wide session slot: one writer (login/logout), many readers.
///
/// Cloning is cheap and every clone shares the same slot. Requests read the
/// token at dispatch time; rotating the token mid-flight does not affect
/// calls that already captured their headers.
#[derive(Debug, Clone, Default)]
pub struct Session {
    token: Arc<RwLock<Option<String>>>,
}

impl Session {
    /// An empty, unauthenticated session.
    pub fn new() -> Self {
        Self::default()
    }

    /// A session hydrated with a previously stored token (e.g. restored by
    /// the host application from its own persistence).
    pub fn with_token(token: impl Into<String>) -> Self {
        let session = Self::new();
        session.set_token(token);
        session
    }

    /// Store the token issued at login.
    pub fn set_token(&self, token: impl Into<String>) {
        *self.token.write() = Some(token.into());
    }

    /// Drop the token. Called on logout and when the server reports the
    /// session as inactive.
    pub fn clear(&self) {
        *self.token.write() = None;
    }

    /// The current token, if any.
    pub fn token(&self) -> Option<String> {
        self.token.read().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.read().is_some()
    }

    /// Identity carried in the token payload, or `None` when logged out or
    /// when the token does not decode.
    pub fn identity(&self) -> Option<Identity> {
        decode_identity(&self.token()?)
    }

    /// Shortcut for the id of the logged-in user.
    pub fn user_id(&self) -> Option<i64> {
        self.identity().map(|identity| identity.id)
    }

    /// Build the headers for one request.
    ///
    /// `content_type` of `None` is the multipart marker: the map is returned
    /// without any `Content-Type` entry so the transport can set its own
    /// boundary. With `requires_auth` and no token present the map is still
    /// returned, just without the `apikey` entry.
    pub fn build_headers(&self, requires_auth: bool, content_type: Option<&str>) -> HeaderMap {
        let mut headers = HeaderMap::new();

        if let Some(content_type) = content_type {
            if let Ok(value) = HeaderValue::from_str(content_type) {
                headers.insert(CONTENT_TYPE, value);
            }
        }

        if requires_auth {
            if let Some(token) = self.token() {
                match HeaderValue::from_str(&token) {
                    Ok(value) => {
                        headers.insert(HeaderName::from_static(AUTH_HEADER), value);
                    }
                    Err(_) => {
                        tracing::warn!("session token is not a valid header value, sending request unauthenticated");
                    }
                }
            }
        }

        headers
    }
}

fn decode_identity(token: &str) -> Option<Identity> {
    let payload = token.split('.').nth(1)?;
    let bytes = decode_segment(payload)?;
    serde_json::from_slice(&bytes).ok()
}

// Tokens are usually unpadded base64url, but tolerate standard base64 since
// that is what older backends emitted.
fn decode_segment(segment: &str) -> Option<Vec<u8>> {
    URL_SAFE_NO_PAD
        .decode(segment)
        .ok()
        .or_else(|| STANDARD.decode(segment).ok())
}
