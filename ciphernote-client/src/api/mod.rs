//! Backup service abstraction.
//!
//! The remote service is an opaque HTTP endpoint that authenticates
//! accounts and stores encrypted blobs. This module defines the [`Remote`]
//! trait the client programs against, an HTTPS implementation backed by
//! `reqwest`, and an in-memory mock for tests.
//!
//! No operation retries automatically; callers decide whether a transport
//! failure is worth retrying.

mod http;
mod mock;

pub use http::HttpRemote;
pub use mock::MockRemote;

use async_trait::async_trait;
use thiserror::Error;

use ciphernote_types::{EntryItem, EntryPayload};

/// Errors from the backup service.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never completed (connectivity, TLS, timeout).
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// The service answered with a non-success status.
    #[error("service returned status {0}")]
    Status(u16),

    /// The response body was missing or malformed.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

/// Trait for the remote backup service.
///
/// Tokens are opaque bearer credentials; payload blobs are opaque
/// ciphertext. The service never sees a key or a plaintext.
#[async_trait]
pub trait Remote: Send + Sync {
    /// Create an account. Returns the bearer token.
    async fn register(&self, email: &str, password: &str) -> Result<String, ApiError>;

    /// Authenticate an existing account. Returns the bearer token.
    async fn login(&self, email: &str, password: &str) -> Result<String, ApiError>;

    /// Upload one encrypted entry.
    async fn push_entry(&self, token: &str, payload: &EntryPayload) -> Result<(), ApiError>;

    /// List encrypted entries updated after `since_ms` (epoch milliseconds).
    async fn list_entries(&self, token: &str, since_ms: u64) -> Result<Vec<EntryItem>, ApiError>;
}
