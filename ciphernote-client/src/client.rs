//! BackupClient - push/pull orchestration.
//!
//! This module provides [`BackupClient`], the primary API for applications
//! to back up encrypted journal entries and restore them.
//!
//! # Architecture
//!
//! ```text
//! Application → BackupClient → Remote → Network
//!                    ↓
//!          KeyManager / TokenStore → SecretStore
//! ```
//!
//! Each operation is one sequential pipeline: token check → key fetch or
//! create → encrypt or decrypt → HTTP call → cleanup. The in-memory data
//! key copy is wiped on every exit path ([`DataKey`] zeroizes on drop).

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use thiserror::Error;
use tracing::{debug, warn};

use ciphernote_crypto::{decrypt, encrypt, from_transport, to_transport, CryptoError};
use ciphernote_types::{EntryId, EntryPayload, EntryRecord, RestoredEntry};

use crate::api::{ApiError, Remote};
use crate::keys::{KeyError, KeyManager};
use crate::store::{SecretStore, StoreError};
use crate::token::TokenStore;

/// Associated data bound into every entry ciphertext.
///
/// Shared by all entries of the same protocol version. A change to the
/// encrypted payload schema must change this string so that old and new
/// ciphertexts cannot be cross-decrypted.
pub const PAYLOAD_AAD: &[u8] = b"journal-v1";

/// Client errors.
#[derive(Debug, Error)]
pub enum ClientError {
    /// No bearer token is stored; the caller should prompt for login.
    ///
    /// A "not ready" outcome, distinct from transient failures.
    #[error("not authenticated: no bearer token stored")]
    NotAuthenticated,

    /// The backup service failed or was unreachable. Never retried here.
    #[error("api error: {0}")]
    Api(#[from] ApiError),

    /// Key management failed.
    #[error("key error: {0}")]
    Key(#[from] KeyError),

    /// A cryptographic operation failed (always fails closed).
    #[error("crypto error: {0}")]
    Crypto(#[from] CryptoError),

    /// The secure store failed.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Entry content could not be serialized or parsed.
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// The main backup client.
///
/// Stateless orchestration over the remote service, the key manager and the
/// token store. Safe to call concurrently for push/pull, but key-management
/// mutations (export/import/clear) must be serialized against in-flight
/// operations by the caller.
pub struct BackupClient<R: Remote, S: SecretStore> {
    remote: R,
    keys: KeyManager<S>,
    tokens: TokenStore<S>,
}

impl<R: Remote, S: SecretStore> BackupClient<R, S> {
    /// Create a new client over a remote and a shared secret store.
    pub fn new(remote: R, store: Arc<S>) -> Self {
        Self {
            remote,
            keys: KeyManager::new(store.clone()),
            tokens: TokenStore::new(store),
        }
    }

    /// Create an account on the backup service.
    ///
    /// Returns the bearer token on success; the caller decides whether to
    /// persist it (see [`TokenStore::save`]). No retry on failure.
    pub async fn register(&self, email: &str, password: &str) -> Result<String, ClientError> {
        let token = self.remote.register(email, password).await?;
        debug!("registered backup account");
        Ok(token)
    }

    /// Authenticate against the backup service.
    ///
    /// Returns the bearer token on success. No retry on failure.
    pub async fn login(&self, email: &str, password: &str) -> Result<String, ClientError> {
        let token = self.remote.login(email, password).await?;
        debug!("logged in to backup service");
        Ok(token)
    }

    /// Encrypt one entry and upload it.
    ///
    /// Requires a stored bearer token; returns
    /// [`ClientError::NotAuthenticated`] without any network call if it is
    /// absent. Creates the data key on first use (the only implicit
    /// key-creation path). Returns the client-generated [`EntryId`].
    pub async fn push_entry(&self, record: &EntryRecord) -> Result<EntryId, ClientError> {
        let token = match self.tokens.token().await? {
            Some(token) => token,
            None => {
                warn!("push refused: no bearer token stored");
                return Err(ClientError::NotAuthenticated);
            }
        };

        let key = self.keys.ensure_data_key().await?;

        let mut plaintext = serde_json::to_vec(record)
            .map_err(|e| ClientError::Serialization(e.to_string()))?;
        let sealed = encrypt(&key, &plaintext, PAYLOAD_AAD);
        ciphernote_crypto::wipe(&mut plaintext);
        drop(key);
        let blob = sealed?;

        let now = now_ms();
        let entry_id = EntryId::new();
        let payload = EntryPayload {
            entry_id,
            created_at: now,
            updated_at: now,
            size: blob.len() as u64,
            blob_b64: to_transport(&blob),
        };

        debug!(entry_id = %entry_id, size = payload.size, "pushing encrypted entry");
        self.remote.push_entry(&token, &payload).await?;
        Ok(entry_id)
    }

    /// Download and decrypt entries updated after `since_ms`.
    ///
    /// Requires both a stored bearer token and an existing data key; if
    /// either is absent the result is empty (a missing key is never created
    /// implicitly for restore). A single item that fails to decode, decrypt
    /// or parse aborts the whole pull with no partial results.
    pub async fn restore_entries(&self, since_ms: u64) -> Result<Vec<RestoredEntry>, ClientError> {
        let Some(token) = self.tokens.token().await? else {
            warn!("restore skipped: no bearer token stored");
            return Ok(Vec::new());
        };
        let Some(key) = self.keys.load_data_key().await? else {
            warn!("restore skipped: no data key (import one first)");
            return Ok(Vec::new());
        };

        let items = self.remote.list_entries(&token, since_ms).await?;
        debug!(count = items.len(), since_ms, "restoring entries");

        let mut restored = Vec::with_capacity(items.len());
        for item in items {
            let blob = from_transport(&item.blob_b64)?;
            // Fails closed: one undecryptable item aborts the whole batch.
            let mut plaintext = decrypt(&key, &blob, PAYLOAD_AAD)?;
            let parsed = serde_json::from_slice::<EntryRecord>(&plaintext);
            ciphernote_crypto::wipe(&mut plaintext);
            let record = parsed.map_err(|e| ClientError::Serialization(e.to_string()))?;

            restored.push(RestoredEntry {
                entry_id: item.entry_id,
                created_at: item.created_at,
                updated_at: item.updated_at,
                record,
            });
        }
        Ok(restored)
    }

    /// The key manager, for explicit key lifecycle actions
    /// (export/import/clear).
    pub fn keys(&self) -> &KeyManager<S> {
        &self.keys
    }

    /// The token store, for saving the token after login.
    pub fn tokens(&self) -> &TokenStore<S> {
        &self.tokens
    }

    /// The underlying remote (for testing).
    pub fn remote(&self) -> &R {
        &self.remote
    }
}

/// Current time as epoch milliseconds.
fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock before unix epoch")
        .as_millis() as u64
}
