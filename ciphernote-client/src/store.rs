//! Secure secret storage abstraction.
//!
//! The platform's secure key-value store (Keychain, Keystore-backed
//! preferences, libsecret, ...) is an external collaborator. This module
//! defines the trait the rest of the crate programs against, plus a
//! memory-based implementation for tests and composition.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use thiserror::Error;

/// Secret name for the wrapped data key record.
pub const SECRET_DATA_KEY: &str = "wrapped_data_key";

/// Secret name for the password escrow salt.
pub const SECRET_ESCROW_SALT: &str = "escrow_salt";

/// Secret name for the password-wrapped data key.
pub const SECRET_ESCROW_WRAPPED: &str = "escrow_wrapped_key";

/// Secret name for the bearer token.
pub const SECRET_AUTH_TOKEN: &str = "auth_token";

/// Secret name for the account email associated with the token.
pub const SECRET_AUTH_EMAIL: &str = "auth_email";

/// Errors from the secure store.
///
/// A store error means the platform store is unavailable or corrupted; it is
/// deliberately distinct from "secret absent", which is the `Ok(None)` case
/// of [`SecretStore::get`].
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// The secure store could not be reached or refused the operation.
    #[error("secure store unavailable: {0}")]
    Unavailable(String),
}

/// Trait for a secure key-value store of named secrets.
///
/// Implementations must provide atomic read/write of a single record.
/// Values are opaque bytes; names are the `SECRET_*` constants in this
/// module. No cross-operation transactions are assumed.
#[async_trait]
pub trait SecretStore: Send + Sync {
    /// Read a secret. Returns `Ok(None)` when the name has never been
    /// written (or was deleted), which is not an error.
    async fn get(&self, name: &str) -> Result<Option<Vec<u8>>, StoreError>;

    /// Write (or overwrite) a secret.
    async fn put(&self, name: &str, value: &[u8]) -> Result<(), StoreError>;

    /// Delete a secret. Deleting an absent secret is not an error.
    async fn delete(&self, name: &str) -> Result<(), StoreError>;
}

/// In-memory secret store for tests.
///
/// Thread-safe; clones share state. Supports failure injection so tests can
/// exercise the "store unavailable" paths. Not persistent.
#[derive(Debug, Default)]
pub struct MemorySecretStore {
    inner: Arc<Mutex<MemoryStoreInner>>,
}

#[derive(Debug, Default)]
struct MemoryStoreInner {
    secrets: HashMap<String, Vec<u8>>,
    fail_next_get: Option<String>,
    fail_next_put: Option<String>,
    fail_next_delete: Option<String>,
}

impl MemorySecretStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of secrets currently stored.
    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().secrets.len()
    }

    /// Check if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.inner.lock().unwrap().secrets.is_empty()
    }

    /// Cause the next `get()` to fail with the given error.
    pub fn fail_next_get(&self, error: &str) {
        self.inner.lock().unwrap().fail_next_get = Some(error.to_string());
    }

    /// Cause the next `put()` to fail with the given error.
    pub fn fail_next_put(&self, error: &str) {
        self.inner.lock().unwrap().fail_next_put = Some(error.to_string());
    }

    /// Cause the next `delete()` to fail with the given error.
    pub fn fail_next_delete(&self, error: &str) {
        self.inner.lock().unwrap().fail_next_delete = Some(error.to_string());
    }

    /// Clear all secrets and pending failures.
    pub fn reset(&self) {
        let mut inner = self.inner.lock().unwrap();
        *inner = MemoryStoreInner::default();
    }
}

impl Clone for MemorySecretStore {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

#[async_trait]
impl SecretStore for MemorySecretStore {
    async fn get(&self, name: &str) -> Result<Option<Vec<u8>>, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        if let Some(error) = inner.fail_next_get.take() {
            return Err(StoreError::Unavailable(error));
        }
        Ok(inner.secrets.get(name).cloned())
    }

    async fn put(&self, name: &str, value: &[u8]) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().unwrap();
        if let Some(error) = inner.fail_next_put.take() {
            return Err(StoreError::Unavailable(error));
        }
        inner.secrets.insert(name.to_string(), value.to_vec());
        Ok(())
    }

    async fn delete(&self, name: &str) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().unwrap();
        if let Some(error) = inner.fail_next_delete.take() {
            return Err(StoreError::Unavailable(error));
        }
        inner.secrets.remove(name);
        Ok(())
    }
}
