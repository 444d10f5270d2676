//! Data key lifecycle management.
//!
//! The [`KeyManager`] owns the persistence of the single [`DataKey`]: a
//! wrapped record in the platform secure store, plus a password-based
//! export/import path for multi-device recovery.
//!
//! State machine over the key's persistence:
//!
//! ```text
//! Absent  --ensure_data_key()-->  Present
//! Present --clear_data_key()-->   Absent
//! Present --import_with_password()--> Present (replaced)
//! ```
//!
//! Callers must serialize export/import/clear against in-flight push/pull
//! operations; the secure store provides no cross-operation transactions.

use std::sync::Arc;

use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;
use thiserror::Error;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use ciphernote_crypto::{DataKey, KEY_SIZE};

use crate::store::{
    SecretStore, StoreError, SECRET_DATA_KEY, SECRET_ESCROW_SALT, SECRET_ESCROW_WRAPPED,
};

/// PBKDF2-HMAC-SHA256 iteration count for the escrow wrapping key.
///
/// High enough to resist offline guessing of the escrow password.
pub const KDF_ITERATIONS: u32 = 200_000;

/// Escrow salt size in bytes.
pub const SALT_SIZE: usize = 16;

/// Key management errors.
#[derive(Debug, Error)]
pub enum KeyError {
    /// The secure store is unavailable or refused the operation.
    ///
    /// Distinct from "key absent" so callers never silently regenerate a key
    /// while one exists but is inaccessible.
    #[error("key store unavailable: {0}")]
    StoreUnavailable(#[from] StoreError),

    /// A stored record has the wrong length.
    #[error("stored key record corrupted: expected {expected} bytes, got {actual}")]
    Corrupted {
        /// Expected record length.
        expected: usize,
        /// Actual record length.
        actual: usize,
    },

    /// No data key exists yet (required for export).
    #[error("no data key exists")]
    NoDataKey,

    /// No password escrow record exists (required for import).
    #[error("no password escrow record exists")]
    NoEscrowRecord,
}

/// A portable password-escrow of the data key.
///
/// `wrapped_key` is the data key XOR-combined with a PBKDF2-derived wrapping
/// key. The combination is length-preserving and reversible but NOT
/// authenticated: unwrapping with a wrong password yields a wrong 32-byte
/// key, not an error. Callers verify correctness out-of-band, e.g. by a
/// subsequent decrypt failing.
///
/// Both fields are zeroed when the record is dropped.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct EscrowRecord {
    /// Random per-export KDF salt.
    pub salt: [u8; SALT_SIZE],
    /// The password-wrapped data key.
    pub wrapped_key: [u8; KEY_SIZE],
}

// Don't leak the wrapped key in debug output
impl std::fmt::Debug for EscrowRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EscrowRecord")
            .field("salt", &"[16 bytes]")
            .field("wrapped_key", &"[REDACTED]")
            .finish()
    }
}

/// Owns the lifecycle of the installation's single data key.
pub struct KeyManager<S: SecretStore> {
    store: Arc<S>,
}

impl<S: SecretStore> KeyManager<S> {
    /// Create a KeyManager over a shared secret store.
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Load the data key, or `None` if no key has been created yet.
    ///
    /// Store failures and corrupted records surface as errors, never as
    /// `None`.
    pub async fn load_data_key(&self) -> Result<Option<DataKey>, KeyError> {
        match self.store.get(SECRET_DATA_KEY).await? {
            None => Ok(None),
            Some(mut bytes) => {
                if bytes.len() != KEY_SIZE {
                    ciphernote_crypto::wipe(&mut bytes);
                    return Err(KeyError::Corrupted {
                        expected: KEY_SIZE,
                        actual: bytes.len(),
                    });
                }
                let key = DataKey::from_bytes(&bytes).expect("length checked above");
                ciphernote_crypto::wipe(&mut bytes);
                Ok(Some(key))
            }
        }
    }

    /// Persist (overwrite) the data key.
    pub async fn store_data_key(&self, key: &DataKey) -> Result<(), KeyError> {
        self.store.put(SECRET_DATA_KEY, key.as_bytes()).await?;
        Ok(())
    }

    /// Load the data key, creating and persisting a fresh one if absent.
    ///
    /// This is the lazy first-sync creation path. It never overwrites an
    /// existing key, and a store failure aborts rather than generating a
    /// duplicate.
    pub async fn ensure_data_key(&self) -> Result<DataKey, KeyError> {
        if let Some(key) = self.load_data_key().await? {
            return Ok(key);
        }
        let key = DataKey::generate();
        self.store_data_key(&key).await?;
        tracing::debug!("generated new data key");
        Ok(key)
    }

    /// Delete the stored data key.
    pub async fn clear_data_key(&self) -> Result<(), KeyError> {
        self.store.delete(SECRET_DATA_KEY).await?;
        Ok(())
    }

    /// Check whether a data key currently exists.
    pub async fn has_data_key(&self) -> Result<bool, KeyError> {
        Ok(self.load_data_key().await?.is_some())
    }

    /// Export the data key wrapped under a password-derived key.
    ///
    /// Derives a wrapping key from the password and a fresh 16-byte salt
    /// with PBKDF2-HMAC-SHA256 ([`KDF_ITERATIONS`] rounds), XOR-combines it
    /// with the data key, and persists the `{salt, wrapped}` escrow record.
    /// Fails with [`KeyError::NoDataKey`] if no key exists yet.
    ///
    /// The derived wrapping key and the plaintext key copy are wiped before
    /// returning, on every path.
    pub async fn export_with_password(&self, password: &str) -> Result<EscrowRecord, KeyError> {
        let key = self.load_data_key().await?.ok_or(KeyError::NoDataKey)?;

        let mut salt = [0u8; SALT_SIZE];
        getrandom::getrandom(&mut salt).expect("getrandom failed");

        let wrap_key = derive_wrapping_key(password, &salt);
        let wrapped_key = xor_combine(key.as_bytes(), &wrap_key);

        self.store.put(SECRET_ESCROW_SALT, &salt).await?;
        self.store.put(SECRET_ESCROW_WRAPPED, &wrapped_key[..]).await?;

        tracing::debug!("exported password escrow record");
        Ok(EscrowRecord {
            salt,
            wrapped_key: *wrapped_key,
        })
    }

    /// Recover the data key from the stored escrow record and make it the
    /// active key.
    ///
    /// Fails with [`KeyError::NoEscrowRecord`] if no escrow record exists.
    /// Because the XOR combination carries no integrity check, a wrong
    /// password succeeds and installs a wrong 32-byte key; callers detect
    /// this out-of-band (the next decrypt fails).
    pub async fn import_with_password(&self, password: &str) -> Result<(), KeyError> {
        let salt = self
            .store
            .get(SECRET_ESCROW_SALT)
            .await?
            .ok_or(KeyError::NoEscrowRecord)?;
        let wrapped = self
            .store
            .get(SECRET_ESCROW_WRAPPED)
            .await?
            .ok_or(KeyError::NoEscrowRecord)?;

        if salt.len() != SALT_SIZE {
            return Err(KeyError::Corrupted {
                expected: SALT_SIZE,
                actual: salt.len(),
            });
        }
        let wrapped: [u8; KEY_SIZE] = wrapped.try_into().map_err(|bad: Vec<u8>| {
            KeyError::Corrupted {
                expected: KEY_SIZE,
                actual: bad.len(),
            }
        })?;

        let wrap_key = derive_wrapping_key(password, &salt);
        let candidate = xor_combine(&wrapped, &wrap_key);

        let key = DataKey::from_bytes(candidate.as_slice()).expect("candidate is 32 bytes");
        self.store_data_key(&key).await?;

        tracing::debug!("imported data key from password escrow");
        Ok(())
    }
}

/// Derive the 32-byte escrow wrapping key from a password and salt.
fn derive_wrapping_key(password: &str, salt: &[u8]) -> Zeroizing<[u8; KEY_SIZE]> {
    let mut out = Zeroizing::new([0u8; KEY_SIZE]);
    pbkdf2_hmac::<Sha256>(password.as_bytes(), salt, KDF_ITERATIONS, &mut *out);
    out
}

/// Bytewise XOR of two 32-byte values. Self-inverse: wrap and unwrap are the
/// same operation.
fn xor_combine(data: &[u8; KEY_SIZE], key: &[u8; KEY_SIZE]) -> Zeroizing<[u8; KEY_SIZE]> {
    let mut out = Zeroizing::new([0u8; KEY_SIZE]);
    for i in 0..KEY_SIZE {
        out[i] = data[i] ^ key[i];
    }
    out
}
