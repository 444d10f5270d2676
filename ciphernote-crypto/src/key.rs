//! The data key: the single symmetric key protecting all journal content.

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::aead::KEY_SIZE;
use crate::error::CryptoError;

/// The 256-bit symmetric data key for one installation.
///
/// Exists in memory only as long as an operation needs it. The bytes are
/// zeroed when the value is dropped, so every exit path, including error
/// paths, wipes the key by construction. Debug output is redacted.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct DataKey([u8; KEY_SIZE]);

impl DataKey {
    /// Generate a fresh random data key from the system CSPRNG.
    pub fn generate() -> Self {
        let mut bytes = [0u8; KEY_SIZE];
        getrandom::getrandom(&mut bytes).expect("getrandom failed");
        Self(bytes)
    }

    /// Create a DataKey from exactly 32 raw bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        if bytes.len() != KEY_SIZE {
            return Err(CryptoError::InvalidKeyLength {
                expected: KEY_SIZE,
                actual: bytes.len(),
            });
        }
        let mut arr = [0u8; KEY_SIZE];
        arr.copy_from_slice(bytes);
        Ok(Self(arr))
    }

    /// Get the raw key bytes (use sparingly).
    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.0
    }
}

// Don't leak the key in debug output
impl std::fmt::Debug for DataKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "DataKey([REDACTED])")
    }
}

/// Overwrite every byte of a sensitive buffer with zero.
///
/// Best effort: no guarantee against compiler or runtime reordering, but the
/// write is not elided. Use for scratch buffers that held key material or
/// plaintext; [`DataKey`] itself wipes on drop.
pub fn wipe(buf: &mut [u8]) {
    buf.zeroize();
}
