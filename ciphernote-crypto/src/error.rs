//! Error types for ciphernote-crypto.

use thiserror::Error;

/// Errors that can occur in primitive crypto operations.
#[derive(Debug, Error)]
pub enum CryptoError {
    /// Encryption failed.
    #[error("encryption failed: {0}")]
    EncryptionFailed(String),

    /// Decryption failed (authentication error).
    /// No details provided: tamper, wrong key and wrong AAD are
    /// indistinguishable by design.
    #[error("decryption failed: authentication error")]
    AuthenticationFailed,

    /// Ciphertext blob too short to contain a nonce.
    #[error("malformed ciphertext: {len} bytes, need at least {min}")]
    MalformedCiphertext {
        /// Length of the rejected blob.
        len: usize,
        /// Minimum acceptable length.
        min: usize,
    },

    /// Invalid key length.
    #[error("invalid key length: expected {expected}, got {actual}")]
    InvalidKeyLength {
        /// Expected length.
        expected: usize,
        /// Actual length.
        actual: usize,
    },

    /// Transport text could not be decoded.
    #[error("transport decoding failed: {0}")]
    Encoding(String),
}
