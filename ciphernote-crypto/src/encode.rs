//! Transport encoding for encrypted blobs.
//!
//! Standard base64 with padding: deterministic, round-trips exactly.

use base64::{engine::general_purpose::STANDARD, Engine};

use crate::error::CryptoError;

/// Encode raw bytes as transport text.
pub fn to_transport(raw: &[u8]) -> String {
    STANDARD.encode(raw)
}

/// Decode transport text back to raw bytes.
pub fn from_transport(text: &str) -> Result<Vec<u8>, CryptoError> {
    STANDARD
        .decode(text)
        .map_err(|e| CryptoError::Encoding(e.to_string()))
}
