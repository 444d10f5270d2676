//! Authenticated encryption for backup blobs.
//!
//! ChaCha20-Poly1305 (256-bit key, 96-bit nonce, 128-bit tag). Every call to
//! [`encrypt`] draws a fresh random nonce and prepends it to the ciphertext,
//! so the output is self-describing: `nonce || ciphertext || tag`.

use chacha20poly1305::{
    aead::{Aead, KeyInit, Payload},
    ChaCha20Poly1305, Nonce,
};

use crate::error::CryptoError;
use crate::key::DataKey;

/// Key size in bytes (256 bits).
pub const KEY_SIZE: usize = 32;

/// Nonce size in bytes (96 bits).
pub const NONCE_SIZE: usize = 12;

/// Poly1305 authentication tag size in bytes (128 bits).
pub const TAG_SIZE: usize = 16;

/// Encrypt a plaintext under the data key, binding the associated data.
///
/// A fresh random 96-bit nonce is generated internally on every call; nonce
/// reuse under the same key cannot occur through this API. Pass an empty
/// `aad` slice when no associated data is needed.
///
/// Returns `nonce || ciphertext || tag`.
pub fn encrypt(key: &DataKey, plaintext: &[u8], aad: &[u8]) -> Result<Vec<u8>, CryptoError> {
    let mut nonce_bytes = [0u8; NONCE_SIZE];
    getrandom::getrandom(&mut nonce_bytes)
        .map_err(|e| CryptoError::EncryptionFailed(e.to_string()))?;
    let nonce = Nonce::from_slice(&nonce_bytes);

    let cipher = ChaCha20Poly1305::new_from_slice(key.as_bytes())
        .map_err(|e| CryptoError::EncryptionFailed(e.to_string()))?;

    let ciphertext = cipher
        .encrypt(nonce, Payload { msg: plaintext, aad })
        .map_err(|_| CryptoError::EncryptionFailed("aead encrypt failed".into()))?;

    let mut blob = Vec::with_capacity(NONCE_SIZE + ciphertext.len());
    blob.extend_from_slice(&nonce_bytes);
    blob.extend_from_slice(&ciphertext);
    Ok(blob)
}

/// Decrypt a `nonce || ciphertext || tag` blob produced by [`encrypt`].
///
/// Fails with [`CryptoError::MalformedCiphertext`] if the blob is shorter
/// than the nonce, and [`CryptoError::AuthenticationFailed`] if the tag does
/// not verify (tampered data, wrong key, or wrong AAD). Never returns
/// partially-decrypted data.
pub fn decrypt(key: &DataKey, blob: &[u8], aad: &[u8]) -> Result<Vec<u8>, CryptoError> {
    if blob.len() < NONCE_SIZE {
        return Err(CryptoError::MalformedCiphertext {
            len: blob.len(),
            min: NONCE_SIZE,
        });
    }

    let nonce = Nonce::from_slice(&blob[..NONCE_SIZE]);
    let ciphertext = &blob[NONCE_SIZE..];

    let cipher = ChaCha20Poly1305::new_from_slice(key.as_bytes())
        .map_err(|_| CryptoError::AuthenticationFailed)?;

    cipher
        .decrypt(nonce, Payload { msg: ciphertext, aad })
        .map_err(|_| CryptoError::AuthenticationFailed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    // ===========================================
    // Round Trip Tests
    // ===========================================

    #[test]
    fn encrypt_decrypt_roundtrip() {
        let key = DataKey::generate();
        let plaintext = b"today was calm";

        let blob = encrypt(&key, plaintext, b"").unwrap();
        let decrypted = decrypt(&key, &blob, b"").unwrap();

        assert_eq!(decrypted.as_slice(), plaintext);
    }

    #[test]
    fn roundtrip_with_aad() {
        let key = DataKey::generate();
        let plaintext = b"entry content";
        let aad = b"journal-v1";

        let blob = encrypt(&key, plaintext, aad).unwrap();
        let decrypted = decrypt(&key, &blob, aad).unwrap();

        assert_eq!(decrypted.as_slice(), plaintext);
    }

    #[test]
    fn empty_plaintext_roundtrip() {
        let key = DataKey::generate();

        let blob = encrypt(&key, b"", b"").unwrap();
        assert_eq!(blob.len(), NONCE_SIZE + TAG_SIZE);

        let decrypted = decrypt(&key, &blob, b"").unwrap();
        assert!(decrypted.is_empty());
    }

    #[test]
    fn large_plaintext_roundtrip() {
        let key = DataKey::generate();
        let plaintext = vec![0x42u8; 1024 * 1024]; // 1 MiB

        let blob = encrypt(&key, &plaintext, b"").unwrap();
        let decrypted = decrypt(&key, &blob, b"").unwrap();

        assert_eq!(decrypted, plaintext);
    }

    #[test]
    fn blob_layout_is_nonce_ciphertext_tag() {
        let key = DataKey::generate();
        let plaintext = b"layout check";

        let blob = encrypt(&key, plaintext, b"").unwrap();
        assert_eq!(blob.len(), NONCE_SIZE + plaintext.len() + TAG_SIZE);
    }

    // ===========================================
    // Fail Closed Tests
    // ===========================================

    #[test]
    fn any_single_bit_flip_fails_authentication() {
        let key = DataKey::generate();
        let blob = encrypt(&key, b"bit flip target", b"").unwrap();

        // Flip every bit of the blob in turn: nonce, ciphertext and tag
        // mutations must all be rejected.
        for byte_idx in 0..blob.len() {
            for bit in 0..8 {
                let mut mutated = blob.clone();
                mutated[byte_idx] ^= 1 << bit;

                let result = decrypt(&key, &mutated, b"");
                assert!(
                    matches!(result, Err(CryptoError::AuthenticationFailed)),
                    "bit {} of byte {} survived mutation",
                    bit,
                    byte_idx
                );
            }
        }
    }

    #[test]
    fn wrong_key_fails_authentication() {
        let k1 = DataKey::generate();
        let k2 = DataKey::generate();

        let blob = encrypt(&k1, b"secret", b"").unwrap();
        let result = decrypt(&k2, &blob, b"");

        assert!(matches!(result, Err(CryptoError::AuthenticationFailed)));
    }

    #[test]
    fn wrong_aad_fails_authentication() {
        let key = DataKey::generate();

        let blob = encrypt(&key, b"secret", b"journal-v1").unwrap();
        let result = decrypt(&key, &blob, b"journal-v2");

        assert!(matches!(result, Err(CryptoError::AuthenticationFailed)));
    }

    #[test]
    fn undersized_blob_is_malformed() {
        let key = DataKey::generate();

        let result = decrypt(&key, &[0u8; NONCE_SIZE - 1], b"");
        assert!(matches!(
            result,
            Err(CryptoError::MalformedCiphertext { len: 11, min: 12 })
        ));

        let result = decrypt(&key, b"", b"");
        assert!(matches!(
            result,
            Err(CryptoError::MalformedCiphertext { len: 0, min: 12 })
        ));
    }

    #[test]
    fn nonce_only_blob_fails_authentication() {
        // Exactly NONCE_SIZE bytes: not malformed, but there is no tag to
        // verify, so it must fail closed.
        let key = DataKey::generate();
        let result = decrypt(&key, &[0u8; NONCE_SIZE], b"");
        assert!(matches!(result, Err(CryptoError::AuthenticationFailed)));
    }

    // ===========================================
    // Nonce Discipline Tests
    // ===========================================

    #[test]
    fn nonces_are_unique_across_many_encryptions() {
        let key = DataKey::generate();
        let mut seen = HashSet::new();

        for _ in 0..10_000 {
            let blob = encrypt(&key, b"same plaintext", b"").unwrap();
            let nonce: [u8; NONCE_SIZE] = blob[..NONCE_SIZE].try_into().unwrap();
            assert!(seen.insert(nonce), "nonce repeated");
        }
    }

    #[test]
    fn same_plaintext_yields_different_blobs() {
        let key = DataKey::generate();

        let b1 = encrypt(&key, b"same", b"").unwrap();
        let b2 = encrypt(&key, b"same", b"").unwrap();

        assert_ne!(b1, b2);
        assert_eq!(decrypt(&key, &b1, b"").unwrap(), b"same");
        assert_eq!(decrypt(&key, &b2, b"").unwrap(), b"same");
    }
}
