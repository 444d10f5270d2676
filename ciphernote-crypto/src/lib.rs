//! # ciphernote-crypto
//!
//! Cryptographic primitives for the Ciphernote encrypted backup protocol.
//!
//! This crate is stateless and performs no I/O. It provides:
//!
//! - [`DataKey`] - the single 256-bit symmetric key protecting all journal
//!   content for an installation, wiped on drop
//! - [`encrypt`] / [`decrypt`] - ChaCha20-Poly1305 authenticated encryption
//!   producing self-describing `nonce || ciphertext || tag` blobs
//! - [`to_transport`] / [`from_transport`] - base64 encoding for the wire
//! - [`wipe`] - best-effort zeroing of sensitive buffers
//!
//! # Security Notes
//!
//! - A fresh random 96-bit nonce is drawn inside [`encrypt`] on every call;
//!   nonce reuse under one key cannot happen through this API
//! - Decryption fails closed: authentication failure never yields partial
//!   plaintext
//! - [`DataKey`] zeroizes its bytes on drop and redacts its Debug output

#![warn(missing_docs)]
#![warn(clippy::all)]

mod aead;
mod encode;
mod error;
mod key;

pub use aead::{decrypt, encrypt, KEY_SIZE, NONCE_SIZE, TAG_SIZE};
pub use encode::{from_transport, to_transport};
pub use error::CryptoError;
pub use key::{wipe, DataKey};
