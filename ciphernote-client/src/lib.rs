//! # ciphernote-client
//!
//! Client library for the Ciphernote end-to-end encrypted backup protocol.
//!
//! This is the library applications use to back up and restore journal
//! entries through an untrusted backup service. Entries are encrypted on
//! the device with a 256-bit data key; the service only ever sees opaque
//! blobs.
//!
//! ## Components
//!
//! - [`SecretStore`] - injected secure key-value store for the wrapped data
//!   key, the password escrow record, and the bearer token
//! - [`KeyManager`] - lifecycle of the data key, including password-based
//!   export/import for multi-device recovery
//! - [`TokenStore`] - read access to the bearer token saved at login
//! - [`Remote`] - the backup service abstraction ([`HttpRemote`] over HTTPS,
//!   [`MockRemote`] for tests)
//! - [`BackupClient`] - push/pull orchestration
//!
//! ## Concurrency
//!
//! Every operation is a single sequential async pipeline with no internal
//! parallelism. The secret store is assumed to provide atomic reads and
//! writes of a single record but no cross-operation transactions: callers
//! must serialize key-management mutations (export/import/clear) against
//! in-flight push/pull operations.
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use ciphernote_client::{BackupClient, HttpRemote, TokenStore};
//! use ciphernote_types::EntryRecord;
//!
//! let store = Arc::new(platform_secret_store());
//! let client = BackupClient::new(HttpRemote::new("https://backup.example.com"), store.clone());
//!
//! let token = client.login("me@example.com", "password").await?;
//! TokenStore::new(store).save("me@example.com", &token).await?;
//!
//! client.push_entry(&EntryRecord::new("today was calm", "calm day", "calm")).await?;
//! let entries = client.restore_entries(0).await?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod api;
pub mod client;
pub mod keys;
pub mod store;
pub mod token;

pub use api::{ApiError, HttpRemote, MockRemote, Remote};
pub use client::{BackupClient, ClientError, PAYLOAD_AAD};
pub use keys::{EscrowRecord, KeyError, KeyManager, KDF_ITERATIONS, SALT_SIZE};
pub use store::{
    MemorySecretStore, SecretStore, StoreError, SECRET_AUTH_EMAIL, SECRET_AUTH_TOKEN,
    SECRET_DATA_KEY, SECRET_ESCROW_SALT, SECRET_ESCROW_WRAPPED,
};
pub use token::TokenStore;
