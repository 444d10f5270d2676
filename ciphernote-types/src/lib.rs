//! # ciphernote-types
//!
//! Wire format types for the Ciphernote encrypted backup protocol.
//!
//! This crate provides the foundational types used across all Ciphernote
//! crates:
//! - [`EntryId`] - Identity type for backed-up journal entries
//! - [`EntryRecord`], [`RestoredEntry`] - Plaintext entry content (never
//!   transmitted or persisted unencrypted outside process memory)
//! - [`AuthRequest`], [`AuthResponse`], [`EntryPayload`], [`EntryItem`],
//!   [`EntryList`] - JSON bodies exchanged with the backup service

#![warn(missing_docs)]
#![warn(clippy::all)]

mod ids;
mod records;
mod wire;

pub use ids::EntryId;
pub use records::{EntryRecord, RestoredEntry};
pub use wire::{AuthRequest, AuthResponse, EntryItem, EntryList, EntryPayload};
