//! Identity types for the Ciphernote backup protocol.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A unique identifier for a backed-up journal entry.
///
/// UUID v4 format (16 bytes), generated client-side for every push.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(uuid::Uuid);

impl EntryId {
    /// Create a new random EntryId.
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }

    /// Create an EntryId from raw bytes.
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        uuid::Uuid::from_slice(bytes).ok().map(Self)
    }

    /// Parse an EntryId from its hyphenated string form.
    pub fn parse(s: &str) -> Option<Self> {
        uuid::Uuid::parse_str(s).ok().map(Self)
    }

    /// Get the raw bytes of this EntryId.
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// Get the inner UUID.
    pub fn as_uuid(&self) -> &uuid::Uuid {
        &self.0
    }
}

impl Default for EntryId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntryId({})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_id_is_uuid_v4() {
        let id = EntryId::new();
        assert_eq!(id.as_bytes().len(), 16);
        assert_eq!(id.as_uuid().get_version_num(), 4);
    }

    #[test]
    fn entry_id_roundtrip() {
        let original = EntryId::new();
        let bytes = original.as_bytes();
        let restored = EntryId::from_bytes(bytes).unwrap();
        assert_eq!(original, restored);
    }

    #[test]
    fn entry_id_parse_display_roundtrip() {
        let original = EntryId::new();
        let parsed = EntryId::parse(&original.to_string()).unwrap();
        assert_eq!(original, parsed);
    }

    #[test]
    fn entry_id_from_invalid_length_fails() {
        assert!(EntryId::from_bytes(&[0u8; 8]).is_none());
        assert!(EntryId::from_bytes(&[0u8; 32]).is_none());
    }

    #[test]
    fn entry_id_serializes_as_string() {
        let id = EntryId::new();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", id));
    }
}
