//! Plaintext entry content.
//!
//! [`EntryRecord`] is the structure that actually gets encrypted. It only
//! exists in process memory; it is never transmitted or persisted in the
//! clear.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::EntryId;

/// The plaintext content of one journal entry.
///
/// Serialized with short field names (`t`, `s`, `m`) before encryption; the
/// serialized form is what gets sealed into the wire blob. Changing these
/// names is a payload schema change and must be accompanied by a new
/// associated-data version string.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryRecord {
    /// Full transcript text.
    #[serde(rename = "t")]
    pub transcript: String,
    /// Model-produced summary.
    #[serde(rename = "s")]
    pub summary: String,
    /// Inferred mood label.
    #[serde(rename = "m")]
    pub mood: String,
}

impl EntryRecord {
    /// Create a new record.
    pub fn new(
        transcript: impl Into<String>,
        summary: impl Into<String>,
        mood: impl Into<String>,
    ) -> Self {
        Self {
            transcript: transcript.into(),
            summary: summary.into(),
            mood: mood.into(),
        }
    }
}

// Don't leak journal content in debug output
impl fmt::Debug for EntryRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntryRecord")
            .field(
                "transcript",
                &format!("[{} bytes REDACTED]", self.transcript.len()),
            )
            .field("summary", &format!("[{} bytes REDACTED]", self.summary.len()))
            .field("mood", &format!("[{} bytes REDACTED]", self.mood.len()))
            .finish()
    }
}

/// One entry recovered from the backup service, with its decrypted content.
#[derive(Clone, PartialEq, Eq)]
pub struct RestoredEntry {
    /// The entry identifier assigned at push time.
    pub entry_id: EntryId,
    /// Creation timestamp (epoch milliseconds).
    pub created_at: u64,
    /// Last-update timestamp (epoch milliseconds).
    pub updated_at: u64,
    /// The decrypted entry content.
    pub record: EntryRecord,
}

impl fmt::Debug for RestoredEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RestoredEntry")
            .field("entry_id", &self.entry_id)
            .field("created_at", &self.created_at)
            .field("updated_at", &self.updated_at)
            .field("record", &self.record)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_serializes_with_short_field_names() {
        let record = EntryRecord::new("today was calm", "calm day", "calm");
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["t"], "today was calm");
        assert_eq!(json["s"], "calm day");
        assert_eq!(json["m"], "calm");
    }

    #[test]
    fn record_json_roundtrip() {
        let record = EntryRecord::new("transcript text", "summary text", "happy");
        let json = serde_json::to_vec(&record).unwrap();
        let parsed: EntryRecord = serde_json::from_slice(&json).unwrap();
        assert_eq!(record, parsed);
    }

    #[test]
    fn record_debug_redacts_content() {
        let record = EntryRecord::new("very private thoughts", "secret", "anxious");
        let debug = format!("{:?}", record);

        assert!(debug.contains("REDACTED"));
        assert!(!debug.contains("private"));
        assert!(!debug.contains("secret"));
        assert!(!debug.contains("anxious"));
    }

    #[test]
    fn restored_entry_debug_redacts_record() {
        let entry = RestoredEntry {
            entry_id: EntryId::new(),
            created_at: 1705000000000,
            updated_at: 1705000000000,
            record: EntryRecord::new("private", "private", "private"),
        };
        let debug = format!("{:?}", entry);
        assert!(debug.contains("REDACTED"));
        assert!(!debug.contains("private"));
    }
}
