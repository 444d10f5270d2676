//! JSON bodies exchanged with the backup service.
//!
//! Field names here are the wire contract; they match the HTTP surface of
//! the service exactly and must not be renamed without a protocol version
//! bump.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::EntryId;

/// Request body for `POST /register` and `POST /login`.
#[derive(Clone, Serialize, Deserialize)]
pub struct AuthRequest {
    /// Account email address.
    pub email: String,
    /// Account password (transported over TLS only; unrelated to the
    /// escrow password that wraps the data key).
    pub password: String,
}

// Don't leak credentials in debug output
impl fmt::Debug for AuthRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthRequest")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Success response body for `POST /register` and `POST /login`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    /// Opaque bearer credential for subsequent calls.
    pub access_token: String,
}

/// Request body for `POST /entry`: one encrypted journal entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryPayload {
    /// Client-generated entry identifier.
    pub entry_id: EntryId,
    /// Creation timestamp (epoch milliseconds).
    pub created_at: u64,
    /// Last-update timestamp (epoch milliseconds).
    pub updated_at: u64,
    /// Length in bytes of the raw encrypted blob.
    pub size: u64,
    /// Base64 of `nonce(12) || ciphertext || tag(16)`.
    pub blob_b64: String,
}

/// One item in a `GET /entries` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryItem {
    /// Entry identifier from the original push.
    pub entry_id: EntryId,
    /// Creation timestamp (epoch milliseconds).
    pub created_at: u64,
    /// Last-update timestamp (epoch milliseconds).
    pub updated_at: u64,
    /// Base64 of `nonce(12) || ciphertext || tag(16)`.
    pub blob_b64: String,
}

/// Response body for `GET /entries?since={ms}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EntryList {
    /// Entries matching the `since` filter.
    pub items: Vec<EntryItem>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_request_debug_redacts_password() {
        let req = AuthRequest {
            email: "user@example.com".into(),
            password: "hunter2".into(),
        };
        let debug = format!("{:?}", req);
        assert!(debug.contains("user@example.com"));
        assert!(debug.contains("REDACTED"));
        assert!(!debug.contains("hunter2"));
    }

    #[test]
    fn entry_payload_uses_wire_field_names() {
        let payload = EntryPayload {
            entry_id: EntryId::new(),
            created_at: 1705000000000,
            updated_at: 1705000000001,
            size: 42,
            blob_b64: "AAAA".into(),
        };
        let json = serde_json::to_value(&payload).unwrap();

        assert!(json.get("entry_id").is_some());
        assert!(json.get("created_at").is_some());
        assert!(json.get("updated_at").is_some());
        assert!(json.get("size").is_some());
        assert!(json.get("blob_b64").is_some());
    }

    #[test]
    fn entry_list_parses_service_response() {
        let body = r#"{"items":[{"entry_id":"8c2f7f8e-9d6a-4a5e-b1e4-0f4c6a1d2e3b","created_at":1,"updated_at":2,"blob_b64":"AA=="}]}"#;
        let list: EntryList = serde_json::from_str(body).unwrap();
        assert_eq!(list.items.len(), 1);
        assert_eq!(list.items[0].created_at, 1);
        assert_eq!(list.items[0].blob_b64, "AA==");
    }

    #[test]
    fn entry_list_empty_items() {
        let list: EntryList = serde_json::from_str(r#"{"items":[]}"#).unwrap();
        assert!(list.items.is_empty());
    }
}
