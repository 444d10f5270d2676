//! Mock remote for testing.
//!
//! Behaves like a stub backup server: issues a fixed token, stores pushed
//! payloads, and echoes them back from `list_entries`. Supports failure
//! injection and call counting so tests can verify protocol behavior
//! without a network.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use ciphernote_types::{EntryItem, EntryPayload};

use super::{ApiError, Remote};

/// In-memory stand-in for the backup service.
#[derive(Debug, Default)]
pub struct MockRemote {
    inner: Arc<Mutex<MockRemoteInner>>,
}

#[derive(Debug)]
struct MockRemoteInner {
    issued_token: String,
    entries: Vec<EntryPayload>,
    extra_items: Vec<EntryItem>,
    auth_calls: u32,
    push_calls: u32,
    list_calls: u32,
    fail_next_auth: Option<ApiError>,
    fail_next_push: Option<ApiError>,
    fail_next_list: Option<ApiError>,
}

impl Default for MockRemoteInner {
    fn default() -> Self {
        Self {
            issued_token: "test-token".to_string(),
            entries: Vec::new(),
            extra_items: Vec::new(),
            auth_calls: 0,
            push_calls: 0,
            list_calls: 0,
            fail_next_auth: None,
            fail_next_push: None,
            fail_next_list: None,
        }
    }
}

impl MockRemote {
    /// Create a new mock remote issuing the default token `"test-token"`.
    pub fn new() -> Self {
        Self::default()
    }

    /// The token this mock issues and requires as bearer credential.
    pub fn issued_token(&self) -> String {
        self.inner.lock().unwrap().issued_token.clone()
    }

    /// Change the token issued on register/login.
    pub fn issue_token(&self, token: &str) {
        self.inner.lock().unwrap().issued_token = token.to_string();
    }

    /// All payloads pushed so far.
    pub fn pushed_payloads(&self) -> Vec<EntryPayload> {
        self.inner.lock().unwrap().entries.clone()
    }

    /// Inject an item to be returned by `list_entries` in addition to the
    /// pushed payloads (e.g. a corrupted blob).
    pub fn queue_item(&self, item: EntryItem) {
        self.inner.lock().unwrap().extra_items.push(item);
    }

    /// Number of register/login calls received.
    pub fn auth_calls(&self) -> u32 {
        self.inner.lock().unwrap().auth_calls
    }

    /// Number of push calls received.
    pub fn push_calls(&self) -> u32 {
        self.inner.lock().unwrap().push_calls
    }

    /// Number of list calls received.
    pub fn list_calls(&self) -> u32 {
        self.inner.lock().unwrap().list_calls
    }

    /// Cause the next register/login to fail.
    pub fn fail_next_auth(&self, error: ApiError) {
        self.inner.lock().unwrap().fail_next_auth = Some(error);
    }

    /// Cause the next push to fail.
    pub fn fail_next_push(&self, error: ApiError) {
        self.inner.lock().unwrap().fail_next_push = Some(error);
    }

    /// Cause the next list to fail.
    pub fn fail_next_list(&self, error: ApiError) {
        self.inner.lock().unwrap().fail_next_list = Some(error);
    }

    /// Clear all state.
    pub fn reset(&self) {
        let mut inner = self.inner.lock().unwrap();
        *inner = MockRemoteInner::default();
    }
}

impl Clone for MockRemote {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

#[async_trait]
impl Remote for MockRemote {
    async fn register(&self, _email: &str, _password: &str) -> Result<String, ApiError> {
        let mut inner = self.inner.lock().unwrap();
        inner.auth_calls += 1;
        if let Some(error) = inner.fail_next_auth.take() {
            return Err(error);
        }
        Ok(inner.issued_token.clone())
    }

    async fn login(&self, _email: &str, _password: &str) -> Result<String, ApiError> {
        let mut inner = self.inner.lock().unwrap();
        inner.auth_calls += 1;
        if let Some(error) = inner.fail_next_auth.take() {
            return Err(error);
        }
        Ok(inner.issued_token.clone())
    }

    async fn push_entry(&self, token: &str, payload: &EntryPayload) -> Result<(), ApiError> {
        let mut inner = self.inner.lock().unwrap();
        inner.push_calls += 1;
        if let Some(error) = inner.fail_next_push.take() {
            return Err(error);
        }
        if token != inner.issued_token {
            return Err(ApiError::Status(401));
        }
        inner.entries.push(payload.clone());
        Ok(())
    }

    async fn list_entries(&self, token: &str, since_ms: u64) -> Result<Vec<EntryItem>, ApiError> {
        let mut inner = self.inner.lock().unwrap();
        inner.list_calls += 1;
        if let Some(error) = inner.fail_next_list.take() {
            return Err(error);
        }
        if token != inner.issued_token {
            return Err(ApiError::Status(401));
        }

        let mut items: Vec<EntryItem> = inner.extra_items.clone();
        items.extend(
            inner
                .entries
                .iter()
                .filter(|e| e.updated_at > since_ms)
                .map(|e| EntryItem {
                    entry_id: e.entry_id,
                    created_at: e.created_at,
                    updated_at: e.updated_at,
                    blob_b64: e.blob_b64.clone(),
                }),
        );
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ciphernote_types::EntryId;

    fn payload(updated_at: u64) -> EntryPayload {
        EntryPayload {
            entry_id: EntryId::new(),
            created_at: updated_at,
            updated_at,
            size: 4,
            blob_b64: "AAAA".into(),
        }
    }

    #[tokio::test]
    async fn auth_issues_token() {
        let remote = MockRemote::new();
        let token = remote.login("me@example.com", "pw").await.unwrap();
        assert_eq!(token, remote.issued_token());
        assert_eq!(remote.auth_calls(), 1);
    }

    #[tokio::test]
    async fn push_then_list_echoes_entry() {
        let remote = MockRemote::new();
        let token = remote.issued_token();
        let pushed = payload(100);

        remote.push_entry(&token, &pushed).await.unwrap();
        let items = remote.list_entries(&token, 0).await.unwrap();

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].entry_id, pushed.entry_id);
        assert_eq!(items[0].blob_b64, pushed.blob_b64);
    }

    #[tokio::test]
    async fn list_filters_by_since() {
        let remote = MockRemote::new();
        let token = remote.issued_token();
        remote.push_entry(&token, &payload(100)).await.unwrap();
        remote.push_entry(&token, &payload(200)).await.unwrap();

        let items = remote.list_entries(&token, 150).await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].updated_at, 200);
    }

    #[tokio::test]
    async fn since_filter_compares_updated_at_not_created_at() {
        // An old entry re-encrypted after the cutoff must be listed.
        let remote = MockRemote::new();
        let token = remote.issued_token();
        let mut entry = payload(300);
        entry.created_at = 50;
        remote.push_entry(&token, &entry).await.unwrap();

        let items = remote.list_entries(&token, 100).await.unwrap();
        assert_eq!(items.len(), 1);

        let items = remote.list_entries(&token, 300).await.unwrap();
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn wrong_token_is_401() {
        let remote = MockRemote::new();

        let result = remote.push_entry("bad-token", &payload(1)).await;
        assert!(matches!(result, Err(ApiError::Status(401))));

        let result = remote.list_entries("bad-token", 0).await;
        assert!(matches!(result, Err(ApiError::Status(401))));
    }

    #[tokio::test]
    async fn forced_failures_fire_once() {
        let remote = MockRemote::new();
        let token = remote.issued_token();
        remote.fail_next_push(ApiError::Status(503));

        let result = remote.push_entry(&token, &payload(1)).await;
        assert!(matches!(result, Err(ApiError::Status(503))));

        // Next push works
        remote.push_entry(&token, &payload(2)).await.unwrap();
        assert_eq!(remote.push_calls(), 2);
    }

    #[tokio::test]
    async fn queued_items_are_listed_first() {
        let remote = MockRemote::new();
        let token = remote.issued_token();
        remote.queue_item(EntryItem {
            entry_id: EntryId::new(),
            created_at: 1,
            updated_at: 1,
            blob_b64: "garbage".into(),
        });

        let items = remote.list_entries(&token, 0).await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].blob_b64, "garbage");
    }
}
