//! HTTPS implementation of the [`Remote`] trait.

use async_trait::async_trait;

use ciphernote_types::{AuthRequest, AuthResponse, EntryItem, EntryList, EntryPayload};

use super::{ApiError, Remote};

/// The backup service over HTTPS with JSON bodies.
///
/// Timeouts are the `reqwest` client defaults; nothing is configured per
/// call. The base URL comes from application configuration.
pub struct HttpRemote {
    client: reqwest::Client,
    base_url: String,
}

impl HttpRemote {
    /// Create a remote for the given base URL (trailing `/` tolerated).
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// The configured base URL, without trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn authenticate(
        &self,
        path: &str,
        email: &str,
        password: &str,
    ) -> Result<String, ApiError> {
        let body = AuthRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let response = self
            .client
            .post(format!("{}{}", self.base_url, path))
            .json(&body)
            .send()
            .await
            .map_err(|e| ApiError::ConnectionFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status(status.as_u16()));
        }

        let auth: AuthResponse = response
            .json()
            .await
            .map_err(|e| ApiError::InvalidResponse(e.to_string()))?;
        Ok(auth.access_token)
    }
}

#[async_trait]
impl Remote for HttpRemote {
    async fn register(&self, email: &str, password: &str) -> Result<String, ApiError> {
        self.authenticate("/register", email, password).await
    }

    async fn login(&self, email: &str, password: &str) -> Result<String, ApiError> {
        self.authenticate("/login", email, password).await
    }

    async fn push_entry(&self, token: &str, payload: &EntryPayload) -> Result<(), ApiError> {
        let response = self
            .client
            .post(format!("{}/entry", self.base_url))
            .bearer_auth(token)
            .json(payload)
            .send()
            .await
            .map_err(|e| ApiError::ConnectionFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status(status.as_u16()));
        }
        // Response body is ignored on success.
        Ok(())
    }

    async fn list_entries(&self, token: &str, since_ms: u64) -> Result<Vec<EntryItem>, ApiError> {
        let response = self
            .client
            .get(format!("{}/entries", self.base_url))
            .query(&[("since", since_ms)])
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| ApiError::ConnectionFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status(status.as_u16()));
        }

        let list: EntryList = response
            .json()
            .await
            .map_err(|e| ApiError::InvalidResponse(e.to_string()))?;
        Ok(list.items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let remote = HttpRemote::new("https://backup.example.com/");
        assert_eq!(remote.base_url(), "https://backup.example.com");

        let remote = HttpRemote::new("https://backup.example.com");
        assert_eq!(remote.base_url(), "https://backup.example.com");
    }

    #[tokio::test]
    async fn unreachable_host_is_connection_failed() {
        // Reserved TLD, resolution fails without touching the network stack
        // beyond DNS.
        let remote = HttpRemote::new("http://backup.invalid");
        let result = remote.login("me@example.com", "pw").await;
        assert!(matches!(result, Err(ApiError::ConnectionFailed(_))));
    }
}
