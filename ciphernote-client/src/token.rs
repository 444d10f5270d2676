//! Bearer token persistence.
//!
//! The token is issued by the backup service at login/registration and held
//! in the secure store alongside the account email. The sync client only
//! reads it; saving and clearing are the composing application's job.

use std::sync::Arc;

use crate::store::{SecretStore, StoreError, SECRET_AUTH_EMAIL, SECRET_AUTH_TOKEN};

/// Access to the persisted bearer token and account email.
pub struct TokenStore<S: SecretStore> {
    store: Arc<S>,
}

impl<S: SecretStore> TokenStore<S> {
    /// Create a TokenStore over a shared secret store.
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Persist the token and the email it belongs to.
    pub async fn save(&self, email: &str, token: &str) -> Result<(), StoreError> {
        self.store.put(SECRET_AUTH_EMAIL, email.as_bytes()).await?;
        self.store.put(SECRET_AUTH_TOKEN, token.as_bytes()).await?;
        Ok(())
    }

    /// Read the stored bearer token, if any.
    pub async fn token(&self) -> Result<Option<String>, StoreError> {
        read_string(self.store.as_ref(), SECRET_AUTH_TOKEN).await
    }

    /// Read the stored account email, if any.
    pub async fn email(&self) -> Result<Option<String>, StoreError> {
        read_string(self.store.as_ref(), SECRET_AUTH_EMAIL).await
    }

    /// Delete the stored token and email.
    pub async fn clear(&self) -> Result<(), StoreError> {
        self.store.delete(SECRET_AUTH_TOKEN).await?;
        self.store.delete(SECRET_AUTH_EMAIL).await?;
        Ok(())
    }
}

async fn read_string<S: SecretStore + ?Sized>(
    store: &S,
    name: &str,
) -> Result<Option<String>, StoreError> {
    match store.get(name).await? {
        None => Ok(None),
        Some(bytes) => String::from_utf8(bytes)
            .map(Some)
            .map_err(|_| StoreError::Unavailable(format!("{name} is not valid utf-8"))),
    }
}
