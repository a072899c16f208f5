//! Driven port for persisting the session token and username between runs.
//!
//! The stored form is two independent string values with no schema version,
//! so a partially written pair simply reads back as "no credentials".

#[cfg(test)]
use std::sync::Mutex;

use super::define_port_error;
use crate::domain::{SessionToken, User, Username};

/// Token and username needed for a silent re-login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredCredentials {
    /// Session token issued at login.
    pub token: SessionToken,
    /// Account the token belongs to.
    pub username: Username,
}

impl StoredCredentials {
    /// Credentials for the given active user.
    pub fn for_user(user: &User) -> Self {
        Self {
            token: user.login_token().clone(),
            username: user.username().clone(),
        }
    }
}

define_port_error! {
    /// Errors raised by credential stores.
    pub enum CredentialStoreError {
        /// Reading or writing the backing storage failed.
        Io { message: String } =>
            "credential store i/o failed: {message}",
        /// Stored values exist but cannot form valid credentials.
        Invalid { message: String } =>
            "stored credentials invalid: {message}",
    }
}

/// Port for loading, saving and clearing stored credentials.
#[cfg_attr(test, mockall::automock)]
pub trait CredentialStore: Send + Sync {
    /// Stored credentials, or `None` when either value is missing.
    fn load(&self) -> Result<Option<StoredCredentials>, CredentialStoreError>;

    /// Persist both values, replacing any previous pair.
    fn save(&self, credentials: &StoredCredentials) -> Result<(), CredentialStoreError>;

    /// Remove both values; clearing an empty store succeeds.
    fn clear(&self) -> Result<(), CredentialStoreError>;
}

/// Process-local store for tests that should not touch the filesystem.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct InMemoryCredentialStore {
    slot: Mutex<Option<StoredCredentials>>,
}

#[cfg(test)]
impl InMemoryCredentialStore {
    fn lock(
        &self,
    ) -> Result<std::sync::MutexGuard<'_, Option<StoredCredentials>>, CredentialStoreError> {
        self.slot
            .lock()
            .map_err(|_| CredentialStoreError::io("credential slot lock poisoned"))
    }
}

#[cfg(test)]
impl CredentialStore for InMemoryCredentialStore {
    fn load(&self) -> Result<Option<StoredCredentials>, CredentialStoreError> {
        Ok(self.lock()?.clone())
    }

    fn save(&self, credentials: &StoredCredentials) -> Result<(), CredentialStoreError> {
        *self.lock()? = Some(credentials.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), CredentialStoreError> {
        *self.lock()? = None;
        Ok(())
    }
}
