//! Access
//!
//! Optional sign-in gate for the host. Credentials come from configuration;
//! the payout engine knows nothing about it.

use std::fmt;

use thiserror::Error;
use tracing::{info, warn};

use crate::storage::{KeyValueStore, StorageError};

/// Store key recording a signed-in session.
pub const AUTHED_KEY: &str = "access.authed";

/// Errors raised by the [`AccessGate`].
#[derive(Debug, Error)]
pub enum AccessError {
    /// Username or password did not match.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The session flag could not be read or written.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Expected username and password.
#[derive(Clone)]
pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    /// Create credentials.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Case-sensitive username/password gate with a persisted session flag.
#[derive(Debug, Clone)]
pub struct AccessGate {
    credentials: Credentials,
}

impl AccessGate {
    /// Create a gate for `credentials`.
    pub fn new(credentials: Credentials) -> Self {
        Self { credentials }
    }

    /// Sign in, recording the session in `store`.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::InvalidCredentials`] if either value differs, or
    /// [`AccessError::Storage`] if the session cannot be recorded.
    pub fn login(
        &self,
        store: &mut impl KeyValueStore,
        username: &str,
        password: &str,
    ) -> Result<(), AccessError> {
        if username != self.credentials.username || password != self.credentials.password {
            warn!(username, "rejected sign-in");

            return Err(AccessError::InvalidCredentials);
        }

        store.set(AUTHED_KEY, "1".to_string())?;

        info!(username, "signed in");

        Ok(())
    }

    /// Sign out.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::Storage`] if the session cannot be cleared.
    pub fn logout(store: &mut impl KeyValueStore) -> Result<(), AccessError> {
        store.remove(AUTHED_KEY)?;

        info!("signed out");

        Ok(())
    }

    /// Whether a session is recorded in `store`.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::Storage`] if the store cannot be read.
    pub fn is_authed(store: &impl KeyValueStore) -> Result<bool, AccessError> {
        Ok(store.get(AUTHED_KEY)?.as_deref() == Some("1"))
    }
}
