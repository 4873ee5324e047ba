use anyhow::{Context, Result};
use tracing::info;

use super::credentials::TOKEN_KEY;
use super::storage::KeyValueStore;

/// Storage key of the signed-in username, kept for display only
pub const USERNAME_KEY: &str = "username";

/// Login and logout flows: the only writers of the credential slot.
pub struct Session<S> {
    store: S,
}

impl<S: KeyValueStore> Session<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Persist the token and username returned by a successful login
    pub fn login(&self, token: &str, username: &str) -> Result<()> {
        if token.is_empty() {
            anyhow::bail!("Refusing to store an empty token");
        }
        self.store
            .set(TOKEN_KEY, token)
            .context("Failed to store session token")?;
        self.set_username(username)?;
        info!(username = username, "Session started");
        Ok(())
    }

    /// Forget the stored token and username. Logging out twice is not an error.
    pub fn logout(&self) -> Result<()> {
        self.store
            .remove(TOKEN_KEY)
            .context("Failed to clear session token")?;
        self.store
            .remove(USERNAME_KEY)
            .context("Failed to clear session username")?;
        info!("Session cleared");
        Ok(())
    }

    /// Record a new username, e.g. after a rename
    pub fn set_username(&self, username: &str) -> Result<()> {
        self.store
            .set(USERNAME_KEY, username)
            .context("Failed to store session username")?;
        Ok(())
    }

    pub fn username(&self) -> Result<Option<String>> {
        self.store
            .get(USERNAME_KEY)
            .context("Failed to read session username")
    }

    /// Get the stored token, if any
    pub fn token(&self) -> Result<Option<String>> {
        let token = self
            .store
            .get(TOKEN_KEY)
            .context("Failed to read session token")?;
        Ok(token.filter(|t| !t.is_empty()))
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self.token(), Ok(Some(_)))
    }
}
