use std::sync::Arc;

use tracing::debug;

use super::storage::KeyValueStore;

/// Storage key of the credential slot.
pub const TOKEN_KEY: &str = "userToken";

/// Read-only access to the current credential.
///
/// Implementations must read their source on every call; the guard and the
/// request authenticator rely on seeing the value as of invocation time.
pub trait CredentialProvider: Send + Sync {
    /// The stored token, or `None` when no (non-empty) token is stored.
    fn token(&self) -> Option<String>;

    fn has_token(&self) -> bool {
        self.token().is_some()
    }
}

impl<P: CredentialProvider + ?Sized> CredentialProvider for Arc<P> {
    fn token(&self) -> Option<String> {
        (**self).token()
    }
}

/// Reads the token from the `userToken` slot of a key-value store.
pub struct TokenCredentials<S> {
    store: S,
}

impl<S: KeyValueStore> TokenCredentials<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }
}

impl<S: KeyValueStore> CredentialProvider for TokenCredentials<S> {
    fn token(&self) -> Option<String> {
        match self.store.get(TOKEN_KEY) {
            Ok(Some(token)) if !token.is_empty() => Some(token),
            Ok(_) => None,
            Err(e) => {
                // Unreadable storage counts as signed out
                debug!(error = %e, "Failed to read credential, treating as absent");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::storage::{FileStore, MemoryStore};

    #[test]
    fn test_token_absent_present_empty() {
        let store = Arc::new(MemoryStore::new());
        let credentials = TokenCredentials::new(Arc::clone(&store));
        assert_eq!(credentials.token(), None);
        assert!(!credentials.has_token());

        store.set(TOKEN_KEY, "abc123").unwrap();
        assert_eq!(credentials.token().as_deref(), Some("abc123"));
        assert!(credentials.has_token());

        store.set(TOKEN_KEY, "").unwrap();
        assert_eq!(credentials.token(), None);
    }

    #[test]
    fn test_token_is_never_cached() {
        let store = Arc::new(MemoryStore::new());
        let credentials = TokenCredentials::new(Arc::clone(&store));

        store.set(TOKEN_KEY, "first").unwrap();
        assert_eq!(credentials.token().as_deref(), Some("first"));

        store.set(TOKEN_KEY, "second").unwrap();
        assert_eq!(credentials.token().as_deref(), Some("second"));

        store.remove(TOKEN_KEY).unwrap();
        assert_eq!(credentials.token(), None);
    }

    #[test]
    fn test_read_failure_is_absent() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        std::fs::write(store.path(), "{broken").unwrap();

        let credentials = TokenCredentials::new(store);
        assert_eq!(credentials.token(), None);
    }

    #[test]
    fn test_provider_behind_dyn_arc() {
        let store = Arc::new(MemoryStore::new());
        store.set(TOKEN_KEY, "9").unwrap();
        let provider: Arc<dyn CredentialProvider> = Arc::new(TokenCredentials::new(store));
        assert_eq!(provider.token().as_deref(), Some("9"));
    }
}
