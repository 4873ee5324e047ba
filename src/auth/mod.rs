//! Authentication state for the WASAText client.
//!
//! This module provides:
//! - `KeyValueStore`: persistent storage back-ends (memory, JSON file, OS keychain)
//! - `CredentialProvider`: read-only access to the stored bearer token
//! - `Session`: the login/logout flows that write the token
//!
//! The token is opaque. Presence of a non-empty value is all that counts as
//! being signed in; nothing here validates or expires it.

pub mod credentials;
pub mod session;
pub mod storage;

pub use credentials::{CredentialProvider, TokenCredentials, TOKEN_KEY};
pub use session::{Session, USERNAME_KEY};
pub use storage::{FileStore, KeyValueStore, KeyringStore, MemoryStore, StorageError};
