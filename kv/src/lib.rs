//! Key-value settings store interface.
//!
//! The search core reads its provider configuration from two settings
//! sources: a global record store shared by all clients, and a local-only
//! cached copy of the same setting. Both are modeled by the [`KvStore`]
//! trait; [`MemoryStore`] is the in-memory implementation used as the
//! local cache and by tests.

pub mod memory;

use std::fmt;
use thiserror::Error;

/// Errors that can occur in settings store operations.
#[derive(Error, Debug)]
pub enum KvError {
    #[error("kv: storage error: {0}")]
    Storage(String),
}

/// Result type for store operations.
pub type KvResult<T> = Result<T, KvError>;

/// Key-value settings store.
///
/// Keys are strings, values are opaque bytes; the caller decides the
/// encoding (the config resolver stores JSON).
pub trait KvStore: Send + Sync {
    /// Get a value by key. `Ok(None)` means the key is absent.
    fn get(&self, key: &str) -> KvResult<Option<Vec<u8>>>;

    /// Set a key-value pair, replacing any existing value.
    fn set(&self, key: &str, value: &[u8]) -> KvResult<()>;

    /// Delete a key. Deleting an absent key is not an error.
    fn delete(&self, key: &str) -> KvResult<()>;
}

impl fmt::Debug for dyn KvStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "KvStore {{ ... }}")
    }
}

pub use memory::MemoryStore;
