//! In-memory key-value store implementation.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::{KvError, KvResult, KvStore};

/// An in-memory key-value store backed by a HashMap.
///
/// Cloning is cheap and shares the underlying map.
#[derive(Clone)]
pub struct MemoryStore {
    data: Arc<Mutex<HashMap<String, Vec<u8>>>>,
}

impl MemoryStore {
    /// Create a new empty memory store.
    pub fn new() -> Self {
        Self {
            data: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> KvResult<Option<Vec<u8>>> {
        let data = self
            .data
            .lock()
            .map_err(|e| KvError::Storage(e.to_string()))?;
        Ok(data.get(key).cloned())
    }

    fn set(&self, key: &str, value: &[u8]) -> KvResult<()> {
        let mut data = self
            .data
            .lock()
            .map_err(|e| KvError::Storage(e.to_string()))?;
        data.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn delete(&self, key: &str) -> KvResult<()> {
        let mut data = self
            .data
            .lock()
            .map_err(|e| KvError::Storage(e.to_string()))?;
        data.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_delete() {
        let store = MemoryStore::new();

        store.set("key1", b"value1").unwrap();
        assert_eq!(store.get("key1").unwrap(), Some(b"value1".to_vec()));

        // Overwrite
        store.set("key1", b"value2").unwrap();
        assert_eq!(store.get("key1").unwrap(), Some(b"value2".to_vec()));

        // Non-existent key
        assert_eq!(store.get("nonexistent").unwrap(), None);

        store.delete("key1").unwrap();
        assert_eq!(store.get("key1").unwrap(), None);

        // Deleting an absent key is fine
        store.delete("key1").unwrap();
    }

    #[test]
    fn test_clone_shares_data() {
        let store = MemoryStore::new();
        let other = store.clone();

        store.set("shared", b"yes").unwrap();
        assert_eq!(other.get("shared").unwrap(), Some(b"yes".to_vec()));
    }
}
