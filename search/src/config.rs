//! Provider configuration resolution and caching.

use std::sync::{Arc, Mutex};

use facefind_kv::{KvResult, KvStore};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Settings key under which the provider configuration is stored, in both
/// the global record store and the local cache store.
pub const AI_CONFIG_KEY: &str = "facefind_ai_config";

/// Which matching backend is active, with its connection parameters.
///
/// Stored as JSON, e.g.
/// `{"provider":"remote","api_url":"http://host:8000","api_key":"..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "provider", rename_all = "snake_case")]
pub enum ProviderConfig {
    /// In-process model-based matching. No parameters.
    Local,
    /// HTTP verification service.
    Remote { api_url: String, api_key: String },
}

impl ProviderConfig {
    /// True when every connection parameter the variant requires is
    /// present. A `Remote` value missing its URL or key is invalid and
    /// callers fall back to `Local` for the run.
    pub fn is_valid(&self) -> bool {
        match self {
            Self::Local => true,
            Self::Remote { api_url, api_key } => !api_url.is_empty() && !api_key.is_empty(),
        }
    }
}

/// Process-wide configuration cell with layered resolution.
///
/// Lookup order, first hit wins:
///
/// 1. the in-memory cache, populated by a prior resolution
/// 2. the global settings store (external record store)
/// 3. the local cache store (used when the record store is unreachable)
/// 4. built-in default: [`ProviderConfig::Local`]
///
/// Store failures and malformed stored values are treated as "source
/// absent". The cache never expires on its own; callers that change the
/// setting must [`invalidate`](ConfigCell::invalidate) it. The cell is
/// constructed once at process start and passed into the engine.
pub struct ConfigCell {
    cache: Mutex<Option<ProviderConfig>>,
    global: Arc<dyn KvStore>,
    local: Arc<dyn KvStore>,
}

impl ConfigCell {
    pub fn new(global: Arc<dyn KvStore>, local: Arc<dyn KvStore>) -> Self {
        Self {
            cache: Mutex::new(None),
            global,
            local,
        }
    }

    /// Resolves the active provider configuration.
    ///
    /// A hit from either store populates the cache; the built-in default
    /// does not, so a later stored setting is picked up without an
    /// explicit invalidation.
    pub fn resolve(&self) -> ProviderConfig {
        let mut cache = self.cache.lock().unwrap();
        if let Some(config) = cache.as_ref() {
            return config.clone();
        }

        for store in [&self.global, &self.local] {
            if let Some(config) = read_store(store.as_ref()) {
                *cache = Some(config.clone());
                return config;
            }
        }

        ProviderConfig::Local
    }

    /// Clears the in-memory cache. The next [`resolve`](ConfigCell::resolve)
    /// re-reads the stores.
    pub fn invalidate(&self) {
        *self.cache.lock().unwrap() = None;
    }

    /// Persists a new configuration to the global store, mirrors it to the
    /// local cache store, and invalidates the in-memory cache.
    ///
    /// The local mirror is best-effort only when the global write worked;
    /// a global store failure is surfaced so the caller can tell the
    /// setting did not stick.
    pub fn save(&self, config: &ProviderConfig) -> KvResult<()> {
        let raw = serde_json::to_vec(config).expect("provider config serializes");
        self.global.set(AI_CONFIG_KEY, &raw)?;
        if let Err(e) = self.local.set(AI_CONFIG_KEY, &raw) {
            debug!("local config mirror write failed: {e}");
        }
        self.invalidate();
        Ok(())
    }
}

/// Reads and parses the stored config from one source. Store errors and
/// malformed values both collapse to `None`.
fn read_store(store: &dyn KvStore) -> Option<ProviderConfig> {
    let raw = store.get(AI_CONFIG_KEY).ok().flatten()?;
    match serde_json::from_slice(&raw) {
        Ok(config) => Some(config),
        Err(e) => {
            debug!("malformed stored provider config: {e}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use facefind_kv::{KvError, MemoryStore};

    use super::*;

    /// Store whose every operation fails, modeling an unreachable record
    /// store.
    struct UnreachableStore;

    impl KvStore for UnreachableStore {
        fn get(&self, _key: &str) -> KvResult<Option<Vec<u8>>> {
            Err(KvError::Storage("connection refused".into()))
        }
        fn set(&self, _key: &str, _value: &[u8]) -> KvResult<()> {
            Err(KvError::Storage("connection refused".into()))
        }
        fn delete(&self, _key: &str) -> KvResult<()> {
            Err(KvError::Storage("connection refused".into()))
        }
    }

    fn remote(url: &str, key: &str) -> ProviderConfig {
        ProviderConfig::Remote {
            api_url: url.into(),
            api_key: key.into(),
        }
    }

    fn put(store: &MemoryStore, config: &ProviderConfig) {
        store
            .set(AI_CONFIG_KEY, &serde_json::to_vec(config).unwrap())
            .unwrap();
    }

    #[test]
    fn defaults_to_local() {
        let cell = ConfigCell::new(
            Arc::new(MemoryStore::new()),
            Arc::new(MemoryStore::new()),
        );
        assert_eq!(cell.resolve(), ProviderConfig::Local);
    }

    #[test]
    fn default_is_not_cached() {
        let global = MemoryStore::new();
        let cell = ConfigCell::new(Arc::new(global.clone()), Arc::new(MemoryStore::new()));

        assert_eq!(cell.resolve(), ProviderConfig::Local);

        // A setting stored later is picked up without invalidation.
        put(&global, &remote("http://host", "key"));
        assert_eq!(cell.resolve(), remote("http://host", "key"));
    }

    #[test]
    fn global_store_wins_and_is_cached() {
        let global = MemoryStore::new();
        put(&global, &remote("http://host", "key"));
        let cell = ConfigCell::new(Arc::new(global.clone()), Arc::new(MemoryStore::new()));

        assert_eq!(cell.resolve(), remote("http://host", "key"));

        // Cached: a store change is invisible until invalidation.
        put(&global, &ProviderConfig::Local);
        assert_eq!(cell.resolve(), remote("http://host", "key"));

        cell.invalidate();
        assert_eq!(cell.resolve(), ProviderConfig::Local);
    }

    #[test]
    fn falls_back_to_local_store_when_global_unreachable() {
        let local = MemoryStore::new();
        put(&local, &remote("http://cached", "key"));
        let cell = ConfigCell::new(Arc::new(UnreachableStore), Arc::new(local));

        assert_eq!(cell.resolve(), remote("http://cached", "key"));
    }

    #[test]
    fn malformed_global_value_falls_through() {
        let global = MemoryStore::new();
        global.set(AI_CONFIG_KEY, b"{not json").unwrap();
        let local = MemoryStore::new();
        put(&local, &remote("http://cached", "key"));
        let cell = ConfigCell::new(Arc::new(global), Arc::new(local));

        assert_eq!(cell.resolve(), remote("http://cached", "key"));
    }

    #[test]
    fn save_writes_both_stores_and_invalidates() {
        let global = MemoryStore::new();
        let local = MemoryStore::new();
        let cell = ConfigCell::new(Arc::new(global.clone()), Arc::new(local.clone()));

        assert_eq!(cell.resolve(), ProviderConfig::Local);
        cell.save(&remote("http://host", "key")).unwrap();

        assert_eq!(cell.resolve(), remote("http://host", "key"));
        assert!(local.get(AI_CONFIG_KEY).unwrap().is_some());
    }

    #[test]
    fn remote_validity() {
        assert!(remote("http://host", "key").is_valid());
        assert!(!remote("", "key").is_valid());
        assert!(!remote("http://host", "").is_valid());
        assert!(ProviderConfig::Local.is_valid());
    }

    #[test]
    fn wire_format_round_trip() {
        let json = r#"{"provider":"remote","api_url":"http://host:8000","api_key":"k"}"#;
        let config: ProviderConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config, remote("http://host:8000", "k"));
        assert_eq!(serde_json::to_string(&config).unwrap(), json);

        let local: ProviderConfig = serde_json::from_str(r#"{"provider":"local"}"#).unwrap();
        assert_eq!(local, ProviderConfig::Local);
    }
}
