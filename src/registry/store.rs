//! Concurrent key/value store for initialized resources.

use std::any::Any;
use std::sync::Arc;

use dashmap::DashMap;

type Entry = Arc<dyn Any + Send + Sync>;

/// Shared registry of initialized resources.
///
/// Cloning yields another handle to the same map. A `set` by one task is
/// visible to every later `get` from any task; there is no external locking.
#[derive(Clone, Default)]
pub struct Registry {
    entries: Arc<DashMap<String, Entry>>,
}

impl Registry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up `key` as a `T`.
    ///
    /// Returns `None` when the slot is empty or holds a different type.
    pub fn get<T>(&self, key: &str) -> Option<Arc<T>>
    where
        T: Any + Send + Sync,
    {
        let entry = self.entries.get(key).map(|e| Arc::clone(e.value()))?;
        match entry.downcast::<T>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(key, expected = std::any::type_name::<T>(), "Registry entry has unexpected type");
                None
            }
        }
    }

    /// Store `value` under `key`, replacing any previous entry.
    ///
    /// Returns true if an entry was replaced.
    pub fn set<T>(&self, key: impl Into<String>, value: T) -> bool
    where
        T: Any + Send + Sync,
    {
        self.set_shared(key, Arc::new(value))
    }

    /// Store an already shared value under `key`.
    pub fn set_shared<T>(&self, key: impl Into<String>, value: Arc<T>) -> bool
    where
        T: Any + Send + Sync,
    {
        self.entries.insert(key.into(), value).is_some()
    }

    /// Empty the slot for `key`. Returns true if it held a value.
    pub fn remove(&self, key: &str) -> bool {
        self.entries.remove(key).is_some()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Keys of all occupied slots, sorted.
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.entries.iter().map(|r| r.key().clone()).collect();
        keys.sort();
        keys
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry").field("keys", &self.keys()).finish()
    }
}
