//! In-memory key-value store.
//!
//! Used by tests and by hosts that do not want anything written to disk.

use crate::domain::error::{RecipeError, Result};
use crate::storage::backend::KeyValueStore;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

/// Process-local [`KeyValueStore`]. Contents vanish with the value.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-seeded with `entries`.
    ///
    /// ```
    /// use recipebox::storage::{KeyValueStore, MemoryStore};
    ///
    /// let store = MemoryStore::with_entries([("recipebox-dark-mode", "true")]);
    /// assert!(store.contains_key("recipebox-dark-mode"));
    /// ```
    #[must_use]
    pub fn with_entries<K, V, I>(entries: I) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self {
            entries: Mutex::new(
                entries
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }

    /// Whether `key` currently holds a value. A poisoned lock reads as absent.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.lock().is_ok_and(|entries| entries.contains_key(key))
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, String>>> {
        self.entries
            .lock()
            .map_err(|e| RecipeError::Storage(format!("store lock poisoned: {e}")))
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.lock()?.remove(key);
        Ok(())
    }
}
