//! JSON file-based key-value store.
//!
//! This module provides a simple, human-readable store that keeps the whole
//! key space in one JSON document. It uses atomic file writes (write-to-temp +
//! rename) so a crash mid-write never leaves a truncated document behind.
//!
//! # Performance Characteristics
//!
//! - **Read**: O(1) - loads the entire file into memory once
//! - **Write**: O(n) - serializes and writes the entire document
//! - **Best for**: a handful of keys holding small blobs, written on user action

use crate::domain::error::{RecipeError, Result};
use crate::storage::backend::KeyValueStore;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

/// On-disk container format.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoreData {
    /// Version of the container format for future migrations.
    version: u32,

    /// Stored blobs keyed by storage key.
    #[serde(default)]
    entries: BTreeMap<String, String>,
}

impl Default for StoreData {
    fn default() -> Self {
        Self {
            version: 1,
            entries: BTreeMap::new(),
        }
    }
}

/// JSON file key-value store.
///
/// The document is loaded on [`open`](Self::open) and rewritten on every
/// mutation. Values are opaque text; callers store their own JSON inside.
///
/// # File Format
///
/// ```json
/// {
///   "version": 1,
///   "entries": {
///     "recipebox-dark-mode": "true",
///     "recipebox-favorites": "[{\"id\":\"52772\",...}]"
///   }
/// }
/// ```
pub struct JsonFileStore {
    /// Path to the JSON file on disk.
    file_path: PathBuf,

    /// In-memory copy of the document.
    data: Mutex<StoreData>,
}

impl JsonFileStore {
    /// Opens the store at `file_path`, creating parent directories as needed.
    ///
    /// A missing file yields an empty store. A file that cannot be parsed is
    /// renamed to `<file>.corrupt` and the store starts empty, so one bad
    /// write by another program never locks the user out.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory cannot be created or the
    /// existing file cannot be read.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use recipebox::storage::JsonFileStore;
    /// use std::path::PathBuf;
    ///
    /// let store = JsonFileStore::open(PathBuf::from("/tmp/recipebox/store.json"))?;
    /// # Ok::<(), recipebox::RecipeError>(())
    /// ```
    pub fn open(file_path: PathBuf) -> Result<Self> {
        tracing::debug!(path = ?file_path, "opening JSON store");

        if let Some(parent) = file_path.parent() {
            tracing::debug!(parent = ?parent, "creating parent directory");
            std::fs::create_dir_all(parent)?;
        }

        let data = if file_path.exists() {
            Self::load_from_file(&file_path)?
        } else {
            tracing::debug!("initializing new empty store");
            StoreData::default()
        };

        tracing::debug!(entry_count = data.entries.len(), "store opened");

        Ok(Self {
            file_path,
            data: Mutex::new(data),
        })
    }

    /// Path of the backing document.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.file_path
    }

    fn load_from_file(path: &Path) -> Result<StoreData> {
        let contents = std::fs::read_to_string(path)?;

        match serde_json::from_str::<StoreData>(&contents) {
            Ok(data) => {
                tracing::debug!(
                    version = data.version,
                    entries = data.entries.len(),
                    "loaded store document"
                );
                Ok(data)
            }
            Err(e) => {
                let mut quarantine = path.as_os_str().to_owned();
                quarantine.push(".corrupt");
                let quarantine = PathBuf::from(quarantine);
                tracing::warn!(
                    path = ?path,
                    quarantine = ?quarantine,
                    error = %e,
                    "store document is corrupt, moving it aside"
                );
                std::fs::rename(path, &quarantine)?;
                Ok(StoreData::default())
            }
        }
    }

    /// Writes the document to disk using write-to-temp + rename.
    fn save_to_file(&self, data: &StoreData) -> Result<()> {
        tracing::debug!(path = ?self.file_path, "saving store document");

        let json = serde_json::to_string_pretty(data)
            .map_err(|e| RecipeError::Storage(format!("failed to serialize JSON: {e}")))?;

        let tmp_path = self.file_path.with_extension("tmp");

        tracing::trace!(tmp_path = ?tmp_path, "writing to temporary file");
        std::fs::write(&tmp_path, json)?;

        tracing::trace!("renaming temporary file to final location");
        std::fs::rename(&tmp_path, &self.file_path)?;

        Ok(())
    }

    fn lock(&self) -> Result<MutexGuard<'_, StoreData>> {
        self.data
            .lock()
            .map_err(|e| RecipeError::Storage(format!("store lock poisoned: {e}")))
    }

    /// Persists `data`, restoring `previous` under `key` if the write fails.
    fn commit(
        &self,
        data: &mut StoreData,
        key: &str,
        previous: Option<String>,
    ) -> Result<()> {
        if let Err(e) = self.save_to_file(data) {
            tracing::warn!(key = %key, error = %e, "write failed, rolling back entry");
            match previous {
                Some(value) => data.entries.insert(key.to_string(), value),
                None => data.entries.remove(key),
            };
            return Err(e);
        }
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let _span = tracing::trace_span!("json_store_get", key = %key).entered();

        let data = self.lock()?;
        Ok(data.entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let _span = tracing::debug_span!("json_store_set", key = %key, bytes = value.len()).entered();

        let mut data = self.lock()?;
        let previous = data.entries.insert(key.to_string(), value.to_string());
        self.commit(&mut data, key, previous)?;

        tracing::debug!("entry stored");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let _span = tracing::debug_span!("json_store_remove", key = %key).entered();

        let mut data = self.lock()?;
        let Some(previous) = data.entries.remove(key) else {
            tracing::trace!("key absent, nothing to remove");
            return Ok(());
        };
        self.commit(&mut data, key, Some(previous))?;

        tracing::debug!("entry removed");
        Ok(())
    }
}

impl std::fmt::Debug for JsonFileStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonFileStore")
            .field("file_path", &self.file_path)
            .finish_non_exhaustive()
    }
}
