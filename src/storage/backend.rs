//! Key-value storage abstraction.
//!
//! This module defines the [`KeyValueStore`] trait that abstracts over
//! persistence backends. The favorites collection and the theme preference
//! each keep one JSON blob under a fixed key; neither knows which backend
//! holds it.
//!
//! # Design Philosophy
//!
//! The trait is deliberately string-in, string-out. Encoding and decoding of
//! blobs, and recovery from corrupt ones, belong to the stores built on top
//! of it.

use crate::domain::error::Result;
use std::sync::Arc;

/// Durable, synchronous, string-keyed storage.
///
/// Writes must be atomic from the caller's point of view: once `set` or
/// `remove` returns `Ok`, a subsequent `get` (in this process or after a
/// restart) observes the new value, and a failed write leaves the previous
/// value in place.
///
/// # Implementations
///
/// - [`JsonFileStore`](crate::storage::JsonFileStore): single JSON document on disk
/// - [`MemoryStore`](crate::storage::MemoryStore): process-local map
///
/// # Examples
///
/// ```
/// use recipebox::storage::{KeyValueStore, MemoryStore};
///
/// let store = MemoryStore::new();
/// store.set("greeting", "\"hello\"")?;
/// assert_eq!(store.get("greeting")?.as_deref(), Some("\"hello\""));
/// store.remove("greeting")?;
/// assert!(store.get("greeting")?.is_none());
/// # Ok::<(), recipebox::RecipeError>(())
/// ```
pub trait KeyValueStore: Send + Sync {
    /// Returns the text stored under `key`, or `None` if absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the write could not be made durable. The previous
    /// value is still in place in that case.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Deletes `key`. Removing an absent key is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the deletion could not be made durable.
    fn remove(&self, key: &str) -> Result<()>;
}

/// Shared handle to a store, passed explicitly to every component that persists.
pub type SharedStore = Arc<dyn KeyValueStore>;
