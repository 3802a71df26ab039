//! Storage layer for persisted user state.
//!
//! This module provides the key-value abstraction the core persists through,
//! two backends for it, and the two stores built on top: the favorites
//! collection and the theme preference. Each of those owns one JSON blob under
//! a fixed key and recovers locally from a corrupt blob.
//!
//! # Modules
//!
//! - `backend`: Key-value trait abstraction
//! - `json`: Single-document JSON file backend
//! - `memory`: In-memory backend
//! - `favorites`: Deduplicated favorites collection
//! - `theme_preference`: Dark-mode flag with host fallback

pub mod backend;
pub mod favorites;
pub mod json;
pub mod memory;
pub mod theme_preference;

pub use backend::{KeyValueStore, SharedStore};
pub use favorites::{FavoritesStore, ToggleOutcome, FAVORITES_KEY};
pub use json::JsonFileStore;
pub use memory::MemoryStore;
pub use theme_preference::{ThemePreference, THEME_KEY};
