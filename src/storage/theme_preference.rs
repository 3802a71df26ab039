//! Persisted light/dark preference.
//!
//! The preference lives under [`THEME_KEY`] as a JSON boolean. Until the user
//! toggles it, the value follows whatever the host reports, and nothing is
//! written.

use crate::domain::error::{RecipeError, Result};
use crate::storage::backend::{KeyValueStore, SharedStore};

/// Storage key holding the dark-mode flag.
pub const THEME_KEY: &str = "recipebox-dark-mode";

/// Dark-mode flag with a host fallback.
///
/// # Example
///
/// ```
/// use recipebox::storage::{KeyValueStore, MemoryStore, SharedStore, ThemePreference};
/// use std::sync::Arc;
///
/// let store: SharedStore = Arc::new(MemoryStore::new());
/// let mut theme = ThemePreference::initial(store.clone(), || true);
/// assert!(theme.is_dark());
///
/// assert!(!theme.toggle()?);
/// assert_eq!(store.get("recipebox-dark-mode")?.as_deref(), Some("false"));
/// # Ok::<(), recipebox::RecipeError>(())
/// ```
pub struct ThemePreference {
    store: SharedStore,
    is_dark: bool,
}

impl ThemePreference {
    /// Resolves the starting value: the stored flag if there is a valid one,
    /// else `host_prefers_dark()`.
    ///
    /// A stored value that is not a JSON boolean is deleted. Read failures
    /// fall back to the host preference as well.
    pub fn initial(store: SharedStore, host_prefers_dark: impl FnOnce() -> bool) -> Self {
        let _span = tracing::debug_span!("theme_initial").entered();

        let stored = match store.get(THEME_KEY) {
            Ok(stored) => stored,
            Err(e) => {
                tracing::warn!(error = %e, "failed to read theme preference");
                None
            }
        };

        let persisted = stored.and_then(|raw| match serde_json::from_str::<bool>(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                let error = RecipeError::MalformedPersistedState {
                    key: THEME_KEY.to_string(),
                    reason: e.to_string(),
                };
                tracing::warn!(error = %error, "discarding corrupt theme preference");
                if let Err(e) = store.remove(THEME_KEY) {
                    tracing::warn!(error = %e, "failed to delete corrupt theme preference");
                }
                None
            }
        });

        let is_dark = persisted.unwrap_or_else(host_prefers_dark);
        tracing::debug!(is_dark = is_dark, from_store = persisted.is_some(), "theme resolved");

        Self { store, is_dark }
    }

    #[must_use]
    pub const fn is_dark(&self) -> bool {
        self.is_dark
    }

    /// Flips the flag and persists it. Returns the new value.
    ///
    /// # Errors
    ///
    /// Returns an error if the new value could not be stored; the flag keeps
    /// its previous value in that case.
    pub fn toggle(&mut self) -> Result<bool> {
        let next = !self.is_dark;
        self.store.set(THEME_KEY, if next { "true" } else { "false" })?;
        self.is_dark = next;

        tracing::debug!(is_dark = next, "theme toggled");
        Ok(next)
    }
}

impl std::fmt::Debug for ThemePreference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemePreference")
            .field("is_dark", &self.is_dark)
            .finish_non_exhaustive()
    }
}
