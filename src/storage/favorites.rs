//! Persisted, deduplicated favorites collection.
//!
//! [`FavoritesStore`] owns the in-memory list of favorited recipes and keeps
//! it in lockstep with the blob stored under [`FAVORITES_KEY`]. Every mutation
//! writes the full collection first and only then updates memory, so once a
//! call returns, storage and memory agree, whether it succeeded or not.
//!
//! # Persisted Format
//!
//! A JSON array of [`Recipe`] in insertion order:
//!
//! ```json
//! [{"id":"52772","title":"Teriyaki Chicken","ingredients":[...]}]
//! ```

use crate::domain::error::{RecipeError, Result};
use crate::domain::Recipe;
use crate::storage::backend::{KeyValueStore, SharedStore};
use std::collections::HashSet;

/// Storage key holding the favorites array.
pub const FAVORITES_KEY: &str = "recipebox-favorites";

/// Result of [`FavoritesStore::toggle`], describing the state after the call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// The recipe was not a favorite and now is.
    Added,
    /// The recipe was a favorite and no longer is.
    Removed,
}

impl ToggleOutcome {
    /// Whether the recipe is favorited after the toggle.
    #[must_use]
    pub const fn is_favorited(self) -> bool {
        matches!(self, Self::Added)
    }
}

/// Favorites keyed by recipe id, in insertion order.
///
/// # Example
///
/// ```
/// use recipebox::storage::{FavoritesStore, MemoryStore, SharedStore};
/// # use recipebox::domain::Recipe;
/// use std::sync::Arc;
///
/// # let recipe: Recipe = serde_json::from_str(r#"{"id":"1","title":"Soup"}"#).unwrap();
/// let store: SharedStore = Arc::new(MemoryStore::new());
/// let mut favorites = FavoritesStore::open(store)?;
///
/// favorites.add(recipe.clone())?;
/// favorites.add(recipe.clone())?;
/// assert_eq!(favorites.len(), 1);
/// assert!(favorites.is_favorited("1"));
/// # Ok::<(), recipebox::RecipeError>(())
/// ```
pub struct FavoritesStore {
    store: SharedStore,
    recipes: Vec<Recipe>,
}

impl FavoritesStore {
    /// Creates an empty, not yet hydrated collection over `store`.
    #[must_use]
    pub fn new(store: SharedStore) -> Self {
        Self {
            store,
            recipes: Vec::new(),
        }
    }

    /// Creates the collection and hydrates it from `store`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn open(store: SharedStore) -> Result<Self> {
        let mut favorites = Self::new(store);
        favorites.hydrate()?;
        Ok(favorites)
    }

    /// Replaces the in-memory collection with the persisted one.
    ///
    /// A missing key yields an empty collection. A value that does not decode
    /// as an array of recipes is deleted and the collection starts empty.
    /// Repeated ids in the stored array are collapsed, keeping the first.
    ///
    /// # Errors
    ///
    /// Returns an error only if the store itself cannot be read. Corrupt
    /// content is never an error.
    pub fn hydrate(&mut self) -> Result<()> {
        let _span = tracing::debug_span!("favorites_hydrate").entered();

        let Some(raw) = self.store.get(FAVORITES_KEY)? else {
            tracing::debug!("no persisted favorites");
            self.recipes.clear();
            return Ok(());
        };

        match serde_json::from_str::<Vec<Recipe>>(&raw) {
            Ok(stored) => {
                let stored_count = stored.len();
                let mut seen = HashSet::with_capacity(stored_count);
                self.recipes = stored
                    .into_iter()
                    .filter(|recipe| seen.insert(recipe.id.clone()))
                    .collect();

                if self.recipes.len() != stored_count {
                    tracing::warn!(
                        stored_count = stored_count,
                        kept = self.recipes.len(),
                        "dropped duplicate favorites"
                    );
                }
                tracing::debug!(count = self.recipes.len(), "favorites hydrated");
            }
            Err(e) => {
                let error = RecipeError::MalformedPersistedState {
                    key: FAVORITES_KEY.to_string(),
                    reason: e.to_string(),
                };
                tracing::warn!(error = %error, "discarding corrupt favorites");
                if let Err(e) = self.store.remove(FAVORITES_KEY) {
                    tracing::warn!(error = %e, "failed to delete corrupt favorites");
                }
                self.recipes.clear();
            }
        }

        Ok(())
    }

    /// Appends `recipe` unless a recipe with the same id is already present.
    ///
    /// Returns whether the collection changed.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection could not be persisted; the
    /// collection is unchanged in that case.
    pub fn add(&mut self, recipe: Recipe) -> Result<bool> {
        let _span = tracing::debug_span!("favorites_add", id = %recipe.id).entered();

        if self.is_favorited(&recipe.id) {
            tracing::debug!("already favorited");
            return Ok(false);
        }

        let mut next = self.recipes.clone();
        next.push(recipe);
        self.commit(next)?;

        tracing::debug!(count = self.recipes.len(), "favorite added");
        Ok(true)
    }

    /// Removes the recipe with `id` if present and persists.
    ///
    /// Returns the removed recipe.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection could not be persisted; the
    /// collection is unchanged in that case.
    pub fn remove(&mut self, id: &str) -> Result<Option<Recipe>> {
        let _span = tracing::debug_span!("favorites_remove", id = %id).entered();

        let Some(position) = self.recipes.iter().position(|r| r.has_id(id)) else {
            tracing::debug!("not a favorite");
            self.persist(&self.recipes)?;
            return Ok(None);
        };

        let mut next = self.recipes.clone();
        let removed = next.remove(position);
        self.commit(next)?;

        tracing::debug!(count = self.recipes.len(), "favorite removed");
        Ok(Some(removed))
    }

    /// Removes `recipe` if it is favorited, otherwise adds it.
    ///
    /// The branch is chosen from membership before the call; the returned
    /// outcome describes membership after it.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection could not be persisted.
    pub fn toggle(&mut self, recipe: &Recipe) -> Result<ToggleOutcome> {
        let was_favorited = self.is_favorited(&recipe.id);

        if was_favorited {
            self.remove(&recipe.id)?;
        } else {
            self.add(recipe.clone())?;
        }

        Ok(if self.is_favorited(&recipe.id) {
            ToggleOutcome::Added
        } else {
            ToggleOutcome::Removed
        })
    }

    /// Membership test by id.
    #[must_use]
    pub fn is_favorited(&self, id: &str) -> bool {
        self.recipes.iter().any(|r| r.has_id(id))
    }

    /// Looks up a favorite by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Recipe> {
        self.recipes.iter().find(|r| r.has_id(id))
    }

    /// Favorites in insertion order.
    #[must_use]
    pub fn list(&self) -> &[Recipe] {
        &self.recipes
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    fn commit(&mut self, next: Vec<Recipe>) -> Result<()> {
        self.persist(&next)?;
        self.recipes = next;
        Ok(())
    }

    fn persist(&self, recipes: &[Recipe]) -> Result<()> {
        let json = serde_json::to_string(recipes)
            .map_err(|e| RecipeError::Storage(format!("failed to serialize favorites: {e}")))?;
        self.store.set(FAVORITES_KEY, &json)
    }
}

impl std::fmt::Debug for FavoritesStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FavoritesStore")
            .field("recipes", &self.recipes)
            .finish_non_exhaustive()
    }
}
