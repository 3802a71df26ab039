//! Actions and notifications produced by the event handler.
//!
//! The handler never talks to the catalog directly. It returns
//! [`Action`]s; catalog actions carry a [`Ticket`] that comes back with the
//! response so stale results can be recognized, and [`Action::Notify`]
//! carries a user-facing [`Notification`] for the presentation layer.
//!
//! # Example
//!
//! ```rust
//! use recipebox::app::{Action, Notification, Ticket};
//!
//! let actions = vec![
//!     Action::FetchRandom { ticket: Ticket::new(1) },
//!     Action::Notify(Notification::NoResults { query: "zzz".to_string() }),
//! ];
//! assert!(matches!(&actions[1], Action::Notify(n) if n.title() == "No results found"));
//! ```

use std::fmt;

/// Identifies one issued catalog call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Ticket(u64);

impl Ticket {
    #[must_use]
    pub const fn new(sequence: u64) -> Self {
        Self(sequence)
    }
}

impl fmt::Display for Ticket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Side effects requested by the event handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Fetch a random recipe.
    FetchRandom {
        ticket: Ticket,
    },

    /// Run a catalog search for an already-trimmed query.
    Search {
        ticket: Ticket,
        query: String,
    },

    /// Look up a recipe by catalog id.
    FetchById {
        ticket: Ticket,
        id: String,
    },

    /// Surface a transient message to the user.
    Notify(Notification),
}

/// User-facing transient messages (toasts).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    /// A recipe is now a favorite.
    FavoriteAdded {
        id: String,
        title: String,
    },

    /// A recipe is no longer a favorite.
    FavoriteRemoved {
        id: String,
        title: String,
    },

    /// A search succeeded with zero matches. Distinct from a failure.
    NoResults {
        query: String,
    },

    /// A lookup succeeded but the catalog has no recipe with that id.
    RecipeNotFound {
        id: String,
    },
}

impl Notification {
    /// Headline.
    #[must_use]
    pub fn title(&self) -> String {
        match self {
            Self::FavoriteAdded { title, .. } => format!("{title} added to favorites!"),
            Self::FavoriteRemoved { title, .. } => format!("{title} removed from favorites!"),
            Self::NoResults { .. } => "No results found".to_string(),
            Self::RecipeNotFound { .. } => "Recipe not found".to_string(),
        }
    }

    /// Secondary line.
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Self::FavoriteAdded { .. } => "Saved to your favorites".to_string(),
            Self::FavoriteRemoved { .. } => "Removed from your favorites".to_string(),
            Self::NoResults { query } => {
                format!("No recipes found for \"{query}\". Try a different search term!")
            }
            Self::RecipeNotFound { id } => {
                format!("No recipe with id \"{id}\" exists in the catalog.")
            }
        }
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.title(), self.description())
    }
}
