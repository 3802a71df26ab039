//! View state machine types.
//!
//! Exactly one [`View`] is active at a time:
//! - **Random**: a single recipe (random pick, selected favorite or lookup)
//! - **Search**: results of the last submitted query
//! - **Favorites**: the persisted favorites list
//!
//! # Example
//!
//! ```rust
//! use recipebox::app::View;
//!
//! let view = View::default();
//! assert_eq!(view, View::Random);
//! assert_eq!(view.label(), "Random");
//! ```

/// The active view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    /// One recipe at a time. Initial view.
    #[default]
    Random,

    /// Search query and its results.
    Search,

    /// Saved recipes; never triggers a network call.
    Favorites,
}

impl View {
    /// Tab label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Random => "Random",
            Self::Search => "Search",
            Self::Favorites => "Favorites",
        }
    }

    /// All views in tab order.
    pub const ALL: [Self; 3] = [Self::Random, Self::Search, Self::Favorites];
}
