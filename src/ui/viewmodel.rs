//! View model types representing renderable UI state.
//!
//! This module defines immutable view models computed from application state.
//! They are the read-only contract handed to whatever presents the data: a
//! renderer needs nothing else, and nothing in here can mutate state.
//!
//! # Architecture
//!
//! View models are created via `AppState::compute_viewmodel()` and consumed by
//! the renderer. The [`Body`] enum encodes the rule that loading, error and
//! content are mutually exclusive.
//!
//! # Example
//!
//! ```rust
//! use recipebox::ui::viewmodel::{Body, EmptyState};
//!
//! let body = Body::Empty(EmptyState {
//!     message: "No favorites yet".to_string(),
//!     subtitle: "Save a recipe to see it here.".to_string(),
//! });
//! assert!(!body.is_loading());
//! ```

use crate::app::View;

/// Complete UI view model for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UIViewModel {
    /// Tabs, counts and theme flag.
    pub header: HeaderInfo,

    /// Search input state; present only in the Search view.
    pub search_bar: Option<SearchBarInfo>,

    /// Main content area.
    pub body: Body,

    /// Command hints.
    pub footer: FooterInfo,
}

/// Header display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    /// Application title.
    pub title: String,
    /// One entry per view, in tab order.
    pub tabs: Vec<TabInfo>,
    /// Number of saved recipes, shown on the Favorites tab.
    pub favorites_count: usize,
    /// Current theme preference.
    pub is_dark: bool,
}

/// One navigation tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabInfo {
    pub view: View,
    pub label: String,
    pub is_active: bool,
}

/// Search bar display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBarInfo {
    /// Last submitted query.
    pub query: String,
    /// Whether a search is in flight.
    pub is_busy: bool,
}

/// What the content area shows. Exactly one variant at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Body {
    /// A catalog call is outstanding; nothing else is shown.
    Loading,

    /// The last catalog call failed.
    Error(ErrorInfo),

    /// A single recipe in full.
    Recipe(RecipeCard),

    /// Search results.
    Results {
        title: String,
        items: Vec<RecipeCard>,
    },

    /// A search succeeded without matches.
    NoResults(NoResultsInfo),

    /// Saved recipes.
    Favorites {
        title: String,
        items: Vec<RecipeCard>,
    },

    /// Nothing to show yet.
    Empty(EmptyState),
}

impl Body {
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }
}

/// Error banner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorInfo {
    /// User-facing message.
    pub message: String,
    /// Label of the retry affordance, when one is offered.
    pub retry_label: Option<String>,
}

/// Zero-results message with its clear-search affordance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoResultsInfo {
    pub query: String,
    pub message: String,
    pub clear_label: String,
}

/// Display information for one recipe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeCard {
    pub id: String,
    pub title: String,
    /// `"area • category"`.
    pub subtitle: String,
    pub thumbnail_url: String,
    pub is_favorited: bool,
    /// `"measure name"` lines in recipe order.
    pub ingredients: Vec<String>,
    pub instructions: String,
    pub video_url: Option<String>,

    /// Character ranges of `title` matching the search query.
    ///
    /// Each tuple is `(start_index, end_index)` in character indices, end exclusive.
    pub highlight_ranges: Vec<(usize, usize)>,
}

/// Empty state message display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    /// Primary message (e.g., "No favorites yet").
    pub message: String,

    /// Secondary explanatory text.
    pub subtitle: String,
}

/// Footer display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    /// Command help text for the active view.
    pub keybindings: String,
}
