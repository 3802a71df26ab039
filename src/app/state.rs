//! Application state management and view model computation.
//!
//! This module defines [`AppState`], the single owner of everything the
//! coordinator mutates: the [`ViewState`], the outstanding catalog tickets,
//! the favorites collection and the theme preference. Stores are passed in at
//! construction; there is no global state.
//!
//! # View Model Computation
//!
//! [`AppState::compute_viewmodel`] turns a state snapshot into a
//! [`UIViewModel`]. Body precedence is fixed: loading, then error, then
//! content, so at most one of them is ever presented. The Favorites view
//! reads only the local collection and always shows it.
//!
//! # Example
//!
//! ```rust
//! use recipebox::app::{AppState, View};
//! use recipebox::storage::{FavoritesStore, MemoryStore, SharedStore, ThemePreference};
//! use std::sync::Arc;
//!
//! let store: SharedStore = Arc::new(MemoryStore::new());
//! let state = AppState::new(
//!     FavoritesStore::new(store.clone()),
//!     ThemePreference::initial(store, || false),
//! );
//! assert_eq!(state.view.view, View::Random);
//! assert!(!state.view.loading);
//! ```

use super::actions::Ticket;
use super::modes::View;
use crate::catalog::CatalogRequest;
use crate::domain::Recipe;
use crate::storage::{FavoritesStore, ThemePreference};
use crate::ui::viewmodel::{
    Body, EmptyState, ErrorInfo, FooterInfo, HeaderInfo, NoResultsInfo, RecipeCard,
    SearchBarInfo, TabInfo, UIViewModel,
};
use fuzzy_matcher::skim::SkimMatcherV2;

/// What the user is looking at.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ViewState {
    /// Active view.
    pub view: View,

    /// Recipe shown in the Random view.
    pub current_recipe: Option<Recipe>,

    /// Last submitted (trimmed) search query; empty when none.
    pub search_query: String,

    /// Results of the last successful search, in catalog order.
    pub search_results: Vec<Recipe>,

    /// True while any catalog call is outstanding.
    pub loading: bool,

    /// Message of the last failed catalog call.
    pub error: Option<String>,

    /// The request behind `error`, re-issued by `Retry`.
    pub failed: Option<CatalogRequest>,
}

impl ViewState {
    /// Records a failed catalog request and its user-facing message.
    pub fn fail(&mut self, request: CatalogRequest, message: &str) {
        tracing::debug!(operation = request.operation(), "catalog failure recorded");
        self.error = Some(message.to_string());
        self.failed = Some(request);
    }

    pub fn clear_error(&mut self) {
        self.error = None;
        self.failed = None;
    }
}

/// Latest ticket issued per catalog operation type.
///
/// A response is applied only if its ticket is still the one stored here;
/// anything else was superseded and is dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PendingRequests {
    pub random: Option<Ticket>,
    pub search: Option<Ticket>,
    pub lookup: Option<Ticket>,
}

impl PendingRequests {
    #[must_use]
    pub const fn any(&self) -> bool {
        self.random.is_some() || self.search.is_some() || self.lookup.is_some()
    }
}

/// Central application state container.
pub struct AppState {
    /// View state machine.
    pub view: ViewState,

    /// Outstanding catalog calls.
    pub pending: PendingRequests,

    /// Persisted favorites.
    pub favorites: FavoritesStore,

    /// Persisted theme preference.
    pub theme: ThemePreference,

    next_ticket: u64,
}

impl AppState {
    /// Creates state in the Random view with nothing loaded.
    #[must_use]
    pub fn new(favorites: FavoritesStore, theme: ThemePreference) -> Self {
        Self {
            view: ViewState::default(),
            pending: PendingRequests::default(),
            favorites,
            theme,
            next_ticket: 0,
        }
    }

    /// Allocates a fresh ticket.
    pub fn issue_ticket(&mut self) -> Ticket {
        self.next_ticket += 1;
        Ticket::new(self.next_ticket)
    }

    /// Recomputes `loading` from the outstanding tickets.
    pub fn refresh_loading(&mut self) {
        self.view.loading = self.pending.any();
    }

    /// Computes a renderable view model from the current state.
    ///
    /// # Body Precedence
    ///
    /// 1. `loading` → [`Body::Loading`]
    /// 2. `error` → [`Body::Error`], labelled after the request that failed
    /// 3. View content, or an empty state when there is none
    ///
    /// The Favorites view skips the first two steps.
    #[must_use]
    pub fn compute_viewmodel(&self) -> UIViewModel {
        let _span = tracing::trace_span!("compute_viewmodel", view = ?self.view.view).entered();

        UIViewModel {
            header: self.compute_header(),
            search_bar: self.compute_search_bar(),
            body: self.compute_body(),
            footer: self.compute_footer(),
        }
    }

    fn compute_body(&self) -> Body {
        if self.view.view == View::Favorites {
            return self.compute_favorites_body();
        }

        if self.view.loading {
            return Body::Loading;
        }

        if let Some(error) = self.compute_error() {
            return Body::Error(error);
        }

        match self.view.view {
            View::Random => self.view.current_recipe.as_ref().map_or_else(
                || {
                    Body::Empty(EmptyState {
                        message: "No recipe loaded".to_string(),
                        subtitle: "Ask for a random recipe to get started.".to_string(),
                    })
                },
                |recipe| Body::Recipe(self.compute_card(recipe, None)),
            ),
            View::Search => self.compute_search_body(),
            View::Favorites => self.compute_favorites_body(),
        }
    }

    fn compute_error(&self) -> Option<ErrorInfo> {
        let message = self.view.error.as_ref()?;

        let retry_label = match (&self.view.failed, self.view.view) {
            (Some(CatalogRequest::Search { .. }), _) => Some("Retry search"),
            (Some(_), _) | (None, View::Random) => Some("Try Again"),
            (None, _) => None,
        };

        Some(ErrorInfo {
            message: message.clone(),
            retry_label: retry_label.map(String::from),
        })
    }

    fn compute_favorites_body(&self) -> Body {
        if self.favorites.is_empty() {
            return Body::Empty(EmptyState {
                message: "No favorites yet".to_string(),
                subtitle: "Start exploring recipes and save the ones you like.".to_string(),
            });
        }
        Body::Favorites {
            title: format!("Your Favorite Recipes ({})", self.favorites.len()),
            items: self
                .favorites
                .list()
                .iter()
                .map(|recipe| self.compute_card(recipe, None))
                .collect(),
        }
    }

    fn compute_search_body(&self) -> Body {
        let query = &self.view.search_query;

        if query.is_empty() {
            return Body::Empty(EmptyState {
                message: "Search for recipes".to_string(),
                subtitle: "Try an ingredient like \"chicken\" or a cuisine like \"italian\"."
                    .to_string(),
            });
        }

        if self.view.search_results.is_empty() {
            return Body::NoResults(NoResultsInfo {
                query: query.clone(),
                message: format!(
                    "We couldn't find any recipes matching \"{query}\". Try searching for an ingredient like \"chicken\" or a cuisine like \"italian\"."
                ),
                clear_label: "Clear search".to_string(),
            });
        }

        let matcher = SkimMatcherV2::default();
        Body::Results {
            title: format!(
                "Search Results for \"{query}\" ({} found)",
                self.view.search_results.len()
            ),
            items: self
                .view
                .search_results
                .iter()
                .map(|recipe| self.compute_card(recipe, Some(&matcher)))
                .collect(),
        }
    }

    fn compute_card(&self, recipe: &Recipe, matcher: Option<&SkimMatcherV2>) -> RecipeCard {
        let highlight_ranges = matcher.map_or_else(Vec::new, |m| {
            compute_highlight_ranges(&recipe.title, &self.view.search_query, m)
        });

        RecipeCard {
            id: recipe.id.clone(),
            title: recipe.title.clone(),
            subtitle: recipe.subtitle(),
            thumbnail_url: recipe.thumbnail_url.clone(),
            is_favorited: self.favorites.is_favorited(&recipe.id),
            ingredients: recipe
                .ingredients
                .iter()
                .map(|i| {
                    if i.measure.is_empty() {
                        i.name.clone()
                    } else {
                        format!("{} {}", i.measure, i.name)
                    }
                })
                .collect(),
            instructions: recipe.instructions.clone(),
            video_url: recipe.video_url.clone(),
            highlight_ranges,
        }
    }

    fn compute_header(&self) -> HeaderInfo {
        HeaderInfo {
            title: "Recipe Box".to_string(),
            tabs: View::ALL
                .iter()
                .map(|&view| TabInfo {
                    view,
                    label: view.label().to_string(),
                    is_active: view == self.view.view,
                })
                .collect(),
            favorites_count: self.favorites.len(),
            is_dark: self.theme.is_dark(),
        }
    }

    fn compute_search_bar(&self) -> Option<SearchBarInfo> {
        (self.view.view == View::Search).then(|| SearchBarInfo {
            query: self.view.search_query.clone(),
            is_busy: self.pending.search.is_some(),
        })
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = match self.view.view {
            View::Random => "random: another  fav: save  search <q>  favorites  theme  quit",
            View::Search => "search <q>  fav <n>: save result  open <id>  clear  favorites  quit",
            View::Favorites => "select <id>: show  remove <id>  random  search <q>  quit",
        };
        FooterInfo {
            keybindings: keybindings.to_string(),
        }
    }
}

/// Computes character index ranges of `text` matched by `query`.
///
/// Consecutive matched indices are coalesced into `(start, end)` ranges with
/// an exclusive end.
fn compute_highlight_ranges(text: &str, query: &str, matcher: &SkimMatcherV2) -> Vec<(usize, usize)> {
    use fuzzy_matcher::FuzzyMatcher;

    let Some((_score, indices)) = matcher.fuzzy_indices(text, query) else {
        return vec![];
    };

    let mut ranges: Vec<(usize, usize)> = Vec::new();
    for idx in indices {
        match ranges.last_mut() {
            Some((_, end)) if *end == idx => *end = idx + 1,
            _ => ranges.push((idx, idx + 1)),
        }
    }
    ranges
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("view", &self.view)
            .field("pending", &self.pending)
            .field("favorites", &self.favorites.len())
            .field("is_dark", &self.theme.is_dark())
            .finish_non_exhaustive()
    }
}
