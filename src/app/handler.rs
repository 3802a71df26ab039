//! Event handling and state transition logic.
//!
//! This module implements the event handler that processes user intents and
//! catalog responses, translating them into state changes and action
//! sequences. It never awaits anything: catalog work leaves as
//! [`Action`]s and comes back as [`Event::CatalogResponse`].
//!
//! # Transitions
//!
//! | Event            | From   | To        | Effect                                  |
//! |------------------|--------|-----------|-----------------------------------------|
//! | `Startup`        | -      | Random    | fetch random                            |
//! | `ShowRandom`     | any    | Random    | none                                    |
//! | `ShowSearch`     | any    | Search    | none                                    |
//! | `SubmitSearch`   | any    | Search    | set query, search                       |
//! | `ClearSearch`    | Search | Random    | clear query and results                 |
//! | `ShowFavorites`  | any    | Favorites | none                                    |
//! | `SelectFavorite` | any    | Random    | show the favorite, no fetch             |
//! | `RequestRandom`  | any    | Random*   | fetch random (*view changes on success) |
//! | `Retry`          | any    | unchanged | re-issue the request that failed        |
//! | `Retry`          | Random | Random    | fetch random when nothing failed        |
//! | `ToggleFavorite` | any    | unchanged | toggle, notify with resulting state     |
//!
//! # Example
//!
//! ```rust
//! use recipebox::app::{handle_event, Action, AppState, Event};
//! use recipebox::storage::{FavoritesStore, MemoryStore, SharedStore, ThemePreference};
//! use std::sync::Arc;
//!
//! let store: SharedStore = Arc::new(MemoryStore::new());
//! let mut state = AppState::new(
//!     FavoritesStore::new(store.clone()),
//!     ThemePreference::initial(store, || false),
//! );
//!
//! let (render, actions) = handle_event(&mut state, &Event::Startup)?;
//! assert!(render);
//! assert!(matches!(actions[0], Action::FetchRandom { .. }));
//! assert!(state.view.loading);
//! # Ok::<(), recipebox::RecipeError>(())
//! ```

use crate::app::actions::{Action, Notification, Ticket};
use crate::app::modes::View;
use crate::app::state::AppState;
use crate::catalog::{CatalogRequest, Outcome, SearchResults};
use crate::domain::error::Result;
use crate::domain::Recipe;
use crate::storage::ToggleOutcome;

/// Outcome of a catalog call, routed back into the handler.
///
/// Failures carry the user-facing message captured by the catalog client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogResponse {
    Random {
        ticket: Ticket,
        outcome: Outcome<Recipe>,
    },
    Search {
        ticket: Ticket,
        outcome: Outcome<SearchResults>,
    },
    Lookup {
        ticket: Ticket,
        id: String,
        outcome: Outcome<Option<Recipe>>,
    },
}

/// Events triggered by the user, the host or the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Host finished setting up; loads the first random recipe.
    Startup,
    /// Switches to the Random view.
    ShowRandom,
    /// Switches to the Search view.
    ShowSearch,
    /// Asks for another random recipe.
    RequestRandom,
    /// Re-issues the last failed catalog request.
    Retry,
    /// Submits a search query. Blank queries are ignored.
    SubmitSearch(String),
    /// Leaves search, discarding query and results.
    ClearSearch,
    /// Switches to the Favorites view.
    ShowFavorites,
    /// Shows a saved recipe in the Random view.
    SelectFavorite {
        id: String,
    },
    /// Favorites or unfavorites a recipe.
    ToggleFavorite(Recipe),
    /// Removes a recipe from favorites without a notification.
    RemoveFavorite {
        id: String,
    },
    /// Loads a recipe by catalog id into the Random view.
    OpenRecipe {
        id: String,
    },
    /// Flips and persists the theme preference.
    ToggleTheme,
    /// A catalog call settled.
    CatalogResponse(CatalogResponse),
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// # Returns
///
/// `(needs_render, actions)`: whether the view model may have changed, and
/// the side effects to run in order.
///
/// # Errors
///
/// Returns storage errors from favorites or theme persistence. State is left
/// as it was before the failed write.
#[allow(clippy::too_many_lines)]
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    match event {
        Event::Startup => {
            state.view.view = View::Random;
            Ok((true, vec![issue_random(state)]))
        }
        Event::ShowRandom => Ok((switch_view(state, View::Random), vec![])),
        Event::ShowSearch => Ok((switch_view(state, View::Search), vec![])),
        Event::ShowFavorites => Ok((switch_view(state, View::Favorites), vec![])),
        Event::RequestRandom => Ok((true, vec![issue_random(state)])),
        Event::Retry => match state.view.failed.clone() {
            Some(CatalogRequest::Random) => Ok((true, vec![issue_random(state)])),
            Some(CatalogRequest::Search { query }) => {
                state.view.view = View::Search;
                state.view.search_query.clone_from(&query);
                Ok((true, vec![issue_search(state, query)]))
            }
            Some(CatalogRequest::Lookup { id }) => Ok((true, vec![issue_lookup(state, id)])),
            None if state.view.view == View::Random => Ok((true, vec![issue_random(state)])),
            None => {
                tracing::debug!(view = ?state.view.view, "nothing to retry");
                Ok((false, vec![]))
            }
        },
        Event::SubmitSearch(query) => {
            let query = query.trim();
            if query.is_empty() {
                tracing::debug!("ignoring blank search");
                return Ok((false, vec![]));
            }

            state.view.view = View::Search;
            state.view.search_query = query.to_string();
            Ok((true, vec![issue_search(state, query.to_string())]))
        }
        Event::ClearSearch => {
            if state.view.view != View::Search {
                return Ok((false, vec![]));
            }

            tracing::debug!(query = %state.view.search_query, "clearing search");
            state.view.search_query.clear();
            state.view.search_results.clear();
            state.view.clear_error();
            state.pending.search = None;
            state.refresh_loading();
            state.view.view = View::Random;
            Ok((true, vec![]))
        }
        Event::SelectFavorite { id } => {
            let Some(recipe) = state.favorites.get(id).cloned() else {
                tracing::debug!(id = %id, "selected recipe is not a favorite");
                return Ok((false, vec![]));
            };

            tracing::debug!(id = %id, title = %recipe.title, "showing favorite");
            state.view.current_recipe = Some(recipe);
            state.view.clear_error();
            state.pending.random = None;
            state.pending.lookup = None;
            state.refresh_loading();
            state.view.view = View::Random;
            Ok((true, vec![]))
        }
        Event::ToggleFavorite(recipe) => {
            let outcome = state.favorites.toggle(recipe)?;
            let notification = match outcome {
                ToggleOutcome::Added => Notification::FavoriteAdded {
                    id: recipe.id.clone(),
                    title: recipe.title.clone(),
                },
                ToggleOutcome::Removed => Notification::FavoriteRemoved {
                    id: recipe.id.clone(),
                    title: recipe.title.clone(),
                },
            };

            tracing::debug!(
                id = %recipe.id,
                is_favorited = outcome.is_favorited(),
                "favorite toggled"
            );
            Ok((true, vec![Action::Notify(notification)]))
        }
        Event::RemoveFavorite { id } => {
            let removed = state.favorites.remove(id)?;
            Ok((removed.is_some(), vec![]))
        }
        Event::OpenRecipe { id } => {
            let id = id.trim();
            if id.is_empty() {
                return Ok((false, vec![]));
            }
            Ok((true, vec![issue_lookup(state, id.to_string())]))
        }
        Event::ToggleTheme => {
            state.theme.toggle()?;
            Ok((true, vec![]))
        }
        Event::CatalogResponse(response) => Ok(apply_response(state, response)),
    }
}

fn switch_view(state: &mut AppState, view: View) -> bool {
    if state.view.view == view {
        return false;
    }
    tracing::debug!(from = ?state.view.view, to = ?view, "switching view");
    state.view.view = view;
    true
}

fn issue_random(state: &mut AppState) -> Action {
    let ticket = state.issue_ticket();
    state.pending.random = Some(ticket);
    state.view.clear_error();
    state.refresh_loading();

    tracing::debug!(ticket = %ticket, "issuing random fetch");
    Action::FetchRandom { ticket }
}

fn issue_search(state: &mut AppState, query: String) -> Action {
    let ticket = state.issue_ticket();
    state.pending.search = Some(ticket);
    state.view.clear_error();
    state.refresh_loading();

    tracing::debug!(ticket = %ticket, query = %query, "issuing search");
    Action::Search { ticket, query }
}

fn issue_lookup(state: &mut AppState, id: String) -> Action {
    let ticket = state.issue_ticket();
    state.pending.lookup = Some(ticket);
    state.view.clear_error();
    state.refresh_loading();

    tracing::debug!(ticket = %ticket, id = %id, "issuing lookup");
    Action::FetchById { ticket, id }
}

/// Takes the pending slot if `ticket` is still the latest one issued.
fn settle(slot: &mut Option<Ticket>, ticket: Ticket) -> bool {
    if *slot == Some(ticket) {
        *slot = None;
        true
    } else {
        tracing::debug!(ticket = %ticket, latest = ?slot, "dropping stale catalog response");
        false
    }
}

fn apply_response(state: &mut AppState, response: &CatalogResponse) -> (bool, Vec<Action>) {
    let mut actions = vec![];

    match response {
        CatalogResponse::Random { ticket, outcome } => {
            if !settle(&mut state.pending.random, *ticket) {
                return (false, actions);
            }
            match outcome {
                Ok(recipe) => {
                    tracing::debug!(id = %recipe.id, title = %recipe.title, "random recipe loaded");
                    state.view.current_recipe = Some(recipe.clone());
                    state.view.clear_error();
                    state.view.view = View::Random;
                }
                Err(message) => state.view.fail(CatalogRequest::Random, message),
            }
        }
        CatalogResponse::Search { ticket, outcome } => {
            if !settle(&mut state.pending.search, *ticket) {
                return (false, actions);
            }
            match outcome {
                Ok(results) => {
                    state.view.clear_error();
                    state.view.search_query.clone_from(&results.query);
                    state.view.search_results.clone_from(&results.recipes);
                    if results.recipes.is_empty() {
                        actions.push(Action::Notify(Notification::NoResults {
                            query: results.query.clone(),
                        }));
                    }
                }
                Err(message) => state.view.fail(
                    CatalogRequest::Search {
                        query: state.view.search_query.clone(),
                    },
                    message,
                ),
            }
        }
        CatalogResponse::Lookup { ticket, id, outcome } => {
            if !settle(&mut state.pending.lookup, *ticket) {
                return (false, actions);
            }
            match outcome {
                Ok(Some(recipe)) => {
                    state.view.current_recipe = Some(recipe.clone());
                    state.view.clear_error();
                    state.view.view = View::Random;
                }
                Ok(None) => {
                    state.view.clear_error();
                    actions.push(Action::Notify(Notification::RecipeNotFound { id: id.clone() }));
                }
                Err(message) => state.view.fail(CatalogRequest::Lookup { id: id.clone() }, message),
            }
        }
    }

    state.refresh_loading();
    (true, actions)
}
