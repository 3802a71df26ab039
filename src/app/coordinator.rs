//! The view coordinator: event loop glue between state, handler and catalog.
//!
//! [`ViewCoordinator::dispatch`] feeds an event to [`handle_event`], collects
//! notifications for the caller and starts catalog calls without waiting for
//! them. Calls in flight overlap freely; [`ViewCoordinator::next_response`]
//! waits for whichever finishes first and feeds it back through the handler,
//! where superseded responses are dropped by ticket.
//!
//! Hosts with their own input loop select between input and
//! `next_response`; the named operations (`startup`, `submit_search`, ...)
//! dispatch and then wait until nothing is left in flight.

use std::sync::Arc;

use futures_util::stream::{FuturesUnordered, StreamExt};

use crate::app::actions::{Action, Notification};
use crate::app::executor::{self, PendingResponse};
use crate::app::handler::{handle_event, Event};
use crate::app::modes::View;
use crate::app::state::{AppState, ViewState};
use crate::catalog::{CatalogTransport, RecipeCatalogClient};
use crate::domain::error::Result;
use crate::domain::Recipe;
use crate::storage::{FavoritesStore, ThemePreference};
use crate::ui::viewmodel::UIViewModel;

/// Drives the random / search / favorites view state machine.
///
/// # Example
///
/// ```no_run
/// use recipebox::app::ViewCoordinator;
/// use recipebox::catalog::{HttpTransport, RecipeCatalogClient};
/// use recipebox::storage::{FavoritesStore, MemoryStore, SharedStore, ThemePreference};
/// use std::{sync::Arc, time::Duration};
///
/// # async fn run() -> recipebox::Result<()> {
/// let store: SharedStore = Arc::new(MemoryStore::new());
/// let transport = HttpTransport::new("https://www.themealdb.com/api/json/v1/1", ".php", Duration::from_secs(10))?;
/// let mut coordinator = ViewCoordinator::new(
///     RecipeCatalogClient::new(transport),
///     FavoritesStore::open(store.clone())?,
///     ThemePreference::initial(store, || false),
/// );
///
/// coordinator.startup().await?;
/// let notifications = coordinator.submit_search("pasta").await?;
/// # Ok(())
/// # }
/// ```
pub struct ViewCoordinator<T: CatalogTransport> {
    state: AppState,
    catalog: Arc<RecipeCatalogClient<T>>,
    in_flight: FuturesUnordered<PendingResponse>,
}

impl<T: CatalogTransport + 'static> ViewCoordinator<T> {
    #[must_use]
    pub fn new(
        catalog: RecipeCatalogClient<T>,
        favorites: FavoritesStore,
        theme: ThemePreference,
    ) -> Self {
        Self {
            state: AppState::new(favorites, theme),
            catalog: Arc::new(catalog),
            in_flight: FuturesUnordered::new(),
        }
    }

    /// Processes `event` and starts the catalog calls it asks for.
    ///
    /// Returns immediately with the notifications raised by the event itself.
    /// Catalog results arrive through [`next_response`](Self::next_response).
    ///
    /// # Errors
    ///
    /// Returns persistence errors from favorites or theme updates. Catalog
    /// failures are not errors; they land in [`ViewState::error`].
    pub fn dispatch(&mut self, event: Event) -> Result<Vec<Notification>> {
        let (_render, actions) = handle_event(&mut self.state, &event)?;
        let mut notifications = Vec::new();

        for action in actions {
            match action {
                Action::Notify(notification) => {
                    tracing::debug!(notification = %notification, "notification raised");
                    notifications.push(notification);
                }
                catalog_call => {
                    if let Some(pending) = executor::execute(&self.catalog, &catalog_call) {
                        self.in_flight.push(pending);
                    }
                }
            }
        }

        Ok(notifications)
    }

    /// Whether any catalog call is still running, superseded ones included.
    #[must_use]
    pub fn has_pending(&self) -> bool {
        !self.in_flight.is_empty()
    }

    /// Waits for the next catalog call to finish and applies its response.
    ///
    /// Returns `None` when nothing is in flight. Cancel-safe: dropping the
    /// future before it resolves loses no response.
    pub async fn next_response(&mut self) -> Option<Result<Vec<Notification>>> {
        let event = self.in_flight.next().await?;
        Some(self.dispatch(event))
    }

    /// Applies responses until no catalog call is left in flight.
    ///
    /// # Errors
    ///
    /// See [`dispatch`](Self::dispatch).
    pub async fn run_until_idle(&mut self) -> Result<Vec<Notification>> {
        let mut notifications = Vec::new();
        while let Some(result) = self.next_response().await {
            notifications.extend(result?);
        }
        Ok(notifications)
    }

    async fn dispatch_and_wait(&mut self, event: Event) -> Result<Vec<Notification>> {
        let mut notifications = self.dispatch(event)?;
        notifications.extend(self.run_until_idle().await?);
        Ok(notifications)
    }

    /// Loads the first random recipe. Call once after construction.
    ///
    /// # Errors
    ///
    /// See [`dispatch`](Self::dispatch).
    pub async fn startup(&mut self) -> Result<Vec<Notification>> {
        self.dispatch_and_wait(Event::Startup).await
    }

    /// Switches to the Random view without fetching.
    pub async fn show_random(&mut self) -> Result<Vec<Notification>> {
        self.dispatch_and_wait(Event::ShowRandom).await
    }

    /// Switches to the Search view.
    pub async fn show_search(&mut self) -> Result<Vec<Notification>> {
        self.dispatch_and_wait(Event::ShowSearch).await
    }

    /// Fetches another random recipe.
    pub async fn request_random(&mut self) -> Result<Vec<Notification>> {
        self.dispatch_and_wait(Event::RequestRandom).await
    }

    /// Re-issues the last failed catalog operation.
    pub async fn retry(&mut self) -> Result<Vec<Notification>> {
        self.dispatch_and_wait(Event::Retry).await
    }

    /// Searches the catalog and shows the results.
    pub async fn submit_search(&mut self, query: &str) -> Result<Vec<Notification>> {
        self.dispatch_and_wait(Event::SubmitSearch(query.to_string())).await
    }

    /// Leaves the Search view, discarding query and results.
    pub async fn clear_search(&mut self) -> Result<Vec<Notification>> {
        self.dispatch_and_wait(Event::ClearSearch).await
    }

    /// Shows the favorites list.
    pub async fn show_favorites(&mut self) -> Result<Vec<Notification>> {
        self.dispatch_and_wait(Event::ShowFavorites).await
    }

    /// Shows a saved recipe in the Random view.
    pub async fn select_favorite(&mut self, id: &str) -> Result<Vec<Notification>> {
        self.dispatch_and_wait(Event::SelectFavorite { id: id.to_string() }).await
    }

    /// Favorites or unfavorites `recipe`.
    pub async fn toggle_favorite(&mut self, recipe: Recipe) -> Result<Vec<Notification>> {
        self.dispatch_and_wait(Event::ToggleFavorite(recipe)).await
    }

    /// Removes a favorite by id.
    pub async fn remove_favorite(&mut self, id: &str) -> Result<Vec<Notification>> {
        self.dispatch_and_wait(Event::RemoveFavorite { id: id.to_string() }).await
    }

    /// Loads a recipe by catalog id.
    pub async fn open_recipe(&mut self, id: &str) -> Result<Vec<Notification>> {
        self.dispatch_and_wait(Event::OpenRecipe { id: id.to_string() }).await
    }

    /// Flips the theme preference.
    pub async fn toggle_theme(&mut self) -> Result<Vec<Notification>> {
        self.dispatch_and_wait(Event::ToggleTheme).await
    }

    #[must_use]
    pub const fn state(&self) -> &AppState {
        &self.state
    }

    #[must_use]
    pub const fn view_state(&self) -> &ViewState {
        &self.state.view
    }

    #[must_use]
    pub const fn view(&self) -> View {
        self.state.view.view
    }

    #[must_use]
    pub const fn favorites(&self) -> &FavoritesStore {
        &self.state.favorites
    }

    #[must_use]
    pub const fn is_dark(&self) -> bool {
        self.state.theme.is_dark()
    }

    #[must_use]
    pub fn catalog(&self) -> &RecipeCatalogClient<T> {
        &self.catalog
    }

    #[must_use]
    pub fn compute_viewmodel(&self) -> UIViewModel {
        self.state.compute_viewmodel()
    }
}
