//! Catalog client with captured loading and error state.
//!
//! [`RecipeCatalogClient`] is the boundary at which catalog failures stop.
//! Each operation returns a plain value (`Option<Recipe>` or a list) and, on
//! failure, records a fixed user-facing message in [`error`](RecipeCatalogClient::error).
//! The underlying [`RecipeError`] is logged, never returned.
//!
//! Operations take `&self`, so several may be in flight at once. The
//! `*_outcome` variants return the captured message directly, which is what
//! callers running overlapping requests should use: the shared error slot
//! only reflects whichever operation touched it last.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

use crate::catalog::normalize::{normalize_record, parse_payload};
use crate::catalog::request::CatalogRequest;
use crate::catalog::transport::CatalogTransport;
use crate::domain::error::{RecipeError, Result};
use crate::domain::Recipe;

/// Shown when a random fetch fails.
pub const RANDOM_FAILED: &str = "Failed to fetch a random recipe. Please try again.";
/// Shown when a search fails.
pub const SEARCH_FAILED: &str = "Failed to search recipes. Please try again.";
/// Shown when a lookup by id fails.
pub const LOOKUP_FAILED: &str = "Failed to fetch recipe details. Please try again.";

/// Result of a catalog operation: the value, or the user-facing failure message.
pub type Outcome<V> = std::result::Result<V, String>;

/// Outcome of [`RecipeCatalogClient::search`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchResults {
    /// The query as transmitted, after trimming.
    pub query: String,
    /// Matching recipes in catalog order; empty when nothing matched.
    pub recipes: Vec<Recipe>,
}

/// Talks to the recipe catalog and normalizes what comes back.
///
/// # Example
///
/// ```no_run
/// use recipebox::catalog::{HttpTransport, RecipeCatalogClient};
/// use std::time::Duration;
///
/// # async fn run() -> recipebox::Result<()> {
/// let transport = HttpTransport::new(
///     "https://www.themealdb.com/api/json/v1/1",
///     ".php",
///     Duration::from_secs(10),
/// )?;
/// let client = RecipeCatalogClient::new(transport);
///
/// match client.fetch_random().await {
///     Some(recipe) => println!("{}", recipe.title),
///     None => eprintln!("{}", client.error().unwrap_or_default()),
/// }
/// # Ok(())
/// # }
/// ```
pub struct RecipeCatalogClient<T: CatalogTransport> {
    transport: T,
    in_flight: AtomicUsize,
    error: Mutex<Option<String>>,
}

/// Counts one running operation for as long as it is alive, including when
/// the operation's future is dropped before completing.
struct InFlight<'a>(&'a AtomicUsize);

impl<'a> InFlight<'a> {
    fn enter(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(counter)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

impl<T: CatalogTransport> RecipeCatalogClient<T> {
    #[must_use]
    pub const fn new(transport: T) -> Self {
        Self {
            transport,
            in_flight: AtomicUsize::new(0),
            error: Mutex::new(None),
        }
    }

    /// Whether any operation is in progress.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst) > 0
    }

    /// Message from the most recent failed operation, cleared when the next
    /// operation starts.
    #[must_use]
    pub fn error(&self) -> Option<String> {
        self.error
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    #[must_use]
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Fetches one random recipe.
    ///
    /// Returns `None` and sets [`error`](Self::error) when the request fails or
    /// the response carries no usable record.
    pub async fn fetch_random(&self) -> Option<Recipe> {
        self.random_outcome().await.ok()
    }

    /// Like [`fetch_random`](Self::fetch_random), with the failure message
    /// in the `Err` arm.
    pub async fn random_outcome(&self) -> Outcome<Recipe> {
        let request = CatalogRequest::Random;
        let result = self.execute(&request).await.and_then(|records| {
            let first = records
                .first()
                .ok_or_else(|| RecipeError::NoData("catalog returned no meals".to_string()))?;
            normalize_record(first)
        });

        self.capture(&request, RANDOM_FAILED, result)
    }

    /// Searches recipes by free text.
    ///
    /// Leading and trailing whitespace is removed before transmission and the
    /// trimmed query is echoed back. No match is a successful, empty result.
    /// On failure the result is empty and [`error`](Self::error) is set.
    pub async fn search(&self, query: &str) -> SearchResults {
        let trimmed = query.trim();
        self.search_outcome(trimmed)
            .await
            .unwrap_or_else(|_| SearchResults {
                query: trimmed.to_string(),
                recipes: Vec::new(),
            })
    }

    /// Like [`search`](Self::search), keeping a failure apart from an empty
    /// result.
    pub async fn search_outcome(&self, query: &str) -> Outcome<SearchResults> {
        let query = query.trim().to_string();
        if query.is_empty() {
            tracing::debug!("empty search query, skipping catalog call");
            self.set_error(None);
            return Ok(SearchResults::default());
        }

        let request = CatalogRequest::Search {
            query: query.clone(),
        };
        let result = self.execute(&request).await.map(|records| {
            records
                .iter()
                .filter_map(|raw| match normalize_record(raw) {
                    Ok(recipe) => Some(recipe),
                    Err(e) => {
                        tracing::warn!(error = %e, "skipping malformed search result");
                        None
                    }
                })
                .collect::<Vec<_>>()
        });

        let recipes = self.capture(&request, SEARCH_FAILED, result)?;
        tracing::debug!(query = %query, count = recipes.len(), "search complete");

        Ok(SearchResults { query, recipes })
    }

    /// Looks up a recipe by catalog id.
    ///
    /// `None` without an error means the catalog has no such recipe; `None`
    /// with [`error`](Self::error) set means the lookup failed.
    pub async fn fetch_by_id(&self, id: &str) -> Option<Recipe> {
        self.lookup_outcome(id).await.ok().flatten()
    }

    /// Like [`fetch_by_id`](Self::fetch_by_id): `Ok(None)` is "not found",
    /// `Err` is a failed lookup.
    pub async fn lookup_outcome(&self, id: &str) -> Outcome<Option<Recipe>> {
        let request = CatalogRequest::Lookup {
            id: id.trim().to_string(),
        };
        let result = self.execute(&request).await.and_then(|records| {
            records.first().map(normalize_record).transpose()
        });

        self.capture(&request, LOOKUP_FAILED, result)
    }

    /// Marks the client busy, performs `request` and decodes the envelope.
    async fn execute(&self, request: &CatalogRequest) -> Result<Vec<serde_json::Value>> {
        let _in_flight = InFlight::enter(&self.in_flight);
        self.set_error(None);

        let body = self.transport.get(request).await?;
        parse_payload(&body)
    }

    /// Converts a failed result into the captured user-facing message.
    fn capture<V>(&self, request: &CatalogRequest, message: &str, result: Result<V>) -> Outcome<V> {
        match result {
            Ok(value) => {
                tracing::debug!(operation = request.operation(), "catalog operation successful");
                Ok(value)
            }
            Err(e) => {
                tracing::warn!(
                    operation = request.operation(),
                    error = %e,
                    "catalog operation failed"
                );
                self.set_error(Some(message.to_string()));
                Err(message.to_string())
            }
        }
    }

    fn set_error(&self, error: Option<String>) {
        *self.error.lock().unwrap_or_else(PoisonError::into_inner) = error;
    }
}

impl<T: CatalogTransport + std::fmt::Debug> std::fmt::Debug for RecipeCatalogClient<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecipeCatalogClient")
            .field("transport", &self.transport)
            .field("in_flight", &self.in_flight.load(Ordering::SeqCst))
            .field("error", &self.error())
            .finish()
    }
}
