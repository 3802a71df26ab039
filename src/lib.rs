//! Recipebox: the data-orchestration core of a recipe browser.
//!
//! Recipebox provides:
//! - A catalog client that fetches random recipes, searches and looks up by id,
//!   normalizing loosely-typed catalog records into a fixed [`Recipe`] shape
//! - A persisted, deduplicated favorites collection
//! - A persisted dark/light preference with a host fallback
//! - A three-view coordinator (random / search / favorites) with loading and
//!   error state and user-facing notifications
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Terminal host (main.rs)                            │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - ViewCoordinator / event handling                 │
//! │  - Ticketed, overlapping catalog calls              │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Storage Layer │   │ Catalog Layer │
//! │ (ui/)         │   │ (storage/)    │   │ (catalog/)    │
//! │ - View models │   │ - KV backends │   │ - HTTP        │
//! │ - Theming     │   │ - Favorites   │   │ - Normalizing │
//! │ - Text render │   │ - Theme pref  │   │ - Capture     │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                    │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Infrastructure & Domain Layers                     │
//! │  - Paths, host color scheme (infrastructure/)       │
//! │  - Error types, Recipe model (domain/)              │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │
//! │  - tracing subscriber, rotating log file            │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Configuration
//!
//! [`Config`] is built from a string map, typically the `RECIPEBOX_*`
//! environment variables:
//!
//! ```text
//! RECIPEBOX_CATALOG_URL=https://www.themealdb.com/api/json/v1/1
//! RECIPEBOX_PATH_SUFFIX=.php
//! RECIPEBOX_TIMEOUT_SECS=10
//! RECIPEBOX_DATA_DIR=~/.local/share/recipebox
//! RECIPEBOX_TRACE_LEVEL=debug
//! RECIPEBOX_PREFER_DARK=true
//! ```
//!
//! # Examples
//!
//! ```rust
//! use recipebox::app::{handle_event, AppState, Event, View};
//! use recipebox::storage::{FavoritesStore, MemoryStore, SharedStore, ThemePreference};
//! use std::sync::Arc;
//!
//! let store: SharedStore = Arc::new(MemoryStore::new());
//! let mut state = AppState::new(
//!     FavoritesStore::open(store.clone())?,
//!     ThemePreference::initial(store, || false),
//! );
//!
//! let (_render, actions) = handle_event(&mut state, &Event::SubmitSearch(" pasta ".into()))?;
//! assert_eq!(state.view.view, View::Search);
//! assert_eq!(state.view.search_query, "pasta");
//! assert_eq!(actions.len(), 1);
//! # Ok::<(), recipebox::RecipeError>(())
//! ```

#![allow(clippy::multiple_crate_versions)]

pub mod app;
pub mod catalog;
pub mod domain;
pub mod infrastructure;
pub mod observability;
pub mod storage;
pub mod ui;

pub use app::{handle_event, Action, AppState, Event, Notification, View, ViewCoordinator};
pub use catalog::{HttpTransport, RecipeCatalogClient};
pub use domain::{Ingredient, Recipe, RecipeError, Result};
pub use ui::Theme;

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use crate::storage::{FavoritesStore, JsonFileStore, SharedStore, ThemePreference};

/// Default catalog base URL (TheMealDB v1, public test key).
pub const DEFAULT_CATALOG_URL: &str = "https://www.themealdb.com/api/json/v1/1";

/// Prefix of environment variables read by [`Config::from_env`].
pub const ENV_PREFIX: &str = "RECIPEBOX_";

/// Runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Catalog base URL without trailing slash. Default: [`DEFAULT_CATALOG_URL`].
    pub catalog_url: String,

    /// Appended to endpoint names (`random` → `random.php`). Default: `".php"`.
    pub path_suffix: String,

    /// Per-request timeout in seconds. Default: 10
    pub timeout_secs: u64,

    /// Data directory override. `~` is expanded.
    pub data_dir: Option<String>,

    /// Log level filter (`trace`, `debug`, `info`, `warn`, `error`).
    pub trace_level: Option<String>,

    /// Overrides host color-scheme detection for the initial theme.
    pub prefer_dark: Option<bool>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog_url: DEFAULT_CATALOG_URL.to_string(),
            path_suffix: ".php".to_string(),
            timeout_secs: 10,
            data_dir: None,
            trace_level: None,
            prefer_dark: None,
        }
    }
}

impl Config {
    /// Parses configuration from a string map.
    ///
    /// # Parsing Rules
    ///
    /// - `catalog_url`: trailing `/` removed; blank falls back to the default
    /// - `path_suffix`: taken as-is (may be empty)
    /// - `timeout_secs`: positive integer, falls back to 10
    /// - `data_dir`, `trace_level`: blank values are ignored
    /// - `prefer_dark`: `true/false/1/0/yes/no/on/off`, anything else ignored
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use recipebox::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("catalog_url".to_string(), "http://localhost:9000/".to_string());
    /// map.insert("timeout_secs".to_string(), "nope".to_string());
    /// map.insert("prefer_dark".to_string(), "yes".to_string());
    ///
    /// let config = Config::from_map(&map);
    /// assert_eq!(config.catalog_url, "http://localhost:9000");
    /// assert_eq!(config.timeout_secs, 10);
    /// assert_eq!(config.prefer_dark, Some(true));
    /// ```
    #[must_use]
    pub fn from_map(config: &BTreeMap<String, String>) -> Self {
        let defaults = Self::default();

        let non_blank = |key: &str| {
            config
                .get(key)
                .map(|value| value.trim())
                .filter(|value| !value.is_empty())
                .map(String::from)
        };

        let catalog_url = non_blank("catalog_url")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or(defaults.catalog_url);

        let timeout_secs = config
            .get("timeout_secs")
            .and_then(|s| s.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .unwrap_or(defaults.timeout_secs);

        let prefer_dark = config
            .get("prefer_dark")
            .and_then(|s| match s.trim().to_ascii_lowercase().as_str() {
                "true" | "1" | "yes" | "on" => Some(true),
                "false" | "0" | "no" | "off" => Some(false),
                _ => None,
            });

        Self {
            catalog_url,
            path_suffix: config.get("path_suffix").cloned().unwrap_or(defaults.path_suffix),
            timeout_secs,
            data_dir: non_blank("data_dir"),
            trace_level: non_blank("trace_level"),
            prefer_dark,
        }
    }

    /// Builds configuration from `RECIPEBOX_*` environment variables.
    ///
    /// `RECIPEBOX_CATALOG_URL` becomes key `catalog_url`, and so on.
    #[must_use]
    pub fn from_env() -> Self {
        let map: BTreeMap<String, String> = std::env::vars()
            .filter_map(|(key, value)| {
                key.strip_prefix(ENV_PREFIX)
                    .map(|name| (name.to_ascii_lowercase(), value))
            })
            .collect();
        Self::from_map(&map)
    }

    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Wires up the production stack.
///
/// Opens the JSON store in the data directory, hydrates favorites, resolves
/// the initial theme (config override, else host detection) and builds the
/// HTTP catalog client. The returned coordinator has not started; call
/// [`ViewCoordinator::startup`] next.
///
/// # Errors
///
/// Returns an error if the store cannot be opened or read, or the HTTP client
/// cannot be built.
pub fn initialize(config: &Config) -> Result<ViewCoordinator<HttpTransport>> {
    tracing::debug!(catalog_url = %config.catalog_url, "initializing recipebox");

    let data_dir = infrastructure::get_data_dir(config.data_dir.as_deref());
    let json_store = JsonFileStore::open(data_dir.join(infrastructure::STORE_FILE_NAME))?;
    tracing::debug!(path = %json_store.path().display(), "store opened");
    let store: SharedStore = Arc::new(json_store);

    let favorites = FavoritesStore::open(Arc::clone(&store))?;
    let theme = ThemePreference::initial(store, || {
        config
            .prefer_dark
            .unwrap_or_else(infrastructure::host_prefers_dark)
    });

    let transport = HttpTransport::new(&config.catalog_url, &config.path_suffix, config.timeout())?;

    tracing::debug!(
        favorites = favorites.len(),
        is_dark = theme.is_dark(),
        "recipebox initialized"
    );

    Ok(ViewCoordinator::new(
        RecipeCatalogClient::new(transport),
        favorites,
        theme,
    ))
}
