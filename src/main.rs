//! Line-oriented terminal host.
//!
//! Reads one command per line from stdin, forwards it to the
//! [`ViewCoordinator`] and redraws the screen from the computed view model.
//! Catalog calls run in the background: input keeps being read while they
//! are in flight, and the screen is redrawn as each one lands.
//!
//! # Lifecycle
//!
//! 1. **Load**: Read `RECIPEBOX_*` config, initialize tracing
//! 2. **Initialize**: Open the store, hydrate favorites, resolve theme
//! 3. **Startup**: Fetch the first random recipe
//! 4. **Loop**: Wait for a command or a catalog response → dispatch →
//!    print notifications → render
//!
//! # Commands
//!
//! - `random` / `r`: Fetch another random recipe
//! - `search <query>` / `s <query>`: Search the catalog
//! - `search` / `s`: Switch to the Search view
//! - `view random|search|favorites`: Switch views without fetching
//! - `clear`: Clear the search and return to Random
//! - `favorites` / `f`: Show favorites
//! - `select <id>`: Show a saved recipe
//! - `fav`: Toggle the current recipe's favorite status
//! - `fav <n>`: Toggle the n-th search result (1-based)
//! - `remove <id>`: Remove a favorite
//! - `open <id>`: Load a recipe by catalog id
//! - `retry`: Retry the failed operation
//! - `theme` / `t`: Toggle dark mode
//! - `help` / `?`, `quit` / `q`

#![allow(clippy::multiple_crate_versions)]

use recipebox::app::{Event, Notification, View, ViewCoordinator};
use recipebox::catalog::CatalogTransport;
use recipebox::{Config, Recipe, Theme};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

const DEFAULT_COLUMNS: usize = 80;

const HELP: &str = "\
commands:
  random | r              another random recipe
  search <query> | s      search the catalog
  search | s              switch to the search view
  view <name>             switch to random, search or favorites
  clear                   clear search
  favorites | f           show favorites
  select <id>             show a saved recipe
  fav [n]                 toggle favorite (current recipe, or n-th result)
  remove <id>             remove a favorite
  open <id>               load a recipe by id
  retry                   retry the failed request
  theme | t               toggle dark mode
  help | ?                this text
  quit | q                exit
";

/// A parsed input line.
#[derive(Debug, PartialEq, Eq)]
enum Command {
    Random,
    Search(String),
    Show(View),
    Clear,
    Favorites,
    Select(String),
    Favorite(Option<usize>),
    Remove(String),
    Open(String),
    Retry,
    Theme,
    Help,
    Quit,
}

impl Command {
    fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        let (name, arg) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(name, rest)| (name, rest.trim()));

        Some(match (name, arg) {
            ("random" | "r", _) => Self::Random,
            ("search" | "s", "") => Self::Show(View::Search),
            ("search" | "s", query) => Self::Search(query.to_string()),
            ("view", name) => Self::Show(match name {
                "random" | "r" => View::Random,
                "search" | "s" => View::Search,
                "favorites" | "f" => View::Favorites,
                _ => return None,
            }),
            ("clear", _) => Self::Clear,
            ("favorites" | "f", _) => Self::Favorites,
            ("select", id) if !id.is_empty() => Self::Select(id.to_string()),
            ("fav", "") => Self::Favorite(None),
            ("fav", n) => Self::Favorite(Some(n.parse().ok()?)),
            ("remove", id) if !id.is_empty() => Self::Remove(id.to_string()),
            ("open", id) if !id.is_empty() => Self::Open(id.to_string()),
            ("retry", _) => Self::Retry,
            ("theme" | "t", _) => Self::Theme,
            ("help" | "?", _) => Self::Help,
            ("quit" | "q" | "exit", _) => Self::Quit,
            _ => return None,
        })
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let config = Config::from_env();
    recipebox::observability::init_tracing(&config);

    if let Err(e) = run(&config).await {
        tracing::error!(error = %e, "recipebox exited with error");
        eprintln!("recipebox: {e}");
        std::process::exit(1);
    }
}

/// What woke the host loop.
enum Input {
    Line(Option<String>),
    Response(recipebox::Result<Vec<Notification>>),
}

async fn run(config: &Config) -> recipebox::Result<()> {
    let span = tracing::debug_span!("host_load");
    let mut coordinator = {
        let _guard = span.enter();
        recipebox::initialize(config)?
    };

    let columns = std::env::var("COLUMNS")
        .ok()
        .and_then(|c| c.parse().ok())
        .unwrap_or(DEFAULT_COLUMNS);

    let mut stdout = tokio::io::stdout();
    let notifications = coordinator.dispatch(Event::Startup)?;
    redraw(&mut stdout, &coordinator, &notifications, columns).await?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let pending = coordinator.has_pending();
        let input = tokio::select! {
            line = lines.next_line() => Input::Line(line?),
            Some(result) = coordinator.next_response(), if pending => Input::Response(result),
        };

        let line = match input {
            Input::Response(result) => {
                report(&mut stdout, &coordinator, result, columns).await?;
                continue;
            }
            Input::Line(None) => break,
            Input::Line(Some(line)) => line,
        };
        if line.trim().is_empty() {
            continue;
        }

        let Some(command) = Command::parse(&line) else {
            stdout
                .write_all(format!("unknown command: {}\n{HELP}", line.trim()).as_bytes())
                .await?;
            continue;
        };
        tracing::debug!(command = ?command, "command received");

        let event = match command {
            Command::Quit => break,
            Command::Help => {
                stdout.write_all(HELP.as_bytes()).await?;
                continue;
            }
            Command::Random => Event::RequestRandom,
            Command::Search(query) => Event::SubmitSearch(query),
            Command::Show(View::Random) => Event::ShowRandom,
            Command::Show(View::Search) => Event::ShowSearch,
            Command::Show(View::Favorites) | Command::Favorites => Event::ShowFavorites,
            Command::Clear => Event::ClearSearch,
            Command::Select(id) => Event::SelectFavorite { id },
            Command::Favorite(index) => match favorite_target(&coordinator, index) {
                Some(recipe) => Event::ToggleFavorite(recipe),
                None => {
                    stdout.write_all(b"nothing to favorite here\n").await?;
                    continue;
                }
            },
            Command::Remove(id) => Event::RemoveFavorite { id },
            Command::Open(id) => Event::OpenRecipe { id },
            Command::Retry => Event::Retry,
            Command::Theme => Event::ToggleTheme,
        };

        let result = coordinator.dispatch(event);
        report(&mut stdout, &coordinator, result, columns).await?;
    }

    tracing::debug!(in_flight = coordinator.has_pending(), "input closed, exiting");
    Ok(())
}

/// Redraws after a dispatch, or prints why it failed.
async fn report<T: CatalogTransport + 'static>(
    stdout: &mut tokio::io::Stdout,
    coordinator: &ViewCoordinator<T>,
    result: recipebox::Result<Vec<Notification>>,
    columns: usize,
) -> std::io::Result<()> {
    match result {
        Ok(notifications) => redraw(stdout, coordinator, &notifications, columns).await,
        Err(e) => {
            tracing::warn!(error = %e, "command failed");
            stdout.write_all(format!("error: {e}\n").as_bytes()).await
        }
    }
}

/// Resolves which recipe `fav` refers to.
///
/// Without an index: the recipe on screen in the Random view. With an index:
/// the n-th search result, or the n-th favorite in the Favorites view.
fn favorite_target<T: CatalogTransport + 'static>(
    coordinator: &ViewCoordinator<T>,
    index: Option<usize>,
) -> Option<Recipe> {
    let view = coordinator.view_state();
    match (view.view, index) {
        (View::Random, None) => view.current_recipe.clone(),
        (View::Search, Some(n)) => view.search_results.get(n.checked_sub(1)?).cloned(),
        (View::Favorites, Some(n)) => coordinator.favorites().list().get(n.checked_sub(1)?).cloned(),
        _ => None,
    }
}

async fn redraw<T: CatalogTransport + 'static>(
    stdout: &mut tokio::io::Stdout,
    coordinator: &ViewCoordinator<T>,
    notifications: &[Notification],
    columns: usize,
) -> std::io::Result<()> {
    let theme = Theme::for_mode(coordinator.is_dark());
    let mut screen = recipebox::ui::render(&coordinator.compute_viewmodel(), &theme, columns);

    for notification in notifications {
        screen.push_str(&format!(
            "\n{}{}{} {}\n",
            Theme::bold(),
            notification.title(),
            Theme::reset(),
            notification.description()
        ));
    }

    stdout.write_all(screen.as_bytes()).await?;
    stdout.flush().await
}
