//! Top-level rendering coordinator.
//!
//! Renders a [`UIViewModel`] into an ANSI-styled string: header with tabs,
//! optional search bar, the body variant, footer. The renderer reads the view
//! model only; it has no access to application state.

use crate::ui::helpers::{wrap, write_highlighted_text, write_rule};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{Body, HeaderInfo, RecipeCard, SearchBarInfo, UIViewModel};
use std::fmt::Write;

/// Renders a view model at the given terminal width.
///
/// # Example
///
/// ```rust
/// use recipebox::app::AppState;
/// use recipebox::storage::{FavoritesStore, MemoryStore, SharedStore, ThemePreference};
/// use recipebox::ui::{render, Theme};
/// use std::sync::Arc;
///
/// let store: SharedStore = Arc::new(MemoryStore::new());
/// let state = AppState::new(
///     FavoritesStore::new(store.clone()),
///     ThemePreference::initial(store, || true),
/// );
/// let output = render(&state.compute_viewmodel(), &Theme::for_mode(true), 80);
/// assert!(output.contains("No recipe loaded"));
/// ```
#[must_use]
pub fn render(vm: &UIViewModel, theme: &Theme, cols: usize) -> String {
    let mut out = String::new();
    let width = cols.max(20);

    render_header(&mut out, &vm.header, theme, width);
    if let Some(search) = &vm.search_bar {
        render_search_bar(&mut out, search, theme);
    }
    render_body(&mut out, &vm.body, theme, width);
    write_rule(&mut out, theme, width);
    let _ = writeln!(out, "{}{}{}", Theme::dim(), vm.footer.keybindings, Theme::reset());

    out
}

fn render_header(out: &mut String, header: &HeaderInfo, theme: &Theme, width: usize) {
    let _ = write!(
        out,
        "{}{}{}{}  ",
        Theme::bold(),
        Theme::fg(&theme.colors.header_fg),
        header.title,
        Theme::reset()
    );

    for tab in &header.tabs {
        let label = if tab.view == crate::app::View::Favorites {
            format!(" {} ({}) ", tab.label, header.favorites_count)
        } else {
            format!(" {} ", tab.label)
        };

        if tab.is_active {
            let _ = write!(
                out,
                "{}{}{}{}",
                Theme::fg(&theme.colors.tab_active_fg),
                Theme::bg(&theme.colors.tab_active_bg),
                label,
                Theme::reset()
            );
        } else {
            let _ = write!(out, "{}{}{}", Theme::fg(&theme.colors.text_dim), label, Theme::reset());
        }
    }

    let _ = writeln!(out, "  {}", if header.is_dark { "☾" } else { "☀" });
    write_rule(out, theme, width);
}

fn render_search_bar(out: &mut String, search: &SearchBarInfo, theme: &Theme) {
    let _ = writeln!(
        out,
        "{}Search:{} {}{}",
        Theme::fg(&theme.colors.accent),
        Theme::reset(),
        search.query,
        if search.is_busy { "  (searching...)" } else { "" }
    );
}

fn render_body(out: &mut String, body: &Body, theme: &Theme, width: usize) {
    match body {
        Body::Loading => {
            let _ = writeln!(out, "{}Loading...{}", Theme::dim(), Theme::reset());
        }
        Body::Error(error) => {
            let _ = writeln!(
                out,
                "{}Oops! Something went wrong{}",
                Theme::fg(&theme.colors.error_fg),
                Theme::reset()
            );
            let _ = writeln!(out, "{}", error.message);
            if let Some(label) = &error.retry_label {
                let _ = writeln!(out, "{}[retry] {label}{}", Theme::fg(&theme.colors.accent), Theme::reset());
            }
        }
        Body::Recipe(card) => render_recipe_detail(out, card, theme, width),
        Body::Results { title, items } | Body::Favorites { title, items } => {
            let _ = writeln!(out, "{}{title}{}", Theme::bold(), Theme::reset());
            for (index, card) in items.iter().enumerate() {
                render_recipe_row(out, index + 1, card, theme);
            }
        }
        Body::NoResults(info) => {
            let _ = writeln!(
                out,
                "{}No recipes found{}",
                Theme::fg(&theme.colors.empty_state_fg),
                Theme::reset()
            );
            for line in wrap(&info.message, width) {
                let _ = writeln!(out, "{line}");
            }
            let _ = writeln!(out, "{}[clear] {}{}", Theme::fg(&theme.colors.accent), info.clear_label, Theme::reset());
        }
        Body::Empty(empty) => {
            let _ = writeln!(
                out,
                "{}{}{}",
                Theme::fg(&theme.colors.empty_state_fg),
                empty.message,
                Theme::reset()
            );
            let _ = writeln!(out, "{}{}{}", Theme::dim(), empty.subtitle, Theme::reset());
        }
    }
}

fn favorite_marker(card: &RecipeCard, theme: &Theme) -> String {
    if card.is_favorited {
        format!("{}♥{}", Theme::fg(&theme.colors.favorite_fg), Theme::reset())
    } else {
        "♡".to_string()
    }
}

fn render_recipe_row(out: &mut String, position: usize, card: &RecipeCard, theme: &Theme) {
    let _ = write!(out, "{position:>3}. {} ", favorite_marker(card, theme));
    write_highlighted_text(out, &card.title, &card.highlight_ranges, theme);
    let _ = writeln!(
        out,
        "  {}{} [{}]{}",
        Theme::fg(&theme.colors.text_dim),
        card.subtitle,
        card.id,
        Theme::reset()
    );
}

fn render_recipe_detail(out: &mut String, card: &RecipeCard, theme: &Theme, width: usize) {
    let _ = writeln!(
        out,
        "{} {}{}{} {}[{}]{}",
        favorite_marker(card, theme),
        Theme::bold(),
        card.title,
        Theme::reset(),
        Theme::fg(&theme.colors.text_dim),
        card.id,
        Theme::reset()
    );
    if !card.subtitle.is_empty() {
        let _ = writeln!(out, "{}{}{}", Theme::fg(&theme.colors.accent), card.subtitle, Theme::reset());
    }

    if !card.ingredients.is_empty() {
        let _ = writeln!(out, "\n{}Ingredients{}", Theme::bold(), Theme::reset());
        for line in &card.ingredients {
            let _ = writeln!(out, "  • {line}");
        }
    }

    if !card.instructions.is_empty() {
        let _ = writeln!(out, "\n{}Instructions{}", Theme::bold(), Theme::reset());
        for line in wrap(&card.instructions, width.saturating_sub(2)) {
            let _ = writeln!(out, "  {line}");
        }
    }

    if let Some(url) = &card.video_url {
        let _ = writeln!(out, "\n{}Video:{} {url}", Theme::dim(), Theme::reset());
    }
}
