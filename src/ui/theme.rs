//! Palettes and ANSI escape sequence generation.
//!
//! The persisted [`ThemePreference`](crate::storage::ThemePreference) is a
//! single dark/light flag; this module maps it to one of two built-in TOML
//! palettes and turns palette entries into 24-bit ANSI sequences.
//!
//! # TOML Format
//!
//! ```toml
//! name = "dark"
//!
//! [colors]
//! header_fg = "#cdd6f4"
//! accent = "#fab387"
//! text_normal = "#cdd6f4"
//! text_dim = "#6c7086"
//! border = "#45475a"
//! tab_active_fg = "#1e1e2e"
//! tab_active_bg = "#fab387"
//! match_highlight_fg = "#1e1e2e"
//! match_highlight_bg = "#f9e2af"
//! error_fg = "#f38ba8"
//! favorite_fg = "#f38ba8"
//! empty_state_fg = "#89b4fa"
//! ```
//!
//! # Example
//!
//! ```rust
//! use recipebox::ui::Theme;
//!
//! let theme = Theme::for_mode(true);
//! assert_eq!(theme.name, "dark");
//! print!("{}Bold{}", Theme::bold(), Theme::reset());
//! ```

use crate::domain::error::{RecipeError, Result};
use serde::{Deserialize, Serialize};

const LIGHT: &str = include_str!("../../themes/light.toml");
const DARK: &str = include_str!("../../themes/dark.toml");

/// Color scheme for the text renderer.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Theme {
    /// Palette name (`light` or `dark`).
    pub name: String,
    /// Color palette for all UI elements.
    pub colors: ThemeColors,
}

/// Color definitions as hex strings (e.g. `"#cdd6f4"`). An empty string
/// means "terminal default".
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct ThemeColors {
    pub header_fg: String,
    pub accent: String,
    pub text_normal: String,
    pub text_dim: String,
    pub border: String,
    pub tab_active_fg: String,
    pub tab_active_bg: String,
    pub match_highlight_fg: String,
    pub match_highlight_bg: String,
    pub error_fg: String,
    pub favorite_fg: String,
    pub empty_state_fg: String,
}

impl Theme {
    /// Parses a palette from TOML.
    ///
    /// # Errors
    ///
    /// Returns [`RecipeError::Theme`] if the TOML is invalid or incomplete.
    pub fn from_toml(source: &str) -> Result<Self> {
        toml::from_str(source).map_err(|e| RecipeError::Theme(format!("failed to parse theme TOML: {e}")))
    }

    /// Built-in palette for the given preference.
    ///
    /// Falls back to an uncolored palette if the built-in TOML fails to parse.
    #[must_use]
    pub fn for_mode(is_dark: bool) -> Self {
        let (name, source) = if is_dark { ("dark", DARK) } else { ("light", LIGHT) };

        Self::from_toml(source).unwrap_or_else(|e| {
            tracing::warn!(theme = name, error = %e, "built-in theme failed to parse, using plain output");
            Self {
                name: name.to_string(),
                colors: ThemeColors::default(),
            }
        })
    }

    /// Converts a hex color to an RGB tuple. `None` for empty or invalid input.
    fn hex_to_rgb(hex: &str) -> Option<(u8, u8, u8)> {
        let hex = hex.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }

        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        Some((r, g, b))
    }

    /// ANSI 24-bit foreground sequence, or an empty string for no color.
    #[must_use]
    pub fn fg(hex: &str) -> String {
        Self::hex_to_rgb(hex).map_or_else(String::new, |(r, g, b)| format!("\u{001b}[38;2;{r};{g};{b}m"))
    }

    /// ANSI 24-bit background sequence, or an empty string for no color.
    #[must_use]
    pub fn bg(hex: &str) -> String {
        Self::hex_to_rgb(hex).map_or_else(String::new, |(r, g, b)| format!("\u{001b}[48;2;{r};{g};{b}m"))
    }

    #[must_use]
    pub const fn bold() -> &'static str {
        "\u{001b}[1m"
    }

    #[must_use]
    pub const fn dim() -> &'static str {
        "\u{001b}[2m"
    }

    /// Clears all styling.
    #[must_use]
    pub const fn reset() -> &'static str {
        "\u{001b}[0m"
    }
}
