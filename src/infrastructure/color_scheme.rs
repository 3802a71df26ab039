//! Host color-scheme detection.
//!
//! Terminals have no standard "prefers dark" query. Many (rxvt, Konsole,
//! iTerm2 with the option enabled) export `COLORFGBG="<fg>;<bg>"`, where the
//! background is an ANSI palette index; indices 0-6 and 8 are dark colors.

/// Whether the host reports a dark background. Unknown means light.
#[must_use]
pub fn host_prefers_dark() -> bool {
    std::env::var("COLORFGBG").is_ok_and(|value| parse_colorfgbg(&value).unwrap_or(false))
}

/// Interprets a `COLORFGBG` value. `None` when the background is not an index.
///
/// # Examples
///
/// ```
/// use recipebox::infrastructure::color_scheme::parse_colorfgbg;
///
/// assert_eq!(parse_colorfgbg("15;0"), Some(true));
/// assert_eq!(parse_colorfgbg("0;15"), Some(false));
/// assert_eq!(parse_colorfgbg("15;default;0"), Some(true));
/// assert_eq!(parse_colorfgbg("garbage"), None);
/// ```
#[must_use]
pub fn parse_colorfgbg(value: &str) -> Option<bool> {
    let background: u8 = value.rsplit(';').next()?.trim().parse().ok()?;
    Some(matches!(background, 0..=6 | 8))
}
