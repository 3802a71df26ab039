//! Shared rendering utilities.
//!
//! Text is written into a `String` buffer rather than straight to stdout, so
//! the host decides where output goes and tests can inspect it.

use crate::ui::theme::Theme;
use std::fmt::Write;

/// Appends `text` with the character ranges in `ranges` highlighted.
///
/// Ranges are `(start, end)` character indices, end exclusive, sorted and
/// non-overlapping. Out-of-range ends are clamped.
///
/// # Example
///
/// ```rust
/// use recipebox::ui::helpers::write_highlighted_text;
/// use recipebox::ui::Theme;
///
/// let mut out = String::new();
/// write_highlighted_text(&mut out, "Pasta Bake", &[], &Theme::for_mode(true));
/// assert_eq!(out, "Pasta Bake");
/// ```
pub fn write_highlighted_text(out: &mut String, text: &str, ranges: &[(usize, usize)], theme: &Theme) {
    if ranges.is_empty() {
        out.push_str(text);
        return;
    }

    let chars: Vec<char> = text.chars().collect();
    let mut current_pos = 0;

    for &(start, end) in ranges {
        let start = start.min(chars.len()).max(current_pos);
        let end = end.min(chars.len());
        if start >= end {
            continue;
        }

        out.extend(&chars[current_pos..start]);
        out.push_str(&Theme::fg(&theme.colors.match_highlight_fg));
        out.push_str(&Theme::bg(&theme.colors.match_highlight_bg));
        out.extend(&chars[start..end]);
        out.push_str(Theme::reset());

        current_pos = end;
    }

    out.extend(&chars[current_pos..]);
}

/// Appends a full-width horizontal rule.
pub fn write_rule(out: &mut String, theme: &Theme, width: usize) {
    let _ = writeln!(
        out,
        "{}{}{}",
        Theme::fg(&theme.colors.border),
        "─".repeat(width),
        Theme::reset()
    );
}

/// Wraps `text` at word boundaries to lines of at most `width` characters.
///
/// Words longer than `width` are kept whole on their own line.
#[must_use]
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();

    for paragraph in text.lines() {
        let mut line = String::new();
        for word in paragraph.split_whitespace() {
            if !line.is_empty() && line.chars().count() + 1 + word.chars().count() > width {
                lines.push(std::mem::take(&mut line));
            }
            if !line.is_empty() {
                line.push(' ');
            }
            line.push_str(word);
        }
        if !line.is_empty() {
            lines.push(line);
        }
    }

    lines
}
