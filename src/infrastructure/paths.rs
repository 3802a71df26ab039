//! Filesystem locations.
//!
//! The data directory holds the key-value store document and the log file.
//! It defaults to the platform data directory (`~/.local/share/recipebox` on
//! Linux) and can be overridden through [`Config::data_dir`](crate::Config::data_dir).

use std::path::PathBuf;

/// File name of the key-value store document inside the data directory.
pub const STORE_FILE_NAME: &str = "store.json";

/// File name of the log file inside the data directory.
pub const LOG_FILE_NAME: &str = "recipebox.log";

/// Returns the data directory, honoring an explicit override.
///
/// Resolution order: `override_dir` (tilde-expanded), the platform data
/// directory joined with `recipebox`, then `./.recipebox`.
///
/// # Examples
///
/// ```
/// use recipebox::infrastructure::get_data_dir;
/// use std::path::PathBuf;
///
/// assert_eq!(get_data_dir(Some("/srv/recipes")), PathBuf::from("/srv/recipes"));
/// ```
#[must_use]
pub fn get_data_dir(override_dir: Option<&str>) -> PathBuf {
    if let Some(dir) = override_dir.filter(|d| !d.trim().is_empty()) {
        return expand_tilde(dir.trim());
    }

    dirs::data_dir().map_or_else(|| PathBuf::from(".recipebox"), |dir| dir.join("recipebox"))
}

/// Expands a leading `~` to the user's home directory.
///
/// Paths without a leading tilde, and all paths when no home directory is
/// known, are returned unchanged.
///
/// # Examples
///
/// ```
/// use recipebox::infrastructure::expand_tilde;
/// use std::path::PathBuf;
///
/// assert_eq!(expand_tilde("/absolute/path"), PathBuf::from("/absolute/path"));
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> PathBuf {
    let home = dirs::home_dir();
    match (path, home) {
        ("~", Some(home)) => home,
        (p, Some(home)) if p.starts_with("~/") => home.join(&p[2..]),
        (p, _) => PathBuf::from(p),
    }
}
