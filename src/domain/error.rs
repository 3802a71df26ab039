//! Error types for the recipe browsing core.
//!
//! This module defines the centralized error type [`RecipeError`] and a type alias
//! [`Result`] for convenient error handling throughout the crate. All errors are
//! implemented using the `thiserror` crate for automatic `Error` trait implementation.
//!
//! Catalog failures (`Transport`, `NoData`) never cross the
//! [`RecipeCatalogClient`](crate::catalog::RecipeCatalogClient) boundary: the
//! client turns them into a user-facing message. `MalformedPersistedState` is
//! recovered where it is detected and only shows up in logs.

use thiserror::Error;

/// The main error type for recipe browsing operations.
///
/// # Examples
///
/// ```
/// use recipebox::RecipeError;
///
/// fn fetch() -> Result<(), RecipeError> {
///     Err(RecipeError::NoData("catalog returned no meals".to_string()))
/// }
///
/// assert!(fetch().is_err());
/// ```
#[derive(Debug, Error)]
pub enum RecipeError {
    /// Network failure, timeout or non-success HTTP status from the catalog.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The catalog answered, but without a usable record.
    ///
    /// Covers `{"meals": null}` where a result was required, bodies that are
    /// not the expected JSON shape, and records missing a required field.
    #[error("No data: {0}")]
    NoData(String),

    /// A persisted blob could not be decoded.
    #[error("Malformed persisted state under '{key}': {reason}")]
    MalformedPersistedState {
        /// Storage key holding the corrupt value.
        key: String,
        /// Decoder message.
        reason: String,
    },

    /// Storage operation failed.
    ///
    /// Occurs when reading from or writing to the key-value store fails for a
    /// reason other than plain I/O (serialization, lock poisoning).
    #[error("Storage error: {0}")]
    Storage(String),

    /// Filesystem or I/O operation failed.
    ///
    /// Wraps errors from standard library I/O operations. Automatically converts
    /// from `std::io::Error` using the `#[from]` attribute.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Palette parsing failed.
    #[error("Theme error: {0}")]
    Theme(String),
}

/// A specialized `Result` type for recipe browsing operations.
///
/// This is a type alias for `std::result::Result<T, RecipeError>` that simplifies
/// function signatures throughout the codebase.
pub type Result<T> = std::result::Result<T, RecipeError>;
