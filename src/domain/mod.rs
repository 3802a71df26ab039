//! Domain layer for the recipe browsing core.
//!
//! This module contains the core domain types, independent of the catalog
//! transport, the storage backend or the presentation layer.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`recipe`]: Recipe and ingredient model
//!
//! # Examples
//!
//! ```
//! use recipebox::domain::{Ingredient, Result};
//!
//! fn salt() -> Result<Ingredient> {
//!     Ok(Ingredient::new("salt", "pinch"))
//! }
//! # salt().unwrap();
//! ```

pub mod error;
pub mod recipe;

pub use error::{RecipeError, Result};
pub use recipe::{Ingredient, Recipe};
