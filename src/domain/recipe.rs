//! Recipe domain model.
//!
//! [`Recipe`] values are produced by catalog normalization (see
//! [`crate::catalog::normalize`]) or decoded from the persisted favorites blob.
//! Nothing in the crate mutates a recipe after construction; collections hand
//! out shared references and clone when they need ownership.

use serde::{Deserialize, Serialize};

/// One ingredient line of a recipe.
///
/// `name` is never empty and both fields are trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    /// Ingredient name, e.g. `"soy sauce"`.
    pub name: String,
    /// Free-text quantity, e.g. `"3 tbs"`. Empty when the catalog gave none.
    #[serde(default)]
    pub measure: String,
}

impl Ingredient {
    /// Creates an ingredient line from already-trimmed parts.
    #[must_use]
    pub fn new(name: impl Into<String>, measure: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            measure: measure.into(),
        }
    }
}

/// A recipe in the crate's fixed internal shape.
///
/// Identity is [`Recipe::id`]: favorites membership, toggling and lookups are
/// keyed by id, never by structural equality.
///
/// # Example
///
/// ```
/// use recipebox::domain::{Ingredient, Recipe};
///
/// let recipe = Recipe {
///     id: "52772".to_string(),
///     title: "Teriyaki Chicken".to_string(),
///     thumbnail_url: String::new(),
///     area: "Japanese".to_string(),
///     category: "Chicken".to_string(),
///     instructions: String::new(),
///     video_url: None,
///     ingredients: vec![Ingredient::new("soy sauce", "3 tbs")],
/// };
/// assert_eq!(recipe.subtitle(), "Japanese • Chicken");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    /// Catalog-assigned identifier.
    pub id: String,
    /// Display name.
    pub title: String,
    /// Image URL; may be empty.
    #[serde(default)]
    pub thumbnail_url: String,
    /// Cuisine / region.
    #[serde(default)]
    pub area: String,
    /// Catalog category.
    #[serde(default)]
    pub category: String,
    /// Preparation steps as free text.
    #[serde(default)]
    pub instructions: String,
    /// Optional video link.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    /// Ingredient lines in catalog order.
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
}

impl Recipe {
    /// Returns `"area • category"`, dropping whichever part is empty.
    #[must_use]
    pub fn subtitle(&self) -> String {
        match (self.area.is_empty(), self.category.is_empty()) {
            (false, false) => format!("{} • {}", self.area, self.category),
            (false, true) => self.area.clone(),
            (true, false) => self.category.clone(),
            (true, true) => String::new(),
        }
    }

    /// Whether this recipe has the given identity.
    #[must_use]
    pub fn has_id(&self, id: &str) -> bool {
        self.id == id
    }
}
