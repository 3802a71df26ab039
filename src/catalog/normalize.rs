//! Normalization of raw catalog records into [`Recipe`].
//!
//! Catalog records are flat JSON objects with loosely typed fields and
//! ingredients spread over twenty numbered field pairs. Everything entering
//! the crate passes through [`normalize_record`], which either produces a
//! fully-populated [`Recipe`] or fails with [`RecipeError::NoData`].
//!
//! # Field Mapping
//!
//! | Recipe           | Raw field                     |
//! |------------------|-------------------------------|
//! | `id`             | `idMeal` (required)           |
//! | `title`          | `strMeal` (required)          |
//! | `thumbnail_url`  | `strMealThumb`                |
//! | `area`           | `strArea`                     |
//! | `category`       | `strCategory`                 |
//! | `instructions`   | `strInstructions`             |
//! | `video_url`      | `strYoutube` (blank = absent) |
//! | `ingredients`    | `strIngredientN` / `strMeasureN`, N = 1..=20 |

use crate::domain::error::{RecipeError, Result};
use crate::domain::{Ingredient, Recipe};
use serde::Deserialize;
use serde_json::{Map, Value};

/// Number of ingredient/measure field pairs the catalog defines per record.
pub const MAX_INGREDIENTS: usize = 20;

/// A raw catalog record.
pub type RawRecord = Map<String, Value>;

/// Top-level catalog response envelope.
#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    meals: Option<Vec<Value>>,
}

/// Decodes a response body into its list of raw records.
///
/// `{"meals": null}` (or a missing `meals` field) decodes to an empty list:
/// whether that is an error depends on the operation.
///
/// # Errors
///
/// Returns [`RecipeError::NoData`] if the body is not a JSON object with an
/// optional `meals` array.
pub fn parse_payload(body: &str) -> Result<Vec<Value>> {
    let envelope: Envelope = serde_json::from_str(body)
        .map_err(|e| RecipeError::NoData(format!("malformed catalog response: {e}")))?;
    Ok(envelope.meals.unwrap_or_default())
}

/// Reads a scalar field as text. Strings pass through, numbers and booleans
/// are rendered, everything else (null, arrays, objects, absent) is `None`.
fn text_field(record: &RawRecord, key: &str) -> Option<String> {
    match record.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn required_field(record: &RawRecord, key: &str) -> Result<String> {
    text_field(record, key)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .ok_or_else(|| RecipeError::NoData(format!("catalog record is missing '{key}'")))
}

fn optional_field(record: &RawRecord, key: &str) -> String {
    text_field(record, key)
        .map(|value| value.trim().to_string())
        .unwrap_or_default()
}

/// Extracts the ordered ingredient list from the numbered field pairs.
///
/// Indices 1 through [`MAX_INGREDIENTS`] are visited in order; an index is
/// kept only when its trimmed ingredient name is non-empty. Measures are
/// trimmed and default to an empty string. Fields past index 20 are ignored.
///
/// # Example
///
/// ```
/// use recipebox::catalog::normalize::parse_ingredients;
/// use serde_json::json;
///
/// let record = json!({
///     "strIngredient1": "soy sauce", "strMeasure1": "3 tbs",
///     "strIngredient2": "",
///     "strIngredient3": " chicken breast ", "strMeasure3": "1 lb",
/// });
/// let ingredients = parse_ingredients(record.as_object().unwrap());
///
/// assert_eq!(ingredients.len(), 2);
/// assert_eq!(ingredients[1].name, "chicken breast");
/// ```
#[must_use]
pub fn parse_ingredients(record: &RawRecord) -> Vec<Ingredient> {
    (1..=MAX_INGREDIENTS)
        .filter_map(|index| {
            let name = optional_field(record, &format!("strIngredient{index}"));
            if name.is_empty() {
                return None;
            }
            let measure = optional_field(record, &format!("strMeasure{index}"));
            Some(Ingredient { name, measure })
        })
        .collect()
}

/// Converts one raw record into a [`Recipe`].
///
/// # Errors
///
/// Returns [`RecipeError::NoData`] if the record is not a JSON object or is
/// missing `idMeal` or `strMeal`.
pub fn normalize_record(raw: &Value) -> Result<Recipe> {
    let record = raw
        .as_object()
        .ok_or_else(|| RecipeError::NoData("catalog record is not an object".to_string()))?;

    let video_url = Some(optional_field(record, "strYoutube")).filter(|url| !url.is_empty());

    Ok(Recipe {
        id: required_field(record, "idMeal")?,
        title: required_field(record, "strMeal")?,
        thumbnail_url: optional_field(record, "strMealThumb"),
        area: optional_field(record, "strArea"),
        category: optional_field(record, "strCategory"),
        instructions: optional_field(record, "strInstructions"),
        video_url,
        ingredients: parse_ingredients(record),
    })
}
