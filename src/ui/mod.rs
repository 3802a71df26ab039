//! Presentation contract and a plain terminal renderer.
//!
//! The core hands presentation a [`UIViewModel`]; how it is drawn is up to
//! the host. The bundled renderer draws it as ANSI text for the binary.
//!
//! ```text
//! AppState → compute_viewmodel → UIViewModel → render → String
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: View model types
//! - [`renderer`]: Text renderer
//! - [`helpers`]: Highlighting, rules and word wrapping
//! - [`theme`]: Light/dark palettes and ANSI escape sequence generation

pub mod helpers;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use renderer::render;
pub use theme::Theme;
pub use viewmodel::{
    Body, EmptyState, ErrorInfo, FooterInfo, HeaderInfo, NoResultsInfo, RecipeCard,
    SearchBarInfo, TabInfo, UIViewModel,
};
