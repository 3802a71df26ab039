//! Recipe catalog access.
//!
//! ```text
//! RecipeCatalogClient ──► CatalogTransport::get ──► body text
//!         │                    (HttpTransport / test doubles)
//!         └──► normalize::parse_payload ──► normalize::normalize_record ──► Recipe
//! ```
//!
//! # Modules
//!
//! - [`client`]: Client with captured loading/error state
//! - [`normalize`]: Raw record validation and ingredient extraction
//! - [`request`]: Request model shared by client and transports
//! - [`transport`]: Transport trait and the `reqwest` implementation

pub mod client;
pub mod normalize;
pub mod request;
pub mod transport;

pub use client::{Outcome, RecipeCatalogClient, SearchResults, LOOKUP_FAILED, RANDOM_FAILED, SEARCH_FAILED};
pub use normalize::{normalize_record, parse_ingredients};
pub use request::CatalogRequest;
pub use transport::{CatalogTransport, HttpTransport};
