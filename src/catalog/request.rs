//! Catalog request model.

/// One call against the upstream catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CatalogRequest {
    /// One random record.
    Random,
    /// Free-text search. The query is already trimmed.
    Search {
        query: String,
    },
    /// Single record by catalog id.
    Lookup {
        id: String,
    },
}

impl CatalogRequest {
    /// Endpoint name without the path suffix (`random`, `search`, `lookup`).
    #[must_use]
    pub const fn endpoint(&self) -> &'static str {
        match self {
            Self::Random => "random",
            Self::Search { .. } => "search",
            Self::Lookup { .. } => "lookup",
        }
    }

    /// Query-string pairs; values are encoded by the transport.
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(&'static str, &str)> {
        match self {
            Self::Random => vec![],
            Self::Search { query } => vec![("s", query.as_str())],
            Self::Lookup { id } => vec![("i", id.as_str())],
        }
    }

    /// Operation label used in logs.
    #[must_use]
    pub const fn operation(&self) -> &'static str {
        match self {
            Self::Random => "fetch random",
            Self::Search { .. } => "search",
            Self::Lookup { .. } => "fetch by id",
        }
    }
}
