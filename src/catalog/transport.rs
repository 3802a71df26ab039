//! Transport seam between the catalog client and the network.
//!
//! [`CatalogTransport`] turns a [`CatalogRequest`] into the raw response body.
//! [`HttpTransport`] is the production implementation over `reqwest`; tests
//! plug in scripted transports instead.

use crate::catalog::request::CatalogRequest;
use crate::domain::error::{RecipeError, Result};
use async_trait::async_trait;
use std::time::Duration;

/// Fetches raw catalog response bodies.
///
/// Implementations return the body text of a successful (2xx) response and
/// map every other outcome (connect failure, timeout, error status) to
/// [`RecipeError::Transport`]. Decoding is the caller's job.
#[async_trait]
pub trait CatalogTransport: Send + Sync {
    /// Performs `request` and returns the response body.
    ///
    /// # Errors
    ///
    /// Returns [`RecipeError::Transport`] when no successful response arrives.
    async fn get(&self, request: &CatalogRequest) -> Result<String>;
}

/// HTTP transport against a TheMealDB-compatible catalog.
///
/// URLs are built as `<base_url>/<endpoint><path_suffix>?<query>`, e.g.
/// `https://www.themealdb.com/api/json/v1/1/search.php?s=chicken`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
    path_suffix: String,
}

impl HttpTransport {
    /// Builds a transport with the given request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`RecipeError::Config`] if the HTTP client cannot be built
    /// (for example when no TLS backend is available).
    ///
    /// # Example
    ///
    /// ```
    /// use recipebox::catalog::HttpTransport;
    /// use std::time::Duration;
    ///
    /// let transport = HttpTransport::new(
    ///     "https://www.themealdb.com/api/json/v1/1",
    ///     ".php",
    ///     Duration::from_secs(10),
    /// )?;
    /// # Ok::<(), recipebox::RecipeError>(())
    /// ```
    pub fn new(
        base_url: impl Into<String>,
        path_suffix: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .user_agent(concat!("recipebox/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| RecipeError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            path_suffix: path_suffix.into(),
        })
    }

    /// Full URL (without query string) for `request`.
    #[must_use]
    pub fn url_for(&self, request: &CatalogRequest) -> String {
        format!("{}/{}{}", self.base_url, request.endpoint(), self.path_suffix)
    }
}

#[async_trait]
impl CatalogTransport for HttpTransport {
    async fn get(&self, request: &CatalogRequest) -> Result<String> {
        let url = self.url_for(request);
        tracing::debug!(url = %url, operation = request.operation(), "catalog request");

        let response = self
            .client
            .get(&url)
            .query(&request.query_pairs())
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    RecipeError::Transport(format!("request to {url} timed out"))
                } else {
                    RecipeError::Transport(format!("request to {url} failed: {e}"))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(RecipeError::Transport(format!(
                "catalog returned HTTP {status} for {url}"
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| RecipeError::Transport(format!("failed to read response body: {e}")))?;

        tracing::debug!(status = %status, bytes = body.len(), "catalog response");
        Ok(body)
    }
}
