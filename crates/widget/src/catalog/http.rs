//! `reqwest` implementation of the catalog REST API.

use std::sync::Arc;

use fakestore_cart_core::{Product, ProductId};
use tracing::{debug, instrument};
use url::Url;

use super::{Catalog, CatalogError};

/// Client for a Fake Store compatible catalog API.
///
/// Cheaply cloneable; clones share one connection pool.
#[derive(Clone)]
pub struct HttpCatalog {
    inner: Arc<HttpCatalogInner>,
}

struct HttpCatalogInner {
    client: reqwest::Client,
    base_url: Url,
}

impl std::fmt::Debug for HttpCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpCatalog")
            .field("base_url", &self.inner.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl HttpCatalog {
    /// Create a client rooted at `base_url` (which should end in `/`).
    #[must_use]
    pub fn new(base_url: Url) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Create a client that reuses an existing `reqwest::Client`.
    #[must_use]
    pub fn with_client(client: reqwest::Client, base_url: Url) -> Self {
        Self {
            inner: Arc::new(HttpCatalogInner { client, base_url }),
        }
    }

    fn endpoint(&self, path: &str) -> Result<Url, CatalogError> {
        Ok(self.inner.base_url.join(path)?)
    }

    /// GET `url`, returning the status and the body text.
    async fn fetch(&self, url: Url) -> Result<(reqwest::StatusCode, String), CatalogError> {
        let response = self.inner.client.get(url).send().await?;
        let status = response.status();

        // Get response body as text first for better error diagnostics
        let body = response.text().await?;
        Ok((status, body))
    }
}

/// Log and build the error for a non-success status.
fn status_error(status: reqwest::StatusCode, body: &str) -> CatalogError {
    tracing::error!(
        status = %status,
        body = %body.chars().take(500).collect::<String>(),
        "Catalog API returned non-success status"
    );
    CatalogError::Status { status }
}

impl Catalog for HttpCatalog {
    #[instrument(skip(self))]
    async fn list_products(&self) -> Result<Vec<Product>, CatalogError> {
        let url = self.endpoint("products")?;
        let (status, body) = self.fetch(url).await?;

        if !status.is_success() {
            return Err(status_error(status, &body));
        }

        let products: Vec<Product> = serde_json::from_str(&body).map_err(|e| {
            tracing::error!(
                error = %e,
                body = %body.chars().take(500).collect::<String>(),
                "Failed to parse catalog product list"
            );
            CatalogError::Parse(e)
        })?;

        debug!(count = products.len(), "Fetched product list");
        Ok(products)
    }

    #[instrument(skip(self), fields(product_id = %id))]
    async fn get_product(&self, id: ProductId) -> Result<Product, CatalogError> {
        let url = self.endpoint(&format!("products/{id}"))?;
        let (status, body) = self.fetch(url).await?;

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(CatalogError::NotFound(id));
        }
        if !status.is_success() {
            return Err(status_error(status, &body));
        }

        // The public fake store answers unknown ids with `200` and an empty body.
        let trimmed = body.trim();
        if trimmed.is_empty() || trimmed == "null" {
            return Err(CatalogError::NotFound(id));
        }

        let product: Product = serde_json::from_str(trimmed).map_err(|e| {
            tracing::error!(
                error = %e,
                body = %trimmed.chars().take(500).collect::<String>(),
                "Failed to parse catalog product"
            );
            CatalogError::Parse(e)
        })?;

        debug!("Fetched product");
        Ok(product)
    }
}
