//! Read-only access to the remote product catalog.
//!
//! # Architecture
//!
//! - [`Catalog`] is the seam the cart store and render controller depend on
//! - [`HttpCatalog`] talks to a Fake Store compatible REST API via `reqwest`
//! - No caching: add-to-cart always re-fetches the product so the cart
//!   snapshot reflects the catalog entry at the moment of adding
//!
//! # Endpoints
//!
//! - `GET {base}/products` - array of product records
//! - `GET {base}/products/{id}` - a single product record

mod http;

use std::future::Future;

use fakestore_cart_core::{Product, ProductId};
use thiserror::Error;

pub use http::HttpCatalog;

/// Errors that can occur when talking to the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Transport failure (connection refused, DNS, TLS, ...).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Catalog answered with a non-success status.
    #[error("Catalog returned HTTP {status}")]
    Status { status: reqwest::StatusCode },

    /// Response body was not a valid product record.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Endpoint URL could not be built from the base URL.
    #[error("Invalid catalog URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The catalog has no product with this id.
    #[error("Not found: product {0}")]
    NotFound(ProductId),
}

impl CatalogError {
    /// Whether the catalog itself could not be reached or understood,
    /// as opposed to answering that a product does not exist.
    #[must_use]
    pub const fn is_unavailable(&self) -> bool {
        !matches!(self, Self::NotFound(_))
    }
}

/// Read-only product source.
///
/// Implementations must be thread-safe (`Send + Sync`) and cheap to clone
/// when shared between the cart store and the render controller.
pub trait Catalog: Send + Sync {
    /// Fetch the full product collection.
    fn list_products(&self) -> impl Future<Output = Result<Vec<Product>, CatalogError>> + Send;

    /// Fetch a single product by id.
    fn get_product(
        &self,
        id: ProductId,
    ) -> impl Future<Output = Result<Product, CatalogError>> + Send;
}
