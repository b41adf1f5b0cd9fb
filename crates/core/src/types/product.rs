//! Catalog product records.

use serde::{Deserialize, Serialize};

use super::id::ProductId;
use super::price::Price;

/// Average rating at or above which a product is badged as top rated.
pub const TOP_RATED_THRESHOLD: f64 = 4.5;

/// Aggregate review score for a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    /// Average score (e.g., 4.1).
    pub rate: f64,
    /// Number of reviews.
    pub count: u32,
}

/// A product as served by the remote catalog.
///
/// The catalog is the source of truth for every field here; cart lines only
/// snapshot what they need at add time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub price: Price,
    /// Image URL.
    pub image: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<Rating>,
}

impl Product {
    /// Whether the product's average rating earns the top-rated badge.
    #[must_use]
    pub fn is_top_rated(&self) -> bool {
        self.rating
            .as_ref()
            .is_some_and(|rating| rating.rate >= TOP_RATED_THRESHOLD)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const CATALOG_RECORD: &str = r#"{
        "id": 1,
        "title": "Fjallraven - Foldsack No. 1 Backpack, Fits 15 Laptops",
        "price": 109.95,
        "description": "Your perfect pack for everyday use and walks in the forest.",
        "category": "men's clothing",
        "image": "https://fakestoreapi.com/img/81fPKd-2AYL._AC_SL1500_.jpg",
        "rating": { "rate": 3.9, "count": 120 }
    }"#;

    #[test]
    fn test_deserialize_catalog_record() {
        let product: Product = serde_json::from_str(CATALOG_RECORD).unwrap();
        assert_eq!(product.id, ProductId::new(1));
        assert_eq!(product.price, Price::from_cents(10995));
        assert_eq!(product.category.as_deref(), Some("men's clothing"));
        assert_eq!(product.rating.as_ref().map(|r| r.count), Some(120));
        assert!(!product.is_top_rated());
    }

    #[test]
    fn test_rating_is_optional() {
        let product: Product = serde_json::from_str(
            r#"{"id": 2, "title": "Mug", "price": 5, "image": "mug.png", "description": ""}"#,
        )
        .unwrap();
        assert!(product.rating.is_none());
        assert!(!product.is_top_rated());
    }

    #[test]
    fn test_top_rated_threshold_is_inclusive() {
        let mut product: Product = serde_json::from_str(CATALOG_RECORD).unwrap();
        product.rating = Some(Rating {
            rate: 4.5,
            count: 10,
        });
        assert!(product.is_top_rated());
    }
}
