//! Cart persistence on top of a [`KeyValueStore`].
//!
//! The cart is stored as a JSON array of lines under a single key. Reading is
//! forgiving: an absent, unreadable or malformed value yields an empty cart.

use fakestore_cart_core::Cart;
use tracing::{debug, warn};

use crate::storage::{KeyValueStore, StorageError};

/// Reads and writes the serialized cart.
#[derive(Debug, Clone)]
pub struct CartPersistence<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> CartPersistence<S> {
    /// Persist under `key` in `store`.
    pub fn new(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Load the stored cart, falling back to an empty cart.
    #[must_use]
    pub fn load(&self) -> Cart {
        let raw = match self.store.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!(key = %self.key, "No stored cart, starting empty");
                return Cart::new();
            }
            Err(e) => {
                warn!(key = %self.key, error = %e, "Failed to read stored cart, starting empty");
                return Cart::new();
            }
        };

        match serde_json::from_str::<Option<Cart>>(&raw) {
            Ok(cart) => {
                let cart = cart.unwrap_or_default();
                debug!(key = %self.key, lines = cart.len(), "Loaded stored cart");
                cart
            }
            Err(e) => {
                warn!(key = %self.key, error = %e, "Stored cart is malformed, starting empty");
                Cart::new()
            }
        }
    }

    /// Serialize and write `cart`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the store rejects the write (e.g. quota).
    pub fn save(&self, cart: &Cart) -> Result<(), StorageError> {
        let json = serde_json::to_string(cart).map_err(std::io::Error::other)?;
        self.store.set(&self.key, &json)
    }

    /// Delete the stored cart.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the store cannot be written.
    pub fn clear(&self) -> Result<(), StorageError> {
        self.store.remove(&self.key)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use fakestore_cart_core::{CartLine, Price, ProductId};

    use super::*;
    use crate::storage::MemoryStore;

    fn sample_cart() -> Cart {
        Cart::from_lines([
            CartLine {
                id: ProductId::new(1),
                title: "Backpack".to_string(),
                price: Price::from_cents(10995),
                image: "backpack.jpg".to_string(),
                quantity: 3,
            },
            CartLine {
                id: ProductId::new(2),
                title: "T-Shirt".to_string(),
                price: Price::from_cents(2230),
                image: "shirt.jpg".to_string(),
                quantity: 1,
            },
        ])
    }

    #[test]
    fn test_save_then_load_reproduces_cart() {
        let persistence = CartPersistence::new(MemoryStore::new(), "cart");
        let cart = sample_cart();

        persistence.save(&cart).unwrap();
        let reloaded = persistence.load();

        assert_eq!(reloaded.lines(), cart.lines());
    }

    #[test]
    fn test_absent_key_loads_empty() {
        let persistence = CartPersistence::new(MemoryStore::new(), "cart");
        assert!(persistence.load().is_empty());
    }

    #[test]
    fn test_malformed_value_loads_empty() {
        let store = MemoryStore::new();
        store.set("cart", "{not json").unwrap();

        let persistence = CartPersistence::new(store, "cart");
        assert!(persistence.load().is_empty());
    }

    #[test]
    fn test_null_value_loads_empty() {
        let store = MemoryStore::new();
        store.set("cart", "null").unwrap();

        let persistence = CartPersistence::new(store, "cart");
        assert!(persistence.load().is_empty());
    }

    #[test]
    fn test_negative_quantity_is_treated_as_corrupt() {
        let store = MemoryStore::new();
        store
            .set(
                "cart",
                r#"[{"id":1,"title":"A","price":"1","image":"a","quantity":-2}]"#,
            )
            .unwrap();

        let persistence = CartPersistence::new(store, "cart");
        assert!(persistence.load().is_empty());
    }

    #[test]
    fn test_clear_removes_stored_cart() {
        let store = MemoryStore::new();
        let persistence = CartPersistence::new(store.clone(), "cart");

        persistence.save(&sample_cart()).unwrap();
        persistence.clear().unwrap();

        assert_eq!(store.get("cart").unwrap(), None);
        assert!(persistence.load().is_empty());
    }

    #[test]
    fn test_save_propagates_quota_errors() {
        let persistence = CartPersistence::new(MemoryStore::with_quota(16), "cart");
        let err = persistence.save(&sample_cart()).unwrap_err();
        assert!(matches!(err, StorageError::QuotaExceeded { .. }));
    }
}
