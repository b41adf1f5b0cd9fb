//! The cart store: sole owner and mutator of cart state.
//!
//! Every successful mutation is written through the persistence adapter
//! before the call returns. The write runs on the blocking pool so a slow
//! disk never stalls the runtime. A failed write is logged and the in-memory
//! cart is kept, so the session carries on with state that may not survive a
//! restart.

use fakestore_cart_core::{Cart, CartLine, ProductId, QuantityChange};
use tracing::{debug, error, instrument};

use crate::catalog::{Catalog, CatalogError};
use crate::persistence::CartPersistence;
use crate::storage::KeyValueStore;

/// In-memory cart backed by a catalog and a persistence adapter.
pub struct CartStore<C, S> {
    cart: Cart,
    catalog: C,
    persistence: CartPersistence<S>,
}

impl<C, S> std::fmt::Debug for CartStore<C, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("cart", &self.cart)
            .finish_non_exhaustive()
    }
}

impl<C: Catalog, S: KeyValueStore + Clone + 'static> CartStore<C, S> {
    /// Hydrate the store from persisted state (empty if absent or corrupt).
    pub fn hydrate(catalog: C, persistence: CartPersistence<S>) -> Self {
        let cart = persistence.load();
        Self {
            cart,
            catalog,
            persistence,
        }
    }

    /// Read-only view of the cart.
    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    #[must_use]
    pub fn line(&self, id: ProductId) -> Option<&CartLine> {
        self.cart.line(id)
    }

    #[must_use]
    pub fn quantity_of(&self, id: ProductId) -> Option<u32> {
        self.cart.quantity_of(id)
    }

    /// Add one unit of `product_id`, fetching its current catalog entry.
    ///
    /// A new line snapshots the fetched title, price and image; an existing
    /// line is incremented and keeps its snapshot. Returns the new quantity.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the product cannot be fetched. The cart is
    /// left unchanged and nothing is persisted.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn add(&mut self, product_id: ProductId) -> Result<u32, CatalogError> {
        let product = self.catalog.get_product(product_id).await?;
        let quantity = self.cart.add_product(&product);
        debug!(quantity, "Added product to cart");
        self.persist().await;
        Ok(quantity)
    }

    /// Add `delta` to the quantity of `product_id`.
    ///
    /// A result of zero or below removes the line. An absent product is a
    /// no-op and nothing is persisted.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn update_quantity(&mut self, product_id: ProductId, delta: i32) -> QuantityChange {
        let change = self.cart.adjust_quantity(product_id, delta);
        match change {
            QuantityChange::Missing => debug!("Product not in cart, ignoring quantity change"),
            QuantityChange::Removed => {
                debug!("Quantity dropped to zero, removed line");
                self.persist().await;
            }
            QuantityChange::Updated(quantity) => {
                debug!(quantity, "Updated quantity");
                self.persist().await;
            }
        }
        change
    }

    /// Remove `product_id` from the cart. Returns whether a line was removed.
    ///
    /// The cart is persisted either way; removing an absent product leaves the
    /// stored value unchanged.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn remove(&mut self, product_id: ProductId) -> bool {
        let removed = self.cart.remove(product_id).is_some();
        debug!(removed, "Removed product from cart");
        self.persist().await;
        removed
    }

    async fn persist(&self) {
        let persistence = self.persistence.clone();
        let cart = self.cart.clone();
        let result = tokio::task::spawn_blocking(move || persistence.save(&cart)).await;

        match result {
            Ok(Ok(())) => {}
            Ok(Err(e)) => error!(
                key = %self.persistence.key(),
                error = %e,
                "Failed to persist cart"
            ),
            Err(e) => error!(
                key = %self.persistence.key(),
                error = %e,
                "Cart persist task failed"
            ),
        }
    }
}
