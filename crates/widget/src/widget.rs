//! The render controller.
//!
//! `CartWidget` owns the cart store, turns typed [`Action`]s into store
//! operations, and after every state change re-fetches the catalog and
//! re-renders both views in full.
//!
//! Actions are serialized: the store lock is held for the whole mutation,
//! including the catalog fetch behind add-to-cart, so rapid repeated adds
//! apply one after another instead of racing. Rendering works from a
//! snapshot taken after the lock is released.

use std::sync::Arc;

use fakestore_cart_core::{Cart, OrderSummary, Product, ProductId, QuantityChange};
use tokio::sync::Mutex;
use tracing::{error, info, instrument, warn};

use crate::action::Action;
use crate::catalog::{Catalog, HttpCatalog};
use crate::config::WidgetConfig;
use crate::error::Result;
use crate::persistence::CartPersistence;
use crate::render;
use crate::storage::{FileStore, KeyValueStore};
use crate::store::CartStore;

/// One full render of the widget.
#[derive(Debug, Clone)]
pub struct Frame {
    /// Product grid markup, or the inline catalog error.
    pub products: String,
    /// Cart lines markup, or the empty-cart message.
    pub cart: String,
    /// Order summary markup.
    pub summary: String,
    /// The summary the markup was rendered from.
    pub order: OrderSummary,
    /// Whether the catalog list could be fetched for this frame.
    pub catalog_available: bool,
    /// The products the grid was rendered from; empty when the catalog was unavailable.
    pub catalog: Vec<Product>,
}

impl Frame {
    /// Wrap the fragments in a standalone HTML page.
    ///
    /// # Errors
    ///
    /// Returns `WidgetError::Render` if the page template fails.
    pub fn to_page(&self) -> Result<String> {
        Ok(render::render_page(&self.products, &self.cart, &self.summary)?)
    }
}

/// Shopping cart widget.
///
/// Cheaply cloneable via `Arc`; clones share one cart.
pub struct CartWidget<C, S> {
    inner: Arc<CartWidgetInner<C, S>>,
}

struct CartWidgetInner<C, S> {
    catalog: C,
    store: Mutex<CartStore<C, S>>,
}

impl<C, S> Clone for CartWidget<C, S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl CartWidget<HttpCatalog, FileStore> {
    /// Build a widget over the HTTP catalog and file store from configuration.
    #[must_use]
    pub fn from_config(config: &WidgetConfig) -> Self {
        let catalog = HttpCatalog::new(config.catalog_url.clone());
        let store = FileStore::new(&config.storage.dir, config.storage.quota_bytes);
        Self::new(
            catalog,
            CartPersistence::new(store, config.storage.cart_key.clone()),
        )
    }
}

impl<C, S> CartWidget<C, S>
where
    C: Catalog + Clone,
    S: KeyValueStore + Clone + 'static,
{
    /// Create a widget, hydrating the cart from persisted state.
    pub fn new(catalog: C, persistence: CartPersistence<S>) -> Self {
        let store = CartStore::hydrate(catalog.clone(), persistence);
        info!(lines = store.cart().len(), "Cart widget initialized");
        Self {
            inner: Arc::new(CartWidgetInner {
                catalog,
                store: Mutex::new(store),
            }),
        }
    }

    /// Snapshot of the current cart.
    pub async fn cart(&self) -> Cart {
        self.inner.store.lock().await.cart().clone()
    }

    /// Fetch the catalog and render every view from the current cart.
    ///
    /// # Errors
    ///
    /// Returns `WidgetError::Render` if a template fails. Catalog failures
    /// render the inline error instead.
    pub async fn refresh(&self) -> Result<Frame> {
        let cart = self.cart().await;
        self.render(&cart).await
    }

    /// Apply a user action and re-render.
    ///
    /// Returns `Ok(None)` when the action left state untouched: an add whose
    /// catalog fetch failed (logged, cart unchanged) or a quantity change for
    /// a product that is not in the cart.
    ///
    /// # Errors
    ///
    /// Returns `WidgetError::Render` if a template fails.
    #[instrument(skip(self))]
    pub async fn dispatch(&self, action: Action) -> Result<Option<Frame>> {
        let snapshot = {
            let mut store = self.inner.store.lock().await;
            let changed = match action {
                Action::Add { product_id } => match store.add(product_id).await {
                    Ok(_) => true,
                    Err(e) if e.is_unavailable() => {
                        error!(product_id = %product_id, error = %e, "Error adding product to cart");
                        false
                    }
                    Err(e) => {
                        warn!(product_id = %product_id, error = %e, "Product not found, cart unchanged");
                        false
                    }
                },
                Action::AdjustQuantity { product_id, delta } => {
                    store.update_quantity(product_id, delta).await != QuantityChange::Missing
                }
                Action::Remove { product_id } => {
                    store.remove(product_id).await;
                    true
                }
            };

            if !changed {
                return Ok(None);
            }
            store.cart().clone()
        };

        self.render(&snapshot).await.map(Some)
    }

    /// Add one unit of `product_id`. See [`Self::dispatch`].
    ///
    /// # Errors
    ///
    /// Returns `WidgetError::Render` if a template fails.
    pub async fn add_to_cart(&self, product_id: ProductId) -> Result<Option<Frame>> {
        self.dispatch(Action::Add { product_id }).await
    }

    /// Change the quantity of `product_id` by `delta`. See [`Self::dispatch`].
    ///
    /// # Errors
    ///
    /// Returns `WidgetError::Render` if a template fails.
    pub async fn update_quantity(&self, product_id: ProductId, delta: i32) -> Result<Option<Frame>> {
        self.dispatch(Action::AdjustQuantity { product_id, delta })
            .await
    }

    /// Remove `product_id` from the cart. See [`Self::dispatch`].
    ///
    /// # Errors
    ///
    /// Returns `WidgetError::Render` if a template fails.
    pub async fn remove_from_cart(&self, product_id: ProductId) -> Result<Option<Frame>> {
        self.dispatch(Action::Remove { product_id }).await
    }

    async fn render(&self, cart: &Cart) -> Result<Frame> {
        let (products, catalog) = match self.inner.catalog.list_products().await {
            Ok(catalog) => (render::render_products(&catalog, cart)?, Some(catalog)),
            Err(e) => {
                error!(error = %e, "Error fetching products");
                (render::render_products_unavailable()?, None)
            }
        };

        let cart_view = render::render_cart(cart)?;

        Ok(Frame {
            products,
            cart: cart_view.items,
            summary: cart_view.summary,
            order: cart_view.order,
            catalog_available: catalog.is_some(),
            catalog: catalog.unwrap_or_default(),
        })
    }
}
