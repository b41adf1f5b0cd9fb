//! Cart commands.
//!
//! Mutations go through `CartWidget::dispatch` so the terminal behaves like
//! any other view layer: it emits an action and displays the re-rendered
//! state.

use std::fmt::Write as _;

use fakestore_cart_core::{Cart, OrderSummary, Product, ProductId};
use fakestore_cart_widget::render::LOAD_FAILED_MESSAGE;
use fakestore_cart_widget::{Action, CartPersistence, CartWidget, FileStore, Frame, WidgetConfig};

use super::{CommandError, emit};

/// Print the cart and its summary.
pub async fn show(config: &WidgetConfig) -> Result<(), CommandError> {
    let widget = CartWidget::from_config(config);
    let cart = widget.cart().await;
    emit(&format_cart(&cart, &OrderSummary::of(&cart)));
    Ok(())
}

/// Print the catalog, marking products already in the cart.
///
/// A catalog outage prints the inline load error rather than failing.
pub async fn products(config: &WidgetConfig) -> Result<(), CommandError> {
    let widget = CartWidget::from_config(config);
    let frame = widget.refresh().await?;
    emit(&format_catalog(&frame, &widget.cart().await));
    Ok(())
}

pub async fn add(config: &WidgetConfig, product_id: ProductId) -> Result<(), CommandError> {
    apply(config, Action::Add { product_id }).await
}

pub async fn adjust(
    config: &WidgetConfig,
    product_id: ProductId,
    delta: i32,
) -> Result<(), CommandError> {
    apply(config, Action::AdjustQuantity { product_id, delta }).await
}

pub async fn remove(config: &WidgetConfig, product_id: ProductId) -> Result<(), CommandError> {
    apply(config, Action::Remove { product_id }).await
}

/// Delete the stored cart so the next run starts empty.
pub fn clear(config: &WidgetConfig) -> Result<(), CommandError> {
    let store = FileStore::new(&config.storage.dir, config.storage.quota_bytes);
    CartPersistence::new(store, config.storage.cart_key.clone()).clear()?;
    tracing::info!(dir = %config.storage.dir.display(), "Stored cart cleared");
    Ok(())
}

async fn apply(config: &WidgetConfig, action: Action) -> Result<(), CommandError> {
    let widget = CartWidget::from_config(config);

    match widget.dispatch(action).await? {
        Some(frame) => {
            if !frame.catalog_available {
                tracing::warn!("Catalog unavailable, product list not refreshed");
            }
            let cart = widget.cart().await;
            emit(&format_cart(&cart, &frame.order));
        }
        None => tracing::warn!(product_id = %action.product_id(), "Cart unchanged"),
    }
    Ok(())
}

// =============================================================================
// Text Formatting
// =============================================================================

fn format_cart(cart: &Cart, order: &OrderSummary) -> String {
    let mut out = String::new();

    if cart.is_empty() {
        out.push_str("Your cart is empty\n");
    } else {
        for line in cart.lines() {
            let _ = writeln!(
                out,
                "[{}] {}  {} x {} = {}",
                line.id,
                line.title,
                line.price,
                line.quantity,
                line.line_total()
            );
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Items:    {}", order.item_count);
    let _ = writeln!(out, "Products: {}", order.subtotal);
    let _ = writeln!(out, "Shipping: {}", order.shipping);
    let _ = writeln!(out, "Total:    {}", order.total);
    out
}

fn format_catalog(frame: &Frame, cart: &Cart) -> String {
    if frame.catalog_available {
        format_products(&frame.catalog, cart)
    } else {
        format!("{LOAD_FAILED_MESSAGE}\n")
    }
}

fn format_products(products: &[Product], cart: &Cart) -> String {
    let mut out = String::new();
    for product in products {
        let badge = if product.is_top_rated() { " *Top Rated*" } else { "" };
        let membership = cart
            .quantity_of(product.id)
            .map_or_else(String::new, |quantity| format!("  (in cart: {quantity})"));
        let _ = writeln!(
            out,
            "[{}] {}  {}{}{}",
            product.id, product.title, product.price, badge, membership
        );
    }
    out
}
