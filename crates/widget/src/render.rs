//! HTML rendering for the product grid, cart and order summary.
//!
//! View models hold display-ready strings; templates live in
//! `crates/widget/templates/`. Rendering is a pure projection of its
//! inputs and never touches cart state.

use askama::Template;
use fakestore_cart_core::{Cart, CartLine, OrderSummary, Product, ProductId};

/// Document title used by [`render_page`].
pub const PAGE_TITLE: &str = "Shopping Cart";

/// Shown in place of the product grid when the catalog cannot be fetched.
pub const LOAD_FAILED_MESSAGE: &str = "Failed to load products. Please try again later.";

// =============================================================================
// View Models
// =============================================================================

/// A product card, annotated with cart membership.
#[derive(Debug, Clone)]
pub struct ProductCardView {
    pub id: ProductId,
    pub title: String,
    pub description: String,
    pub image: String,
    pub price: String,
    pub top_rated: bool,
    /// Quantity in the cart, or `None` if the product is not in the cart.
    pub quantity: Option<u32>,
}

impl ProductCardView {
    #[must_use]
    pub fn new(product: &Product, cart: &Cart) -> Self {
        Self {
            id: product.id,
            title: product.title.clone(),
            description: product.description.clone(),
            image: product.image.clone(),
            price: product.price.to_string(),
            top_rated: product.is_top_rated(),
            quantity: cart.quantity_of(product.id),
        }
    }
}

/// One cart line.
#[derive(Debug, Clone)]
pub struct CartLineView {
    pub id: ProductId,
    pub title: String,
    pub unit_price: String,
    pub quantity: u32,
    pub line_total: String,
}

impl From<&CartLine> for CartLineView {
    fn from(line: &CartLine) -> Self {
        Self {
            id: line.id,
            title: line.title.clone(),
            unit_price: line.price.to_string(),
            quantity: line.quantity,
            line_total: line.line_total().to_string(),
        }
    }
}

// =============================================================================
// Templates
// =============================================================================

/// Product grid, or the inline error shown when the catalog is unavailable.
#[derive(Template)]
#[template(path = "products.html")]
pub struct ProductsTemplate {
    pub products: Vec<ProductCardView>,
    pub load_failed: bool,
}

/// Cart lines or the empty-cart message.
#[derive(Template)]
#[template(path = "cart.html")]
pub struct CartTemplate {
    pub lines: Vec<CartLineView>,
}

/// Order summary fields.
#[derive(Template)]
#[template(path = "summary.html")]
pub struct SummaryTemplate {
    pub item_count: u32,
    pub subtotal: String,
    pub shipping: String,
    pub total: String,
}

impl From<&OrderSummary> for SummaryTemplate {
    fn from(summary: &OrderSummary) -> Self {
        Self {
            item_count: summary.item_count,
            subtotal: summary.subtotal.to_string(),
            shipping: summary.shipping.to_string(),
            total: summary.total.to_string(),
        }
    }
}

/// Full standalone page wrapping the three fragments.
#[derive(Template)]
#[template(path = "page.html")]
pub struct PageTemplate<'a> {
    pub title: &'a str,
    pub products: &'a str,
    pub cart: &'a str,
    pub summary: &'a str,
}

// =============================================================================
// Render Functions
// =============================================================================

/// Rendered cart view plus the summary it concluded with.
#[derive(Debug, Clone)]
pub struct CartRender {
    pub items: String,
    pub summary: String,
    pub order: OrderSummary,
}

/// Render the product grid with add or stepper/remove controls per product.
///
/// # Errors
///
/// Returns `askama::Error` if the template fails to render.
pub fn render_products(products: &[Product], cart: &Cart) -> askama::Result<String> {
    ProductsTemplate {
        products: products
            .iter()
            .map(|product| ProductCardView::new(product, cart))
            .collect(),
        load_failed: false,
    }
    .render()
}

/// Render the inline error that replaces the product grid.
///
/// # Errors
///
/// Returns `askama::Error` if the template fails to render.
pub fn render_products_unavailable() -> askama::Result<String> {
    ProductsTemplate {
        products: Vec::new(),
        load_failed: true,
    }
    .render()
}

/// Render the cart lines, then compute and render the order summary.
///
/// # Errors
///
/// Returns `askama::Error` if a template fails to render.
pub fn render_cart(cart: &Cart) -> askama::Result<CartRender> {
    let items = CartTemplate {
        lines: cart.lines().iter().map(CartLineView::from).collect(),
    }
    .render()?;

    let order = OrderSummary::of(cart);
    let summary = SummaryTemplate::from(&order).render()?;

    Ok(CartRender {
        items,
        summary,
        order,
    })
}

/// Wrap rendered fragments in a complete HTML document.
///
/// # Errors
///
/// Returns `askama::Error` if the template fails to render.
pub fn render_page(products: &str, cart: &str, summary: &str) -> askama::Result<String> {
    PageTemplate {
        title: PAGE_TITLE,
        products,
        cart,
        summary,
    }
    .render()
}
