//! Cart lines and the ordered cart they live in.

use serde::{Deserialize, Serialize};

use super::id::ProductId;
use super::price::Price;
use super::product::Product;

/// One product's entry in the cart.
///
/// `title`, `price` and `image` are snapshots taken when the product was
/// first added; they are never re-synced with the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub id: ProductId,
    pub title: String,
    pub price: Price,
    pub image: String,
    /// Always at least 1 while the line exists.
    pub quantity: u32,
}

impl CartLine {
    /// A new line for `product` with quantity 1.
    #[must_use]
    pub fn snapshot(product: &Product) -> Self {
        Self {
            id: product.id,
            title: product.title.clone(),
            price: product.price,
            image: product.image.clone(),
            quantity: 1,
        }
    }

    /// Unit price multiplied by quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.price.times(self.quantity)
    }
}

/// Result of adjusting a line's quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityChange {
    /// The line now holds this quantity.
    Updated(u32),
    /// The quantity dropped to zero or below and the line was removed.
    Removed,
    /// No line with that product id exists.
    Missing,
}

/// Ordered sequence of cart lines with unique product ids.
///
/// Serialized as a plain JSON array of lines. Deserialization normalizes
/// hand-edited or legacy data: duplicate ids are merged into the first
/// occurrence and zero-quantity lines are dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<CartLine>", into = "Vec<CartLine>")]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// An empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Build a cart from lines, merging duplicates and dropping empty lines.
    #[must_use]
    pub fn from_lines(lines: impl IntoIterator<Item = CartLine>) -> Self {
        let mut cart = Self::new();
        for line in lines {
            if line.quantity == 0 {
                continue;
            }
            match cart.line_mut(line.id) {
                Some(existing) => {
                    existing.quantity = existing.quantity.saturating_add(line.quantity);
                }
                None => cart.lines.push(line),
            }
        }
        cart
    }

    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// The line for `id`, if the product is in the cart.
    #[must_use]
    pub fn line(&self, id: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.id == id)
    }

    /// Quantity of `id` in the cart, if present.
    #[must_use]
    pub fn quantity_of(&self, id: ProductId) -> Option<u32> {
        self.line(id).map(|line| line.quantity)
    }

    #[must_use]
    pub fn contains(&self, id: ProductId) -> bool {
        self.line(id).is_some()
    }

    /// Add one unit of `product`.
    ///
    /// An existing line is incremented and keeps its original snapshot;
    /// otherwise a new line is appended. Returns the resulting quantity.
    pub fn add_product(&mut self, product: &Product) -> u32 {
        if let Some(line) = self.line_mut(product.id) {
            line.quantity = line.quantity.saturating_add(1);
            return line.quantity;
        }
        self.lines.push(CartLine::snapshot(product));
        1
    }

    /// Add `delta` to the quantity of `id`, removing the line at zero or below.
    pub fn adjust_quantity(&mut self, id: ProductId, delta: i32) -> QuantityChange {
        let Some(index) = self.lines.iter().position(|line| line.id == id) else {
            return QuantityChange::Missing;
        };
        let Some(line) = self.lines.get_mut(index) else {
            return QuantityChange::Missing;
        };

        let next = i64::from(line.quantity) + i64::from(delta);
        if next <= 0 {
            self.lines.remove(index);
            return QuantityChange::Removed;
        }

        line.quantity = u32::try_from(next).unwrap_or(u32::MAX);
        QuantityChange::Updated(line.quantity)
    }

    /// Remove the line for `id`. Returns the removed line, if any.
    pub fn remove(&mut self, id: ProductId) -> Option<CartLine> {
        let index = self.lines.iter().position(|line| line.id == id)?;
        Some(self.lines.remove(index))
    }

    fn line_mut(&mut self, id: ProductId) -> Option<&mut CartLine> {
        self.lines.iter_mut().find(|line| line.id == id)
    }
}

impl From<Vec<CartLine>> for Cart {
    fn from(lines: Vec<CartLine>) -> Self {
        Self::from_lines(lines)
    }
}

impl From<Cart> for Vec<CartLine> {
    fn from(cart: Cart) -> Self {
        cart.lines
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn product(id: i32, cents: u32) -> Product {
        Product {
            id: ProductId::new(id),
            title: format!("Product {id}"),
            price: Price::from_cents(cents),
            image: format!("https://img.example/{id}.jpg"),
            description: String::new(),
            category: None,
            rating: None,
        }
    }

    #[test]
    fn test_add_twice_merges_into_one_line() {
        let mut cart = Cart::new();
        let p = product(1, 1000);

        assert_eq!(cart.add_product(&p), 1);
        assert_eq!(cart.add_product(&p), 2);

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.quantity_of(ProductId::new(1)), Some(2));
    }

    #[test]
    fn test_add_keeps_original_price_snapshot() {
        let mut cart = Cart::new();
        cart.add_product(&product(1, 1000));
        cart.add_product(&product(1, 1500));

        let line = cart.line(ProductId::new(1)).unwrap();
        assert_eq!(line.price, Price::from_cents(1000));
    }

    #[test]
    fn test_add_preserves_insertion_order() {
        let mut cart = Cart::new();
        cart.add_product(&product(3, 100));
        cart.add_product(&product(1, 100));
        cart.add_product(&product(3, 100));

        let ids: Vec<i32> = cart.lines().iter().map(|l| l.id.as_i32()).collect();
        assert_eq!(ids, vec![3, 1]);
    }

    #[test]
    fn test_adjust_removes_at_zero_or_below() {
        let mut cart = Cart::new();
        let p = product(1, 1000);
        for _ in 0..3 {
            cart.add_product(&p);
        }

        assert_eq!(
            cart.adjust_quantity(ProductId::new(1), -5),
            QuantityChange::Removed
        );
        assert!(cart.is_empty());
    }

    #[test]
    fn test_adjust_missing_is_noop() {
        let mut cart = Cart::new();
        cart.add_product(&product(1, 1000));
        let before = cart.clone();

        assert_eq!(
            cart.adjust_quantity(ProductId::new(9), 1),
            QuantityChange::Missing
        );
        assert_eq!(cart, before);
    }

    #[test]
    fn test_adjust_up_and_down() {
        let mut cart = Cart::new();
        cart.add_product(&product(1, 1000));

        assert_eq!(
            cart.adjust_quantity(ProductId::new(1), 4),
            QuantityChange::Updated(5)
        );
        assert_eq!(
            cart.adjust_quantity(ProductId::new(1), -1),
            QuantityChange::Updated(4)
        );
    }

    #[test]
    fn test_remove_absent_leaves_cart_unchanged() {
        let mut cart = Cart::new();
        cart.add_product(&product(1, 1000));
        let before = cart.clone();

        assert!(cart.remove(ProductId::new(2)).is_none());
        assert_eq!(cart, before);
    }

    #[test]
    fn test_serializes_as_array_and_round_trips() {
        let mut cart = Cart::new();
        cart.add_product(&product(2, 550));
        cart.add_product(&product(1, 1000));
        cart.adjust_quantity(ProductId::new(1), 2);

        let json = serde_json::to_string(&cart).unwrap();
        assert!(json.starts_with('['));

        let reloaded: Cart = serde_json::from_str(&json).unwrap();
        assert_eq!(reloaded, cart);
        assert_eq!(reloaded.lines(), cart.lines());
    }

    #[test]
    fn test_deserialize_accepts_numeric_prices() {
        let json = r#"[{"id":1,"title":"Backpack","price":109.95,"image":"a.jpg","quantity":2}]"#;
        let cart: Cart = serde_json::from_str(json).unwrap();
        assert_eq!(cart.lines()[0].price, Price::from_cents(10995));
    }

    #[test]
    fn test_deserialize_normalizes_duplicates_and_zero_quantities() {
        let json = r#"[
            {"id":1,"title":"A","price":"1","image":"a","quantity":1},
            {"id":2,"title":"B","price":"2","image":"b","quantity":0},
            {"id":1,"title":"A","price":"1","image":"a","quantity":2}
        ]"#;
        let cart: Cart = serde_json::from_str(json).unwrap();

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.quantity_of(ProductId::new(1)), Some(3));
    }
}
