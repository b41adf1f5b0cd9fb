//! Core types for the cart widget.
//!
//! This module provides type-safe wrappers for the domain concepts.

pub mod cart;
pub mod id;
pub mod price;
pub mod product;
pub mod summary;

pub use cart::{Cart, CartLine, QuantityChange};
pub use id::*;
pub use price::{Price, PriceError};
pub use product::{Product, Rating};
pub use summary::OrderSummary;
