//! Fake Store Cart Core - Shared types library.
//!
//! This crate provides the domain types used across the cart components:
//! - `widget` - Catalog client, cart store, persistence and rendering
//! - `cli` - Terminal presentation layer driving the widget
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no
//! storage access, no HTTP clients. This keeps it lightweight and allows it
//! to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs and prices, catalog products, cart lines,
//!   and the derived order summary

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
