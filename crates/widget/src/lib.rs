//! Fake Store Cart widget library.
//!
//! A shopping cart over a remote, read-only product catalog. The widget owns
//! the cart state, persists it to a local key-value store after every
//! mutation, and re-renders the product grid, cart and order summary as
//! HTML fragments.
//!
//! # Architecture
//!
//! - [`catalog`] - `Catalog` trait and the `reqwest`-backed `HttpCatalog`
//! - [`storage`] - `KeyValueStore` trait with file and in-memory backends
//! - [`persistence`] - Cart (de)serialization on top of a `KeyValueStore`
//! - [`store`] - `CartStore`, the only mutator of cart state
//! - [`render`] - Askama templates and view models
//! - [`widget`] - `CartWidget`, the render controller and action dispatcher
//!
//! # Example
//!
//! ```rust,ignore
//! use fakestore_cart_core::ProductId;
//! use fakestore_cart_widget::{Action, CartWidget, WidgetConfig};
//!
//! let config = WidgetConfig::from_env()?;
//! let widget = CartWidget::from_config(&config);
//!
//! let frame = widget.refresh().await?;
//! let frame = widget
//!     .dispatch(Action::Add { product_id: ProductId::new(3) })
//!     .await?;
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod action;
pub mod catalog;
pub mod config;
pub mod error;
pub mod persistence;
pub mod render;
pub mod storage;
pub mod store;
pub mod widget;

pub use action::Action;
pub use catalog::{Catalog, CatalogError, HttpCatalog};
pub use config::{ConfigError, WidgetConfig};
pub use error::WidgetError;
pub use persistence::CartPersistence;
pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageError};
pub use store::CartStore;
pub use widget::{CartWidget, Frame};
