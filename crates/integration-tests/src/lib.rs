//! Integration test support for the cart widget.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p fakestore-cart-integration-tests
//! ```
//!
//! [`CatalogServer`] serves a Fake Store compatible catalog from memory on an
//! ephemeral localhost port, so the real `HttpCatalog` and `CartWidget` can be
//! exercised end to end without network access.

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use fakestore_cart_core::{Price, Product, ProductId, Rating};
use tokio::task::JoinHandle;
use url::Url;

/// How the fake catalog answers requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Behavior {
    /// Serve products; unknown ids get `200` with an empty body, like the public fake store.
    Healthy,
    /// Serve products; unknown ids get `404`.
    StrictNotFound,
    /// Answer every request with this status.
    Failing(StatusCode),
    /// Answer every request with `200` and a body that is not JSON.
    Garbage,
}

struct ServerState {
    products: Mutex<Vec<Product>>,
    behavior: Mutex<Behavior>,
    list_hits: AtomicUsize,
    product_hits: AtomicUsize,
}

/// In-memory catalog served over HTTP.
pub struct CatalogServer {
    base_url: Url,
    state: Arc<ServerState>,
    task: JoinHandle<()>,
}

impl CatalogServer {
    /// Start serving `products` on `127.0.0.1` with an ephemeral port.
    pub async fn start(products: Vec<Product>) -> Self {
        let state = Arc::new(ServerState {
            products: Mutex::new(products),
            behavior: Mutex::new(Behavior::Healthy),
            list_hits: AtomicUsize::new(0),
            product_hits: AtomicUsize::new(0),
        });

        let app = Router::new()
            .route("/products", get(list_products))
            .route("/products/{id}", get(get_product))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let task = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: Url::parse(&format!("http://{addr}/")).unwrap(),
            state,
            task,
        }
    }

    #[must_use]
    pub fn base_url(&self) -> Url {
        self.base_url.clone()
    }

    pub fn set_behavior(&self, behavior: Behavior) {
        *self
            .state
            .behavior
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = behavior;
    }

    pub fn set_price(&self, id: i32, cents: u32) {
        let mut products = self
            .state
            .products
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(product) = products.iter_mut().find(|p| p.id == ProductId::new(id)) {
            product.price = Price::from_cents(cents);
        }
    }

    #[must_use]
    pub fn list_hits(&self) -> usize {
        self.state.list_hits.load(Ordering::SeqCst)
    }

    #[must_use]
    pub fn product_hits(&self) -> usize {
        self.state.product_hits.load(Ordering::SeqCst)
    }
}

impl Drop for CatalogServer {
    fn drop(&mut self) {
        self.task.abort();
    }
}

fn behavior(state: &ServerState) -> Behavior {
    *state
        .behavior
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
}

async fn list_products(State(state): State<Arc<ServerState>>) -> Response {
    state.list_hits.fetch_add(1, Ordering::SeqCst);
    match behavior(&state) {
        Behavior::Failing(status) => status.into_response(),
        Behavior::Garbage => (StatusCode::OK, "<html>oops</html>").into_response(),
        Behavior::Healthy | Behavior::StrictNotFound => {
            let products = state
                .products
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .clone();
            Json(products).into_response()
        }
    }
}

async fn get_product(State(state): State<Arc<ServerState>>, Path(id): Path<i32>) -> Response {
    state.product_hits.fetch_add(1, Ordering::SeqCst);
    let mode = behavior(&state);
    match mode {
        Behavior::Failing(status) => return status.into_response(),
        Behavior::Garbage => return (StatusCode::OK, "{\"id\":").into_response(),
        Behavior::Healthy | Behavior::StrictNotFound => {}
    }

    let found = state
        .products
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .iter()
        .find(|p| p.id == ProductId::new(id))
        .cloned();

    match (found, mode) {
        (Some(product), _) => Json(product).into_response(),
        (None, Behavior::StrictNotFound) => StatusCode::NOT_FOUND.into_response(),
        (None, _) => (StatusCode::OK, "").into_response(),
    }
}

/// A catalog record shaped like the public fake store's.
#[must_use]
pub fn product(id: i32, cents: u32, title: &str) -> Product {
    Product {
        id: ProductId::new(id),
        title: title.to_string(),
        price: Price::from_cents(cents),
        image: format!("https://fakestoreapi.com/img/{id}.jpg"),
        description: format!("{title} description"),
        category: Some("electronics".to_string()),
        rating: Some(Rating {
            rate: 3.9,
            count: 120,
        }),
    }
}

/// Three products priced $10.00, $5.00 and $109.95.
#[must_use]
pub fn sample_products() -> Vec<Product> {
    vec![
        product(1, 1000, "Backpack"),
        product(2, 500, "Mug"),
        product(3, 10995, "Jacket"),
    ]
}
