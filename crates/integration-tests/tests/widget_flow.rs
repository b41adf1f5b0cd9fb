//! The cart widget end to end: HTTP catalog plus file-backed storage.

#![allow(clippy::unwrap_used)]

use std::time::Duration;

use axum::http::StatusCode;
use fakestore_cart_core::{Price, ProductId};
use fakestore_cart_integration_tests::{Behavior, CatalogServer, sample_products};
use fakestore_cart_widget::config::StorageConfig;
use fakestore_cart_widget::{
    Action, CartPersistence, CartWidget, FileStore, HttpCatalog, KeyValueStore, WidgetConfig,
};

fn config(server: &CatalogServer, dir: &std::path::Path) -> WidgetConfig {
    WidgetConfig {
        catalog_url: server.base_url(),
        storage: StorageConfig {
            dir: dir.to_path_buf(),
            ..StorageConfig::default()
        },
    }
}

#[tokio::test]
async fn test_shopping_session_reaches_bulk_shipping() {
    let server = CatalogServer::start(sample_products()).await;
    let dir = tempfile::tempdir().unwrap();
    let widget = CartWidget::from_config(&config(&server, dir.path()));

    let first = widget.refresh().await.unwrap();
    assert!(first.catalog_available);
    assert_eq!(first.products.matches("Add to Cart").count(), 3);

    for _ in 0..3 {
        widget.add_to_cart(ProductId::new(1)).await.unwrap();
    }
    widget.add_to_cart(ProductId::new(2)).await.unwrap();
    let frame = widget
        .update_quantity(ProductId::new(2), 1)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(frame.order.item_count, 5);
    assert_eq!(frame.order.subtotal, Price::from_units(40));
    assert_eq!(frame.order.shipping, Price::from_units(10));
    assert_eq!(frame.order.total, Price::from_units(50));
    assert!(frame.summary.contains(r#"<span id="order-total">$50.00</span>"#));
    // Initial render plus five mutations.
    assert_eq!(server.list_hits(), 6);
    assert_eq!(server.product_hits(), 4);
}

#[tokio::test]
async fn test_cart_survives_restart_from_disk() {
    let server = CatalogServer::start(sample_products()).await;
    let dir = tempfile::tempdir().unwrap();
    let config = config(&server, dir.path());

    {
        let widget = CartWidget::from_config(&config);
        widget.add_to_cart(ProductId::new(3)).await.unwrap();
        widget.add_to_cart(ProductId::new(1)).await.unwrap();
        widget.update_quantity(ProductId::new(1), 2).await.unwrap();
    }
    assert!(dir.path().join("cart.json").exists());

    let reloaded = CartWidget::from_config(&config);
    let cart = reloaded.cart().await;
    let ids: Vec<i32> = cart.lines().iter().map(|l| l.id.as_i32()).collect();

    assert_eq!(ids, vec![3, 1]);
    assert_eq!(cart.quantity_of(ProductId::new(1)), Some(3));
}

#[tokio::test]
async fn test_price_snapshot_outlives_catalog_change() {
    let server = CatalogServer::start(sample_products()).await;
    let dir = tempfile::tempdir().unwrap();
    let widget = CartWidget::from_config(&config(&server, dir.path()));

    widget.add_to_cart(ProductId::new(1)).await.unwrap();
    server.set_price(1, 9900);
    let frame = widget.add_to_cart(ProductId::new(1)).await.unwrap().unwrap();

    assert_eq!(frame.order.subtotal, Price::from_units(20));
    assert!(frame.cart.contains("$10.00 &times; 2"));
    // The product grid shows the live price.
    assert!(frame.products.contains("$99.00"));
}

#[tokio::test]
async fn test_catalog_outage_keeps_cart_visible() {
    let server = CatalogServer::start(sample_products()).await;
    let dir = tempfile::tempdir().unwrap();
    let widget = CartWidget::from_config(&config(&server, dir.path()));
    widget.add_to_cart(ProductId::new(2)).await.unwrap();

    server.set_behavior(Behavior::Failing(StatusCode::SERVICE_UNAVAILABLE));

    let failed_add = widget.add_to_cart(ProductId::new(1)).await.unwrap();
    assert!(failed_add.is_none());

    let frame = widget.remove_from_cart(ProductId::new(9)).await.unwrap().unwrap();
    assert!(!frame.catalog_available);
    assert!(
        frame
            .products
            .contains("Failed to load products. Please try again later.")
    );
    assert!(frame.cart.contains("Mug"));
    assert_eq!(frame.order.item_count, 1);
}

#[tokio::test]
async fn test_unknown_product_leaves_stored_cart_alone() {
    let server = CatalogServer::start(sample_products()).await;
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path(), 1024 * 1024);
    let widget = CartWidget::new(
        HttpCatalog::new(server.base_url()),
        CartPersistence::new(store.clone(), "cart"),
    );

    let frame = widget
        .dispatch(Action::Add {
            product_id: ProductId::new(77),
        })
        .await
        .unwrap();

    assert!(frame.is_none());
    assert_eq!(store.get("cart").unwrap(), None);
    assert_eq!(server.list_hits(), 0);
}

#[tokio::test]
async fn test_concurrent_adds_over_http_accumulate() {
    let server = CatalogServer::start(sample_products()).await;
    let dir = tempfile::tempdir().unwrap();
    let widget = CartWidget::from_config(&config(&server, dir.path()));

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let widget = widget.clone();
            tokio::spawn(async move { widget.add_to_cart(ProductId::new(3)).await })
        })
        .collect();
    for handle in handles {
        tokio::time::timeout(Duration::from_secs(10), handle)
            .await
            .unwrap()
            .unwrap()
            .unwrap();
    }

    let cart = widget.cart().await;
    assert_eq!(cart.len(), 1);
    assert_eq!(cart.quantity_of(ProductId::new(3)), Some(4));

    let reloaded = CartWidget::from_config(&config(&server, dir.path()));
    assert_eq!(reloaded.cart().await.quantity_of(ProductId::new(3)), Some(4));
}

#[tokio::test]
async fn test_corrupt_file_starts_empty_and_is_overwritten() {
    let server = CatalogServer::start(sample_products()).await;
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("cart.json"), "{ definitely not a cart").unwrap();

    let widget = CartWidget::from_config(&config(&server, dir.path()));
    assert!(widget.cart().await.is_empty());

    widget.add_to_cart(ProductId::new(2)).await.unwrap();
    let raw = std::fs::read_to_string(dir.path().join("cart.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value[0]["id"], 2);
    assert_eq!(value[0]["quantity"], 1);
}
