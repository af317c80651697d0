//! Integration tests for cart persistence across store sessions.
//!
//! Each test opens a store over a scratch directory, mutates it, drops it,
//! and opens a new session to check what was restored.

use gomarketplace_cart::{
    CartError, CartStore, DEFAULT_STORAGE_KEY, FileStorage, KeyValueStorage,
};
use gomarketplace_core::CartItem;
use gomarketplace_integration_tests::{TestCart, product, product_id};
use rust_decimal::Decimal;

// ============================================================================
// Session Round Trips
// ============================================================================

#[tokio::test]
async fn test_empty_directory_loads_empty_cart() {
    let cart = TestCart::new();
    let store = cart.open().await;
    assert!(store.products().is_empty());
}

#[tokio::test]
async fn test_cart_restored_by_next_session() {
    let cart = TestCart::new();

    {
        let store = cart.open().await;
        store.add_to_cart(product("a", 10)).unwrap();
        store.add_to_cart(product("b", 5)).unwrap();
        store.add_to_cart(product("a", 10)).unwrap();
        store.flush().await.unwrap();
    }

    let store = cart.open().await;
    let restored: Vec<(String, u32)> = store
        .products()
        .into_iter()
        .map(|line| (line.id.into_inner(), line.quantity))
        .collect();
    assert_eq!(restored, vec![("a".to_string(), 2), ("b".to_string(), 1)]);

    let summary = store.summary();
    assert_eq!(summary.total_price, Decimal::from(25));
    assert_eq!(summary.item_count, 3);
}

#[tokio::test]
async fn test_decrement_and_remove_survive_restart() {
    let cart = TestCart::new();

    {
        let store = cart.open().await;
        store.add_to_cart(product("a", 3)).unwrap();
        store.increment(&product_id("a")).unwrap();
        store.add_to_cart(product("b", 7)).unwrap();
        store.decrement(&product_id("a")).unwrap();
        store.decrement(&product_id("a")).unwrap();
        store.remove(&product_id("b")).unwrap().await.unwrap();
    }

    let store = cart.open().await;
    let products = store.products();
    assert_eq!(products.len(), 1);
    assert_eq!(products.first().map(|l| l.quantity), Some(1));
}

#[tokio::test]
async fn test_snapshot_from_earlier_app_version_loads() {
    let cart = TestCart::new();
    let legacy = r#"[{"id":"1","title":"Camiseta","image_url":"https://cdn.example.com/1.png","price":49.9,"quantity":2}]"#;
    cart.storage
        .set_item(DEFAULT_STORAGE_KEY, legacy)
        .await
        .unwrap();

    let store = cart.open().await;
    let line = store.item(&product_id("1")).unwrap();
    assert_eq!(line.title, "Camiseta");
    assert_eq!(line.price, Decimal::new(499, 1));
    assert_eq!(store.summary().total_price, Decimal::new(998, 1));
}

#[tokio::test]
async fn test_persisted_snapshot_matches_memory() {
    let cart = TestCart::new();
    let store = cart.open().await;

    store.add_to_cart(product("x", 2)).unwrap();
    store.add_to_cart(product("y", 4)).unwrap();
    store.increment(&product_id("y")).unwrap();
    store.flush().await.unwrap();

    let raw = cart
        .storage
        .get_item(DEFAULT_STORAGE_KEY)
        .await
        .unwrap()
        .unwrap();
    let persisted: Vec<CartItem> = serde_json::from_str(&raw).unwrap();
    assert_eq!(persisted, store.products());
}

#[tokio::test]
async fn test_corrupt_snapshot_is_reported() {
    let cart = TestCart::new();
    cart.storage
        .set_item(DEFAULT_STORAGE_KEY, "[{\"id\":")
        .await
        .unwrap();

    let err = CartStore::load(cart.storage.clone(), DEFAULT_STORAGE_KEY)
        .await
        .unwrap_err();
    assert!(matches!(err, CartError::Snapshot(_)));
}

#[tokio::test]
async fn test_separate_keys_are_separate_carts() {
    let cart = TestCart::new();
    let storage = FileStorage::new(cart.dir.path());

    let first = CartStore::load(storage.clone(), "@First").await.unwrap();
    first.add_to_cart(product("a", 1)).unwrap().await.unwrap();

    let second = CartStore::load(storage, "@Second").await.unwrap();
    assert!(second.products().is_empty());
}
