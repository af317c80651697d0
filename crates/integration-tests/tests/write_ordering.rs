//! Integration tests for snapshot write ordering.
//!
//! Mutations return before their snapshot is stored. These tests check that
//! bursts of mutations, from one handle or several, always leave storage
//! holding the final in-memory state.

use gomarketplace_cart::{CartStore, DEFAULT_STORAGE_KEY, KeyValueStorage, MemoryStorage};
use gomarketplace_core::CartItem;
use gomarketplace_integration_tests::{TestCart, product, product_id};

async fn stored(storage: &impl KeyValueStorage) -> Vec<CartItem> {
    let raw = storage
        .get_item(DEFAULT_STORAGE_KEY)
        .await
        .unwrap()
        .unwrap();
    serde_json::from_str(&raw).unwrap()
}

#[tokio::test]
async fn test_burst_from_one_handle() {
    let cart = TestCart::new();
    let store = cart.open().await;

    for i in 0..50 {
        store.add_to_cart(product(&format!("p{}", i % 5), 1)).unwrap();
    }
    store.flush().await.unwrap();

    assert_eq!(stored(&cart.storage).await, store.products());
    assert_eq!(store.summary().item_count, 50);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_burst_from_many_tasks() {
    let storage = MemoryStorage::new();
    let store = CartStore::load(storage.clone(), DEFAULT_STORAGE_KEY)
        .await
        .unwrap();
    store.add_to_cart(product("shared", 1)).unwrap();

    let tasks: Vec<_> = (0..8)
        .map(|_| {
            let store = store.clone();
            tokio::spawn(async move {
                for _ in 0..25 {
                    store.increment(&product_id("shared")).unwrap();
                }
            })
        })
        .collect();
    for task in tasks {
        task.await.unwrap();
    }
    store.flush().await.unwrap();

    assert_eq!(store.item(&product_id("shared")).unwrap().quantity, 201);
    assert_eq!(stored(&storage).await, store.products());
}

#[tokio::test]
async fn test_every_pending_write_resolves() {
    let storage = MemoryStorage::new();
    let store = CartStore::load(storage.clone(), DEFAULT_STORAGE_KEY)
        .await
        .unwrap();

    let pending: Vec<_> = (0..10)
        .map(|i| store.add_to_cart(product(&format!("p{i}"), i)).unwrap())
        .collect();
    for write in pending {
        write.await.unwrap();
    }

    assert_eq!(stored(&storage).await.len(), 10);
}
