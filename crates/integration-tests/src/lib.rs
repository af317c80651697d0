//! Integration tests for GoMarketplace.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p gomarketplace-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_persistence` - Carts surviving across store sessions on disk
//! - `write_ordering` - Snapshot ordering under bursts of mutations
//!
//! This library only holds shared fixtures.

#![cfg_attr(not(test), forbid(unsafe_code))]

use gomarketplace_cart::{CartStore, DEFAULT_STORAGE_KEY, FileStorage};
use gomarketplace_core::{NewCartItem, ProductId};
use rust_decimal::Decimal;
use tempfile::TempDir;

/// A cart backed by a scratch directory that is deleted on drop.
pub struct TestCart {
    pub dir: TempDir,
    pub storage: FileStorage,
}

impl TestCart {
    /// Create a fresh, empty scratch directory.
    ///
    /// # Panics
    ///
    /// Panics if the temporary directory cannot be created.
    #[must_use]
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let storage = FileStorage::new(dir.path());
        Self { dir, storage }
    }

    /// Open a store session over this directory.
    ///
    /// # Panics
    ///
    /// Panics if the persisted cart cannot be loaded.
    pub async fn open(&self) -> CartStore {
        CartStore::load(self.storage.clone(), DEFAULT_STORAGE_KEY)
            .await
            .expect("Failed to load cart")
    }
}

impl Default for TestCart {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a product ID, panicking on invalid input.
///
/// # Panics
///
/// Panics if `id` is not a valid product ID.
#[must_use]
pub fn product_id(id: &str) -> ProductId {
    ProductId::parse(id).expect("Invalid product id")
}

/// A product priced in whole currency units.
#[must_use]
pub fn product(id: &str, price: i64) -> NewCartItem {
    NewCartItem::new(
        product_id(id),
        format!("Product {id}"),
        format!("https://cdn.example.com/products/{id}.png"),
        Decimal::from(price),
    )
}
