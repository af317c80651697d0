//! GoMarketplace Cart - Persistent shopping-cart store.
//!
//! This crate owns the shopping cart for a storefront session: the ordered
//! list of line items, its on-device snapshot, and the floating summary
//! widget that projects totals from it.
//!
//! # Architecture
//!
//! - [`CartStore`] is a cloneable handle passed explicitly to every view
//!   that needs the cart. State changes are immediate and observable through
//!   [`CartStore::subscribe`].
//! - Every mutation enqueues a full JSON snapshot on a single background
//!   writer, so snapshots reach storage in mutation order. The returned
//!   [`PendingWrite`] resolves when the snapshot is stored.
//! - Storage is abstracted behind [`KeyValueStorage`], with in-memory and
//!   file-backed implementations.
//!
//! # Example
//!
//! ```rust,no_run
//! use gomarketplace_cart::{CartStore, MemoryStorage, DEFAULT_STORAGE_KEY};
//! use gomarketplace_core::{NewCartItem, ProductId};
//! use rust_decimal::Decimal;
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let store = CartStore::load(MemoryStorage::new(), DEFAULT_STORAGE_KEY).await?;
//!
//! let id = ProductId::parse("sku-1")?;
//! store
//!     .add_to_cart(NewCartItem::new(id.clone(), "Mug", "mug.png", Decimal::new(1250, 2)))?
//!     .await?;
//! store.increment(&id)?;
//! store.flush().await?;
//!
//! assert_eq!(store.summary().item_count, 2);
//! # Ok(())
//! # }
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
mod persistence;
pub mod storage;
pub mod store;
pub mod summary;

pub use config::{CartConfig, ConfigError};
pub use error::{CartError, Result};
pub use persistence::PendingWrite;
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage, StorageError};
pub use store::{CartStore, DEFAULT_STORAGE_KEY};
pub use summary::{CartSummary, FloatingCart, FloatingCartView, Navigator, Screen};
