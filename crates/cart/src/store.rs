//! Cart store: the single owner of cart state.
//!
//! # Semantics
//!
//! - `add_to_cart` bumps an existing line by one or appends a new line with
//!   quantity 1. Existing lines keep their position.
//! - `decrement` floors at one. Lines leave the cart only through `remove`
//!   or `clear`.
//! - State changes are visible to readers as soon as the call returns.
//!   Persistence happens on the background writer; await the returned
//!   [`PendingWrite`] to know the snapshot is stored.

use std::sync::Arc;

use gomarketplace_core::{CartItem, NewCartItem, ProductId};
use rust_decimal::Decimal;
use tokio::sync::watch;
use tracing::{debug, info, instrument, warn};

use crate::error::{CartError, Result};
use crate::persistence::{PendingWrite, SnapshotWriter};
use crate::storage::KeyValueStorage;
use crate::summary::CartSummary;

/// Storage key the cart snapshot is persisted under.
pub const DEFAULT_STORAGE_KEY: &str = "@GoMarketPlace";

/// Shared handle to the cart.
///
/// Cheaply cloneable via `Arc`; every clone sees and mutates the same cart.
/// Pass it to each view that needs the cart.
#[derive(Clone, Debug)]
pub struct CartStore {
    inner: Arc<CartStoreInner>,
}

#[derive(Debug)]
struct CartStoreInner {
    state: watch::Sender<Vec<CartItem>>,
    writer: SnapshotWriter,
    storage_key: String,
}

impl CartStore {
    /// Load the persisted cart and start the snapshot writer.
    ///
    /// A missing or blank snapshot yields an empty cart.
    ///
    /// # Errors
    ///
    /// Returns an error if storage cannot be read or the snapshot is not a
    /// valid cart.
    #[instrument(skip(storage))]
    pub async fn load<S: KeyValueStorage>(storage: S, storage_key: &str) -> Result<Self> {
        let items = match storage.get_item(storage_key).await? {
            Some(raw) if !raw.trim().is_empty() => {
                normalize_snapshot(serde_json::from_str::<Vec<CartItem>>(&raw)?)
            }
            _ => {
                debug!("No persisted cart, starting empty");
                Vec::new()
            }
        };

        info!(lines = items.len(), "Cart loaded");

        let (state, _) = watch::channel(items);
        let writer = SnapshotWriter::spawn(storage, storage_key.to_string());

        Ok(Self {
            inner: Arc::new(CartStoreInner {
                state,
                writer,
                storage_key: storage_key.to_string(),
            }),
        })
    }

    /// Current line items, in cart order.
    #[must_use]
    pub fn products(&self) -> Vec<CartItem> {
        self.inner.state.borrow().clone()
    }

    /// Look up one line item.
    #[must_use]
    pub fn item(&self, id: &ProductId) -> Option<CartItem> {
        self.inner
            .state
            .borrow()
            .iter()
            .find(|item| &item.id == id)
            .cloned()
    }

    /// Totals for the current cart.
    #[must_use]
    pub fn summary(&self) -> CartSummary {
        CartSummary::from_items(&self.inner.state.borrow())
    }

    /// Subscribe to cart changes.
    ///
    /// The receiver is notified after each mutation that changed the cart.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Vec<CartItem>> {
        self.inner.state.subscribe()
    }

    /// Key the cart snapshot is stored under.
    #[must_use]
    pub fn storage_key(&self) -> &str {
        &self.inner.storage_key
    }

    /// Add one unit of a product.
    ///
    /// # Errors
    ///
    /// Returns `CartError::NegativePrice` if the price is below zero, or an
    /// error if the cart cannot be serialized.
    #[instrument(skip(self, item), fields(product_id = %item.id))]
    pub fn add_to_cart(&self, item: NewCartItem) -> Result<PendingWrite> {
        if item.price < Decimal::ZERO {
            return Err(CartError::NegativePrice {
                id: item.id,
                price: item.price,
            });
        }

        self.mutate(|items| {
            if let Some(existing) = items.iter_mut().find(|line| line.id == item.id) {
                existing.quantity = existing.quantity.saturating_add(1);
                debug!(quantity = existing.quantity, "Bumped existing line");
            } else {
                debug!("Appended new line");
                items.push(item.into_cart_item());
            }
            Ok(true)
        })
    }

    /// Increase a line's quantity by one.
    ///
    /// # Errors
    ///
    /// Returns `CartError::ItemNotFound` if the product is not in the cart.
    #[instrument(skip(self, id), fields(product_id = %id))]
    pub fn increment(&self, id: &ProductId) -> Result<PendingWrite> {
        self.mutate(|items| {
            let line = find_line(items, id)?;
            line.quantity = line.quantity.saturating_add(1);
            Ok(true)
        })
    }

    /// Decrease a line's quantity by one, never below one.
    ///
    /// A line already at quantity 1 is left unchanged and nothing is written.
    ///
    /// # Errors
    ///
    /// Returns `CartError::ItemNotFound` if the product is not in the cart.
    #[instrument(skip(self, id), fields(product_id = %id))]
    pub fn decrement(&self, id: &ProductId) -> Result<PendingWrite> {
        self.mutate(|items| {
            let line = find_line(items, id)?;
            if line.quantity > 1 {
                line.quantity -= 1;
                Ok(true)
            } else {
                debug!("Line already at minimum quantity");
                Ok(false)
            }
        })
    }

    /// Remove a line from the cart.
    ///
    /// # Errors
    ///
    /// Returns `CartError::ItemNotFound` if the product is not in the cart.
    #[instrument(skip(self, id), fields(product_id = %id))]
    pub fn remove(&self, id: &ProductId) -> Result<PendingWrite> {
        self.mutate(|items| {
            let position = items
                .iter()
                .position(|line| &line.id == id)
                .ok_or_else(|| CartError::ItemNotFound(id.clone()))?;
            items.remove(position);
            Ok(true)
        })
    }

    /// Remove every line from the cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart cannot be serialized.
    #[instrument(skip(self))]
    pub fn clear(&self) -> Result<PendingWrite> {
        self.mutate(|items| {
            if items.is_empty() {
                return Ok(false);
            }
            items.clear();
            Ok(true)
        })
    }

    /// Wait until every snapshot queued so far has been written.
    ///
    /// # Errors
    ///
    /// Returns an error if the most recent snapshot write failed, even when
    /// it was already reported to its own `PendingWrite`, or if the writer
    /// has shut down.
    pub async fn flush(&self) -> Result<()> {
        self.inner.writer.flush().await
    }

    /// Apply `op` to the cart and queue a snapshot if it reports a change.
    ///
    /// The snapshot is serialized and queued while the state lock is held,
    /// so queued snapshots follow mutation order even across clones.
    fn mutate<F>(&self, op: F) -> Result<PendingWrite>
    where
        F: FnOnce(&mut Vec<CartItem>) -> Result<bool>,
    {
        let mut outcome = Ok(PendingWrite::ready());

        self.inner.state.send_if_modified(|items| match op(items) {
            Ok(true) => {
                outcome = serde_json::to_string(&*items)
                    .map(|snapshot| self.inner.writer.enqueue(snapshot))
                    .map_err(CartError::from);
                true
            }
            Ok(false) => false,
            Err(e) => {
                outcome = Err(e);
                false
            }
        });

        outcome
    }
}

fn find_line<'a>(items: &'a mut [CartItem], id: &ProductId) -> Result<&'a mut CartItem> {
    items
        .iter_mut()
        .find(|line| &line.id == id)
        .ok_or_else(|| CartError::ItemNotFound(id.clone()))
}

/// Repair a loaded snapshot so it satisfies the cart invariants.
///
/// Lines with quantity 0 or a negative price are dropped; duplicate IDs
/// are merged into the first occurrence.
fn normalize_snapshot(raw: Vec<CartItem>) -> Vec<CartItem> {
    let mut items: Vec<CartItem> = Vec::with_capacity(raw.len());

    for line in raw {
        if line.quantity == 0 {
            warn!(product_id = %line.id, "Dropping persisted line with zero quantity");
            continue;
        }
        if line.price < Decimal::ZERO {
            warn!(
                product_id = %line.id,
                price = %line.price,
                "Dropping persisted line with negative price"
            );
            continue;
        }
        if let Some(existing) = items.iter_mut().find(|l| l.id == line.id) {
            warn!(product_id = %line.id, "Merging duplicate persisted line");
            existing.quantity = existing.quantity.saturating_add(line.quantity);
            continue;
        }
        items.push(line);
    }

    items
}
