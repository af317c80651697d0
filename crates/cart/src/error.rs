//! Cart error types.

use std::sync::Arc;

use gomarketplace_core::ProductId;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::storage::StorageError;

/// Errors returned by cart store operations.
#[derive(Debug, Error)]
pub enum CartError {
    /// Reading from storage failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// The persisted snapshot could not be parsed, or the cart could not be
    /// serialized.
    #[error("Snapshot error: {0}")]
    Snapshot(#[from] serde_json::Error),

    /// A queued snapshot write failed.
    ///
    /// Shared because coalesced writes report one outcome to every waiter.
    #[error("Snapshot write failed: {0}")]
    Write(Arc<StorageError>),

    /// No line item with this product ID is in the cart.
    #[error("Item not in cart: {0}")]
    ItemNotFound(ProductId),

    /// A product was offered with a price below zero.
    #[error("Price for {id} must not be negative: {price}")]
    NegativePrice { id: ProductId, price: Decimal },

    /// The background writer has shut down.
    #[error("Snapshot writer closed")]
    WriterClosed,
}

/// Result type alias for `CartError`.
pub type Result<T> = std::result::Result<T, CartError>;
