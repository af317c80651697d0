//! Cart editing commands.
//!
//! Each command waits for its snapshot to be written before returning, so a
//! successful exit means the change is on disk.

use gomarketplace_cart::CartStore;
use gomarketplace_core::{NewCartItem, ProductId};
use rust_decimal::Decimal;
use tracing::info;

use super::CliError;

/// Add one unit of a product.
///
/// # Errors
///
/// Returns an error if the price is negative or the snapshot write fails.
pub async fn add(
    store: &CartStore,
    id: ProductId,
    title: String,
    image_url: String,
    price: Decimal,
) -> Result<(), CliError> {
    let item = NewCartItem::new(id.clone(), title, image_url, price);
    store.add_to_cart(item)?.await?;

    let quantity = store.item(&id).map_or(0, |line| line.quantity);
    info!(product_id = %id, quantity, "Added to cart");
    Ok(())
}

/// Increase a line's quantity by one.
///
/// # Errors
///
/// Returns an error if the product is not in the cart or the write fails.
pub async fn increment(store: &CartStore, id: &ProductId) -> Result<(), CliError> {
    store.increment(id)?.await?;
    info!(product_id = %id, "Incremented");
    Ok(())
}

/// Decrease a line's quantity by one, never below one.
///
/// # Errors
///
/// Returns an error if the product is not in the cart or the write fails.
pub async fn decrement(store: &CartStore, id: &ProductId) -> Result<(), CliError> {
    store.decrement(id)?.await?;
    info!(product_id = %id, "Decremented");
    Ok(())
}

/// Remove a line from the cart.
///
/// # Errors
///
/// Returns an error if the product is not in the cart or the write fails.
pub async fn remove(store: &CartStore, id: &ProductId) -> Result<(), CliError> {
    store.remove(id)?.await?;
    info!(product_id = %id, "Removed from cart");
    Ok(())
}

/// Remove every line from the cart.
///
/// # Errors
///
/// Returns an error if the write fails.
pub async fn clear(store: &CartStore) -> Result<(), CliError> {
    store.clear()?.await?;
    info!("Cart cleared");
    Ok(())
}
