//! CLI command implementations.

use gomarketplace_cart::{CartConfig, CartError, CartStore, ConfigError, FileStorage};
use thiserror::Error;
use tracing::debug;

pub mod cart;
pub mod show;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Cart operation failed.
    #[error(transparent)]
    Cart(#[from] CartError),

    /// Snapshot could not be rendered as JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Open the cart persisted under the configured directory and key.
///
/// # Errors
///
/// Returns an error if the stored snapshot cannot be read or parsed.
pub async fn open_store(config: &CartConfig) -> Result<CartStore, CliError> {
    let storage = FileStorage::new(&config.storage_dir);
    debug!(
        path = %storage.path_for(&config.storage_key).display(),
        "Opening cart storage"
    );
    Ok(CartStore::load(storage, &config.storage_key).await?)
}
