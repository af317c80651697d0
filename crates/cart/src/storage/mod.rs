//! Key-value storage for persisted cart snapshots.
//!
//! The cart is mirrored to a single string slot, so backends only need to
//! get, set, and remove one value per key.
//!
//! # Backends
//!
//! - [`MemoryStorage`] - Process-local map, for tests and ephemeral sessions
//! - [`FileStorage`] - One file per key under a directory

use std::future::Future;

use thiserror::Error;

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

/// Errors that can occur when reading or writing storage.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem operation failed.
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Backend-specific failure.
    #[error("Storage backend error: {0}")]
    Backend(String),
}

/// Asynchronous string key-value storage.
///
/// Implementations must be safe to share with the background snapshot
/// writer, which owns a handle for the lifetime of the store.
pub trait KeyValueStorage: Send + Sync + 'static {
    /// Read the value stored under `key`, or `None` if nothing is stored.
    fn get_item(
        &self,
        key: &str,
    ) -> impl Future<Output = Result<Option<String>, StorageError>> + Send;

    /// Store `value` under `key`, replacing any previous value.
    fn set_item(
        &self,
        key: &str,
        value: &str,
    ) -> impl Future<Output = Result<(), StorageError>> + Send;

    /// Remove the value under `key`. Removing a missing key is not an error.
    fn remove_item(&self, key: &str) -> impl Future<Output = Result<(), StorageError>> + Send;
}
