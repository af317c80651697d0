//! GoMarketplace Core - Shared cart domain types.
//!
//! This crate provides the types used across all GoMarketplace components:
//! - `cart` - Cart store, persistence, and the floating cart summary
//! - `cli` - Command-line tools for inspecting and editing a stored cart
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access, no async
//! runtime. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Product IDs, prices, and cart line items

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
