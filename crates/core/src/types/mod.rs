//! Core types for GoMarketplace.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod cart;
pub mod id;
pub mod price;

pub use cart::{CartItem, NewCartItem};
pub use id::{ProductId, ProductIdError};
pub use price::{CurrencyCode, CurrencyCodeError, Price};
