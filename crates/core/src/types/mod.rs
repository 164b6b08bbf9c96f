//! Core types for the storefront.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod display_name;
pub mod id;
pub mod price;
pub mod product;

pub use display_name::{DisplayName, DisplayNameError};
pub use id::*;
pub use price::{CurrencyCode, Price};
pub use product::Product;
