//! Eliminator Core - Shared domain types.
//!
//! This crate provides the types used by the storefront and its tests:
//! product identifiers, Naira prices, validated visitor names and the
//! product record itself.
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no sessions, no HTTP.
//! Everything here is plain data that can be built at compile time or
//! validated from user input.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for IDs, prices, display names and products

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
