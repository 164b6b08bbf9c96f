//! Domain models for the storefront.

pub mod cart;
pub mod session;

pub use cart::Cart;
pub use session::{CurrentUser, keys as session_keys};
