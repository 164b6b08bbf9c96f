//! Session-related types.
//!
//! Types stored in the page session. The page session lives in server
//! memory and its cookie expires when the browser session ends.

use serde::{Deserialize, Serialize};

use eliminator_core::DisplayName;

/// Session-stored visitor identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    /// Name the visitor signed in with.
    pub name: DisplayName,
}

impl CurrentUser {
    /// Create a current user from a validated name.
    #[must_use]
    pub const fn new(name: DisplayName) -> Self {
        Self { name }
    }
}

/// Page-session keys.
pub mod keys {
    /// Key for storing the current signed-in visitor.
    pub const CURRENT_USER: &str = "current_user";

    /// Key for storing the cart.
    pub const CART: &str = "cart";
}
