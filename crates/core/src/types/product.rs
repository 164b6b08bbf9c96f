//! Catalog product record.

use crate::{Price, ProductId};

/// A purchasable offering.
///
/// Products are defined at build time and never change while the
/// storefront runs, so every field borrows `'static` data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Product {
    /// Stable unique identifier.
    pub id: ProductId,
    /// Name shown on cards, cart lines and in the checkout message.
    pub name: &'static str,
    /// Price per entry.
    pub price: Price,
    /// Image path or URL.
    pub image: &'static str,
    /// Short description shown on the product card.
    pub description: &'static str,
}

impl Product {
    /// Create a product record.
    #[must_use]
    pub const fn new(
        id: u32,
        name: &'static str,
        price: Price,
        image: &'static str,
        description: &'static str,
    ) -> Self {
        Self {
            id: ProductId::new(id),
            name,
            price,
            image,
            description,
        }
    }
}
