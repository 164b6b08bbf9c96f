//! The fixed product catalog.
//!
//! Products are compiled into the binary. The catalog is read-only for the
//! lifetime of the process and is the only source of cart entries.

use eliminator_core::{Price, Product, ProductId};

/// Image shared by every bot offering.
const BOT_PROMO_IMAGE: &str = "/static/images/bot_promo.svg";

/// Products sold by the storefront, in display order.
pub const PRODUCTS: &[Product] = &[
    Product::new(
        1,
        "Basic WhatsApp Bot",
        Price::naira(5000),
        BOT_PROMO_IMAGE,
        "Auto-reply + Menu + Simple Setup",
    ),
    Product::new(
        2,
        "Business WhatsApp Bot",
        Price::naira(15_000),
        BOT_PROMO_IMAGE,
        "Full business automation + Order system",
    ),
    Product::new(
        3,
        "Pro WhatsApp Bot",
        Price::naira(30_000),
        BOT_PROMO_IMAGE,
        "Premium commands, Telegram sync, hosting included",
    ),
];

/// Read-only collection of products.
#[derive(Debug, Clone, Copy)]
pub struct Catalog {
    products: &'static [Product],
}

impl Catalog {
    /// The catalog the storefront ships with.
    #[must_use]
    pub const fn builtin() -> Self {
        Self { products: PRODUCTS }
    }

    /// A catalog over an arbitrary static product list.
    #[must_use]
    pub const fn new(products: &'static [Product]) -> Self {
        Self { products }
    }

    /// All products in display order.
    #[must_use]
    pub const fn products(&self) -> &'static [Product] {
        self.products
    }

    /// Look up a product by ID.
    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&'static Product> {
        self.products.iter().find(|p| p.id == id)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}
