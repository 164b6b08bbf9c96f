//! WhatsApp click-to-chat hand-off.
//!
//! Checkout and support both end in a pre-filled chat link of the form
//! `https://wa.me/<destination>?text=<message>`. The message is encoded
//! exactly like JavaScript's `encodeURIComponent`, so links are
//! byte-for-byte what visitors have always been sent.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

use crate::catalog::Catalog;
use crate::config::MessagingConfig;
use crate::models::Cart;

/// Bytes `encodeURIComponent` escapes: everything except ASCII
/// alphanumerics and `- _ . ! ~ * ' ( )`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encode text the way `encodeURIComponent` does.
#[must_use]
pub fn encode_uri_component(text: &str) -> String {
    utf8_percent_encode(text, URI_COMPONENT).to_string()
}

/// A pre-filled chat link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessagingLink {
    base_url: String,
    destination: String,
    text: String,
}

impl MessagingLink {
    /// Start a link to `destination` on the service at `base_url`.
    #[must_use]
    pub fn new(base_url: &str, destination: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_owned(),
            destination: destination.to_owned(),
            text: String::new(),
        }
    }

    /// Set the pre-filled message.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// The message, unencoded.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The full link.
    #[must_use]
    pub fn url(&self) -> String {
        format!(
            "{}/{}?text={}",
            self.base_url,
            self.destination,
            encode_uri_component(&self.text)
        )
    }
}

/// Message sent to the shop when checking out.
#[must_use]
pub fn checkout_message(cart: &Cart, catalog: &Catalog) -> String {
    format!(
        "Hello, I want to buy: {} (Total: {})",
        cart.summary(catalog),
        cart.total(catalog)
    )
}

/// Message sent when asking for help.
#[must_use]
pub fn support_message(store_name: &str) -> String {
    format!("Hello, I need support from {store_name}")
}

/// Checkout link for the current cart.
#[must_use]
pub fn checkout_link(config: &MessagingConfig, cart: &Cart, catalog: &Catalog) -> MessagingLink {
    MessagingLink::new(&config.base_url, &config.checkout_number)
        .with_text(checkout_message(cart, catalog))
}

/// Support link.
#[must_use]
pub fn support_link(config: &MessagingConfig, store_name: &str) -> MessagingLink {
    MessagingLink::new(&config.base_url, &config.support_number)
        .with_text(support_message(store_name))
}

#[cfg(test)]
mod tests {
    use eliminator_core::{Price, Product};

    use super::*;

    static TEST_PRODUCTS: &[Product] = &[
        Product::new(1, "ProductX", Price::naira(30_000), "/x.jpg", "X"),
        Product::new(2, "ProductA", Price::naira(5000), "/a.jpg", "A"),
    ];

    fn cart_of(ids: &[usize]) -> Cart {
        let mut cart = Cart::new();
        for id in ids {
            if let Some(product) = TEST_PRODUCTS.get(*id) {
                cart.add(product);
            }
        }
        cart
    }

    #[test]
    fn test_encode_uri_component_matches_javascript() {
        assert_eq!(encode_uri_component("a b,c:d"), "a%20b%2Cc%3Ad");
        assert_eq!(encode_uri_component("(x)!*'~-_."), "(x)!*'~-_.");
        assert_eq!(encode_uri_component("₦"), "%E2%82%A6");
        assert_eq!(encode_uri_component("a+b&c=d/e?"), "a%2Bb%26c%3Dd%2Fe%3F");
        assert_eq!(encode_uri_component("100%"), "100%25");
        assert_eq!(encode_uri_component("%28"), "%2528");
        assert_eq!(encode_uri_component("AZaz09"), "AZaz09");
        assert_eq!(encode_uri_component("#[]@$;\"<>"), "%23%5B%5D%40%24%3B%22%3C%3E");
    }

    #[test]
    fn test_checkout_link_single_product() {
        let catalog = Catalog::new(TEST_PRODUCTS);
        let config = MessagingConfig {
            checkout_number: "2348000000000".to_string(),
            ..MessagingConfig::default()
        };

        let link = checkout_link(&config, &cart_of(&[0]), &catalog);
        assert_eq!(
            link.url(),
            "https://wa.me/2348000000000?text=Hello%2C%20I%20want%20to%20buy%3A%20ProductX%20(Total%3A%20%E2%82%A630%2C000)"
        );
    }

    #[test]
    fn test_checkout_message_lists_duplicates() {
        let catalog = Catalog::new(TEST_PRODUCTS);
        let message = checkout_message(&cart_of(&[1, 0, 1]), &catalog);
        assert_eq!(
            message,
            "Hello, I want to buy: ProductA, ProductX, ProductA (Total: ₦40,000)"
        );
    }

    #[test]
    fn test_checkout_link_uses_placeholder_by_default() {
        let catalog = Catalog::new(TEST_PRODUCTS);
        let link = checkout_link(&MessagingConfig::default(), &cart_of(&[0]), &catalog);
        assert!(link.url().starts_with("https://wa.me/YOUR_PHONE_NUMBER?text="));
    }

    #[test]
    fn test_support_link() {
        let link = support_link(&MessagingConfig::default(), "ELIMINATOR VIT SERVICE");
        assert_eq!(
            link.url(),
            "https://wa.me/2349033181048?text=Hello%2C%20I%20need%20support%20from%20ELIMINATOR%20VIT%20SERVICE"
        );
        assert_eq!(
            link.text(),
            "Hello, I need support from ELIMINATOR VIT SERVICE"
        );
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let link = MessagingLink::new("https://wa.me/", "123").with_text("hi");
        assert_eq!(link.url(), "https://wa.me/123?text=hi");
    }
}
