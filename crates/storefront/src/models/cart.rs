//! Page-session cart.
//!
//! The cart is an ordered list of product references. Adding the same
//! product twice produces two lines, each billed separately; there is no
//! quantity field.

use serde::{Deserialize, Serialize};

use eliminator_core::{Price, Product, ProductId};

use crate::catalog::Catalog;

/// Ordered list of products the visitor intends to buy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<ProductId>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Append a product to the end of the cart.
    pub fn add(&mut self, product: &Product) {
        self.items.push(product.id);
    }

    /// Remove the entry at `position`, returning its product ID.
    ///
    /// Out-of-range positions leave the cart untouched.
    pub fn remove(&mut self, position: usize) -> Option<ProductId> {
        (position < self.items.len()).then(|| self.items.remove(position))
    }

    /// Number of entries, duplicates included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Product IDs in insertion order.
    #[must_use]
    pub fn product_ids(&self) -> &[ProductId] {
        &self.items
    }

    /// Resolve entries against the catalog, in cart order.
    ///
    /// Entries whose product has left the catalog are skipped.
    pub fn lines<'a>(&'a self, catalog: &'a Catalog) -> impl Iterator<Item = &'static Product> + 'a {
        self.items.iter().filter_map(|id| catalog.get(*id))
    }

    /// Sum of the prices of every entry.
    #[must_use]
    pub fn total(&self, catalog: &Catalog) -> Price {
        self.lines(catalog).map(|p| p.price).sum()
    }

    /// Entry names joined with `", "`, in cart order.
    #[must_use]
    pub fn summary(&self, catalog: &Catalog) -> String {
        self.lines(catalog)
            .map(|p| p.name)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static TEST_PRODUCTS: &[Product] = &[
        Product::new(10, "ProductA", Price::naira(5000), "/a.jpg", "A"),
        Product::new(11, "ProductB", Price::naira(15_000), "/b.jpg", "B"),
        Product::new(12, "ProductX", Price::naira(30_000), "/x.jpg", "X"),
    ];

    fn catalog() -> Catalog {
        Catalog::new(TEST_PRODUCTS)
    }

    fn product(index: usize) -> &'static Product {
        TEST_PRODUCTS.get(index).unwrap_or_else(|| panic!("no product {index}"))
    }

    #[test]
    fn test_empty_cart() {
        let cart = Cart::new();
        assert!(cart.is_empty());
        assert_eq!(cart.total(&catalog()), Price::zero());
        assert_eq!(cart.summary(&catalog()), "");
    }

    #[test]
    fn test_total_and_summary() {
        let mut cart = Cart::new();
        cart.add(product(0));
        cart.add(product(1));

        assert_eq!(cart.total(&catalog()).to_string(), "₦20,000");
        assert_eq!(cart.summary(&catalog()), "ProductA, ProductB");
    }

    #[test]
    fn test_duplicates_are_separate_lines() {
        let mut cart = Cart::new();
        cart.add(product(0));
        cart.add(product(0));

        assert_eq!(cart.len(), 2);
        assert_eq!(cart.total(&catalog()), Price::naira(10_000));
        assert_eq!(cart.summary(&catalog()), "ProductA, ProductA");
    }

    #[test]
    fn test_total_matches_any_add_sequence() {
        let sequence = [2, 0, 1, 1, 0, 2, 2];
        let mut cart = Cart::new();
        let mut expected = 0;
        for index in sequence {
            let p = product(index);
            cart.add(p);
            expected += p.price.amount();
        }

        assert_eq!(cart.total(&catalog()), Price::naira(expected));
        let ids: Vec<_> = sequence.iter().map(|i| product(*i).id).collect();
        assert_eq!(cart.product_ids(), ids.as_slice());
    }

    #[test]
    fn test_remove_by_position() {
        let mut cart = Cart::new();
        cart.add(product(0));
        cart.add(product(1));
        cart.add(product(2));

        assert_eq!(cart.remove(1), Some(product(1).id));
        assert_eq!(cart.summary(&catalog()), "ProductA, ProductX");
        assert_eq!(cart.total(&catalog()), Price::naira(35_000));
    }

    #[test]
    fn test_remove_out_of_range_is_noop() {
        let mut cart = Cart::new();
        cart.add(product(0));

        assert_eq!(cart.remove(5), None);
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_unknown_entries_are_skipped() {
        let cart: Cart = serde_json::from_str("[10, 99, 12]").unwrap_or_default();
        assert_eq!(cart.len(), 3);
        assert_eq!(cart.summary(&catalog()), "ProductA, ProductX");
        assert_eq!(cart.total(&catalog()), Price::naira(35_000));
    }
}
