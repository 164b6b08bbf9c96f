//! Store page: the catalog as product cards.

use askama::Template;
use askama_web::WebTemplate;
use eliminator_core::Product;

use crate::filters;

use super::ShellView;

/// Product card display data for templates.
#[derive(Clone)]
pub struct ProductCardView {
    pub id: u32,
    pub name: String,
    pub description: String,
    pub image: String,
    pub price: String,
}

impl From<&Product> for ProductCardView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.as_u32(),
            name: product.name.to_string(),
            description: product.description.to_string(),
            image: product.image.to_string(),
            price: product.price.to_string(),
        }
    }
}

/// Store page template.
#[derive(Template, WebTemplate)]
#[template(path = "store/index.html")]
pub struct StoreTemplate {
    pub shell: ShellView,
    pub products: Vec<ProductCardView>,
}

impl StoreTemplate {
    /// Cards for every product, in catalog order.
    #[must_use]
    pub fn new(shell: ShellView, products: &[Product]) -> Self {
        Self {
            shell,
            products: products.iter().map(ProductCardView::from).collect(),
        }
    }
}
