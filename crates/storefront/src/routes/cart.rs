//! Cart route handlers.
//!
//! The cart lives in the page session as an ordered list of product IDs.
//! Requests on one session are serialised by the session lock middleware,
//! so a load, change and save here never races another.
//! Checkout hands the cart over to a WhatsApp chat; nothing is ordered
//! server-side.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use eliminator_core::ProductId;

use crate::catalog::Catalog;
use crate::error::{AppError, Result, add_breadcrumb};
use crate::filters;
use crate::middleware::OptionalUser;
use crate::models::{Cart, session_keys};
use crate::services::messaging;
use crate::state::AppState;

use super::ShellView;

/// Cart line display data for templates.
#[derive(Clone)]
pub struct CartLineView {
    pub position: usize,
    pub name: String,
    pub price: String,
}

/// Cart display data for templates.
#[derive(Clone)]
pub struct CartView {
    pub lines: Vec<CartLineView>,
    pub summary: String,
    pub total: String,
    pub checkout_url: Option<String>,
}

impl CartView {
    /// Derive display data from the cart.
    ///
    /// The checkout link is only built for a non-empty cart.
    #[must_use]
    pub fn new(cart: &Cart, state: &AppState) -> Self {
        let catalog = state.catalog();
        let lines = cart
            .lines(catalog)
            .enumerate()
            .map(|(position, product)| CartLineView {
                position,
                name: product.name.to_string(),
                price: product.price.to_string(),
            })
            .collect();

        Self {
            lines,
            summary: cart.summary(catalog),
            total: cart.total(catalog).to_string(),
            checkout_url: (!cart.is_empty()).then(|| {
                messaging::checkout_link(&state.config().messaging, cart, catalog).url()
            }),
        }
    }

    /// Whether there is nothing to check out.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

// =============================================================================
// Session Helpers
// =============================================================================

/// Get the cart from the session, empty if none was stored yet.
///
/// # Errors
///
/// Returns an error if the session store fails or the stored value is corrupt.
pub async fn load_cart(session: &Session) -> Result<Cart> {
    Ok(session
        .get::<Cart>(session_keys::CART)
        .await?
        .unwrap_or_default())
}

/// Store the cart in the session.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn save_cart(session: &Session, cart: &Cart) -> Result<()> {
    session.insert(session_keys::CART, cart).await?;
    Ok(())
}

/// Resolve a submitted product ID against the catalog.
fn find_product(catalog: &Catalog, id: u32) -> Result<&'static eliminator_core::Product> {
    let id = ProductId::new(id);
    catalog.get(id).ok_or(AppError::UnknownProduct(id))
}

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub product_id: u32,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub position: usize,
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub shell: ShellView,
    pub cart: CartView,
}

/// Display cart page.
#[instrument(skip(state, session, user))]
pub async fn show(
    State(state): State<AppState>,
    session: Session,
    OptionalUser(user): OptionalUser,
) -> Result<impl IntoResponse> {
    let cart = load_cart(&session).await?;

    Ok(CartShowTemplate {
        shell: ShellView::new(&state, user.as_ref(), &cart),
        cart: CartView::new(&cart, &state),
    })
}

/// Append a product to the cart.
///
/// Adding the same product again adds another line.
#[instrument(skip(state, session))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<AddToCartForm>,
) -> Result<Redirect> {
    let product = find_product(state.catalog(), form.product_id)?;

    let mut cart = load_cart(&session).await?;
    cart.add(product);
    save_cart(&session, &cart).await?;

    let product_id = product.id.to_string();
    add_breadcrumb(
        "cart",
        "Added product",
        Some(&[("product_id", product_id.as_str())]),
    );
    tracing::debug!(product = product.name, lines = cart.len(), "Added to cart");

    Ok(Redirect::to("/"))
}

/// Remove the line at a position.
///
/// Positions past the end are ignored.
#[instrument(skip(session))]
pub async fn remove(session: Session, Form(form): Form<RemoveFromCartForm>) -> Result<Redirect> {
    let mut cart = load_cart(&session).await?;

    if let Some(id) = cart.remove(form.position) {
        save_cart(&session, &cart).await?;
        tracing::debug!(product_id = %id, lines = cart.len(), "Removed from cart");
    }

    Ok(Redirect::to("/cart"))
}

/// Redirect to the WhatsApp checkout chat.
///
/// An empty cart goes back to the cart page.
#[instrument(skip(state, session))]
pub async fn checkout(State(state): State<AppState>, session: Session) -> Result<Response> {
    let cart = load_cart(&session).await?;
    if cart.is_empty() {
        return Ok(Redirect::to("/cart").into_response());
    }

    let messaging_config = &state.config().messaging;
    if !messaging_config.checkout_configured() {
        tracing::warn!(
            destination = %messaging_config.checkout_number,
            "Checkout destination is not configured; set WHATSAPP_CHECKOUT_NUMBER"
        );
    }

    let link = messaging::checkout_link(messaging_config, &cart, state.catalog());
    add_breadcrumb("cart", "Checkout hand-off", None);

    Ok(Redirect::to(&link.url()).into_response())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use tower_sessions::MemoryStore;

    use super::*;
    use crate::config::StorefrontConfig;

    fn state() -> AppState {
        AppState::new(StorefrontConfig::default(), Catalog::builtin())
    }

    #[tokio::test]
    async fn test_load_cart_defaults_to_empty() {
        let session = Session::new(None, Arc::new(MemoryStore::default()), None);
        assert!(load_cart(&session).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_save_then_load_cart() {
        let session = Session::new(None, Arc::new(MemoryStore::default()), None);
        let state = state();
        let mut cart = Cart::new();
        cart.add(find_product(state.catalog(), 2).unwrap());
        cart.add(find_product(state.catalog(), 2).unwrap());

        save_cart(&session, &cart).await.unwrap();
        assert_eq!(load_cart(&session).await.unwrap(), cart);
    }

    #[test]
    fn test_find_unknown_product() {
        let state = state();
        assert!(matches!(
            find_product(state.catalog(), 42),
            Err(AppError::UnknownProduct(_))
        ));
    }

    #[test]
    fn test_cart_view_empty_has_no_checkout() {
        let view = CartView::new(&Cart::new(), &state());
        assert!(view.is_empty());
        assert!(view.checkout_url.is_none());
        assert_eq!(view.total, "₦0");
    }

    #[test]
    fn test_cart_view_lines() {
        let state = state();
        let mut cart = Cart::new();
        cart.add(find_product(state.catalog(), 1).unwrap());
        cart.add(find_product(state.catalog(), 2).unwrap());

        let view = CartView::new(&cart, &state);
        assert_eq!(view.lines.len(), 2);
        assert_eq!(view.total, "₦20,000");
        assert_eq!(view.summary, "Basic WhatsApp Bot, Business WhatsApp Bot");
        let second = view.lines.get(1).unwrap();
        assert_eq!(second.position, 1);
        assert_eq!(second.price, "₦15,000");
        assert!(
            view.checkout_url
                .unwrap()
                .starts_with("https://wa.me/YOUR_PHONE_NUMBER?text=Hello%2C%20I%20want%20to%20buy%3A%20Basic")
        );
    }
}
