//! Data shared by every page: header, navigation and footer.

use tower_sessions::Session;

use crate::error::Result;
use crate::models::{Cart, CurrentUser};
use crate::state::AppState;

use super::cart::load_cart;

/// Shell display data for templates.
#[derive(Clone)]
pub struct ShellView {
    pub store_name: String,
    pub user: Option<String>,
    pub cart_count: usize,
}

impl ShellView {
    /// Build the shell from already-loaded state.
    #[must_use]
    pub fn new(state: &AppState, user: Option<&CurrentUser>, cart: &Cart) -> Self {
        Self {
            store_name: state.config().store_name.clone(),
            user: user.map(|u| u.name.to_string()),
            cart_count: cart.len(),
        }
    }

    /// Build the shell, reading the cart from the session.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be read.
    pub async fn load(
        state: &AppState,
        session: &Session,
        user: Option<&CurrentUser>,
    ) -> Result<Self> {
        let cart = load_cart(session).await?;
        Ok(Self::new(state, user, &cart))
    }
}
