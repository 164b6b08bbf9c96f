//! Landing page route handler.

use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
use tower_sessions::Session;
use tracing::instrument;

use crate::error::Result;
use crate::middleware::{OptionalUser, set_current_user};
use crate::services::{AuthService, CookieStorage};
use crate::state::AppState;

use super::auth::LoginTemplate;
use super::cart::load_cart;
use super::store::StoreTemplate;
use super::ShellView;

/// Display the landing page.
///
/// Shows the store to a signed-in visitor. Otherwise a visitor remembered
/// as registered is signed in silently; everyone else gets the sign-in form.
#[instrument(skip_all)]
pub async fn landing(
    State(state): State<AppState>,
    session: Session,
    OptionalUser(user): OptionalUser,
    storage: CookieStorage,
) -> Result<Response> {
    let user = match user {
        Some(user) => Some(user),
        None => {
            let resumed = AuthService::new(storage).resume();
            if let Some(user) = &resumed {
                set_current_user(&session, user).await?;
                tracing::info!("Remembered visitor signed in");
            }
            resumed
        }
    };

    let cart = load_cart(&session).await?;
    let shell = ShellView::new(&state, user.as_ref(), &cart);

    Ok(match user {
        Some(_) => StoreTemplate::new(shell, state.catalog().products()).into_response(),
        None => LoginTemplate {
            shell,
            error: None,
            draft: String::new(),
        }
        .into_response(),
    })
}
