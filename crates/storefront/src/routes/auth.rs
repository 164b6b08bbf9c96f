//! Sign-in route handlers.
//!
//! Signing in only takes a display name. The name is remembered in durable
//! browser storage so later visits skip the form.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{Result, add_breadcrumb};
use crate::filters;
use crate::middleware::{OptionalUser, clear_current_user, set_current_user};
use crate::services::{AuthService, CookieStorage};
use crate::state::AppState;

use super::ShellView;

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
}

/// Sign-in page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub shell: ShellView,
    pub error: Option<String>,
    pub draft: String,
}

/// Handle sign-in form submission.
///
/// A valid name is remembered durably and placed in the page session, then
/// the visitor is sent to the landing page. A rejected name re-renders the
/// form with the reason and writes nothing.
#[instrument(skip_all)]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    OptionalUser(user): OptionalUser,
    storage: CookieStorage,
    Form(form): Form<LoginForm>,
) -> Result<Response> {
    let mut auth = AuthService::new(storage);

    match auth.log_in(&form.username) {
        Ok(user) => {
            set_current_user(&session, &user).await?;
            add_breadcrumb("auth", "Signed in", None);
            tracing::info!("Visitor signed in");

            Ok((auth.into_storage(), Redirect::to("/")).into_response())
        }
        Err(rejection) => {
            tracing::debug!(%rejection, "Sign-in rejected");
            let shell = ShellView::load(&state, &session, user.as_ref()).await?;

            Ok((
                StatusCode::UNPROCESSABLE_ENTITY,
                LoginTemplate {
                    shell,
                    error: Some(rejection.to_string()),
                    draft: form.username,
                },
            )
                .into_response())
        }
    }
}

/// Forget the visitor and return to the sign-in form.
///
/// The cart is kept for the rest of the page session.
#[instrument(skip_all)]
pub async fn logout(session: Session, storage: CookieStorage) -> Result<Response> {
    let mut auth = AuthService::new(storage);
    auth.log_out();
    clear_current_user(&session).await?;
    add_breadcrumb("auth", "Signed out", None);

    Ok((auth.into_storage(), Redirect::to("/")).into_response())
}
