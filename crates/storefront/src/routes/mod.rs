//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                - Landing: sign-in form, or the store once signed in
//! GET  /health          - Health check
//!
//! # Auth
//! POST /login           - Sign in with a display name
//! POST /logout          - Forget the remembered visitor
//!
//! # Cart
//! GET  /cart            - Cart page (no sign-in required)
//! POST /cart/add        - Append a product (redirects to /)
//! POST /cart/remove     - Remove the line at a position (redirects to /cart)
//!
//! # Hand-off
//! GET  /checkout        - Redirect to the WhatsApp checkout chat
//! GET  /support         - Support page with a WhatsApp chat link
//! ```
//!
//! Any other path renders the page shell with an empty content area.

pub mod auth;
pub mod cart;
pub mod home;
pub mod shell;
pub mod store;
pub mod support;

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use tower_sessions::Session;

use crate::error::Result;
use crate::filters;
use crate::middleware::OptionalUser;
use crate::state::AppState;

pub use shell::ShellView;

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/remove", post(cart::remove))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Landing page
        .route("/", get(home::landing))
        // Auth
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        // Cart routes
        .nest("/cart", cart_routes())
        // Hand-off
        .route("/checkout", get(cart::checkout))
        .route("/support", get(support::show))
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running.
pub async fn health() -> &'static str {
    "ok"
}

/// Page shell with nothing in the content area.
#[derive(Template, WebTemplate)]
#[template(path = "not_found.html")]
pub struct NotFoundTemplate {
    pub shell: ShellView,
}

/// Fallback for unknown paths.
pub async fn not_found(
    State(state): State<AppState>,
    session: Session,
    OptionalUser(user): OptionalUser,
) -> Result<impl IntoResponse> {
    let shell = ShellView::load(&state, &session, user.as_ref()).await?;
    Ok((StatusCode::NOT_FOUND, NotFoundTemplate { shell }))
}
