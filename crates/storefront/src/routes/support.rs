//! Support page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use tower_sessions::Session;
use tracing::instrument;

use crate::error::Result;
use crate::filters;
use crate::middleware::OptionalUser;
use crate::services::messaging;
use crate::state::AppState;

use super::ShellView;

/// Support page template.
#[derive(Template, WebTemplate)]
#[template(path = "support.html")]
pub struct SupportTemplate {
    pub shell: ShellView,
    pub support_url: String,
}

/// Display the support page.
#[instrument(skip_all)]
pub async fn show(
    State(state): State<AppState>,
    session: Session,
    OptionalUser(user): OptionalUser,
) -> Result<impl IntoResponse> {
    let shell = ShellView::load(&state, &session, user.as_ref()).await?;
    let link = messaging::support_link(&state.config().messaging, &state.config().store_name);

    Ok(SupportTemplate {
        shell,
        support_url: link.url(),
    })
}
