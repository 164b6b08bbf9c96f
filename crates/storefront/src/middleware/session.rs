//! Session middleware configuration.
//!
//! Page-session state (current visitor and cart) lives in an in-memory
//! moka-backed tower-sessions store. The cookie has no expiry, so the
//! browser drops it when the browsing session ends and the state is gone
//! with it. The store holds at most [`MAX_SESSIONS`] records and evicts the
//! least recently used beyond that, so abandoned sessions do not pile up.

use tower_sessions::{Expiry, SessionManagerLayer};
use tower_sessions_moka_store::MokaStore;

use crate::config::StorefrontConfig;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "evs_session";

/// Most page sessions kept in memory at once.
pub const MAX_SESSIONS: u64 = 100_000;

/// In-memory session store holding at most [`MAX_SESSIONS`] records.
fn bounded_store() -> MokaStore {
    MokaStore::new(Some(MAX_SESSIONS))
}

/// Create the session layer with a bounded in-memory store.
#[must_use]
pub fn create_session_layer(config: &StorefrontConfig) -> SessionManagerLayer<MokaStore> {
    SessionManagerLayer::new(bounded_store())
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnSessionEnd)
        .with_secure(config.is_secure())
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
}
