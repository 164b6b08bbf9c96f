//! One request at a time per page session.
//!
//! Handlers read the session record, change it and the session layer writes
//! the whole record back once the response is ready. Two requests on the
//! same session (a double click, a second tab) would each write their own
//! copy and the later one would drop the other's change. This middleware
//! sits outside the session layer and holds a per-session lock until the
//! record has been written.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Request, State},
    http::{HeaderMap, header::COOKIE},
    middleware::Next,
    response::Response,
};
use moka::future::Cache;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tower_sessions::cookie::Cookie;

use super::session::{MAX_SESSIONS, SESSION_COOKIE_NAME};
use crate::state::AppState;

/// Locks are dropped after this long without a request on their session.
const LOCK_IDLE_TIMEOUT: Duration = Duration::from_secs(30 * 60);

/// Per-session request locks, keyed by session cookie value.
#[derive(Clone)]
pub struct SessionLocks {
    locks: Cache<String, Arc<Mutex<()>>>,
}

impl Default for SessionLocks {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionLocks {
    /// Create an empty lock table.
    #[must_use]
    pub fn new() -> Self {
        Self {
            locks: Cache::builder()
                .max_capacity(MAX_SESSIONS)
                .time_to_idle(LOCK_IDLE_TIMEOUT)
                .build(),
        }
    }

    /// Wait for exclusive access to a session.
    pub async fn lock(&self, session_id: &str) -> OwnedMutexGuard<()> {
        let lock = self
            .locks
            .get_with(session_id.to_owned(), async { Arc::new(Mutex::new(())) })
            .await;
        lock.lock_owned().await
    }
}

/// The page-session cookie value, if the request carries one.
fn session_id(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|header| Cookie::split_parse(header.to_owned()))
        .filter_map(Result::ok)
        .find(|cookie| cookie.name() == SESSION_COOKIE_NAME)
        .map(|cookie| cookie.value().to_owned())
}

/// Serialise requests that share a page session.
///
/// Requests without a session cookie start a fresh session and need no lock.
/// Static assets never touch the session.
pub async fn session_lock_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    if request.uri().path().starts_with("/static/") {
        return next.run(request).await;
    }
    let Some(id) = session_id(request.headers()) else {
        return next.run(request).await;
    };

    let _guard = state.session_locks().lock(&id).await;
    next.run(request).await
}
