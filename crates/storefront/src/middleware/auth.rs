//! Current-visitor extractor and session helpers.

use axum::{extract::FromRequestParts, http::request::Parts};
use tower_sessions::Session;

use crate::models::{CurrentUser, session_keys};

/// Extractor that optionally gets the signed-in visitor.
///
/// No route requires sign-in, so there is no rejecting counterpart. A
/// session that cannot be read is logged and treated as signed out.
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(OptionalUser(user): OptionalUser) -> impl IntoResponse {
///     match user {
///         Some(u) => format!("Hello, {}!", u.name),
///         None => "Hello, guest!".to_string(),
///     }
/// }
/// ```
pub struct OptionalUser(pub Option<CurrentUser>);

impl<S> FromRequestParts<S> for OptionalUser
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Some(session) = parts.extensions.get::<Session>() else {
            return Ok(Self(None));
        };

        let user = match session.get::<CurrentUser>(session_keys::CURRENT_USER).await {
            Ok(user) => user,
            Err(e) => {
                tracing::warn!(error = %e, "Could not read visitor from session");
                None
            }
        };

        Ok(Self(user))
    }
}

/// Helper to set the current visitor in the session.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_current_user(
    session: &Session,
    user: &CurrentUser,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::CURRENT_USER, user).await
}

/// Helper to clear the current visitor from the session (logout).
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn clear_current_user(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session
        .remove::<CurrentUser>(session_keys::CURRENT_USER)
        .await?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use eliminator_core::DisplayName;
    use tower_sessions::MemoryStore;

    use super::*;

    fn session() -> Session {
        Session::new(None, Arc::new(MemoryStore::default()), None)
    }

    async fn extract(session: Option<Session>) -> Option<CurrentUser> {
        let mut request = axum::http::Request::new(());
        if let Some(session) = session {
            request.extensions_mut().insert(session);
        }
        let (mut parts, ()) = request.into_parts();
        let OptionalUser(user) = OptionalUser::from_request_parts(&mut parts, &())
            .await
            .unwrap();
        user
    }

    #[tokio::test]
    async fn test_optional_user_without_session_layer() {
        assert!(extract(None).await.is_none());
    }

    #[tokio::test]
    async fn test_optional_user_reads_session() {
        let session = session();
        let user = CurrentUser::new(DisplayName::parse("Alice").unwrap());
        set_current_user(&session, &user).await.unwrap();

        assert_eq!(extract(Some(session)).await, Some(user));
    }

    #[tokio::test]
    async fn test_optional_user_with_corrupt_session_value() {
        let session = session();
        session
            .insert(session_keys::CURRENT_USER, "not a user")
            .await
            .unwrap();

        assert!(extract(Some(session)).await.is_none());
    }

    #[tokio::test]
    async fn test_set_and_clear_current_user() {
        let session = session();
        let user = CurrentUser::new(DisplayName::parse("Alice").unwrap());

        set_current_user(&session, &user).await.unwrap();
        let stored: Option<CurrentUser> = session.get(session_keys::CURRENT_USER).await.unwrap();
        assert_eq!(stored, Some(user));

        clear_current_user(&session).await.unwrap();
        let stored: Option<CurrentUser> = session.get(session_keys::CURRENT_USER).await.unwrap();
        assert!(stored.is_none());
    }
}
