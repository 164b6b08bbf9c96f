//! Name-only sign-in.
//!
//! There is no password and no server check. A visitor is either
//! unauthenticated (typing a name) or authenticated under a name. Signing
//! in remembers the name durably so later visits resume silently.

mod error;

pub use error::LoginRejection;

use eliminator_core::DisplayName;

use super::session_store::{DurableStorage, SavedSession, SessionStore, fits_durable_storage};
use crate::models::CurrentUser;

/// Sign-in state of the landing page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthState {
    /// Showing the name form with the current draft.
    Unauthenticated {
        /// Text typed so far.
        draft: String,
    },
    /// Signed in under a name.
    Authenticated(DisplayName),
}

impl Default for AuthState {
    fn default() -> Self {
        Self::Unauthenticated {
            draft: String::new(),
        }
    }
}

impl AuthState {
    /// State on first display: resumes silently when the visitor is
    /// remembered as registered with a saved name.
    #[must_use]
    pub fn initial(saved: &SavedSession) -> Self {
        saved
            .remembered_user()
            .map_or_else(Self::default, |name| Self::Authenticated(name.clone()))
    }

    /// Submit a draft name.
    ///
    /// On rejection the state stays unauthenticated and keeps the draft.
    ///
    /// # Errors
    ///
    /// Returns a [`LoginRejection`] when the trimmed name is empty or too
    /// long to be stored durably.
    pub fn submit(&mut self, draft: &str) -> Result<DisplayName, LoginRejection> {
        let parsed = DisplayName::parse(draft)
            .map_err(LoginRejection::from)
            .and_then(|name| {
                if fits_durable_storage(name.as_str()) {
                    Ok(name)
                } else {
                    Err(LoginRejection::NameTooLong)
                }
            });

        match parsed {
            Ok(name) => {
                *self = Self::Authenticated(name.clone());
                Ok(name)
            }
            Err(e) => {
                *self = Self::Unauthenticated {
                    draft: draft.to_owned(),
                };
                Err(e)
            }
        }
    }

    /// The signed-in name, if any.
    #[must_use]
    pub const fn user(&self) -> Option<&DisplayName> {
        match self {
            Self::Authenticated(name) => Some(name),
            Self::Unauthenticated { .. } => None,
        }
    }
}

/// Authentication service over a durable session store.
pub struct AuthService<S> {
    store: SessionStore<S>,
}

impl<S: DurableStorage> AuthService<S> {
    /// Create a new authentication service.
    pub const fn new(storage: S) -> Self {
        Self {
            store: SessionStore::new(storage),
        }
    }

    /// Resume a remembered visitor without input.
    pub fn resume(&self) -> Option<CurrentUser> {
        let state = AuthState::initial(&self.store.load());
        state.user().cloned().map(CurrentUser::new)
    }

    /// Sign in with a typed name and remember it.
    ///
    /// Nothing is written when the name is rejected.
    ///
    /// # Errors
    ///
    /// Returns a [`LoginRejection`] when the trimmed name is empty or too
    /// long to be stored durably.
    pub fn log_in(&mut self, draft: &str) -> Result<CurrentUser, LoginRejection> {
        let mut state = AuthState::default();
        let name = state.submit(draft)?;
        self.store.save(&name);
        Ok(CurrentUser::new(name))
    }

    /// Forget the remembered visitor.
    pub fn log_out(&mut self) {
        self.store.clear();
    }

    /// Return the storage, e.g. to emit queued cookies.
    pub fn into_storage(self) -> S {
        self.store.into_storage()
    }
}
