//! Sign-in validation results.

use thiserror::Error;

use eliminator_core::DisplayNameError;

/// Why a sign-in attempt was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LoginRejection {
    /// The name was empty or only whitespace.
    #[error("please enter your name")]
    EmptyName,

    /// The name is too long to be remembered in the browser.
    #[error("that name is too long")]
    NameTooLong,
}

impl From<DisplayNameError> for LoginRejection {
    fn from(err: DisplayNameError) -> Self {
        match err {
            DisplayNameError::Empty => Self::EmptyName,
        }
    }
}
