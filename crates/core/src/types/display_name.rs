//! Visitor display name type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`DisplayName`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum DisplayNameError {
    /// The input is empty or only whitespace.
    #[error("name cannot be empty")]
    Empty,
}

/// The name a visitor signs in with.
///
/// There is no password and no server-side account; the name is only used
/// to greet the visitor and is remembered in the browser.
///
/// ## Constraints
///
/// - Surrounding whitespace is trimmed
/// - Must not be empty after trimming
///
/// Length is not limited here; where the name is stored decides how much
/// fits.
///
/// ## Examples
///
/// ```
/// use eliminator_core::DisplayName;
///
/// assert_eq!(DisplayName::parse("  Alice ").unwrap().as_str(), "Alice");
///
/// assert!(DisplayName::parse("").is_err());
/// assert!(DisplayName::parse("   ").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct DisplayName(String);

impl DisplayName {
    /// Parse a `DisplayName` from raw input.
    ///
    /// # Errors
    ///
    /// Returns an error if the trimmed input is empty.
    pub fn parse(s: &str) -> Result<Self, DisplayNameError> {
        let trimmed = s.trim();

        if trimmed.is_empty() {
            return Err(DisplayNameError::Empty);
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `DisplayName` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for DisplayName {
    type Err = DisplayNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for DisplayName {
    type Error = DisplayNameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<DisplayName> for String {
    fn from(name: DisplayName) -> Self {
        name.0
    }
}

impl AsRef<str> for DisplayName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_names() {
        assert!(DisplayName::parse("Alice").is_ok());
        assert!(DisplayName::parse("Bob Smith").is_ok());
        assert!(DisplayName::parse("Ọlámidé").is_ok());
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let name = DisplayName::parse("\t Alice \n").unwrap();
        assert_eq!(name.as_str(), "Alice");
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(DisplayName::parse(""), Err(DisplayNameError::Empty));
    }

    #[test]
    fn test_parse_whitespace_only() {
        assert_eq!(DisplayName::parse("   "), Err(DisplayNameError::Empty));
    }

    #[test]
    fn test_parse_long_name() {
        let long = "a".repeat(500);
        assert_eq!(DisplayName::parse(&long).unwrap().as_str().len(), 500);
    }

    #[test]
    fn test_serde_rejects_blank_names() {
        assert!(serde_json::from_str::<DisplayName>("\"  \"").is_err());
        let name: DisplayName = serde_json::from_str("\"Bob\"").unwrap();
        assert_eq!(serde_json::to_string(&name).unwrap(), "\"Bob\"");
    }
}
