//! Identity token type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when constructing an [`IdentityToken`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum IdentityError {
    /// The input string is empty or whitespace.
    #[error("identity token cannot be empty")]
    Empty,
    /// The input string is too long.
    #[error("identity token must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
}

/// The user-identifying string that scopes cart requests.
///
/// In practice this is the user's email address, but a value stored directly
/// by the login page is trusted as-is. Only the raw-string fallback requires
/// an `@` (see [`IdentityToken::looks_like_email`]).
///
/// ## Constraints (via [`IdentityToken::parse`])
///
/// - Not empty after trimming
/// - At most 254 characters (RFC 5321 limit)
///
/// ## Examples
///
/// ```
/// use carrito_core::IdentityToken;
///
/// let token = IdentityToken::parse("ana@example.cl").unwrap();
/// assert!(token.looks_like_email());
///
/// assert!(IdentityToken::parse("").is_err());
/// assert!(IdentityToken::parse("   ").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct IdentityToken(String);

impl IdentityToken {
    /// Maximum length of an identity token (RFC 5321).
    pub const MAX_LENGTH: usize = 254;

    /// Parse an `IdentityToken` from a stored string.
    ///
    /// Surrounding whitespace is trimmed.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is blank or longer than 254 characters.
    pub fn parse(s: &str) -> Result<Self, IdentityError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(IdentityError::Empty);
        }

        if s.len() > Self::MAX_LENGTH {
            return Err(IdentityError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }

        Ok(Self(s.to_owned()))
    }

    /// Take a value the login page stored directly, exactly as stored.
    ///
    /// No trimming or length check is applied; only a blank value is refused.
    #[must_use]
    pub fn from_stored(raw: String) -> Option<Self> {
        (!raw.trim().is_empty()).then_some(Self(raw))
    }

    /// Returns the token as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the token and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }

    /// Whether the token contains an `@` symbol.
    #[must_use]
    pub fn looks_like_email(&self) -> bool {
        self.0.contains('@')
    }
}

impl fmt::Display for IdentityToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for IdentityToken {
    type Err = IdentityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for IdentityToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_trims() {
        let token = IdentityToken::parse("  a@b.com \n").unwrap();
        assert_eq!(token.as_str(), "a@b.com");
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(IdentityToken::parse(""), Err(IdentityError::Empty));
        assert_eq!(IdentityToken::parse(" \t"), Err(IdentityError::Empty));
    }

    #[test]
    fn test_parse_too_long() {
        let long = format!("{}@example.com", "a".repeat(250));
        assert!(matches!(
            IdentityToken::parse(&long),
            Err(IdentityError::TooLong { .. })
        ));
    }

    #[test]
    fn test_from_stored_keeps_value_verbatim() {
        let token = IdentityToken::from_stored(" a@b.com ".to_owned()).unwrap();
        assert_eq!(token.as_str(), " a@b.com ");

        let long = format!("{}@example.com", "a".repeat(300));
        assert_eq!(IdentityToken::from_stored(long.clone()).unwrap().as_str(), long);

        assert_eq!(IdentityToken::from_stored(String::new()), None);
        assert_eq!(IdentityToken::from_stored("  ".to_owned()), None);
    }

    #[test]
    fn test_non_email_is_accepted() {
        let token = IdentityToken::parse("usuario-42").unwrap();
        assert!(!token.looks_like_email());
    }

    #[test]
    fn test_from_str() {
        let token: IdentityToken = "a@b.com".parse().unwrap();
        assert_eq!(token.to_string(), "a@b.com");
    }
}
