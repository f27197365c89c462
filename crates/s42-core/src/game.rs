//! # Game Identifiers
//!
//! A [`GameId`] names a game's storage namespace and is joined directly onto
//! the storage root (`<root>/<game>/<version>/`). Construction is the only
//! sanitization layer between request input and the filesystem.
//!
//! ## Validation
//!
//! - 1 to [`GameId::MAX_LEN`] characters
//! - only ASCII letters, digits, `_`, `-` and `.`
//! - must not start with `.` (rules out `.`, `..` and hidden staging names)

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Sanitized game identifier, safe to use as a single path segment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct GameId(String);

impl GameId {
    /// Maximum identifier length in characters.
    pub const MAX_LEN: usize = 128;

    /// Create a game identifier, validating it against the allow-list.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyGameId`], [`ValidationError::GameIdTooLong`]
    /// or [`ValidationError::InvalidGameId`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let s = value.into();
        Self::validate(&s)?;
        Ok(Self(s))
    }

    fn validate(s: &str) -> Result<(), ValidationError> {
        if s.is_empty() {
            return Err(ValidationError::EmptyGameId);
        }
        if s.len() > Self::MAX_LEN {
            return Err(ValidationError::GameIdTooLong {
                len: s.len(),
                max: Self::MAX_LEN,
            });
        }
        if s.starts_with('.') {
            return Err(ValidationError::InvalidGameId(s.to_string()));
        }
        let allowed = |c: char| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.');
        if !s.chars().all(allowed) {
            return Err(ValidationError::InvalidGameId(s.to_string()));
        }
        Ok(())
    }

    /// Access the identifier string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for GameId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for GameId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for GameId {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<GameId> for String {
    fn from(id: GameId) -> Self {
        id.0
    }
}

impl std::str::FromStr for GameId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}
