//! # Build Versions
//!
//! Builds are stored in directories named by their decimal version number.
//! Versions start at [`BuildVersion::FIRST`] and are assigned once per upload.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Strictly positive build version number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct BuildVersion(u64);

impl BuildVersion {
    /// Version assigned to the first upload of a game.
    pub const FIRST: BuildVersion = BuildVersion(1);

    /// Create a build version, rejecting zero.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidBuildVersion`] for `0`.
    pub fn new(value: u64) -> Result<Self, ValidationError> {
        if value == 0 {
            return Err(ValidationError::InvalidBuildVersion(value.to_string()));
        }
        Ok(Self(value))
    }

    /// Parse a directory name or query value.
    ///
    /// Only plain ASCII digits are accepted: no sign, whitespace, or
    /// leading `+`. Leading zeros are tolerated (`"007"` is version 7).
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidBuildVersion`] if the string is not
    /// a positive decimal integer that fits in `u64`.
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ValidationError::InvalidBuildVersion(s.to_string()));
        }
        let value: u64 = s
            .parse()
            .map_err(|_| ValidationError::InvalidBuildVersion(s.to_string()))?;
        Self::new(value).map_err(|_| ValidationError::InvalidBuildVersion(s.to_string()))
    }

    /// The version following this one. Saturates at `u64::MAX`.
    pub fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }

    /// Access the numeric value.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for BuildVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u64> for BuildVersion {
    type Error = ValidationError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<BuildVersion> for u64 {
    fn from(v: BuildVersion) -> Self {
        v.0
    }
}

impl std::str::FromStr for BuildVersion {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
