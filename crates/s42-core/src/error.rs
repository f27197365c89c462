//! # Validation Errors
//!
//! Errors raised when untrusted input fails to become a domain identifier.

use thiserror::Error;

/// Input rejected by an identifier constructor.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Game identifier is empty.
    #[error("game id must be non-empty")]
    EmptyGameId,

    /// Game identifier contains characters outside the allow-list, or starts with a dot.
    #[error("invalid game id: \"{0}\" (allowed: A-Z a-z 0-9 _ - ., not starting with '.')")]
    InvalidGameId(String),

    /// Game identifier exceeds the maximum length.
    #[error("game id is {len} characters long (max {max})")]
    GameIdTooLong {
        /// Length of the rejected identifier.
        len: usize,
        /// Maximum accepted length.
        max: usize,
    },

    /// Build version is zero or not a plain decimal number.
    #[error("invalid build version: \"{0}\" (expected a positive integer)")]
    InvalidBuildVersion(String),
}
