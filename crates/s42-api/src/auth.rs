//! # Upload Authorization
//!
//! Uploads carry a shared secret in the `auth` query parameter. It is
//! compared in constant time against the server secret read from `AUTH`.
//! When no secret is configured every upload is refused.

use subtle::ConstantTimeEq;

use crate::error::AppError;

/// The server-wide upload secret.
///
/// Custom `Debug` redacts the value to prevent credential leakage in logs.
#[derive(Clone)]
pub struct SecretToken(String);

impl SecretToken {
    /// Wrap a secret.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Whether `provided` equals this secret.
    pub fn matches(&self, provided: &str) -> bool {
        constant_time_token_eq(provided, &self.0)
    }
}

impl std::fmt::Debug for SecretToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SecretToken([REDACTED])")
    }
}

/// Constant-time comparison of tokens.
///
/// When lengths differ, performs a dummy comparison so the early return
/// does not depend on how much of the token matched.
fn constant_time_token_eq(provided: &str, expected: &str) -> bool {
    let provided = provided.as_bytes();
    let expected = expected.as_bytes();
    if provided.len() != expected.len() {
        let _ = expected.ct_eq(expected);
        return false;
    }
    provided.ct_eq(expected).into()
}

/// Check the caller's upload token.
///
/// Fails closed: a missing token, a wrong token and an unconfigured server
/// secret are all `401 Unauthorized`.
pub fn authorize_upload(
    provided: Option<&str>,
    expected: Option<&SecretToken>,
) -> Result<(), AppError> {
    let Some(expected) = expected else {
        tracing::warn!("upload rejected: no AUTH secret configured");
        return Err(AppError::Unauthorized("uploads are disabled".into()));
    };
    match provided {
        Some(token) if expected.matches(token) => Ok(()),
        _ => Err(AppError::Unauthorized("invalid auth token".into())),
    }
}
