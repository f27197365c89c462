//! # API Error Types
//!
//! [`AppError`] implements `axum::response::IntoResponse`. Responses are
//! terse `text/plain` bodies carrying the status and a short message.
//! Internal error details are logged, never returned.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use s42_builds::PublishError;
use thiserror::Error;

/// Application-level error returned by every handler.
#[derive(Error, Debug)]
pub enum AppError {
    /// Missing or malformed request input (400).
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Upload token missing or wrong (401).
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Unknown build or game without builds (404).
    #[error("not found: {0}")]
    NotFound(String),

    /// Storage already holds the target build (409).
    #[error("conflict: {0}")]
    Conflict(String),

    /// Upload body over the size limit (413).
    #[error("payload too large: {0}")]
    PayloadTooLarge(String),

    /// Internal server error (500). Message is logged but not returned to client.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// HTTP status code for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let message = match &self {
            Self::Internal(_) => {
                tracing::error!(error = %self, "internal server error");
                "internal error".to_string()
            }
            other => other.to_string(),
        };

        (status, format!("{message}\n")).into_response()
    }
}

impl From<s42_core::ValidationError> for AppError {
    fn from(err: s42_core::ValidationError) -> Self {
        Self::BadRequest(err.to_string())
    }
}

/// Uploads the client can fix are 400, a lost version race is 409, the
/// rest are server faults.
impl From<PublishError> for AppError {
    fn from(err: PublishError) -> Self {
        match &err {
            PublishError::Extract(e) if e.is_client_error() => Self::BadRequest(err.to_string()),
            PublishError::VersionTaken(_) => Self::Conflict(err.to_string()),
            PublishError::Extract(_)
            | PublishError::Storage(_)
            | PublishError::Staging { .. }
            | PublishError::Worker(_) => Self::Internal(err.to_string()),
        }
    }
}
