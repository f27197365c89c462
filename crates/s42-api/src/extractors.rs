//! # Query Parameters & Validation
//!
//! Query strings are deserialized leniently (every field optional) and then
//! validated here, so a missing `id` is a terse 400 rather than axum's
//! deserialization rejection text.

use axum::extract::rejection::QueryRejection;
use axum::extract::Query;
use s42_core::GameId;
use serde::Deserialize;

use crate::error::AppError;

/// `?id=<game>&auth=<token>` on the upload endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct UploadParams {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub auth: Option<String>,
}

/// `?id=<game>&build=<version>` on the play page.
#[derive(Debug, Default, Deserialize)]
pub struct PlayParams {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub build: Option<String>,
}

/// Unwrap a query extraction, mapping rejections to [`AppError::BadRequest`].
pub fn extract_query<T>(result: Result<Query<T>, QueryRejection>) -> Result<T, AppError> {
    result
        .map(|Query(v)| v)
        .map_err(|err| AppError::BadRequest(err.body_text()))
}

/// The `id` parameter as a validated [`GameId`].
///
/// Absent and empty are both "missing"; anything else must pass the
/// path-segment allow-list.
pub fn require_game_id(id: Option<&str>) -> Result<GameId, AppError> {
    match id {
        None | Some("") => Err(AppError::BadRequest("missing game id".into())),
        Some(raw) => Ok(GameId::new(raw)?),
    }
}

/// The optional `build` parameter as a raw build directory name.
///
/// Empty counts as absent. The name is matched against the listed builds
/// as-is, so only values that could never name a single directory are
/// rejected here.
pub fn optional_build(build: Option<&str>) -> Result<Option<&str>, AppError> {
    match build {
        None | Some("") => Ok(None),
        Some("." | "..") => Err(AppError::BadRequest("invalid build".into())),
        Some(raw) if raw.contains(['/', '\\', '\0']) => {
            Err(AppError::BadRequest(format!("invalid build: {raw}")))
        }
        Some(raw) => Ok(Some(raw)),
    }
}
