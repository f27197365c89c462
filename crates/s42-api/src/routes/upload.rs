//! # Upload Handler
//!
//! ```text
//! GET  /upload?id=<game>&auth=<token>       upload form
//! POST /uploadFile?id=<game>&auth=<token>   multipart field `game` = zip archive
//! ```
//!
//! `POST /uploadFile` checks, in order: the token (401, nothing touched),
//! the game id (400), the multipart body and its `game` field (400). Only
//! then is the payload handed to [`s42_builds::BuildStore::publish`].

use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::rejection::QueryRejection;
use axum::extract::{DefaultBodyLimit, Multipart, Query, State};
use axum::http::StatusCode;
use axum::response::Html;
use axum::routing::{get, post};
use axum::Router;
use bytes::Bytes;
use utoipa::ToSchema;

use crate::auth::authorize_upload;
use crate::error::AppError;
use crate::extractors::{extract_query, require_game_id, UploadParams};
use crate::state::AppState;
use crate::views;

/// Largest accepted upload body, 500 MiB.
pub const MAX_UPLOAD_BYTES: usize = 500 << 20;

/// Multipart field carrying the archive.
pub const GAME_FIELD: &str = "game";

/// Confirmation body of a successful upload.
pub const UPLOAD_OK: &str = "Successfully Uploaded File\n";

/// Multipart body of `POST /uploadFile`.
#[derive(Debug, ToSchema)]
pub struct UploadForm {
    /// Zip archive of the build; `index.html` at the archive root.
    #[schema(value_type = String, format = Binary)]
    pub game: Vec<u8>,
}

/// Build the upload router.
pub fn router() -> Router<AppState> {
    Router::new().route("/upload", get(upload_form)).route(
        "/uploadFile",
        post(upload_file).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
    )
}

/// GET /upload: Render the upload form.
async fn upload_form(
    query: Result<Query<UploadParams>, QueryRejection>,
) -> Result<Html<String>, AppError> {
    let params = extract_query(query)?;
    let game = require_game_id(params.id.as_deref())?;
    Ok(Html(views::upload_page(&game, params.auth.as_deref().unwrap_or(""))))
}

/// POST /uploadFile: Publish an uploaded archive as the game's next build.
#[utoipa::path(
    post,
    path = "/uploadFile",
    params(
        ("id" = String, Query, description = "Game identifier"),
        ("auth" = String, Query, description = "Upload secret"),
    ),
    request_body(content = UploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Build published", body = String, content_type = "text/plain"),
        (status = 400, description = "Missing id, missing field, or invalid archive"),
        (status = 401, description = "Missing or wrong upload secret"),
        (status = 409, description = "Target build already exists"),
        (status = 413, description = "Body over 500 MiB"),
    ),
    tag = "builds"
)]
pub(crate) async fn upload_file(
    State(state): State<AppState>,
    query: Result<Query<UploadParams>, QueryRejection>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<&'static str, AppError> {
    let params = extract_query(query)?;
    authorize_upload(params.auth.as_deref(), state.config.auth_token.as_ref())?;
    let game = require_game_id(params.id.as_deref())?;

    let mut multipart = multipart.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let payload = read_game_field(&mut multipart).await?;
    tracing::debug!(game = %game, bytes = payload.len(), "received build archive");

    state.builds.publish(&game, payload).await?;
    state.metrics.record_upload();

    Ok(UPLOAD_OK)
}

/// Buffer the first `game` field. Other fields are skipped.
async fn read_game_field(multipart: &mut Multipart) -> Result<Bytes, AppError> {
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() == Some(GAME_FIELD) {
            return field.bytes().await.map_err(multipart_error);
        }
    }
    Err(AppError::BadRequest(format!(
        "missing \"{GAME_FIELD}\" file field"
    )))
}

fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(err.body_text())
    } else {
        AppError::BadRequest(err.body_text())
    }
}
