//! # Build Listing API
//!
//! Read-only JSON view of a game's builds, in the same newest-first order
//! the play page uses.

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::AppError;
use crate::extractors::require_game_id;
use crate::state::AppState;

/// Builds of one game.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BuildListResponse {
    pub game: String,
    /// Build directory names, newest first.
    pub builds: Vec<String>,
    /// First element of `builds`, if any.
    pub latest: Option<String>,
}

/// Build the listing router.
pub fn router() -> Router<AppState> {
    Router::new().route("/v1/games/:id/builds", get(list_builds))
}

/// GET /v1/games/:id/builds: List a game's builds.
#[utoipa::path(
    get,
    path = "/v1/games/{id}/builds",
    params(("id" = String, Path, description = "Game identifier")),
    responses(
        (status = 200, description = "Builds, newest first", body = BuildListResponse),
        (status = 400, description = "Invalid game identifier"),
    ),
    tag = "builds"
)]
pub(crate) async fn list_builds(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<BuildListResponse>, AppError> {
    let game = require_game_id(Some(id.as_str()))?;
    let builds = state.builds.list_builds(&game).await;
    Ok(Json(BuildListResponse {
        game: game.to_string(),
        latest: builds.first().cloned(),
        builds,
    }))
}
