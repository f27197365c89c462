//! # Build Retrieval Handler
//!
//! `GET /play?id=<game>&build=<name>` lists the game's builds and
//! renders the requested one, or the newest when `build` is absent. The
//! requested name must match a listed build directory exactly. A game
//! without builds gets a 404 empty-state page.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::Router;

use crate::error::AppError;
use crate::extractors::{extract_query, optional_build, require_game_id, PlayParams};
use crate::state::AppState;
use crate::views;

/// Build the play router.
pub fn router() -> Router<AppState> {
    Router::new().route("/play", get(play))
}

/// GET /play: Render the play page for one build.
#[utoipa::path(
    get,
    path = "/play",
    params(
        ("id" = String, Query, description = "Game identifier"),
        ("build" = Option<String>, Query, description = "Build directory name; newest when absent"),
    ),
    responses(
        (status = 200, description = "Play page", body = String, content_type = "text/html"),
        (status = 400, description = "Missing or invalid id or build"),
        (status = 404, description = "No builds, or the requested build does not exist"),
    ),
    tag = "builds"
)]
pub(crate) async fn play(
    State(state): State<AppState>,
    query: Result<Query<PlayParams>, QueryRejection>,
) -> Result<Response, AppError> {
    let params = extract_query(query)?;
    let game = require_game_id(params.id.as_deref())?;
    let requested = optional_build(params.build.as_deref())?;

    let builds = state.builds.list_builds(&game).await;
    let Some(latest) = builds.first() else {
        tracing::debug!(game = %game, "play requested for game without builds");
        return Ok((StatusCode::NOT_FOUND, Html(views::no_builds_page(&game))).into_response());
    };

    let selected = match requested {
        Some(name) => builds
            .iter()
            .find(|b| b.as_str() == name)
            .ok_or_else(|| AppError::NotFound(format!("build not found: {game}/{name}")))?,
        None => latest,
    };

    Ok(Html(views::play_page(&game, &builds, selected)).into_response())
}
