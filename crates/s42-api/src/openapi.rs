//! # OpenAPI Specification Assembly
//!
//! Collects the utoipa-documented routes into one document served at
//! `/openapi.json`. The HTML pages other than `/play` are left out.

use axum::routing::get;
use axum::{Json, Router};
use utoipa::OpenApi;

use crate::state::AppState;

/// Assembled OpenAPI document.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Studio42 Build Server",
        version = "0.2.0",
        description = "Upload, version, list and play game builds.",
        license(name = "MIT")
    ),
    paths(
        crate::routes::upload::upload_file,
        crate::routes::play::play,
        crate::routes::builds::list_builds,
        crate::liveness,
        crate::readiness,
        crate::metrics_report,
    ),
    components(schemas(
        crate::routes::upload::UploadForm,
        crate::routes::builds::BuildListResponse,
        crate::middleware::metrics::MetricsSnapshot,
    )),
    tags(
        (name = "builds", description = "Build upload and retrieval"),
        (name = "health", description = "Probes and counters"),
    )
)]
pub struct ApiDoc;

/// Build the OpenAPI router.
pub fn router() -> Router<AppState> {
    Router::new().route("/openapi.json", get(openapi_json))
}

/// GET /openapi.json: Return the generated OpenAPI specification.
async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
