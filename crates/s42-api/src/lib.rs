//! # s42-api: Studio42 Build Server
//!
//! Accepts zip uploads of game builds, stores each as the next numbered
//! version under the storage root, and serves them for play. The landing
//! page is assembled from a remote content catalog.
//!
//! ## API Surface
//!
//! | Route                       | Module                 | Purpose                          |
//! |-----------------------------|------------------------|----------------------------------|
//! | `GET /`                     | [`routes::home`]       | Landing page                     |
//! | `GET /upload`               | [`routes::upload`]     | Upload form                      |
//! | `POST /uploadFile`          | [`routes::upload`]     | Publish a build                  |
//! | `GET /play`                 | [`routes::play`]       | Play a build                     |
//! | `GET /games/*`              | `ServeDir`             | Extracted build files            |
//! | `GET /v1/games/:id/builds`  | [`routes::builds`]     | Build listing (JSON)             |
//! | `GET /openapi.json`         | [`openapi`]            | OpenAPI document                 |
//! | `GET /health/*`             | this module            | Probes and counters              |
//!
//! ## Middleware Stack (execution order)
//!
//! ```text
//! TraceLayer → MetricsMiddleware → Handler
//! ```
//!
//! Health probes are mounted outside both layers.

pub mod auth;
pub mod error;
pub mod extractors;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod state;
pub mod views;

use axum::extract::State;
use axum::middleware::from_fn;
use axum::routing::get;
use axum::{Json, Router};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::middleware::metrics::MetricsSnapshot;

pub use error::AppError;
pub use state::{AppConfig, AppState};

/// Assemble the full application router with all routes and middleware.
pub fn app(state: AppState) -> Router {
    let metrics = state.metrics.clone();
    let builds = ServeDir::new(state.config.storage_root.clone());

    let site = Router::new()
        .merge(routes::home::router())
        .merge(routes::upload::router())
        .merge(routes::play::router())
        .merge(routes::builds::router())
        .merge(openapi::router())
        .nest_service("/games", builds)
        .layer(from_fn(middleware::metrics::metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(axum::Extension(metrics))
        .with_state(state.clone());

    let health = Router::new()
        .route("/health/liveness", get(liveness))
        .route("/health/readiness", get(readiness))
        .route("/health/metrics", get(metrics_report))
        .with_state(state);

    Router::new().merge(health).merge(site)
}

/// Liveness probe: always returns 200 if the process is running.
#[utoipa::path(
    get,
    path = "/health/liveness",
    responses((status = 200, description = "Process is up", body = String)),
    tag = "health"
)]
pub(crate) async fn liveness() -> &'static str {
    "ok"
}

/// Readiness probe: returns 200 when the application is ready to serve.
#[utoipa::path(
    get,
    path = "/health/readiness",
    responses((status = 200, description = "Ready to serve", body = String)),
    tag = "health"
)]
pub(crate) async fn readiness() -> &'static str {
    "ready"
}

/// Request and upload counters.
#[utoipa::path(
    get,
    path = "/health/metrics",
    responses((status = 200, description = "Counter snapshot", body = MetricsSnapshot)),
    tag = "health"
)]
pub(crate) async fn metrics_report(State(state): State<AppState>) -> Json<MetricsSnapshot> {
    Json(state.metrics.snapshot())
}
