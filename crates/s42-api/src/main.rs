//! # s42-api: Binary Entry Point
//!
//! Starts the Axum HTTP server. Binds `0.0.0.0:$PORT` (default 1338).

use s42_api::state::{AppConfig, AppState};
use s42_catalog::{CachedCatalog, CatalogConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env().map_err(|e| {
        tracing::error!("Configuration failed: {e}");
        e
    })?;
    tracing::info!(?config, "configuration loaded");
    if config.auth_token.is_none() {
        tracing::warn!("AUTH is not set; uploads will be rejected");
    }

    let port = config.port;
    let state = AppState::with_config(config, catalog_from_env());
    let app = s42_api::app(state);

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Studio42 build server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// The remote catalog, unless disabled with `CATALOG_DISABLED=1` or misconfigured.
fn catalog_from_env() -> Option<CachedCatalog> {
    if std::env::var("CATALOG_DISABLED").is_ok_and(|v| v == "1") {
        tracing::info!("catalog disabled; landing page will show fallback content");
        return None;
    }
    let config = match CatalogConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!("Catalog not configured: {e}. Landing page will show fallback content.");
            return None;
        }
    };
    match CachedCatalog::from_config(config) {
        Ok(catalog) => {
            tracing::info!(base_url = %catalog.client().base_url(), "catalog client configured");
            Some(catalog)
        }
        Err(e) => {
            tracing::warn!("Failed to create catalog client: {e}");
            None
        }
    }
}
