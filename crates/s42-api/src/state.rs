//! # Application State
//!
//! Shared state for the Axum application, passed to all route handlers
//! via the `State` extractor. Every collaborator is injected here; the
//! handlers hold no process-wide statics.

use std::path::PathBuf;
use std::sync::Arc;

use s42_builds::BuildStore;
use s42_catalog::CachedCatalog;

use crate::auth::SecretToken;
use crate::middleware::metrics::ApiMetrics;

/// Default listening port.
pub const DEFAULT_PORT: u16 = 1338;

/// Default storage root for extracted builds.
pub const DEFAULT_STORAGE_ROOT: &str = "./games";

/// Server configuration.
///
/// Custom `Debug` redacts the upload secret.
#[derive(Clone)]
pub struct AppConfig {
    /// Port to bind the HTTP server to.
    pub port: u16,
    /// Directory holding `<game>/<version>/` build trees.
    pub storage_root: PathBuf,
    /// Upload secret. If `None`, uploads are refused.
    pub auth_token: Option<SecretToken>,
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// - `PORT` (default 1338)
    /// - `STORAGE_ROOT` (default `./games`)
    /// - `AUTH` (upload secret; unset or empty disables uploads)
    pub fn from_env() -> Result<Self, ConfigError> {
        let port = match std::env::var("PORT") {
            Ok(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidPort(raw.clone()))?,
            Err(_) => DEFAULT_PORT,
        };
        let storage_root = std::env::var_os("STORAGE_ROOT")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STORAGE_ROOT));
        let auth_token = std::env::var("AUTH")
            .ok()
            .filter(|token| !token.is_empty())
            .map(SecretToken::new);

        Ok(Self {
            port,
            storage_root,
            auth_token,
        })
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("port", &self.port)
            .field("storage_root", &self.storage_root)
            .field("auth_token", &self.auth_token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            storage_root: PathBuf::from(DEFAULT_STORAGE_ROOT),
            auth_token: None,
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("PORT must be a port number, got {0:?}")]
    InvalidPort(String),
}

/// Shared application state.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    /// On-disk build storage.
    pub builds: BuildStore,
    /// Remote catalog for the landing page. `None` renders fallback content.
    pub catalog: Option<CachedCatalog>,
    pub metrics: ApiMetrics,
}

impl AppState {
    /// Create state with the given configuration and optional catalog.
    pub fn with_config(config: AppConfig, catalog: Option<CachedCatalog>) -> Self {
        let builds = BuildStore::new(config.storage_root.clone());
        Self {
            config: Arc::new(config),
            builds,
            catalog,
            metrics: ApiMetrics::new(),
        }
    }
}
