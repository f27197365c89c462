//! Catalog client configuration.
//!
//! Defaults point at the production PocketBase instance. Override via
//! environment variables or explicit construction for testing.

use url::Url;

/// Default PocketBase base URL.
pub const DEFAULT_BASE_URL: &str = "https://based.0x2a.fi";

/// Configuration for the content catalog.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// PocketBase base URL.
    pub base_url: Url,
    /// Collection holding one record per game.
    pub games_collection: String,
    /// Collection holding the page data record.
    pub page_collection: String,
    /// Record id of the landing page data.
    pub page_record_id: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
    /// How long fetched content is served from cache, in seconds.
    pub cache_ttl_secs: u64,
}

impl CatalogConfig {
    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `CATALOG_BASE_URL` (default: `https://based.0x2a.fi`)
    /// - `CATALOG_GAMES_COLLECTION` (default: `studio42_game_list`)
    /// - `CATALOG_PAGE_COLLECTION` (default: `studio42_pagedata`)
    /// - `CATALOG_PAGE_RECORD` (default: `hv124z72j9e48zb`)
    /// - `CATALOG_TIMEOUT_SECS` (default: 10)
    /// - `CATALOG_CACHE_TTL_SECS` (default: 300)
    pub fn from_env() -> Result<Self, ConfigError> {
        let base_url = env_url("CATALOG_BASE_URL", DEFAULT_BASE_URL)?;
        let defaults = Self::with_base_url(base_url);
        Ok(Self {
            games_collection: env_or("CATALOG_GAMES_COLLECTION", &defaults.games_collection),
            page_collection: env_or("CATALOG_PAGE_COLLECTION", &defaults.page_collection),
            page_record_id: env_or("CATALOG_PAGE_RECORD", &defaults.page_record_id),
            timeout_secs: env_u64("CATALOG_TIMEOUT_SECS", defaults.timeout_secs),
            cache_ttl_secs: env_u64("CATALOG_CACHE_TTL_SECS", defaults.cache_ttl_secs),
            ..defaults
        })
    }

    /// Default collections and timings against the given base URL.
    pub fn with_base_url(base_url: Url) -> Self {
        Self {
            base_url,
            games_collection: "studio42_game_list".to_string(),
            page_collection: "studio42_pagedata".to_string(),
            page_record_id: "hv124z72j9e48zb".to_string(),
            timeout_secs: 10,
            cache_ttl_secs: 300,
        }
    }
}

fn env_or(var: &str, default: &str) -> String {
    std::env::var(var).unwrap_or_else(|_| default.to_string())
}

fn env_u64(var: &str, default: u64) -> u64 {
    std::env::var(var)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

fn env_url(var: &str, default: &str) -> Result<Url, ConfigError> {
    let raw = std::env::var(var).unwrap_or_else(|_| default.to_string());
    Url::parse(&raw).map_err(|e| ConfigError::InvalidUrl(var.to_string(), e.to_string()))
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid URL for {0}: {1}")]
    InvalidUrl(String, String),
}
