//! # Fetch-with-Cache
//!
//! [`TtlCache`] is a small keyed cache whose entries go stale after a fixed
//! time-to-live. [`CachedCatalog`] puts one in front of each catalog fetch.
//!
//! The lock is `parking_lot::RwLock` and is never held across an `.await`:
//! a miss releases the lock, fetches, then re-acquires to insert. Two
//! concurrent misses may both fetch; the later insert wins.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::RwLock;

use crate::client::CatalogClient;
use crate::config::CatalogConfig;
use crate::error::CatalogError;
use crate::markdown;
use crate::types::GameEntry;

const LANDING_KEY: &str = "landing";
const GAMES_KEY: &str = "games";

#[derive(Debug)]
struct CachedEntry<T> {
    value: T,
    fetched: Instant,
}

/// Keyed cache with a fixed time-to-live. Clones share entries.
#[derive(Debug)]
pub struct TtlCache<T> {
    ttl: Duration,
    entries: Arc<RwLock<HashMap<String, CachedEntry<T>>>>,
}

impl<T> Clone for TtlCache<T> {
    fn clone(&self) -> Self {
        Self {
            ttl: self.ttl,
            entries: Arc::clone(&self.entries),
        }
    }
}

impl<T: Clone> TtlCache<T> {
    /// Create an empty cache.
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// The value stored under `key`, if it is younger than the TTL.
    pub fn get_fresh(&self, key: &str) -> Option<T> {
        let entries = self.entries.read();
        entries
            .get(key)
            .filter(|entry| entry.fetched.elapsed() < self.ttl)
            .map(|entry| entry.value.clone())
    }

    /// Store `value` under `key`, stamped with the current time.
    pub fn insert(&self, key: impl Into<String>, value: T) {
        self.entries.write().insert(
            key.into(),
            CachedEntry {
                value,
                fetched: Instant::now(),
            },
        );
    }
}

/// Catalog collaborator used by the landing page.
///
/// Serves the rendered landing HTML and the game list from cache while
/// fresh. Fetch errors propagate to the caller and are not cached, so the
/// next request retries.
#[derive(Debug, Clone)]
pub struct CachedCatalog {
    client: CatalogClient,
    pages: TtlCache<String>,
    games: TtlCache<Vec<GameEntry>>,
}

impl CachedCatalog {
    /// Wrap an existing client.
    pub fn new(client: CatalogClient, ttl: Duration) -> Self {
        Self {
            client,
            pages: TtlCache::new(ttl),
            games: TtlCache::new(ttl),
        }
    }

    /// Build the client and cache from configuration.
    pub fn from_config(config: CatalogConfig) -> Result<Self, CatalogError> {
        let ttl = Duration::from_secs(config.cache_ttl_secs);
        Ok(Self::new(CatalogClient::new(config)?, ttl))
    }

    /// The underlying client.
    pub fn client(&self) -> &CatalogClient {
        &self.client
    }

    /// Landing page markdown rendered to HTML.
    pub async fn landing_html(&self) -> Result<String, CatalogError> {
        if let Some(html) = self.pages.get_fresh(LANDING_KEY) {
            return Ok(html);
        }
        let md = self.client.main_page_markdown().await?;
        let html = markdown::to_html(&md);
        tracing::debug!(bytes = html.len(), "refreshed landing page content");
        self.pages.insert(LANDING_KEY, html.clone());
        Ok(html)
    }

    /// Game list from the catalog.
    pub async fn games(&self) -> Result<Vec<GameEntry>, CatalogError> {
        if let Some(games) = self.games.get_fresh(GAMES_KEY) {
            return Ok(games);
        }
        let games = self.client.games().await?;
        tracing::debug!(count = games.len(), "refreshed game list");
        self.games.insert(GAMES_KEY, games.clone());
        Ok(games)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_entry_is_served() {
        let cache = TtlCache::new(Duration::from_secs(60));
        cache.insert("k", 7u32);
        assert_eq!(cache.get_fresh("k"), Some(7));
        assert_eq!(cache.get_fresh("other"), None);
    }

    #[test]
    fn zero_ttl_never_serves() {
        let cache = TtlCache::new(Duration::ZERO);
        cache.insert("k", "v".to_string());
        assert_eq!(cache.get_fresh("k"), None);
    }

    #[test]
    fn entry_expires() {
        let cache = TtlCache::new(Duration::from_millis(20));
        cache.insert("k", 1u8);
        std::thread::sleep(Duration::from_millis(40));
        assert_eq!(cache.get_fresh("k"), None);
    }

    #[test]
    fn clones_share_entries() {
        let cache = TtlCache::new(Duration::from_secs(60));
        let other = cache.clone();
        cache.insert("k", 1u8);
        assert_eq!(other.get_fresh("k"), Some(1));
        other.insert("k", 2u8);
        assert_eq!(cache.get_fresh("k"), Some(2));
    }
}
