//! Typed client for the PocketBase records API.
//!
//! | Method | Path | Operation |
//! |--------|------|-----------|
//! | GET | `/api/collections/{games}/records` | Game list |
//! | GET | `/api/collections/{page}/records/{id}` | Landing page data |
//!
//! Every call is attempted once. Callers decide how to degrade.

use std::time::Duration;

use serde::de::DeserializeOwned;
use url::Url;

use crate::config::CatalogConfig;
use crate::error::CatalogError;
use crate::types::{GameEntry, PageRecord, RecordList};

/// Client for the content catalog.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: reqwest::Client,
    config: CatalogConfig,
}

impl CatalogClient {
    /// Create a client from configuration.
    pub fn new(config: CatalogConfig) -> Result<Self, CatalogError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| CatalogError::Http {
                endpoint: "client_init".into(),
                source: e,
            })?;
        Ok(Self { http, config })
    }

    /// The configuration this client was built from.
    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    /// Base URL of the catalog, used to build file links.
    pub fn base_url(&self) -> &Url {
        &self.config.base_url
    }

    /// Fetch every game record.
    ///
    /// Calls `GET {base_url}api/collections/{games}/records`.
    pub async fn games(&self) -> Result<Vec<GameEntry>, CatalogError> {
        let endpoint = format!("GET /collections/{}/records", self.config.games_collection);
        let url = format!(
            "{}api/collections/{}/records",
            self.config.base_url, self.config.games_collection
        );
        let list: RecordList<GameEntry> = self.get_json(&endpoint, &url).await?;
        Ok(list.items)
    }

    /// Fetch the landing page markdown.
    ///
    /// Calls `GET {base_url}api/collections/{page}/records/{id}`.
    pub async fn main_page_markdown(&self) -> Result<String, CatalogError> {
        let endpoint = format!(
            "GET /collections/{}/records/{}",
            self.config.page_collection, self.config.page_record_id
        );
        let url = format!(
            "{}api/collections/{}/records/{}",
            self.config.base_url, self.config.page_collection, self.config.page_record_id
        );
        let record: PageRecord = self.get_json(&endpoint, &url).await?;
        Ok(record.main_text)
    }

    async fn get_json<T: DeserializeOwned>(&self, endpoint: &str, url: &str) -> Result<T, CatalogError> {
        let resp = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| CatalogError::Http {
                endpoint: endpoint.into(),
                source: e,
            })?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(CatalogError::Api {
                endpoint: endpoint.into(),
                status,
                body,
            });
        }

        resp.json().await.map_err(|e| CatalogError::Deserialization {
            endpoint: endpoint.into(),
            source: e,
        })
    }
}
