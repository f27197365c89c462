//! Record types returned by the catalog.
//!
//! Fields use `#[serde(default)]` so records edited in the admin UI with
//! blank or missing fields still deserialize. Unknown fields are ignored.

use serde::{Deserialize, Serialize};
use url::Url;

/// Record list envelope. Pagination fields are ignored; the catalog holds
/// a single page of games.
#[derive(Debug, Clone, Deserialize)]
pub struct RecordList<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
}

/// One game in the catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameEntry {
    #[serde(default)]
    pub id: String,
    /// Display title.
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Storage namespace of the game's builds (the game id used for uploads).
    #[serde(default)]
    pub file_folder: String,
    #[serde(default, rename = "collectionId", alias = "@collectionId")]
    pub collection_id: String,
    /// File name of the cover image within the record.
    #[serde(default)]
    pub img: String,
}

impl GameEntry {
    /// Public URL of the cover image, if the record has one.
    ///
    /// PocketBase serves record files at `/api/files/{collection}/{record}/{file}`.
    pub fn image_url(&self, base_url: &Url) -> Option<String> {
        if self.img.is_empty() || self.id.is_empty() || self.collection_id.is_empty() {
            return None;
        }
        Some(format!(
            "{}api/files/{}/{}/{}",
            base_url, self.collection_id, self.id, self.img
        ))
    }
}

/// The landing page data record.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageRecord {
    #[serde(default)]
    pub main_text: String,
}
