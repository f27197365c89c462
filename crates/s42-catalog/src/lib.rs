//! # s42-catalog: Content Catalog Client
//!
//! The landing page is assembled from two records held in a PocketBase
//! instance:
//! - the **game list** (`/api/collections/{games}/records`)
//! - the **page data** record carrying the landing page markdown
//!   (`/api/collections/{page}/records/{id}`)
//!
//! [`CatalogClient`] performs the raw, typed fetches. [`CachedCatalog`] is
//! the collaborator handed to request handlers: it owns the expiry policy,
//! renders markdown once per refresh, and never caches failures.

pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod markdown;
pub mod types;

pub use cache::{CachedCatalog, TtlCache};
pub use client::CatalogClient;
pub use config::CatalogConfig;
pub use error::CatalogError;
pub use types::{GameEntry, PageRecord, RecordList};
