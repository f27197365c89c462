//! # s42-builds: Versioned Build Storage
//!
//! Owns everything the server does to the storage root:
//!
//! ```text
//! <root>/<game>/<version>/...        published builds
//! <root>/<game>/.staging-<uuid>/...  extraction in progress
//! ```
//!
//! ## Write path
//!
//! [`BuildStore::publish`] opens the uploaded archive, takes the game's
//! upload lock ([`BuildLocks`]), lists existing builds ([`index`]),
//! allocates the next version ([`allocate`]), extracts into a hidden staging
//! directory ([`extract`]) and renames it into place. A failed upload never
//! leaves a listed directory behind.
//!
//! ## Read path
//!
//! [`BuildStore::list_builds`] rescans the game directory on every call.
//! Nothing is cached; the filesystem is the only source of truth.

pub mod allocate;
pub mod error;
pub mod extract;
pub mod index;
pub mod lock;
pub mod store;

#[cfg(test)]
pub(crate) mod test_support;

pub use allocate::next_version;
pub use error::{ExtractError, PublishError, StorageError};
pub use extract::{extract_archive, open_archive, ExtractSummary};
pub use index::{list_build_dirs, sort_newest_first};
pub use lock::BuildLocks;
pub use store::{BuildStore, PublishedBuild};
