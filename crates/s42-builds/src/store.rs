//! # Build Store
//!
//! Filesystem-backed store of published builds, rooted at the storage
//! directory (`./games` by default).
//!
//! ## Publication
//!
//! ```text
//! open archive ──► lock game ──► list + allocate ──► extract to .staging-<uuid>
//!                                                          │
//!                                   rename to <version> ◄──┘ (discard staging on error)
//! ```
//!
//! The listing skips hidden directories, so readers never observe a build
//! before its extraction has completed.

use std::fs;
use std::io::{self, Cursor, Read, Seek};
use std::path::{Path, PathBuf};

use bytes::Bytes;
use s42_core::{BuildVersion, GameId};
use uuid::Uuid;
use zip::ZipArchive;

use crate::allocate::next_version;
use crate::error::PublishError;
use crate::extract::{extract_archive, open_archive, ExtractSummary};
use crate::index::list_build_dirs;
use crate::lock::BuildLocks;

/// Name prefix of in-progress extraction directories.
const STAGING_PREFIX: &str = ".staging-";

/// A build that has been extracted and promoted.
#[derive(Debug, Clone)]
pub struct PublishedBuild {
    pub game: GameId,
    pub version: BuildVersion,
    pub path: PathBuf,
    pub summary: ExtractSummary,
}

/// Versioned build storage for all games under one root directory.
#[derive(Debug, Clone)]
pub struct BuildStore {
    root: PathBuf,
    locks: BuildLocks,
}

impl BuildStore {
    /// Create a store rooted at `root`. The directory is created lazily on first upload.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            locks: BuildLocks::new(),
        }
    }

    /// The storage root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding every build of `game`.
    pub fn game_dir(&self, game: &GameId) -> PathBuf {
        self.root.join(game.as_str())
    }

    /// Directory of one build.
    pub fn build_dir(&self, game: &GameId, version: BuildVersion) -> PathBuf {
        self.game_dir(game).join(version.to_string())
    }

    /// Build directory names for `game`, newest first.
    ///
    /// Never fails: a game without uploads has no directory yet, and any
    /// other read failure is logged and reported as "no builds".
    pub async fn list_builds(&self, game: &GameId) -> Vec<String> {
        let dir = self.game_dir(game);
        match tokio::task::spawn_blocking(move || list_build_dirs(&dir)).await {
            Ok(Ok(builds)) => builds,
            Ok(Err(e)) if e.is_missing() => {
                tracing::debug!(game = %game, "no build directory yet");
                Vec::new()
            }
            Ok(Err(e)) => {
                tracing::warn!(game = %game, error = %e, "error looking for game builds");
                Vec::new()
            }
            Err(e) => {
                tracing::error!(game = %game, error = %e, "build listing task failed");
                Vec::new()
            }
        }
    }

    /// Publish an uploaded archive as the next build of `game`.
    ///
    /// The payload is validated as a zip archive before any directory is
    /// created. Extraction and promotion run on the blocking pool while the
    /// game's upload lock is held.
    pub async fn publish(&self, game: &GameId, payload: Bytes) -> Result<PublishedBuild, PublishError> {
        let archive = open_archive(Cursor::new(payload))?;

        let guard = self.locks.acquire(game).await;
        let game_dir = self.game_dir(game);
        let staging = game_dir.join(format!("{STAGING_PREFIX}{}", Uuid::new_v4()));

        let (version, path, summary) = tokio::task::spawn_blocking(move || {
            let outcome = stage_and_promote(archive, &game_dir, &staging);
            drop(guard);
            outcome
        })
        .await
        .map_err(|e| PublishError::Worker(e.to_string()))??;

        tracing::info!(
            game = %game,
            version = %version,
            files = summary.files,
            bytes = summary.bytes,
            "published build"
        );

        Ok(PublishedBuild {
            game: game.clone(),
            version,
            path,
            summary,
        })
    }
}

/// Allocate a version, extract into `staging`, and rename it into place.
fn stage_and_promote<R: Read + Seek>(
    mut archive: ZipArchive<R>,
    game_dir: &Path,
    staging: &Path,
) -> Result<(BuildVersion, PathBuf, ExtractSummary), PublishError> {
    let existing = match list_build_dirs(game_dir) {
        Ok(builds) => builds,
        Err(e) if e.is_missing() => Vec::new(),
        Err(e) => return Err(e.into()),
    };
    let version = next_version(&existing);
    let target = game_dir.join(version.to_string());

    fs::create_dir_all(staging).map_err(|source| PublishError::Staging {
        path: staging.to_path_buf(),
        source,
    })?;

    let outcome = extract_archive(&mut archive, staging)
        .map_err(PublishError::from)
        .and_then(|summary| promote(staging, &target, version).map(|()| summary));

    match outcome {
        Ok(summary) => Ok((version, target, summary)),
        Err(e) => {
            tracing::warn!(version = %version, error = %e, "discarding failed build");
            discard(staging);
            Err(e)
        }
    }
}

fn promote(staging: &Path, target: &Path, version: BuildVersion) -> Result<(), PublishError> {
    if target.exists() {
        return Err(PublishError::VersionTaken(version));
    }
    fs::rename(staging, target).map_err(|source| PublishError::Staging {
        path: target.to_path_buf(),
        source,
    })
}

fn discard(staging: &Path) {
    if let Err(e) = fs::remove_dir_all(staging) {
        if e.kind() != io::ErrorKind::NotFound {
            tracing::error!(path = %staging.display(), error = %e, "failed to remove staging directory");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExtractError;
    use crate::test_support::{web_build, zip_bytes, Entry};
    use std::collections::HashSet;

    fn game(id: &str) -> GameId {
        GameId::new(id).unwrap()
    }

    fn dir_names(path: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(path)
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        names.sort();
        names
    }

    #[tokio::test]
    async fn first_upload_is_version_one() {
        let root = tempfile::tempdir().unwrap();
        let store = BuildStore::new(root.path());

        let build = store.publish(&game("pong"), Bytes::from(web_build())).await.unwrap();

        assert_eq!(build.version, BuildVersion::FIRST);
        assert_eq!(build.path, root.path().join("pong/1"));
        assert!(build.path.join("index.html").is_file());
        assert_eq!(build.summary.files, 3);
    }

    #[tokio::test]
    async fn sequential_uploads_increment_by_one() {
        let root = tempfile::tempdir().unwrap();
        let store = BuildStore::new(root.path());
        let pong = game("pong");

        let first = store.publish(&pong, Bytes::from(web_build())).await.unwrap();
        let second = store.publish(&pong, Bytes::from(web_build())).await.unwrap();

        assert_eq!(second.version.get(), first.version.get() + 1);
        assert_eq!(store.list_builds(&pong).await, vec!["2", "1"]);
    }

    #[tokio::test]
    async fn continues_after_double_digit_history() {
        let root = tempfile::tempdir().unwrap();
        let store = BuildStore::new(root.path());
        let pong = game("pong");
        for v in ["1", "2", "10"] {
            fs::create_dir_all(store.game_dir(&pong).join(v)).unwrap();
        }

        let build = store.publish(&pong, Bytes::from(web_build())).await.unwrap();
        assert_eq!(build.version.get(), 11);
    }

    #[tokio::test]
    async fn list_builds_for_unknown_game_is_empty() {
        let root = tempfile::tempdir().unwrap();
        let store = BuildStore::new(root.path());
        assert!(store.list_builds(&game("ghost")).await.is_empty());
    }

    #[tokio::test]
    async fn invalid_payload_touches_nothing() {
        let root = tempfile::tempdir().unwrap();
        let store = BuildStore::new(root.path());

        let err = store
            .publish(&game("pong"), Bytes::from_static(b"not a zip"))
            .await
            .unwrap_err();

        assert!(matches!(err, PublishError::Extract(ExtractError::InvalidArchive(_))));
        assert!(!root.path().join("pong").exists());
    }

    #[tokio::test]
    async fn unsafe_archive_leaves_no_build_and_no_staging() {
        let root = tempfile::tempdir().unwrap();
        let store = BuildStore::new(root.path());
        let pong = game("pong");
        let evil = zip_bytes(&[
            Entry::File("index.html", b"ok"),
            Entry::File("../../escape.txt", b"pwned"),
        ]);

        let err = store.publish(&pong, Bytes::from(evil)).await.unwrap_err();

        assert!(matches!(err, PublishError::Extract(ExtractError::UnsafeEntry { .. })));
        assert!(store.list_builds(&pong).await.is_empty());
        assert!(dir_names(&store.game_dir(&pong)).is_empty());
        assert!(!root.path().join("escape.txt").exists());
    }

    #[tokio::test]
    async fn failed_upload_does_not_consume_a_version() {
        let root = tempfile::tempdir().unwrap();
        let store = BuildStore::new(root.path());
        let pong = game("pong");

        store.publish(&pong, Bytes::from(web_build())).await.unwrap();
        let evil = zip_bytes(&[Entry::File("../x", b"pwned")]);
        assert!(store.publish(&pong, Bytes::from(evil)).await.is_err());
        let next = store.publish(&pong, Bytes::from(web_build())).await.unwrap();

        assert_eq!(next.version.get(), 2);
    }

    #[test]
    fn existing_target_is_reported_as_taken() {
        let root = tempfile::tempdir().unwrap();
        let game_dir = root.path().join("pong");
        let staging = game_dir.join(".staging-test");
        fs::create_dir_all(&staging).unwrap();
        fs::create_dir_all(game_dir.join("3")).unwrap();

        let err = promote(&staging, &game_dir.join("3"), BuildVersion::new(3).unwrap()).unwrap_err();
        assert!(matches!(err, PublishError::VersionTaken(v) if v.get() == 3));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_uploads_get_distinct_versions() {
        let root = tempfile::tempdir().unwrap();
        let store = BuildStore::new(root.path());
        let pong = game("pong");

        let tasks: Vec<_> = (0..8)
            .map(|_| {
                let store = store.clone();
                let pong = pong.clone();
                tokio::spawn(async move { store.publish(&pong, Bytes::from(web_build())).await })
            })
            .collect();

        let mut versions = HashSet::new();
        for task in tasks {
            let build = task.await.unwrap().unwrap();
            assert!(versions.insert(build.version.get()), "duplicate version {}", build.version);
        }

        assert_eq!(versions, (1..=8).collect::<HashSet<u64>>());
        assert_eq!(store.list_builds(&pong).await.len(), 8);
    }
}
