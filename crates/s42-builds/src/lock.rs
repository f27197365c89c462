//! # Per-Game Upload Locks
//!
//! One async mutex per game identifier. The publish path holds a game's
//! guard from listing existing builds until the new build directory has been
//! renamed into place, so version allocation and promotion are serialized
//! per game. Different games never contend.
//!
//! Guards are owned (`OwnedMutexGuard`) so they can move into the blocking
//! extraction task and stay held even if the request future is dropped.

use std::sync::Arc;

use dashmap::DashMap;
use s42_core::GameId;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// Registry of per-game upload locks. Cheap to clone; clones share locks.
///
/// Entries are never evicted: one small mutex per game ever uploaded.
#[derive(Debug, Clone, Default)]
pub struct BuildLocks {
    locks: Arc<DashMap<GameId, Arc<Mutex<()>>>>,
}

impl BuildLocks {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive upload access to `game`.
    pub async fn acquire(&self, game: &GameId) -> OwnedMutexGuard<()> {
        // The map shard guard must be released before awaiting.
        let lock = Arc::clone(self.locks.entry(game.clone()).or_default().value());
        lock.lock_owned().await
    }

    /// Number of games that have had an upload since startup.
    pub fn len(&self) -> usize {
        self.locks.len()
    }

    /// Whether no game has been locked yet.
    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }
}
