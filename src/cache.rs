//! In-memory holder for the snapshot currently being served.

use std::sync::{Arc, RwLock};

use crate::domain::Snapshot;

/// Shared slot for the current [`Snapshot`].
///
/// Readers get an `Arc` to a complete snapshot; a refresh swaps the whole
/// snapshot in one step. The lock is only held for the pointer clone or
/// swap, never across a fetch.
#[derive(Debug)]
pub struct SnapshotCache {
    current: RwLock<Arc<Snapshot>>,
}

impl Default for SnapshotCache {
    fn default() -> Self {
        Self::new()
    }
}

impl SnapshotCache {
    pub fn new() -> Self {
        Self::with_snapshot(Snapshot::empty())
    }

    pub fn with_snapshot(snapshot: Snapshot) -> Self {
        Self {
            current: RwLock::new(Arc::new(snapshot)),
        }
    }

    pub fn read(&self) -> Arc<Snapshot> {
        // A poisoned lock still holds a complete snapshot.
        let guard = self.current.read().unwrap_or_else(|e| e.into_inner());
        Arc::clone(&guard)
    }

    pub fn replace(&self, snapshot: Snapshot) {
        let snapshot = Arc::new(snapshot);
        let previous = {
            let mut guard = self.current.write().unwrap_or_else(|e| e.into_inner());
            std::mem::replace(&mut *guard, snapshot)
        };
        // Old snapshot is freed outside the lock once its last reader lets go.
        drop(previous);
    }
}
