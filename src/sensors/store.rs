use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use std::sync::Arc;

use super::Snapshot;

/// The stored snapshot plus bookkeeping about when it landed
#[derive(Debug, Clone)]
pub struct StoredSnapshot {
    pub sensors: Arc<Snapshot>,
    /// None until the first successful fetch
    pub updated_at: Option<DateTime<Utc>>,
    /// Bumped on every replace; 0 means never fetched
    pub generation: u64,
}

/// Most recent snapshot, shared across requests.
///
/// Writers swap in a whole new `Arc<Snapshot>`, readers clone the `Arc`. A reader
/// therefore always sees one complete fetch.
pub struct SnapshotStore {
    inner: RwLock<StoredSnapshot>,
}

impl SnapshotStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(StoredSnapshot {
                sensors: Arc::new(Snapshot::empty()),
                updated_at: None,
                generation: 0,
            }),
        }
    }

    /// Replace the stored snapshot wholesale. Returns the snapshot as stored.
    pub fn replace(&self, snapshot: Snapshot) -> Arc<Snapshot> {
        let sensors = Arc::new(snapshot);
        let mut g = self.inner.write();
        g.sensors = sensors.clone();
        g.updated_at = Some(Utc::now());
        g.generation += 1;
        sensors
    }

    pub fn current(&self) -> Arc<Snapshot> {
        self.inner.read().sensors.clone()
    }

    pub fn stored(&self) -> StoredSnapshot {
        self.inner.read().clone()
    }

    pub fn generation(&self) -> u64 {
        self.inner.read().generation
    }

    pub fn len(&self) -> usize {
        self.inner.read().sensors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for SnapshotStore {
    fn default() -> Self {
        Self::new()
    }
}
