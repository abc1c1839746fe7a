//! In-memory checkpoint store
//!
//! Holds the latest snapshot in process memory. Used by tests and by runs
//! that explicitly opt out of durability.

use crate::checkpoint::store::{CheckpointResult, CheckpointStore};
use crate::checkpoint::CrawlCheckpoint;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Checkpoint store keeping the snapshot in memory
#[derive(Default)]
pub struct MemoryCheckpointStore {
    snapshot: Mutex<Option<CrawlCheckpoint>>,
    saves: AtomicUsize,
}

impl MemoryCheckpointStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of saves performed so far
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    /// Copy of the latest snapshot, if any
    pub fn latest(&self) -> Option<CrawlCheckpoint> {
        self.snapshot.lock().unwrap().clone()
    }
}

impl CheckpointStore for MemoryCheckpointStore {
    fn load(&self) -> CheckpointResult<Option<CrawlCheckpoint>> {
        Ok(self.snapshot.lock().unwrap().clone())
    }

    fn save(&self, checkpoint: &CrawlCheckpoint) -> CheckpointResult<()> {
        *self.snapshot.lock().unwrap() = Some(checkpoint.clone());
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn clear(&self) -> CheckpointResult<()> {
        *self.snapshot.lock().unwrap() = None;
        Ok(())
    }
}
