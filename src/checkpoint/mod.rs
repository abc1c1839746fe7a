//! Crawl checkpoint snapshots
//!
//! This module defines the versioned snapshot the engine persists after
//! every account transition and layer boundary, together with the store
//! implementations:
//! - [`JsonCheckpointStore`] - one JSON file, replaced atomically per save
//! - [`MemoryCheckpointStore`] - in-process store for tests and ephemeral runs
//!
//! A snapshot captures the complete resumable state of a run: the current
//! layer and position within it, the buffer for the next layer, every
//! identifier ever visited, and all result records created so far. Restoring
//! a snapshot and continuing is indistinguishable from never having stopped.

mod json_store;
mod memory;
mod store;

pub use json_store::JsonCheckpointStore;
pub use memory::MemoryCheckpointStore;
pub use store::{CheckpointError, CheckpointResult, CheckpointStore};

use crate::crawler::ResultRecord;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Current snapshot format version
pub const CHECKPOINT_VERSION: u32 = 1;

/// Complete snapshot of a crawl in progress
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrawlCheckpoint {
    /// Snapshot format version
    pub version: u32,

    /// When this snapshot was written
    pub saved_at: DateTime<Utc>,

    /// Hash of the configuration the run started with
    pub config_hash: String,

    /// Index of the layer currently being processed
    pub depth: u32,

    /// Position within the current layer; identifiers before it are done
    pub cursor: usize,

    /// The current layer, in processing order
    pub frontier: Vec<String>,

    /// Accumulated discoveries for the next layer, not yet deduplicated
    pub next_frontier: Vec<String>,

    /// Every identifier ever dequeued, across all layers
    pub visited: BTreeSet<String>,

    /// Result records created so far, keyed by handle
    pub results: BTreeMap<String, ResultRecord>,
}

impl CrawlCheckpoint {
    /// Creates a snapshot stamped with the current version and time
    pub fn new(
        config_hash: String,
        depth: u32,
        cursor: usize,
        frontier: Vec<String>,
        next_frontier: Vec<String>,
        visited: BTreeSet<String>,
        results: BTreeMap<String, ResultRecord>,
    ) -> Self {
        Self {
            version: CHECKPOINT_VERSION,
            saved_at: Utc::now(),
            config_hash,
            depth,
            cursor,
            frontier,
            next_frontier,
            visited,
            results,
        }
    }

    /// Number of identifiers left in the current layer
    pub fn remaining_in_layer(&self) -> usize {
        self.frontier.len().saturating_sub(self.cursor)
    }
}
