//! File-backed checkpoint store
//!
//! Persists the snapshot as one pretty-printed JSON document. Saves write
//! to a temporary file in the same directory and rename over the target, so
//! a crash mid-write never leaves a truncated checkpoint behind.

use crate::checkpoint::store::{CheckpointError, CheckpointResult, CheckpointStore};
use crate::checkpoint::{CrawlCheckpoint, CHECKPOINT_VERSION};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Checkpoint store backed by a single JSON file
pub struct JsonCheckpointStore {
    path: PathBuf,
}

impl JsonCheckpointStore {
    /// Creates a store writing to the given path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the checkpoint file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "checkpoint".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl CheckpointStore for JsonCheckpointStore {
    fn load(&self) -> CheckpointResult<Option<CrawlCheckpoint>> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let checkpoint: CrawlCheckpoint = serde_json::from_str(&contents)?;
        if checkpoint.version != CHECKPOINT_VERSION {
            return Err(CheckpointError::UnsupportedVersion(checkpoint.version));
        }
        Ok(Some(checkpoint))
    }

    fn save(&self, checkpoint: &CrawlCheckpoint) -> CheckpointResult<()> {
        let json = serde_json::to_string_pretty(checkpoint)?;
        let temp = self.temp_path();
        std::fs::write(&temp, json)?;
        std::fs::rename(&temp, &self.path)?;
        tracing::debug!("Checkpoint saved to {}", self.path.display());
        Ok(())
    }

    fn clear(&self) -> CheckpointResult<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
