//! Checkpoint store trait and error types

use crate::checkpoint::CrawlCheckpoint;
use thiserror::Error;

/// Errors that can occur during checkpoint operations
#[derive(Debug, Error)]
pub enum CheckpointError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Unsupported checkpoint version: {0}")]
    UnsupportedVersion(u32),
}

/// Result type for checkpoint operations
pub type CheckpointResult<T> = Result<T, CheckpointError>;

/// Trait for checkpoint persistence backends
///
/// The engine owns the in-memory crawl state; stores only serialize and
/// deserialize complete snapshots handed to them. Every save replaces the
/// previous snapshot entirely.
pub trait CheckpointStore: Send + Sync {
    /// Loads the stored snapshot, or `None` when no checkpoint exists
    ///
    /// A snapshot that exists but cannot be decoded, or that carries an
    /// unsupported version, is an error rather than `None`.
    fn load(&self) -> CheckpointResult<Option<CrawlCheckpoint>>;

    /// Persists a snapshot, replacing any previous one
    fn save(&self, checkpoint: &CrawlCheckpoint) -> CheckpointResult<()>;

    /// Removes the stored snapshot
    ///
    /// Clearing when no snapshot exists is not an error.
    fn clear(&self) -> CheckpointResult<()>;
}
