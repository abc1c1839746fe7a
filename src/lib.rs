//! Prospector: a layered account-graph crawler
//!
//! This crate implements a breadth-first crawler that discovers domain-relevant
//! accounts on a social graph. Starting from a configured seed set, it fetches
//! each account, classifies it against a keyword predicate, and expands through
//! relevant accounts' outbound connections layer by layer. Progress is
//! checkpointed after every account so an interrupted run resumes where it
//! stopped, and rate-limit responses from the graph API pause the crawl
//! instead of failing it.

pub mod checkpoint;
pub mod classify;
pub mod config;
pub mod crawler;
pub mod output;
pub mod source;

use thiserror::Error;

/// Main error type for Prospector operations
#[derive(Debug, Error)]
pub enum ProspectorError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Graph source error: {0}")]
    Source(#[from] source::SourceError),

    #[error("Checkpoint error: {0}")]
    Checkpoint(#[from] checkpoint::CheckpointError),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("Quota wait budget exhausted processing '{handle}' ({waits} waits)")]
    QuotaBudgetExhausted { handle: String, waits: u32 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Missing credential: environment variable '{0}' is not set")]
    MissingCredential(String),
}

/// Result type alias for Prospector operations
pub type Result<T> = std::result::Result<T, ProspectorError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use checkpoint::{CheckpointStore, CrawlCheckpoint, JsonCheckpointStore, MemoryCheckpointStore};
pub use classify::{Classifier, KeywordClassifier, ScoringClassifier};
pub use config::Config;
pub use crawler::{CrawlEngine, Provenance, ResultRecord};
pub use source::{AccountRecord, GraphSource, HttpGraphSource, SourceError};
