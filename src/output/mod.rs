//! Output module for persisting and summarizing crawl results
//!
//! This module handles:
//! - Writing the discovered-accounts document as pretty-printed JSON
//! - Summarizing a result set for end-of-run reporting
//! - Displaying the progress recorded in a checkpoint

mod summary;

pub use summary::{print_checkpoint_status, print_summary, summarize_results, RunSummary};

use crate::crawler::ResultRecord;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Errors during result output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type OutputResult<T> = Result<T, OutputError>;

/// Writes the result map to disk as a single JSON document
///
/// The map is keyed by handle and serialized pretty-printed, so the
/// document is stable across runs that find the same accounts.
///
/// # Arguments
///
/// * `path` - Destination file path
/// * `results` - Discovered accounts keyed by handle
///
/// # Returns
///
/// * `Ok(())` - Document written
/// * `Err(OutputError)` - Serialization or filesystem failure
pub fn write_results(path: &Path, results: &BTreeMap<String, ResultRecord>) -> OutputResult<()> {
    let json = serde_json::to_string_pretty(results)?;
    fs::write(path, json)?;
    tracing::debug!("Wrote {} result(s) to {}", results.len(), path.display());
    Ok(())
}
