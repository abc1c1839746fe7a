//! Run summaries
//!
//! This module condenses a result set into the counts shown at the end
//! of a run, and renders the progress stored in a checkpoint.

use crate::checkpoint::CrawlCheckpoint;
use crate::crawler::{Provenance, ResultRecord};
use std::collections::BTreeMap;

/// Aggregate counts over a set of discovered accounts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Total number of relevant accounts
    pub total_relevant: u64,

    /// Count of accounts per discovery depth
    pub by_depth: BTreeMap<u32, u64>,

    /// Accounts that were configured seeds
    pub from_seeds: u64,

    /// Accounts reached through graph expansion
    pub from_expansion: u64,

    /// Accounts carrying a verified badge
    pub verified: u64,
}

/// Builds a summary from a result map
pub fn summarize_results(results: &BTreeMap<String, ResultRecord>) -> RunSummary {
    let mut by_depth: BTreeMap<u32, u64> = BTreeMap::new();
    let mut from_seeds = 0;
    let mut from_expansion = 0;
    let mut verified = 0;

    for record in results.values() {
        *by_depth.entry(record.discovered_at_depth).or_insert(0) += 1;
        match record.discovered_from {
            Provenance::Seed => from_seeds += 1,
            Provenance::Expansion => from_expansion += 1,
        }
        if record.verified {
            verified += 1;
        }
    }

    RunSummary {
        total_relevant: results.len() as u64,
        by_depth,
        from_seeds,
        from_expansion,
        verified,
    }
}

/// Prints a summary to stdout in a formatted manner
///
/// # Arguments
///
/// * `summary` - The summary to display
pub fn print_summary(summary: &RunSummary) {
    println!("=== Discovery Summary ===\n");

    println!("Relevant accounts: {}", summary.total_relevant);
    println!("  From seeds: {}", summary.from_seeds);
    println!("  From expansion: {}", summary.from_expansion);
    println!("  Verified: {}", summary.verified);
    println!();

    if !summary.by_depth.is_empty() {
        println!("Accounts by depth:");
        for (depth, count) in &summary.by_depth {
            let percentage = if summary.total_relevant > 0 {
                (*count as f64 / summary.total_relevant as f64) * 100.0
            } else {
                0.0
            };
            println!("  Depth {}: {} ({:.1}%)", depth, count, percentage);
        }
        println!();
    }
}

/// Prints the progress recorded in a checkpoint
///
/// # Arguments
///
/// * `checkpoint` - The checkpoint to display
pub fn print_checkpoint_status(checkpoint: &CrawlCheckpoint) {
    println!("=== Checkpoint Status ===\n");

    println!(
        "Saved at: {}",
        checkpoint.saved_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    println!("Configuration hash: {}", checkpoint.config_hash);
    println!();

    println!("Progress:");
    println!("  Current depth: {}", checkpoint.depth);
    println!(
        "  Layer position: {}/{} ({} remaining)",
        checkpoint.cursor,
        checkpoint.frontier.len(),
        checkpoint.remaining_in_layer()
    );
    println!(
        "  Queued for the next layer: {}",
        checkpoint.next_frontier.len()
    );
    println!("  Visited identifiers: {}", checkpoint.visited.len());
    println!(
        "  Relevant accounts so far: {}",
        checkpoint.results.len()
    );
}
