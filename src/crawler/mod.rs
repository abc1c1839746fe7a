//! Crawl orchestration
//!
//! This module contains the layered crawl logic, including:
//! - The current-layer queue and next-layer buffer
//! - Exactly-once visitation bookkeeping
//! - Rate-limit pause arithmetic
//! - The engine driving fetch, classify, expand, and checkpoint

mod backoff;
mod engine;
mod frontier;
mod visited;

pub use backoff::RateLimitHandler;
pub use engine::CrawlEngine;
pub use frontier::LayerFrontier;
pub use visited::VisitedSet;

use crate::checkpoint::JsonCheckpointStore;
use crate::classify::{Classifier, KeywordClassifier, ScoringClassifier};
use crate::config::Config;
use crate::source::{AccountRecord, HttpGraphSource};
use crate::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

/// How an identifier entered the crawl
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provenance {
    /// Listed in the configured seed set
    Seed,
    /// Discovered by expanding a relevant account's connections
    Expansion,
}

/// Record created for each relevant account
///
/// Created exactly once, at the depth where the account was first classified
/// relevant, and never mutated afterwards. Serialized field names match the
/// account payload, followed by the discovery metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultRecord {
    #[serde(rename = "screen_name")]
    pub handle: String,
    #[serde(rename = "name")]
    pub display_name: String,
    pub id: String,
    pub description: String,
    pub followers_count: u64,
    pub following_count: u64,
    pub verified: bool,
    pub profile_url: String,
    pub discovered_at_depth: u32,
    pub discovered_from: Provenance,
}

impl ResultRecord {
    /// Builds the record for an account discovered at the given depth
    pub fn from_account(account: &AccountRecord, profile_base_url: &str, depth: u32) -> Self {
        let discovered_from = if depth == 0 {
            Provenance::Seed
        } else {
            Provenance::Expansion
        };
        Self {
            handle: account.handle.clone(),
            display_name: account.display_name.clone(),
            id: account.id.clone(),
            description: account.description.clone(),
            followers_count: account.followers_count,
            following_count: account.following_count,
            verified: account.verified,
            profile_url: format!(
                "{}/{}",
                profile_base_url.trim_end_matches('/'),
                account.handle
            ),
            discovered_at_depth: depth,
            discovered_from,
        }
    }
}

/// Runs a complete crawl with the default collaborators
///
/// Wires the HTTP graph source, the configured classifier, and the
/// file-backed checkpoint store, then drives the engine to completion.
///
/// # Arguments
///
/// * `config` - The loaded configuration
/// * `config_hash` - Hash of the configuration file, recorded in checkpoints
/// * `fresh` - Discard any existing checkpoint instead of resuming
///
/// # Returns
///
/// The map of relevant accounts keyed by handle
pub async fn crawl(
    config: Config,
    config_hash: String,
    fresh: bool,
) -> Result<BTreeMap<String, ResultRecord>> {
    let source = Arc::new(HttpGraphSource::new(&config.source)?);
    let classifier: Arc<dyn Classifier> = if config.classifier.strict {
        Arc::new(ScoringClassifier::from_config(&config.classifier))
    } else {
        Arc::new(KeywordClassifier::from_config(&config.classifier))
    };
    let store = Arc::new(JsonCheckpointStore::new(&config.output.checkpoint_path));

    let engine = CrawlEngine::new(config, config_hash, source, classifier, store, fresh)?;
    engine.run().await
}
