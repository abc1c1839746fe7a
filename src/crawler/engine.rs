//! Crawl engine
//!
//! Drives the layered crawl: dequeues identifiers from the current layer,
//! fetches and classifies each one, expands relevant accounts into the
//! next-layer buffer, and persists a checkpoint after every identifier and
//! at every layer boundary. Quota signals pause the loop in place and the
//! same call is retried after the wait; any other fetch failure drops the
//! single identifier for the run.

use crate::checkpoint::{CheckpointStore, CrawlCheckpoint};
use crate::classify::Classifier;
use crate::config::Config;
use crate::crawler::{LayerFrontier, RateLimitHandler, ResultRecord, VisitedSet};
use crate::output;
use crate::source::{AccountRecord, GraphSource, SourceError};
use crate::{ProspectorError, Result};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

/// What became of a dequeued identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum IdentifierOutcome {
    /// Fetched and classified; API calls were consumed
    Processed,
    /// Dropped after a non-quota fetch failure
    Dropped,
}

/// The layered crawl engine
///
/// Exclusively owns all in-memory crawl state. Collaborators are injected
/// as trait objects so tests can substitute scripted sources and in-memory
/// stores.
pub struct CrawlEngine {
    config: Config,
    config_hash: String,
    source: Arc<dyn GraphSource>,
    classifier: Arc<dyn Classifier>,
    store: Arc<dyn CheckpointStore>,
    backoff: RateLimitHandler,

    depth: u32,
    frontier: LayerFrontier,
    visited: VisitedSet,
    results: BTreeMap<String, ResultRecord>,
}

impl CrawlEngine {
    /// Creates an engine, resuming from a stored checkpoint unless `fresh`
    ///
    /// # Arguments
    ///
    /// * `config` - The loaded configuration
    /// * `config_hash` - Hash of the configuration file
    /// * `source` - Account graph backend
    /// * `classifier` - Relevance predicate
    /// * `store` - Checkpoint persistence
    /// * `fresh` - Discard any existing checkpoint instead of resuming
    pub fn new(
        config: Config,
        config_hash: String,
        source: Arc<dyn GraphSource>,
        classifier: Arc<dyn Classifier>,
        store: Arc<dyn CheckpointStore>,
        fresh: bool,
    ) -> Result<Self> {
        let backoff = RateLimitHandler::from_config(&config.rate_limit);
        let frontier = LayerFrontier::new(config.crawl.seeds.clone());
        let mut engine = Self {
            config,
            config_hash,
            source,
            classifier,
            store,
            backoff,
            depth: 0,
            frontier,
            visited: VisitedSet::new(),
            results: BTreeMap::new(),
        };

        if fresh {
            engine.store.clear()?;
            tracing::info!("Starting fresh crawl (any previous checkpoint discarded)");
        } else if let Some(checkpoint) = engine.store.load()? {
            engine.restore(checkpoint);
        } else {
            tracing::info!("No checkpoint found, starting new crawl");
        }

        Ok(engine)
    }

    fn restore(&mut self, checkpoint: CrawlCheckpoint) {
        if checkpoint.config_hash != self.config_hash {
            tracing::warn!(
                "Checkpoint was written under a different configuration (hash {}, current {}); continuing with the current settings",
                checkpoint.config_hash,
                self.config_hash
            );
        }
        tracing::info!(
            "Resuming from checkpoint saved {}: depth {}, position {}/{}, {} visited, {} result(s)",
            checkpoint.saved_at.format("%Y-%m-%d %H:%M:%S"),
            checkpoint.depth,
            checkpoint.cursor,
            checkpoint.frontier.len(),
            checkpoint.visited.len(),
            checkpoint.results.len()
        );
        self.depth = checkpoint.depth;
        self.frontier = LayerFrontier::restore(
            checkpoint.frontier,
            checkpoint.cursor,
            checkpoint.next_frontier,
        );
        self.visited = VisitedSet::restore(checkpoint.visited);
        self.results = checkpoint.results;
    }

    /// Runs the crawl to completion
    ///
    /// Processes layers until the configured depth is reached or a layer
    /// closes empty, writes the results document, deletes the checkpoint,
    /// and returns the result map.
    pub async fn run(mut self) -> Result<BTreeMap<String, ResultRecord>> {
        tracing::info!(
            "Crawl started: {} identifier(s) in layer {}, max depth {}",
            self.frontier.current_layer().len(),
            self.depth,
            self.config.crawl.max_depth
        );

        loop {
            if self.depth >= self.config.crawl.max_depth {
                tracing::info!(
                    "Reached maximum depth {}, stopping",
                    self.config.crawl.max_depth
                );
                break;
            }
            if self.frontier.current_layer().is_empty() {
                tracing::info!("Layer {} is empty, stopping early", self.depth);
                break;
            }

            self.process_layer().await?;

            self.frontier.close_layer();
            self.depth += 1;
            self.save_checkpoint()?;
            tracing::info!(
                "Layer {} closed: {} identifier(s) queued at depth {}, {} visited, {} result(s) so far",
                self.depth - 1,
                self.frontier.current_layer().len(),
                self.depth,
                self.visited.len(),
                self.results.len()
            );
        }

        self.finish()
    }

    async fn process_layer(&mut self) -> Result<()> {
        tracing::info!(
            "Processing layer {}: {} identifier(s), starting at position {}",
            self.depth,
            self.frontier.current_layer().len(),
            self.frontier.cursor()
        );

        while let Some(handle) = self.frontier.peek().map(str::to_string) {
            if self.visited.contains(&handle) {
                tracing::debug!("Skipping {}: already visited", handle);
                self.frontier.advance();
                continue;
            }

            // Visited before the fetch: a crash mid-fetch abandons the
            // identifier on resume instead of retrying it forever. The
            // quota loop below retries regardless of this mark.
            self.visited.add(handle.clone());

            let outcome = self.process_identifier(&handle).await?;
            self.frontier.advance();
            self.save_checkpoint()?;

            if outcome == IdentifierOutcome::Processed {
                self.pace().await;
            }
        }
        Ok(())
    }

    async fn process_identifier(&mut self, handle: &str) -> Result<IdentifierOutcome> {
        let account = match self.fetch_account_with_retry(handle).await? {
            Some(account) => account,
            None => return Ok(IdentifierOutcome::Dropped),
        };

        if !self.classifier.is_relevant(&account) {
            tracing::info!(
                "{}: not relevant ({} followers)",
                handle,
                account.followers_count
            );
            return Ok(IdentifierOutcome::Processed);
        }

        let record = ResultRecord::from_account(
            &account,
            &self.config.source.profile_base_url,
            self.depth,
        );
        self.results.insert(handle.to_string(), record);
        tracing::info!(
            "{}: relevant at depth {} ({} followers, {} result(s) total)",
            handle,
            self.depth,
            account.followers_count,
            self.results.len()
        );

        self.expand(&account).await?;
        Ok(IdentifierOutcome::Processed)
    }

    async fn expand(&mut self, account: &AccountRecord) -> Result<()> {
        if account.following_count > self.config.crawl.expansion_skip_threshold {
            tracing::info!(
                "Not expanding {}: follows {} accounts (threshold {})",
                account.handle,
                account.following_count,
                self.config.crawl.expansion_skip_threshold
            );
            return Ok(());
        }

        let cap = account
            .following_count
            .min(self.config.crawl.max_outbound_fetch);
        if cap == 0 {
            return Ok(());
        }

        let connections = match self
            .fetch_connections_with_retry(&account.id, &account.handle, cap)
            .await?
        {
            Some(connections) => connections,
            None => return Ok(()),
        };

        let total = connections.len();
        let mut queued = 0usize;
        for connection in connections {
            if self.visited.contains(&connection.handle) {
                continue;
            }
            self.frontier.push_next(connection.handle);
            queued += 1;
        }
        tracing::info!(
            "Expanded {}: {} connection(s) fetched, {} queued for the next layer",
            account.handle,
            total,
            queued
        );
        Ok(())
    }

    async fn fetch_account_with_retry(&self, handle: &str) -> Result<Option<AccountRecord>> {
        let mut waits = 0u32;
        loop {
            match self.source.fetch_account(handle).await {
                Ok(account) => return Ok(Some(account)),
                Err(SourceError::QuotaExceeded { reset_at }) => {
                    self.quota_pause(handle, reset_at, &mut waits).await?;
                }
                Err(e) => {
                    tracing::warn!("Dropping {}: fetch failed: {}", handle, e);
                    return Ok(None);
                }
            }
        }
    }

    async fn fetch_connections_with_retry(
        &self,
        account_id: &str,
        handle: &str,
        cap: u64,
    ) -> Result<Option<Vec<AccountRecord>>> {
        let mut waits = 0u32;
        loop {
            match self.source.fetch_connections(account_id, cap).await {
                Ok(connections) => return Ok(Some(connections)),
                Err(SourceError::QuotaExceeded { reset_at }) => {
                    self.quota_pause(handle, reset_at, &mut waits).await?;
                }
                Err(e) => {
                    tracing::warn!("Could not expand {}: {}", handle, e);
                    return Ok(None);
                }
            }
        }
    }

    /// Checkpoints the pending state, enforces the wait budget, and sleeps
    ///
    /// The checkpoint keeps the cursor on the identifier being retried.
    async fn quota_pause(
        &self,
        handle: &str,
        reset_at: Option<DateTime<Utc>>,
        waits: &mut u32,
    ) -> Result<()> {
        if let Some(budget) = self.config.rate_limit.max_quota_waits {
            if *waits >= budget {
                tracing::error!(
                    "Quota wait budget ({}) exhausted while processing {}; aborting, checkpoint retained",
                    budget,
                    handle
                );
                return Err(ProspectorError::QuotaBudgetExhausted {
                    handle: handle.to_string(),
                    waits: *waits,
                });
            }
        }
        *waits += 1;
        self.save_checkpoint()?;
        self.backoff.wait(reset_at).await;
        Ok(())
    }

    fn save_checkpoint(&self) -> Result<()> {
        let checkpoint = CrawlCheckpoint::new(
            self.config_hash.clone(),
            self.depth,
            self.frontier.cursor(),
            self.frontier.current_layer().to_vec(),
            self.frontier.next_buffer().to_vec(),
            self.visited.entries().clone(),
            self.results.clone(),
        );
        self.store.save(&checkpoint)?;
        Ok(())
    }

    async fn pace(&self) {
        let delay = Duration::from_secs(self.config.crawl.per_identifier_delay_secs);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }

    fn finish(self) -> Result<BTreeMap<String, ResultRecord>> {
        output::write_results(Path::new(&self.config.output.results_path), &self.results)?;
        self.store.clear()?;
        tracing::info!(
            "Crawl complete: {} identifier(s) visited, {} relevant, results written to {}",
            self.visited.len(),
            self.results.len(),
            self.config.output.results_path
        );
        Ok(self.results)
    }
}
