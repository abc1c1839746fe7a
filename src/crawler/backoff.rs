//! Rate-limit backoff
//!
//! Turns a quota-exceeded signal into a wait. With a server-reported reset
//! time the wait is the time until reset plus a safety buffer, floored at a
//! minimum; without one a fixed conservative wait applies. The handler
//! performs the sleep itself and never mutates crawl state; checkpointing
//! before the wait and retrying after it are the engine's job.

use crate::config::RateLimitConfig;
use chrono::{DateTime, Utc};
use std::time::Duration;

/// Computes and executes quota pauses
#[derive(Debug, Clone)]
pub struct RateLimitHandler {
    buffer: Duration,
    floor: Duration,
    default_wait: Duration,
}

impl RateLimitHandler {
    /// Creates a handler with explicit timings (seconds)
    pub fn new(buffer_secs: u64, floor_secs: u64, default_wait_secs: u64) -> Self {
        Self {
            buffer: Duration::from_secs(buffer_secs),
            floor: Duration::from_secs(floor_secs),
            default_wait: Duration::from_secs(default_wait_secs),
        }
    }

    /// Creates a handler from the rate-limit configuration section
    pub fn from_config(config: &RateLimitConfig) -> Self {
        Self::new(config.buffer_secs, config.floor_secs, config.default_wait_secs)
    }

    /// Wait duration for a quota signal
    ///
    /// # Arguments
    ///
    /// * `reset_at` - Server-reported reset time, if any
    /// * `now` - Current time
    ///
    /// A reset in the past clamps to the floor.
    pub fn compute_wait(&self, reset_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> Duration {
        match reset_at {
            Some(reset) => {
                let until = reset
                    .signed_duration_since(now)
                    .to_std()
                    .unwrap_or(Duration::ZERO);
                (until + self.buffer).max(self.floor)
            }
            None => self.default_wait,
        }
    }

    /// Sleeps out a quota pause, logging the arithmetic
    pub async fn wait(&self, reset_at: Option<DateTime<Utc>>) {
        let now = Utc::now();
        let wait = self.compute_wait(reset_at, now);
        match reset_at {
            Some(reset) => tracing::warn!(
                "Rate limited at {}; server reports reset at {}; pausing {}s",
                now.format("%H:%M:%S"),
                reset.format("%H:%M:%S"),
                wait.as_secs()
            ),
            None => tracing::warn!(
                "Rate limited with no reset time reported; pausing {}s",
                wait.as_secs()
            ),
        }
        tokio::time::sleep(wait).await;
    }
}
