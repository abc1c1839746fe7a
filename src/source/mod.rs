//! Graph source traits and account records
//!
//! This module defines the trait interface for the account graph the crawl
//! walks, the profile record accounts are fetched into, and the associated
//! error types. The production backend is [`HttpGraphSource`]; tests
//! substitute scripted implementations.

mod http;

pub use http::HttpGraphSource;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while talking to the graph API
#[derive(Debug, Error)]
pub enum SourceError {
    /// The request quota is exhausted; the crawl pauses and retries
    #[error("API quota exhausted")]
    QuotaExceeded { reset_at: Option<DateTime<Utc>> },

    #[error("Account not found: {0}")]
    NotFound(String),

    #[error("Transient source failure: {message}")]
    Transient { message: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl SourceError {
    /// Returns true for quota errors
    ///
    /// Quota errors pause the crawl and retry the same call; every other
    /// variant drops the single identifier being processed.
    pub fn is_quota(&self) -> bool {
        matches!(self, SourceError::QuotaExceeded { .. })
    }
}

/// Result type for graph source operations
pub type SourceResult<T> = Result<T, SourceError>;

/// A single account profile as returned by the graph API
///
/// Serialized field names follow the upstream payload (`screen_name`,
/// `name`), so the same type is used for wire decoding and for the crawl's
/// own records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountRecord {
    /// Stable account ID used for connection lookups
    pub id: String,

    /// Unique handle, without the leading '@'
    #[serde(rename = "screen_name")]
    pub handle: String,

    /// Display name
    #[serde(rename = "name")]
    pub display_name: String,

    /// Profile description, empty when the account has none
    #[serde(default)]
    pub description: String,

    pub followers_count: u64,
    pub following_count: u64,

    #[serde(default)]
    pub verified: bool,
}

/// Trait for account graph backends
///
/// The crawl engine needs exactly two operations: resolving a handle to a
/// profile, and listing the accounts a profile follows. Implementations must
/// be shareable across tasks.
#[async_trait]
pub trait GraphSource: Send + Sync {
    /// Fetches a single account profile by handle
    async fn fetch_account(&self, handle: &str) -> SourceResult<AccountRecord>;

    /// Fetches up to `max_count` outbound connections of an account
    ///
    /// # Arguments
    ///
    /// * `account_id` - Stable ID of the account to expand
    /// * `max_count` - Ceiling on the number of connections returned
    ///
    /// Implementations may return fewer connections than `max_count` when
    /// the account follows fewer, or when pagination stalls after at least
    /// one page was fetched.
    async fn fetch_connections(
        &self,
        account_id: &str,
        max_count: u64,
    ) -> SourceResult<Vec<AccountRecord>>;
}
