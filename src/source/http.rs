//! HTTP graph source implementation
//!
//! This module implements [`GraphSource`] against a JSON account API:
//! - `GET {base}/users/by/username/{handle}` returns one account object
//! - `GET {base}/users/{id}/following?count=N[&cursor=C]` returns
//!   `{"users": [...], "next_cursor": "..."}`
//!
//! Connection listings are paginated internally with a configurable pause
//! between pages. HTTP 429 maps to a quota error carrying the reset time
//! from the `x-rate-limit-reset` header (unix seconds).

use crate::config::SourceConfig;
use crate::source::{AccountRecord, GraphSource, SourceError, SourceResult};
use crate::ConfigError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::header::HeaderMap;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;

/// One page of a connection listing
#[derive(Debug, Deserialize)]
struct ConnectionsPage {
    #[serde(default)]
    users: Vec<AccountRecord>,
    #[serde(default)]
    next_cursor: Option<String>,
}

/// Graph source backed by an HTTP JSON API
#[derive(Debug)]
pub struct HttpGraphSource {
    client: Client,
    base_url: String,
    token: String,
    page_size: u32,
    inter_page_delay: Duration,
}

impl HttpGraphSource {
    /// Creates an HTTP graph source from the source configuration
    ///
    /// Reads the bearer token from the environment variable named by
    /// `auth-token-env`; a missing variable is a configuration error.
    pub fn new(config: &SourceConfig) -> crate::Result<Self> {
        let token = std::env::var(&config.auth_token_env)
            .map_err(|_| ConfigError::MissingCredential(config.auth_token_env.clone()))?;

        let client = Client::builder()
            .user_agent(format!("prospector/{}", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .gzip(true)
            .build()
            .map_err(SourceError::Http)?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token,
            page_size: config.page_size,
            inter_page_delay: Duration::from_millis(config.inter_page_delay_ms),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        context: &str,
    ) -> SourceResult<T> {
        let response = self
            .client
            .get(url)
            .bearer_auth(&self.token)
            .send()
            .await?;
        let response = ensure_success(response, context)?;
        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl GraphSource for HttpGraphSource {
    async fn fetch_account(&self, handle: &str) -> SourceResult<AccountRecord> {
        let url = self.endpoint(&format!("users/by/username/{}", handle));
        tracing::debug!("Fetching account profile: {}", handle);
        self.get_json(&url, handle).await
    }

    async fn fetch_connections(
        &self,
        account_id: &str,
        max_count: u64,
    ) -> SourceResult<Vec<AccountRecord>> {
        let mut connections: Vec<AccountRecord> = Vec::new();
        let mut cursor: Option<String> = None;
        let mut pages = 0u32;

        while (connections.len() as u64) < max_count {
            let remaining = max_count - connections.len() as u64;
            let count = remaining.min(u64::from(self.page_size));
            let mut url = format!(
                "{}?count={}",
                self.endpoint(&format!("users/{}/following", account_id)),
                count
            );
            if let Some(c) = &cursor {
                url.push_str("&cursor=");
                url.push_str(c);
            }

            let page: ConnectionsPage = match self.get_json(&url, account_id).await {
                Ok(page) => page,
                // First-page failures propagate; later failures end the
                // pagination with whatever was already fetched.
                Err(e) if connections.is_empty() => return Err(e),
                Err(e) => {
                    tracing::warn!(
                        "Pagination for {} stalled after {} page(s): {}",
                        account_id,
                        pages,
                        e
                    );
                    break;
                }
            };

            pages += 1;
            tracing::debug!(
                "Fetched page {} of connections for {} ({} users)",
                pages,
                account_id,
                page.users.len()
            );

            if page.users.is_empty() {
                break;
            }
            connections.extend(page.users);

            cursor = page.next_cursor.filter(|c| !c.is_empty());
            if cursor.is_none() {
                break;
            }
            if (connections.len() as u64) < max_count {
                tokio::time::sleep(self.inter_page_delay).await;
            }
        }

        connections.truncate(max_count as usize);
        Ok(connections)
    }
}

/// Maps HTTP error statuses to source errors
///
/// 429 becomes a quota error with the reset time parsed from the
/// `x-rate-limit-reset` header; 404 becomes NotFound; anything else
/// non-successful becomes Transient.
fn ensure_success(response: reqwest::Response, context: &str) -> SourceResult<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    if status == StatusCode::TOO_MANY_REQUESTS {
        return Err(SourceError::QuotaExceeded {
            reset_at: parse_reset_header(response.headers()),
        });
    }
    if status == StatusCode::NOT_FOUND {
        return Err(SourceError::NotFound(context.to_string()));
    }
    Err(SourceError::Transient {
        message: format!("HTTP {} fetching {}", status.as_u16(), context),
    })
}

/// Parses the `x-rate-limit-reset` header (unix seconds) if present
fn parse_reset_header(headers: &HeaderMap) -> Option<DateTime<Utc>> {
    headers
        .get("x-rate-limit-reset")?
        .to_str()
        .ok()?
        .trim()
        .parse::<i64>()
        .ok()
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
}
