use serde::Deserialize;

/// Main configuration structure for Prospector
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub crawl: CrawlConfig,
    #[serde(rename = "rate-limit", default)]
    pub rate_limit: RateLimitConfig,
    #[serde(default)]
    pub classifier: ClassifierConfig,
    pub source: SourceConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Crawl behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlConfig {
    /// Seed handles the first layer is built from
    pub seeds: Vec<String>,

    /// Number of layers to process (layer 0 is the seed layer)
    #[serde(rename = "max-depth", default = "default_max_depth")]
    pub max_depth: u32,

    /// Pause after each fetched account (seconds)
    #[serde(rename = "per-identifier-delay-secs", default = "default_per_identifier_delay")]
    pub per_identifier_delay_secs: u64,

    /// Accounts following more than this many others are not expanded
    #[serde(rename = "expansion-skip-threshold", default = "default_expansion_skip_threshold")]
    pub expansion_skip_threshold: u64,

    /// Ceiling on connections fetched per expansion
    #[serde(rename = "max-outbound-fetch", default = "default_max_outbound_fetch")]
    pub max_outbound_fetch: u64,
}

/// Rate-limit pause configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitConfig {
    /// Safety margin added on top of the reported reset time (seconds)
    #[serde(rename = "buffer-secs", default = "default_buffer_secs")]
    pub buffer_secs: u64,

    /// Minimum pause regardless of how close the reset is (seconds)
    #[serde(rename = "floor-secs", default = "default_floor_secs")]
    pub floor_secs: u64,

    /// Pause used when the API reports no reset time (seconds)
    #[serde(rename = "default-wait-secs", default = "default_wait_secs")]
    pub default_wait_secs: u64,

    /// Abort the run after this many consecutive waits on one call
    /// (unset means retry forever)
    #[serde(rename = "max-quota-waits", default)]
    pub max_quota_waits: Option<u32>,
}

/// Relevance classifier configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ClassifierConfig {
    /// Accounts below this follower count are never relevant
    #[serde(rename = "min-followers", default = "default_min_followers")]
    pub min_followers: u64,

    /// Keywords added to the built-in multilingual list
    #[serde(rename = "extra-keywords", default)]
    pub extra_keywords: Vec<String>,

    /// Distinct keyword matches required in the description
    #[serde(rename = "min-keyword-matches", default = "default_min_keyword_matches")]
    pub min_keyword_matches: usize,

    /// Use the multi-signal scoring classifier instead of plain keywords
    #[serde(default)]
    pub strict: bool,

    /// Handles treated as known-relevant by the scoring classifier
    #[serde(rename = "known-relevant-handles", default)]
    pub known_relevant_handles: Vec<String>,
}

/// Graph API source configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    /// Base URL of the graph API
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Environment variable holding the bearer token
    #[serde(rename = "auth-token-env", default = "default_auth_token_env")]
    pub auth_token_env: String,

    /// Base URL used to build profile links in result records
    #[serde(rename = "profile-base-url", default = "default_profile_base_url")]
    pub profile_base_url: String,

    /// Connections requested per page
    #[serde(rename = "page-size", default = "default_page_size")]
    pub page_size: u32,

    /// Pause between connection pages (milliseconds)
    #[serde(rename = "inter-page-delay-ms", default = "default_inter_page_delay_ms")]
    pub inter_page_delay_ms: u64,
}

/// Output path configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path the final results document is written to
    #[serde(rename = "results-path", default = "default_results_path")]
    pub results_path: String,

    /// Path of the checkpoint snapshot
    #[serde(rename = "checkpoint-path", default = "default_checkpoint_path")]
    pub checkpoint_path: String,
}

fn default_max_depth() -> u32 {
    3
}

fn default_per_identifier_delay() -> u64 {
    10
}

fn default_expansion_skip_threshold() -> u64 {
    500
}

fn default_max_outbound_fetch() -> u64 {
    500
}

fn default_buffer_secs() -> u64 {
    10
}

fn default_floor_secs() -> u64 {
    60
}

fn default_wait_secs() -> u64 {
    3600
}

fn default_min_followers() -> u64 {
    10_000
}

fn default_min_keyword_matches() -> usize {
    1
}

fn default_auth_token_env() -> String {
    "GRAPH_API_TOKEN".to_string()
}

fn default_profile_base_url() -> String {
    "https://x.com".to_string()
}

fn default_page_size() -> u32 {
    200
}

fn default_inter_page_delay_ms() -> u64 {
    1000
}

fn default_results_path() -> String {
    "./relevant_accounts.json".to_string()
}

fn default_checkpoint_path() -> String {
    "./crawl_checkpoint.json".to_string()
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            buffer_secs: default_buffer_secs(),
            floor_secs: default_floor_secs(),
            default_wait_secs: default_wait_secs(),
            max_quota_waits: None,
        }
    }
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            min_followers: default_min_followers(),
            extra_keywords: Vec::new(),
            min_keyword_matches: default_min_keyword_matches(),
            strict: false,
            known_relevant_handles: Vec::new(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            results_path: default_results_path(),
            checkpoint_path: default_checkpoint_path(),
        }
    }
}
