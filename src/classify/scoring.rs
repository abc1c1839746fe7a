//! Multi-signal relevance scoring
//!
//! Combines several profile signals into a confidence value instead of
//! accepting any single keyword hit. Each signal contributes a fixed weight;
//! an account is relevant when the summed confidence reaches 0.5. The
//! signals are profile-local only, so scoring stays deterministic and costs
//! no extra API calls.

use super::{count_keyword_matches, effective_keywords, Classifier};
use crate::config::ClassifierConfig;
use crate::source::AccountRecord;

/// Confidence required before an account counts as relevant
const RELEVANCE_THRESHOLD: f64 = 0.5;

/// Weight of a keyword match in the profile description
const DESCRIPTION_WEIGHT: f64 = 0.3;

/// Weight of a keyword appearing in the handle itself
const HANDLE_WEIGHT: f64 = 0.2;

/// Weight of the handle appearing in the curated known-relevant list
const KNOWN_HANDLE_WEIGHT: f64 = 0.1;

/// Per-signal breakdown of a scored account
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelevanceScore {
    /// Description contained at least the required number of keywords
    pub description_match: bool,
    /// Handle contains a keyword
    pub handle_match: bool,
    /// Handle is on the curated known-relevant list
    pub known_handle: bool,
}

impl RelevanceScore {
    /// Summed confidence across the matched signals, capped at 1.0
    pub fn confidence(&self) -> f64 {
        let mut confidence = 0.0;
        if self.description_match {
            confidence += DESCRIPTION_WEIGHT;
        }
        if self.handle_match {
            confidence += HANDLE_WEIGHT;
        }
        if self.known_handle {
            confidence += KNOWN_HANDLE_WEIGHT;
        }
        confidence.min(1.0)
    }
}

/// Scoring classifier for precision-sensitive crawls
///
/// Stricter than [`KeywordClassifier`](crate::classify::KeywordClassifier):
/// a description hit alone is not enough, the handle itself must also carry
/// a domain signal. Selected with `classifier.strict = true`.
#[derive(Debug, Clone)]
pub struct ScoringClassifier {
    min_followers: u64,
    min_matches: usize,
    keywords: Vec<String>,
    known_handles: Vec<String>,
}

impl ScoringClassifier {
    /// Creates a scoring classifier
    ///
    /// # Arguments
    ///
    /// * `min_followers` - Follower floor applied before any scoring
    /// * `min_matches` - Keyword matches required for the description signal
    /// * `extra_keywords` - Keywords added to the built-in list
    /// * `known_handles` - Handles treated as known-relevant
    pub fn new(
        min_followers: u64,
        min_matches: usize,
        extra_keywords: &[String],
        known_handles: &[String],
    ) -> Self {
        Self {
            min_followers,
            min_matches,
            keywords: effective_keywords(extra_keywords),
            known_handles: known_handles.iter().map(|h| h.to_lowercase()).collect(),
        }
    }

    /// Creates a scoring classifier from the configuration section
    pub fn from_config(config: &ClassifierConfig) -> Self {
        Self::new(
            config.min_followers,
            config.min_keyword_matches,
            &config.extra_keywords,
            &config.known_relevant_handles,
        )
    }

    /// Scores an account without applying the follower floor
    pub fn score(&self, account: &AccountRecord) -> RelevanceScore {
        let handle_lower = account.handle.to_lowercase();
        RelevanceScore {
            description_match: count_keyword_matches(&account.description, &self.keywords)
                >= self.min_matches,
            handle_match: self
                .keywords
                .iter()
                .any(|keyword| handle_lower.contains(keyword.as_str())),
            known_handle: self.known_handles.contains(&handle_lower),
        }
    }
}

impl Classifier for ScoringClassifier {
    fn is_relevant(&self, account: &AccountRecord) -> bool {
        if account.followers_count < self.min_followers {
            return false;
        }
        self.score(account).confidence() >= RELEVANCE_THRESHOLD
    }
}
