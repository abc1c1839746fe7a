//! Account relevance classification
//!
//! This module decides which fetched accounts belong to the target domain:
//! - A follower floor filters out small accounts before any text matching
//! - `KeywordClassifier` matches profile descriptions against a multilingual
//!   keyword list (the default behavior)
//! - `ScoringClassifier` combines several profile signals into a confidence
//!   score for deployments that want higher precision
//!
//! Classification is deterministic and purely profile-local, so the crawl
//! engine can re-run it on resume without changing any outcome.

pub mod keywords;
mod scoring;

pub use scoring::{RelevanceScore, ScoringClassifier};

use crate::config::ClassifierConfig;
use crate::source::AccountRecord;

/// Relevance predicate over a fetched account
///
/// Implementations must be deterministic: the same account record always
/// produces the same answer within a run.
pub trait Classifier: Send + Sync {
    /// Returns true when the account belongs to the target domain
    fn is_relevant(&self, account: &AccountRecord) -> bool;
}

/// Counts how many of the given lowercase keywords occur in the text
///
/// Matching is case-insensitive substring containment, which handles the
/// CJK keywords (no case) and Latin-script keywords uniformly.
fn count_keyword_matches(text: &str, keywords_lower: &[String]) -> usize {
    if text.is_empty() {
        return 0;
    }
    let text_lower = text.to_lowercase();
    keywords_lower
        .iter()
        .filter(|keyword| text_lower.contains(keyword.as_str()))
        .count()
}

/// Builds the effective lowercase keyword list: built-ins plus extras, deduped
fn effective_keywords(extra: &[String]) -> Vec<String> {
    let mut keywords: Vec<String> = keywords::builtin_keywords()
        .map(str::to_lowercase)
        .collect();
    keywords.extend(extra.iter().map(|k| k.to_lowercase()));
    keywords.sort();
    keywords.dedup();
    keywords
}

/// Keyword-threshold classifier
///
/// An account is relevant when it clears the follower floor and its
/// description contains at least `min_matches` distinct keywords.
#[derive(Debug, Clone)]
pub struct KeywordClassifier {
    min_followers: u64,
    min_matches: usize,
    keywords: Vec<String>,
}

impl KeywordClassifier {
    /// Creates a classifier with the given follower floor and extra keywords
    pub fn new(min_followers: u64, min_matches: usize, extra_keywords: &[String]) -> Self {
        Self {
            min_followers,
            min_matches,
            keywords: effective_keywords(extra_keywords),
        }
    }

    /// Creates a classifier from the configuration section
    pub fn from_config(config: &ClassifierConfig) -> Self {
        Self::new(
            config.min_followers,
            config.min_keyword_matches,
            &config.extra_keywords,
        )
    }

    /// Number of distinct keywords in the effective list
    pub fn keyword_count(&self) -> usize {
        self.keywords.len()
    }
}

impl Classifier for KeywordClassifier {
    fn is_relevant(&self, account: &AccountRecord) -> bool {
        if account.followers_count < self.min_followers {
            return false;
        }
        if account.description.is_empty() {
            return false;
        }
        count_keyword_matches(&account.description, &self.keywords) >= self.min_matches
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_account(followers: u64, description: &str) -> AccountRecord {
        AccountRecord {
            id: "1".to_string(),
            handle: "test_account".to_string(),
            display_name: "Test Account".to_string(),
            description: description.to_string(),
            followers_count: followers,
            following_count: 100,
            verified: false,
        }
    }

    #[test]
    fn test_relevant_description_accepted() {
        let classifier = KeywordClassifier::new(10_000, 1, &[]);
        let account = create_test_account(50_000, "Research scientist working on deep learning");
        assert!(classifier.is_relevant(&account));
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        let classifier = KeywordClassifier::new(10_000, 1, &[]);
        let account = create_test_account(50_000, "MACHINE LEARNING engineer");
        assert!(classifier.is_relevant(&account));
    }

    #[test]
    fn test_chinese_keywords_match() {
        let classifier = KeywordClassifier::new(10_000, 1, &[]);
        let account = create_test_account(50_000, "专注人工智能与大模型研究");
        assert!(classifier.is_relevant(&account));
    }

    #[test]
    fn test_japanese_keywords_match() {
        let classifier = KeywordClassifier::new(10_000, 1, &[]);
        let account = create_test_account(50_000, "機械学習エンジニア");
        assert!(classifier.is_relevant(&account));
    }

    #[test]
    fn test_below_follower_floor_rejected() {
        let classifier = KeywordClassifier::new(10_000, 1, &[]);
        let account = create_test_account(9_999, "Building AGI at a frontier lab");
        assert!(!classifier.is_relevant(&account));
    }

    #[test]
    fn test_empty_description_rejected() {
        let classifier = KeywordClassifier::new(10_000, 1, &[]);
        let account = create_test_account(50_000, "");
        assert!(!classifier.is_relevant(&account));
    }

    #[test]
    fn test_unrelated_description_rejected() {
        let classifier = KeywordClassifier::new(10_000, 1, &[]);
        let account = create_test_account(50_000, "Sourdough baking and birdwatching");
        assert!(!classifier.is_relevant(&account));
    }

    #[test]
    fn test_extra_keywords_extend_builtins() {
        let extra = vec!["interpretability".to_string()];
        let classifier = KeywordClassifier::new(10_000, 1, &extra);
        let account = create_test_account(50_000, "Mechanistic interpretability research");
        assert!(classifier.is_relevant(&account));
    }

    #[test]
    fn test_min_matches_requires_distinct_keywords() {
        let classifier = KeywordClassifier::new(10_000, 2, &[]);

        let one_match = create_test_account(50_000, "Robotics enthusiast");
        assert!(!classifier.is_relevant(&one_match));

        let two_matches = create_test_account(50_000, "Robotics and computer vision");
        assert!(classifier.is_relevant(&two_matches));
    }

    #[test]
    fn test_count_keyword_matches_counts_distinct() {
        let keywords = vec!["ai".to_string(), "robotics".to_string()];
        assert_eq!(count_keyword_matches("ai ai ai", &keywords), 1);
        assert_eq!(count_keyword_matches("ai robotics", &keywords), 2);
        assert_eq!(count_keyword_matches("", &keywords), 0);
    }

    #[test]
    fn test_effective_keywords_dedups_case_insensitively() {
        // "AI" appears in all three built-in language lists
        let keywords = effective_keywords(&["ai".to_string()]);
        assert_eq!(keywords.iter().filter(|k| k.as_str() == "ai").count(), 1);
    }
}
