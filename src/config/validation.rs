use crate::config::types::{ClassifierConfig, Config, CrawlConfig, OutputConfig, SourceConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawl_config(&config.crawl)?;
    validate_classifier_config(&config.classifier)?;
    validate_source_config(&config.source)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates crawl configuration
fn validate_crawl_config(config: &CrawlConfig) -> Result<(), ConfigError> {
    if config.seeds.is_empty() {
        return Err(ConfigError::Validation(
            "seeds must contain at least one handle".to_string(),
        ));
    }

    for seed in &config.seeds {
        validate_handle(seed)?;
    }

    let mut seen = std::collections::BTreeSet::new();
    for seed in &config.seeds {
        if !seen.insert(seed.as_str()) {
            return Err(ConfigError::Validation(format!(
                "duplicate seed handle '{}'",
                seed
            )));
        }
    }

    if config.max_depth < 1 || config.max_depth > 10 {
        return Err(ConfigError::Validation(format!(
            "max_depth must be between 1 and 10, got {}",
            config.max_depth
        )));
    }

    if config.max_outbound_fetch < 1 {
        return Err(ConfigError::Validation(format!(
            "max_outbound_fetch must be >= 1, got {}",
            config.max_outbound_fetch
        )));
    }

    Ok(())
}

/// Validates classifier configuration
fn validate_classifier_config(config: &ClassifierConfig) -> Result<(), ConfigError> {
    if config.min_keyword_matches < 1 {
        return Err(ConfigError::Validation(format!(
            "min_keyword_matches must be >= 1, got {}",
            config.min_keyword_matches
        )));
    }

    for keyword in &config.extra_keywords {
        if keyword.trim().is_empty() {
            return Err(ConfigError::Validation(
                "extra_keywords cannot contain blank entries".to_string(),
            ));
        }
    }

    for handle in &config.known_relevant_handles {
        validate_handle(handle)?;
    }

    Ok(())
}

/// Validates graph source configuration
fn validate_source_config(config: &SourceConfig) -> Result<(), ConfigError> {
    let url = Url::parse(&config.base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base_url: {}", e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::Validation(format!(
            "base_url must use http or https, got '{}'",
            url.scheme()
        )));
    }

    if config.auth_token_env.trim().is_empty() {
        return Err(ConfigError::Validation(
            "auth_token_env cannot be empty".to_string(),
        ));
    }

    Url::parse(&config.profile_base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid profile_base_url: {}", e)))?;

    if config.page_size < 1 || config.page_size > 1000 {
        return Err(ConfigError::Validation(format!(
            "page_size must be between 1 and 1000, got {}",
            config.page_size
        )));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.results_path.is_empty() {
        return Err(ConfigError::Validation(
            "results_path cannot be empty".to_string(),
        ));
    }

    if config.checkpoint_path.is_empty() {
        return Err(ConfigError::Validation(
            "checkpoint_path cannot be empty".to_string(),
        ));
    }

    if config.results_path == config.checkpoint_path {
        return Err(ConfigError::Validation(
            "results_path and checkpoint_path must be different files".to_string(),
        ));
    }

    Ok(())
}

/// Validates a single account handle
fn validate_handle(handle: &str) -> Result<(), ConfigError> {
    if handle.trim().is_empty() {
        return Err(ConfigError::Validation(
            "handle cannot be empty".to_string(),
        ));
    }

    if handle.starts_with('@') {
        return Err(ConfigError::Validation(format!(
            "handle '{}' must be a bare username without the '@' prefix",
            handle
        )));
    }

    if handle.chars().any(char::is_whitespace) {
        return Err(ConfigError::Validation(format!(
            "handle '{}' cannot contain whitespace",
            handle
        )));
    }

    Ok(())
}
