use crate::config::types::{Config, CrawlerConfig, OutputConfig};
use crate::url::{is_in_domain, normalize_url};
use crate::ConfigError;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    let start = normalize_url(&config.start_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid start-url: {}", e)))?;

    if config.domain_prefix.is_empty() {
        return Err(ConfigError::Validation(
            "domain-prefix cannot be empty".to_string(),
        ));
    }

    // A start URL outside its own crawl boundary would produce an empty run
    if !is_in_domain(&start, &config.domain_prefix) {
        return Err(ConfigError::Validation(format!(
            "start-url '{}' does not match domain-prefix '{}'",
            config.start_url, config.domain_prefix
        )));
    }

    if config.delay_min_ms > config.delay_max_ms {
        return Err(ConfigError::Validation(format!(
            "delay-min-ms ({}) must not exceed delay-max-ms ({})",
            config.delay_min_ms, config.delay_max_ms
        )));
    }

    if config.retry_count > 10 {
        return Err(ConfigError::Validation(format!(
            "retry-count must be <= 10, got {}",
            config.retry_count
        )));
    }

    if config.request_timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "request-timeout-secs must be >= 1".to_string(),
        ));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.data_dir.is_empty() {
        return Err(ConfigError::Validation(
            "data-dir cannot be empty".to_string(),
        ));
    }

    Ok(())
}
