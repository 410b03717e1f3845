//! Metropole Crawler: a bounded single-site web crawler
//!
//! This crate crawls one website under a configured domain/path prefix,
//! extracts readable text and inline-PDF text from each reachable page,
//! cleans and validates the content, and writes a timestamped JSON dataset
//! plus a plain-text crawl log for downstream ingestion.

pub mod config;
pub mod crawler;
pub mod output;
pub mod record;
pub mod url;
pub mod validator;

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for crawler operations
///
/// Per-page and per-resource failures never surface here; they are
/// absorbed into skip records by the traversal controller. The only
/// fatal conditions are an unusable configuration and an output file
/// that cannot be written.
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),

    #[error("Failed to serialize dataset: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Failed to write output file {path}: {source}")]
    OutputWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),
}

/// Result type alias for crawler operations
pub type Result<T> = std::result::Result<T, CrawlError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{run, run_crawler};
pub use record::{PageRecord, SkipReason, SkipRecord};
