//! Configuration module
//!
//! This module handles loading, parsing, and validating TOML configuration
//! files. Every option has a default, so the crawler also runs with no
//! config file at all (one full crawl of the default site).
//!
//! # Example
//!
//! ```no_run
//! use metropole_crawler::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("config.toml")).unwrap();
//! println!("Crawler will use max depth: {}", config.crawler.max_depth);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, CrawlerConfig, OutputConfig};

// Re-export parser functions
pub use parser::load_config;

// Re-export validation
pub use validation::validate;
