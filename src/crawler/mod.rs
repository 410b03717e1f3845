//! Crawler module
//!
//! This module contains the crawl engine and its per-page services:
//! - Breadth-first traversal with depth/domain bounds ([`controller`])
//! - HTTP fetching with retry and backoff ([`fetcher`])
//! - HTML content and link extraction ([`extractor`])
//! - Inline PDF text extraction ([`pdf`])
//! - Text cleaning ([`cleaner`])
//!
//! [`run`] ties one full crawl-and-write cycle together.

pub mod cleaner;
pub mod controller;
pub mod extractor;
pub mod fetcher;
pub mod pdf;

pub use controller::{Controller, CrawlOutcome};
pub use fetcher::{build_http_client, fetch_page, FetchError, RawPage};

use crate::config::{validate, Config};
use crate::output::log::RunLog;
use crate::output::report::RunReport;
use crate::output::writer::{dataset_path, log_path, write_dataset, write_log};
use crate::validator::validate_records;
use crate::{CrawlError, Result};
use chrono::Local;
use std::path::Path;

/// Runs one complete crawl-and-write cycle with the given configuration
///
/// 1. Validate the configuration (fatal on error)
/// 2. Crawl the site breadth-first, accumulating records and skips
/// 3. Validate the records (non-fatal; issues are reported, not dropped)
/// 4. Write the timestamped JSON dataset and the plain-text crawl log
///
/// Only an unusable configuration or an output file that cannot be
/// written is fatal; per-page failures become skip records and the run
/// still produces a dataset accounting for every page.
pub async fn run(config: Config) -> Result<RunReport> {
    validate(&config)?;

    let started_at = Local::now();
    let data_dir = Path::new(&config.output.data_dir);
    std::fs::create_dir_all(data_dir).map_err(|e| CrawlError::OutputWrite {
        path: data_dir.to_path_buf(),
        source: e,
    })?;

    let data_path = dataset_path(data_dir, &started_at);
    let log_file_path = log_path(data_dir, &started_at);

    let mut log = RunLog::new();
    log.start(&config.crawler.start_url, config.crawler.max_depth, &started_at);

    let client = build_http_client(config.crawler.request_timeout_secs)?;

    let mut controller = Controller::new(config.crawler.clone(), client);
    let outcome = controller.crawl(&mut log).await;

    let validation = validate_records(&outcome.records);
    log.validation(&validation);

    let finished_at = Local::now();
    let report = RunReport::new(
        started_at,
        finished_at,
        &outcome,
        &validation,
        data_path.clone(),
        log_file_path.clone(),
    );
    log.statistics(&report);

    // The dataset is written first so its final path can be recorded in
    // the log; either write failing is fatal
    write_dataset(&outcome.records, &data_path)?;
    log.completion(&data_path, &log_file_path, &finished_at);
    write_log(&log, &log_file_path)?;

    tracing::info!(
        "Crawl complete: {} pages, {} skips, dataset at {}",
        report.pages_crawled,
        report.total_skips(),
        data_path.display()
    );

    Ok(report)
}

/// Parameterless entry point: one full crawl-and-write cycle with the
/// built-in default configuration
///
/// # Example
///
/// ```no_run
/// # async fn example() -> metropole_crawler::Result<()> {
/// let report = metropole_crawler::run_crawler().await?;
/// println!("Crawled {} pages", report.pages_crawled);
/// # Ok(())
/// # }
/// ```
pub async fn run_crawler() -> Result<RunReport> {
    run(Config::default()).await
}
