//! Metropole crawler entry point
//!
//! Command-line interface for the bounded single-site crawler. One
//! invocation performs one full crawl-and-write cycle; success or failure
//! is communicated through the crawl log and the process exit status.

use clap::Parser;
use metropole_crawler::config::{load_config, Config};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Metropole crawler: a bounded single-site dataset builder
///
/// Crawls the configured website breadth-first up to a fixed depth,
/// extracts and cleans readable page text plus inline-PDF text, and
/// writes a timestamped JSON dataset and crawl log.
#[derive(Parser, Debug)]
#[command(name = "metropole-crawler")]
#[command(version)]
#[command(about = "A bounded single-site crawler", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (built-in defaults when omitted)
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be crawled without fetching
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            match load_config(path) {
                Ok(cfg) => cfg,
                Err(e) => {
                    tracing::error!("Failed to load configuration: {}", e);
                    return Err(e.into());
                }
            }
        }
        None => {
            tracing::info!("No config file given, using built-in defaults");
            Config::default()
        }
    };

    if cli.dry_run {
        handle_dry_run(&config)?;
    } else {
        handle_crawl(config).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("metropole_crawler=info,warn"),
            1 => EnvFilter::new("metropole_crawler=debug,info"),
            2 => EnvFilter::new("metropole_crawler=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: validates config and shows the crawl plan
fn handle_dry_run(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    metropole_crawler::config::validate(config)?;

    println!("=== Metropole Crawler Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Start URL: {}", config.crawler.start_url);
    println!("  Domain prefix: {}", config.crawler.domain_prefix);
    println!("  Max depth: {}", config.crawler.max_depth);
    println!(
        "  Politeness delay: {}-{}ms",
        config.crawler.delay_min_ms, config.crawler.delay_max_ms
    );
    println!("  Retries per request: {}", config.crawler.retry_count);
    println!(
        "  Request timeout: {}s",
        config.crawler.request_timeout_secs
    );

    println!("\nOutput:");
    println!("  Data directory: {}", config.output.data_dir);

    println!("\n\u{2713} Configuration is valid");
    println!(
        "\u{2713} Would crawl {} to depth {}",
        config.crawler.start_url, config.crawler.max_depth
    );

    Ok(())
}

/// Handles the main crawl operation
async fn handle_crawl(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!(
        "Starting crawl of {} (max depth {})",
        config.crawler.start_url,
        config.crawler.max_depth
    );

    match metropole_crawler::run(config).await {
        Ok(report) => {
            println!(
                "Crawl complete: {} pages, {} skips, {} validation issues",
                report.pages_crawled,
                report.total_skips(),
                report.validation_issues
            );
            println!("Dataset: {}", report.data_path.display());
            println!("Log:     {}", report.log_path.display());
            Ok(())
        }
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            Err(e.into())
        }
    }
}
