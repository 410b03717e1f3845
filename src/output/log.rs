//! The crawl log
//!
//! [`RunLog`] accumulates the human-readable account of a run as it
//! happens: one line per visited page, one line per skip with its reason
//! code, extraction previews, and the closing statistics. The log is a
//! value owned by the run (not ambient logging state), so concurrent runs
//! in tests cannot interleave; each line is mirrored to `tracing` as it is
//! recorded.

use crate::output::report::RunReport;
use crate::record::SkipReason;
use crate::validator::ValidationReport;
use chrono::{DateTime, Local};
use std::path::Path;

const SEPARATOR: &str = "==================================================";

/// Accumulated log lines for one crawl run
#[derive(Debug, Default)]
pub struct RunLog {
    lines: Vec<String>,
}

impl RunLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// All lines recorded so far, in order
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// The complete log as written to disk
    pub fn contents(&self) -> String {
        let mut text = self.lines.join("\n");
        text.push('\n');
        text
    }

    fn info(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::info!("{}", message);
        self.push("INFO", &message);
    }

    fn warn(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!("{}", message);
        self.push("WARNING", &message);
    }

    fn error(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::error!("{}", message);
        self.push("ERROR", &message);
    }

    fn push(&mut self, level: &str, message: &str) {
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
        self.lines.push(format!("{} - {} - {}", timestamp, level, message));
    }

    pub fn start(&mut self, start_url: &str, max_depth: u32, started_at: &DateTime<Local>) {
        self.info(format!("Metropole crawler started at: {}", started_at));
        self.info(format!("Starting URL: {}", start_url));
        self.info(format!("Max depth: {}", max_depth));
        self.info("---");
    }

    pub fn visit(&mut self, url: &str, depth: u32) {
        self.info(format!("Visiting URL (depth {}): {}", depth, url));
    }

    pub fn skip(&mut self, url: &str, reason: SkipReason) {
        self.info(format!("  Skipping ({}): {}", reason.code(), url));
    }

    pub fn fetch_error(&mut self, message: &str) {
        self.error(format!("  Failed: {}", message));
    }

    pub fn links_found(&mut self, count: usize) {
        self.info(format!("  Found {} links", count));
    }

    pub fn extraction(&mut self, title: &str, content: &str) {
        self.info(format!("  Extracted title: '{}'", title));

        let preview: String = if content.chars().count() > 100 {
            let head: String = content.chars().take(100).collect();
            format!("{}...", head)
        } else {
            content.to_string()
        };
        self.info(format!("  Content preview: {}", preview.replace('\n', " | ")));
    }

    pub fn validation(&mut self, report: &ValidationReport) {
        self.info("Output validation results:");
        self.info(format!("  Total pages: {}", report.total_records));
        self.info(format!(
            "  Pages with title: {}/{}",
            report.records_with_title, report.total_records
        ));
        self.info(format!(
            "  Pages with content: {}/{}",
            report.records_with_content, report.total_records
        ));

        for issue in &report.issues {
            self.warn(format!("  Issue - {}", issue));
        }
    }

    pub fn statistics(&mut self, report: &RunReport) {
        self.info(SEPARATOR);
        self.info("Crawl statistics:");
        self.info(format!("  Pages crawled: {}", report.pages_crawled));

        if report.page_skips.is_empty() {
            self.info("  Pages skipped: 0");
        } else {
            self.info(format!(
                "  Pages skipped: {}",
                report.page_skips.values().sum::<u64>()
            ));
            for (reason, count) in &report.page_skips {
                self.info(format!("    {}: {}", reason.code(), count));
            }
        }

        if !report.pdf_skips.is_empty() {
            self.info(format!(
                "  PDFs skipped: {}",
                report.pdf_skips.values().sum::<u64>()
            ));
            for (reason, count) in &report.pdf_skips {
                self.info(format!("    {}: {}", reason.code(), count));
            }
        }

        self.info(format!("  Validation issues: {}", report.validation_issues));
        self.info(SEPARATOR);
    }

    pub fn completion(&mut self, data_path: &Path, log_path: &Path, finished_at: &DateTime<Local>) {
        self.info(format!("Metropole crawler completed at: {}", finished_at));
        self.info(format!("Output saved to: {}", data_path.display()));
        self.info(format!("Log saved to: {}", log_path.display()));
        self.info("Crawling complete!");
    }
}
