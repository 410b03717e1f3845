//! Run report
//!
//! Aggregate counts for one crawl run, created once after the crawl and
//! validation complete, immutable afterwards.

use crate::crawler::controller::CrawlOutcome;
use crate::record::SkipReason;
use crate::validator::ValidationReport;
use chrono::{DateTime, Local};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Final accounting for one crawl run
#[derive(Debug, Clone)]
pub struct RunReport {
    pub started_at: DateTime<Local>,
    pub finished_at: DateTime<Local>,

    /// Pages that produced a dataset record
    pub pages_crawled: u64,

    /// Page skips, by reason
    pub page_skips: BTreeMap<SkipReason, u64>,

    /// PDF resource skips, by reason
    pub pdf_skips: BTreeMap<SkipReason, u64>,

    /// Structural validation issues across all records
    pub validation_issues: u64,

    pub data_path: PathBuf,
    pub log_path: PathBuf,
}

impl RunReport {
    pub fn new(
        started_at: DateTime<Local>,
        finished_at: DateTime<Local>,
        outcome: &CrawlOutcome,
        validation: &ValidationReport,
        data_path: PathBuf,
        log_path: PathBuf,
    ) -> Self {
        let mut page_skips: BTreeMap<SkipReason, u64> = BTreeMap::new();
        let mut pdf_skips: BTreeMap<SkipReason, u64> = BTreeMap::new();

        for skip in &outcome.skips {
            let bucket = if skip.reason.is_pdf() {
                &mut pdf_skips
            } else {
                &mut page_skips
            };
            *bucket.entry(skip.reason).or_insert(0) += 1;
        }

        Self {
            started_at,
            finished_at,
            pages_crawled: outcome.records.len() as u64,
            page_skips,
            pdf_skips,
            validation_issues: validation.issue_count() as u64,
            data_path,
            log_path,
        }
    }

    /// Total skips across pages and PDFs
    pub fn total_skips(&self) -> u64 {
        self.page_skips.values().sum::<u64>() + self.pdf_skips.values().sum::<u64>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{PageRecord, SkipRecord};

    fn outcome_with(skips: Vec<SkipRecord>) -> CrawlOutcome {
        CrawlOutcome {
            records: vec![PageRecord {
                url: "https://example.com/".to_string(),
                title: "Home".to_string(),
                content: "Welcome to the example site".to_string(),
                pdf_text: None,
            }],
            skips,
        }
    }

    #[test]
    fn test_skips_split_between_pages_and_pdfs() {
        let outcome = outcome_with(vec![
            SkipRecord::new("https://example.com/a", SkipReason::HttpError),
            SkipRecord::new("https://example.com/a", SkipReason::Duplicate),
            SkipRecord::new("https://example.com/f.pdf", SkipReason::PdfCorrupt),
        ]);
        let validation = ValidationReport::default();
        let now = Local::now();

        let report = RunReport::new(
            now,
            now,
            &outcome,
            &validation,
            PathBuf::from("data/out.json"),
            PathBuf::from("data/log.txt"),
        );

        assert_eq!(report.pages_crawled, 1);
        assert_eq!(report.page_skips.get(&SkipReason::HttpError), Some(&1));
        assert_eq!(report.page_skips.get(&SkipReason::Duplicate), Some(&1));
        assert_eq!(report.pdf_skips.get(&SkipReason::PdfCorrupt), Some(&1));
        assert_eq!(report.total_skips(), 3);
    }

    #[test]
    fn test_repeated_reasons_accumulate() {
        let outcome = outcome_with(vec![
            SkipRecord::new("https://example.com/a", SkipReason::OutOfDomain),
            SkipRecord::new("https://example.com/b", SkipReason::OutOfDomain),
            SkipRecord::new("https://example.com/c", SkipReason::OutOfDomain),
        ]);
        let validation = ValidationReport::default();
        let now = Local::now();

        let report = RunReport::new(
            now,
            now,
            &outcome,
            &validation,
            PathBuf::from("data/out.json"),
            PathBuf::from("data/log.txt"),
        );

        assert_eq!(report.page_skips.get(&SkipReason::OutOfDomain), Some(&3));
    }
}
