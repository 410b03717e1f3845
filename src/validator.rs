//! Structural validation of crawled records
//!
//! Runs once over the accumulated record set after the crawl completes.
//! Validation never discards a record: the dataset includes everything the
//! crawl produced, and this pass enumerates the violations so the crawl
//! log and run report can account for them.

use crate::record::PageRecord;
use url::Url;

/// A single structural problem with a record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationIssue {
    EmptyTitle { url: String },
    EmptyContent { url: String },
    InvalidUrl { url: String },
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle { url } => write!(f, "empty title: {}", url),
            Self::EmptyContent { url } => write!(f, "empty content: {}", url),
            Self::InvalidUrl { url } => write!(f, "invalid url: '{}'", url),
        }
    }
}

/// Aggregate validation results for one crawl
#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    pub total_records: usize,
    pub records_with_title: usize,
    pub records_with_content: usize,
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn issue_count(&self) -> usize {
        self.issues.len()
    }
}

/// Checks every record for structural completeness
///
/// Flags a missing/empty title, missing/empty content, and a
/// syntactically invalid URL. One record can contribute several issues.
pub fn validate_records(records: &[PageRecord]) -> ValidationReport {
    let mut report = ValidationReport {
        total_records: records.len(),
        ..Default::default()
    };

    for record in records {
        if record.title.trim().is_empty() {
            report.issues.push(ValidationIssue::EmptyTitle {
                url: record.url.clone(),
            });
        } else {
            report.records_with_title += 1;
        }

        if record.content.trim().is_empty() {
            report.issues.push(ValidationIssue::EmptyContent {
                url: record.url.clone(),
            });
        } else {
            report.records_with_content += 1;
        }

        if record.url.is_empty() || Url::parse(&record.url).is_err() {
            report.issues.push(ValidationIssue::InvalidUrl {
                url: record.url.clone(),
            });
        }
    }

    report
}
