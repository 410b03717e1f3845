//! Record types shared across the crawl pipeline
//!
//! A crawl produces two parallel audit trails: page records (the dataset)
//! and skip records (everything deliberately left out, with a reason code).
//! Both serialize with serde; the dataset file is a JSON array of
//! [`PageRecord`] values and skip records feed the crawl log and run report.

use serde::{Deserialize, Serialize};

/// A single crawled page, as it appears in the output dataset
///
/// `pdf_text` is present only when at least one inline PDF on the page
/// yielded extractable text; the key is omitted from the JSON otherwise,
/// and downstream consumers must tolerate its absence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRecord {
    pub url: String,
    pub title: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pdf_text: Option<String>,
}

/// Reason a URL or PDF resource was excluded from the dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    HttpError,
    Timeout,
    Duplicate,
    DepthExceeded,
    OutOfDomain,
    EmptyContent,
    PdfPasswordProtected,
    PdfCorrupt,
    PdfDownloadRequired,
    ParseError,
}

impl SkipReason {
    /// Returns true for the reasons that apply to PDF resources rather
    /// than pages; the run report tallies the two groups separately.
    pub fn is_pdf(&self) -> bool {
        matches!(
            self,
            Self::PdfPasswordProtected | Self::PdfCorrupt | Self::PdfDownloadRequired
        )
    }

    /// The snake_case reason code used in the crawl log
    pub fn code(&self) -> &'static str {
        match self {
            Self::HttpError => "http_error",
            Self::Timeout => "timeout",
            Self::Duplicate => "duplicate",
            Self::DepthExceeded => "depth_exceeded",
            Self::OutOfDomain => "out_of_domain",
            Self::EmptyContent => "empty_content",
            Self::PdfPasswordProtected => "pdf_password_protected",
            Self::PdfCorrupt => "pdf_corrupt",
            Self::PdfDownloadRequired => "pdf_download_required",
            Self::ParseError => "parse_error",
        }
    }
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// An audit entry for a URL or resource deliberately not included in the
/// output dataset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkipRecord {
    pub url: String,
    pub reason: SkipReason,
}

impl SkipRecord {
    pub fn new(url: impl Into<String>, reason: SkipReason) -> Self {
        Self {
            url: url.into(),
            reason,
        }
    }
}
