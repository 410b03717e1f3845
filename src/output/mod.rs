//! Output module
//!
//! This module handles everything the crawl leaves behind:
//! - The immutable run report with its per-reason counts ([`report`])
//! - The human-readable crawl log, accumulated during the run ([`log`])
//! - Timestamped, all-or-nothing file writes ([`writer`])

pub mod log;
pub mod report;
pub mod writer;

pub use log::RunLog;
pub use report::RunReport;
pub use writer::{dataset_path, log_path, write_dataset, write_log};
