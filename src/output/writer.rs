//! Dataset and log file writing
//!
//! Both output files are timestamp-named at write time and written
//! all-or-nothing: content goes to a sibling temporary path first and is
//! renamed into place on success, so a failed write can never leave a
//! truncated file that looks complete.

use crate::output::log::RunLog;
use crate::record::PageRecord;
use crate::{CrawlError, Result};
use chrono::{DateTime, Local};
use std::path::{Path, PathBuf};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

/// Path of the dataset file for a run started at the given time
pub fn dataset_path(data_dir: &Path, timestamp: &DateTime<Local>) -> PathBuf {
    data_dir.join(format!(
        "metropole_site_data_{}.json",
        timestamp.format(TIMESTAMP_FORMAT)
    ))
}

/// Path of the crawl log file for a run started at the given time
pub fn log_path(data_dir: &Path, timestamp: &DateTime<Local>) -> PathBuf {
    data_dir.join(format!(
        "crawl_log_{}.txt",
        timestamp.format(TIMESTAMP_FORMAT)
    ))
}

/// Writes the dataset as a pretty-printed JSON array
///
/// Records are written in the order given (breadth-first discovery
/// order); invalid records are included, the validator only reports them.
pub fn write_dataset(records: &[PageRecord], path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(records)?;
    write_atomically(path, json.as_bytes())
}

/// Writes the accumulated crawl log
pub fn write_log(log: &RunLog, path: &Path) -> Result<()> {
    write_atomically(path, log.contents().as_bytes())
}

/// Writes to a sibling `.tmp` path and renames into place
fn write_atomically(path: &Path, bytes: &[u8]) -> Result<()> {
    let mut tmp = path.as_os_str().to_os_string();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    let write_err = |source: std::io::Error| CrawlError::OutputWrite {
        path: path.to_path_buf(),
        source,
    };

    std::fs::write(&tmp, bytes).map_err(write_err)?;

    if let Err(source) = std::fs::rename(&tmp, path) {
        // Leave nothing half-finished behind
        let _ = std::fs::remove_file(&tmp);
        return Err(write_err(source));
    }

    Ok(())
}
