#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Loading and in-memory storage of the dashboard dataset.
//!
//! The dataset file (`dashboard_data.json`) is produced by an external batch
//! job and replaced wholesale between reads. This crate reads it, attaches
//! freshness metadata (file mtime and load time), and keeps the last
//! successfully loaded copy in a [`DatasetStore`] so that a failed re-read
//! never discards good data.

pub mod store;

use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use chrono::Utc;
use indicacoes_data_models::{DashboardData, FileMeta};
use thiserror::Error;

pub use store::DatasetStore;

/// Errors that can occur while loading the dataset.
#[derive(Debug, Error)]
pub enum DataError {
    /// The dataset file could not be read.
    #[error("Failed to read dataset file: {0}")]
    Io(#[from] std::io::Error),

    /// The dataset file is not valid JSON matching the dashboard shape.
    #[error("Failed to parse dataset file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Loads the dashboard dataset from `path`.
///
/// Stats the file first so the attached [`FileMeta`] reflects the
/// modification time of the bytes actually read. Any IO or parse failure
/// discards the whole load; no partial dataset is ever constructed.
///
/// # Errors
///
/// Returns [`DataError::Io`] when the file is missing or unreadable, and
/// [`DataError::Parse`] when its contents are not a valid dashboard
/// document.
pub fn load_dashboard_file(path: &Path) -> Result<DashboardData, DataError> {
    let stat = std::fs::metadata(path)?;
    let last_modified = stat
        .modified()
        .ok()
        .and_then(millis_since_epoch)
        .unwrap_or(0);

    log::debug!(
        "Loading dashboard data from {} (last modified: {last_modified})",
        path.display()
    );

    let contents = std::fs::read_to_string(path)?;
    let mut data: DashboardData = serde_json::from_str(&contents)?;
    data.meta = Some(FileMeta {
        last_modified,
        loaded_at: Utc::now().timestamp_millis(),
    });
    Ok(data)
}

#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
fn millis_since_epoch(t: SystemTime) -> Option<i64> {
    t.duration_since(UNIX_EPOCH)
        .ok()
        .map(|d| d.as_millis() as i64)
}
