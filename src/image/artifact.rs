//! Local persistence of generated images.

use crate::error::Result;
use chrono::{DateTime, Local};
use std::fs;
use std::path::{Path, PathBuf};

/// Timestamp format used in artifact filenames.
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Writes image bytes to `<dir>/<prefix>_<timestamp>.png`, creating the
/// directory if it does not exist, and returns the path.
///
/// Timestamps have second granularity: a second save within the same
/// wall-clock second reuses the filename and overwrites the first.
pub fn persist(bytes: &[u8], dir: impl AsRef<Path>, prefix: &str) -> Result<PathBuf> {
    persist_at(bytes, dir.as_ref(), prefix, Local::now())
}

fn persist_at(bytes: &[u8], dir: &Path, prefix: &str, at: DateTime<Local>) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(format!("{}_{}.png", prefix, at.format(TIMESTAMP_FORMAT)));
    fs::write(&path, bytes)?;
    Ok(path)
}
