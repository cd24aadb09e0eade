//! Flat JSON file holding the most recent scrape.
//!
//! The scraper overwrites the whole file on every run; the dashboard reads
//! the whole file on every request. Records are read back as raw JSON so a
//! hand-edited entry is served as it stands.

use crate::Job;
use anyhow::{Context, Result};
use serde_json::Value;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Writes `jobs` as pretty-printed JSON, replacing whatever was at `path`.
pub fn save_jobs(path: impl AsRef<Path>, jobs: &[Job]) -> Result<()> {
    let path = path.as_ref();

    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        if !dir.exists() {
            fs::create_dir_all(dir)
                .with_context(|| format!("failed to create directory {}", dir.display()))?;
            tracing::info!("📁 Created {:?} directory", dir);
        }
    }

    let json_output = serde_json::to_string_pretty(jobs).context("failed to serialize jobs")?;
    fs::write(path, json_output).with_context(|| format!("failed to write {}", path.display()))?;

    Ok(())
}

/// Reads the raw records from `path`, exactly as stored.
///
/// A missing file, unreadable file, or anything other than a JSON array
/// yields an empty list; callers never see an error.
pub fn load_records(path: impl AsRef<Path>) -> Vec<Value> {
    let path = path.as_ref();

    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::debug!("no store at {:?}, run the scraper first", path);
            return Vec::new();
        }
        Err(e) => {
            tracing::warn!("failed to read {:?}: {}", path, e);
            return Vec::new();
        }
    };

    match serde_json::from_str::<Value>(&content) {
        Ok(Value::Array(records)) => records,
        Ok(_) => {
            tracing::warn!("ignoring store {:?}: top level is not an array", path);
            Vec::new()
        }
        Err(e) => {
            tracing::warn!("ignoring malformed store {:?}: {}", path, e);
            Vec::new()
        }
    }
}

/// Reads every job from `path`. Each record is converted on its own, see
/// [`Job::from_record`].
pub fn load_jobs(path: impl AsRef<Path>) -> Vec<Job> {
    load_records(path).iter().map(Job::from_record).collect()
}
