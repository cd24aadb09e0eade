//! Shared job record and flat-file store used by the scraper and dashboard.

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub mod store;

pub use store::{load_jobs, load_records, save_jobs};

/// Placeholder for any text field the listing did not carry.
pub const NOT_SPECIFIED: &str = "Not specified";

/// Location used when a listing names no headquarters.
pub const DEFAULT_LOCATION: &str = "Remote";

fn not_specified() -> String {
    NOT_SPECIFIED.to_string()
}

fn default_location() -> String {
    DEFAULT_LOCATION.to_string()
}

/// A single remote job listing as stored in `data/jobs.json`.
///
/// Missing fields fall back to the same defaults the extractor uses, so a
/// hand-edited store with partial records still loads.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Job {
    #[serde(default = "not_specified")]
    pub title: String,
    #[serde(default = "not_specified")]
    pub company: String,
    #[serde(default = "default_location")]
    pub location: String,
    #[serde(default = "not_specified")]
    pub salary: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub scraped_at: String,
}

/// Text of a field as the store holds it: strings verbatim, anything else
/// as its JSON form.
fn text_field(record: &Value, key: &str, default: fn() -> String) -> String {
    match record.get(key) {
        None => default(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

impl Job {
    /// Builds a job from one raw store record.
    ///
    /// A record that matches the schema is taken whole. Otherwise each field
    /// is read on its own, so one odd value never hides the rest of the
    /// record.
    pub fn from_record(record: &Value) -> Self {
        if let Ok(job) = Job::deserialize(record) {
            return job;
        }

        let categories = match record.get("categories") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| match item {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect(),
            Some(other) => vec![other.to_string()],
        };

        Self {
            title: text_field(record, "title", not_specified),
            company: text_field(record, "company", not_specified),
            location: text_field(record, "location", default_location),
            salary: text_field(record, "salary", not_specified),
            url: text_field(record, "url", String::new),
            categories,
            scraped_at: text_field(record, "scraped_at", String::new),
        }
    }

    /// True when a salary tag was found for this listing.
    pub fn has_salary(&self) -> bool {
        self.salary != NOT_SPECIFIED
    }
}

impl Default for Job {
    fn default() -> Self {
        Self {
            title: not_specified(),
            company: not_specified(),
            location: default_location(),
            salary: not_specified(),
            url: String::new(),
            categories: Vec::new(),
            scraped_at: String::new(),
        }
    }
}
