use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

/// Copy, skip and error counters for one run.
///
/// Skips cover both excluded extensions and unreadable entries; an
/// unreadable entry also counts as an error.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunCounters {
    pub copied: usize,
    pub skipped: usize,
    pub errors: usize,
}

impl RunCounters {
    pub fn any_copied(&self) -> bool {
        self.copied > 0
    }
}

/// Result record for one organize run. Built incrementally while the
/// copy loop runs and serialized as-is in JSON output mode.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrganizeReport {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub counters: RunCounters,
    pub files_by_category: HashMap<String, usize>,
    pub bytes_copied: u64,
    pub started_at: DateTime<Utc>,
    pub duration: Duration,
    pub errors: Vec<String>,
}

impl OrganizeReport {
    pub fn begin(source: PathBuf, destination: PathBuf) -> Self {
        Self {
            source,
            destination,
            counters: RunCounters::default(),
            files_by_category: HashMap::new(),
            bytes_copied: 0,
            started_at: Utc::now(),
            duration: Duration::ZERO,
            errors: Vec::new(),
        }
    }

    pub fn record_copied(&mut self, category: &str, bytes: u64) {
        self.counters.copied += 1;
        self.bytes_copied += bytes;
        *self
            .files_by_category
            .entry(category.to_string())
            .or_insert(0) += 1;
    }

    pub fn record_skipped(&mut self) {
        self.counters.skipped += 1;
    }

    pub fn record_error<S: Into<String>>(&mut self, message: S) {
        self.counters.errors += 1;
        self.errors.push(message.into());
    }

    /// Unreadable enumeration entries count as a skip and an error.
    pub fn record_unreadable<S: Into<String>>(&mut self, message: S) {
        self.counters.skipped += 1;
        self.counters.errors += 1;
        self.errors.push(message.into());
    }

    pub fn finish(&mut self, duration: Duration) {
        self.duration = duration;
    }

    pub fn any_copied(&self) -> bool {
        self.counters.any_copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report() -> OrganizeReport {
        OrganizeReport::begin(PathBuf::from("/src"), PathBuf::from("/dst"))
    }

    #[test]
    fn test_counters_start_at_zero() {
        let report = report();
        assert_eq!(report.counters, RunCounters::default());
        assert!(!report.any_copied());
    }

    #[test]
    fn test_record_copied_tracks_category_and_bytes() {
        let mut report = report();
        report.record_copied("txt", 10);
        report.record_copied("txt", 5);
        report.record_copied("pdf", 100);

        assert_eq!(report.counters.copied, 3);
        assert_eq!(report.bytes_copied, 115);
        assert_eq!(report.files_by_category["txt"], 2);
        assert_eq!(report.files_by_category["pdf"], 1);
        assert!(report.any_copied());
    }

    #[test]
    fn test_unreadable_counts_twice() {
        let mut report = report();
        report.record_unreadable("broken entry");

        assert_eq!(report.counters.skipped, 1);
        assert_eq!(report.counters.errors, 1);
        assert_eq!(report.counters.copied, 0);
        assert_eq!(report.errors.len(), 1);
    }

    #[test]
    fn test_report_serializes_to_json() {
        let mut report = report();
        report.record_copied("md", 42);
        report.record_error("one failure");
        report.finish(Duration::from_millis(1500));

        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"copied\":1"));
        assert!(json.contains("\"errors\":1"));
        assert!(json.contains("one failure"));

        let parsed: OrganizeReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.counters, report.counters);
        assert_eq!(parsed.bytes_copied, 42);
    }
}
