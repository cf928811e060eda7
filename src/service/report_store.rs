//! Saving reports as pretty-printed JSON files.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use chrono::{DateTime, NaiveDate, Utc};
use regex::Regex;
use serde::Serialize;

use crate::error::Result;

/// A report plus the moment it was written.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SavedReport<'a, T: Serialize> {
    analyzed_at: DateTime<Utc>,
    #[serde(flatten)]
    report: &'a T,
}

/// Writes reports under a single directory.
#[derive(Debug, Clone)]
pub struct ReportStore {
    dir: PathBuf,
}

impl ReportStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// `seo-report-<identifier>-<YYYY-MM-DD>.json`, with every
    /// non-alphanumeric character of the identifier replaced by `-`.
    pub fn file_name(identifier: &str, date: NaiveDate) -> String {
        static NON_ALNUM: OnceLock<Regex> = OnceLock::new();
        let re = NON_ALNUM.get_or_init(|| Regex::new(r"[^A-Za-z0-9]").expect("valid regex"));
        format!(
            "seo-report-{}-{}.json",
            re.replace_all(identifier, "-"),
            date.format("%Y-%m-%d")
        )
    }

    pub fn save<T: Serialize>(&self, identifier: &str, report: &T) -> Result<PathBuf> {
        self.save_at(identifier, report, Utc::now())
    }

    pub fn save_at<T: Serialize>(
        &self,
        identifier: &str,
        report: &T,
        analyzed_at: DateTime<Utc>,
    ) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.dir)?;

        let path = self
            .dir
            .join(Self::file_name(identifier, analyzed_at.date_naive()));
        let json = serde_json::to_string_pretty(&SavedReport {
            analyzed_at,
            report,
        })?;
        std::fs::write(&path, json)?;

        log::info!("Report saved to {}", path.display());
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ScoreReport;
    use chrono::TimeZone;

    #[test]
    fn test_file_name_sanitizes_identifier() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert_eq!(
            ReportStore::file_name("https://acme.test/a?b=1", date),
            "seo-report-https---acme-test-a-b-1-2024-03-09.json"
        );
        // one dash per character, not per byte
        assert_eq!(
            ReportStore::file_name("café", date),
            "seo-report-caf--2024-03-09.json"
        );
    }

    #[test]
    fn test_save_writes_wrapped_pretty_json() {
        let dir = tempfile::tempdir().unwrap();
        let store = ReportStore::new(dir.path().join("reports"));
        let report = ScoreReport::extraction_failed("https://acme.test/", "timeout");
        let at = Utc.with_ymd_and_hms(2024, 3, 9, 12, 0, 0).unwrap();

        let path = store.save_at("https://acme.test/", &report, at).unwrap();

        assert_eq!(
            path.file_name().unwrap().to_str().unwrap(),
            "seo-report-https---acme-test--2024-03-09.json"
        );
        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains('\n'));

        let value: serde_json::Value = serde_json::from_str(&contents).unwrap();
        assert_eq!(value["analyzedAt"], "2024-03-09T12:00:00Z");
        assert_eq!(value["url"], "https://acme.test/");
        assert_eq!(value["overallScore"], 0);
    }

    #[test]
    fn test_save_overwrites_same_day_report() {
        let dir = tempfile::tempdir().unwrap();
        let store = ReportStore::new(dir.path());
        let at = Utc.with_ymd_and_hms(2024, 3, 9, 8, 0, 0).unwrap();

        let first = store.save_at("batch-1", &serde_json::json!({ "n": 1 }), at).unwrap();
        let second = store.save_at("batch-1", &serde_json::json!({ "n": 2 }), at).unwrap();

        assert_eq!(first, second);
        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(second).unwrap()).unwrap();
        assert_eq!(value["n"], 2);
    }
}
