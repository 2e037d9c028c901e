//! Activity store — date-keyed persistence for snapshots and reports.
//!
//! All files live under an explicit root path passed in by the caller
//! (never the process working directory) and all I/O goes through the
//! `FileSystem` port. Directory layout:
//!
//! ```text
//! <root>/
//!   ├── data/       <date>.json   raw task snapshots
//!   ├── reports/    <date>.md     daily diff reports
//!   └── weekly/     <y>-W<ww>.md  weekly digests
//! ```

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde_json::Value;

use crate::context::ServiceContext;
use crate::snapshot::Snapshot;

/// Persistence layer for snapshots, daily reports, and weekly digests.
pub struct ActivityStore<'a> {
    ctx: &'a ServiceContext,
    root: PathBuf,
}

impl<'a> ActivityStore<'a> {
    /// Creates a new store rooted at the given path.
    #[must_use]
    pub fn new(ctx: &'a ServiceContext, root: &Path) -> Self {
        Self { ctx, root: root.to_path_buf() }
    }

    /// Whether a snapshot file exists for the given date.
    #[must_use]
    pub fn has_snapshot(&self, date: NaiveDate) -> bool {
        self.ctx.fs.exists(&self.snapshot_path(date))
    }

    /// Saves a raw task array as `<root>/data/<date>.json`.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or file writing fails.
    pub fn save_snapshot(&self, date: NaiveDate, tasks: &[Value]) -> Result<(), String> {
        let json = serde_json::to_string_pretty(tasks)
            .map_err(|e| format!("Failed to serialize snapshot for {date}: {e}"))?;
        self.ctx
            .fs
            .write(&self.snapshot_path(date), &json)
            .map_err(|e| format!("Failed to write snapshot for {date}: {e}"))
    }

    /// Loads and normalizes the snapshot for a date.
    ///
    /// `label` names the snapshot's role in diff error messages
    /// ("previous" or "current").
    ///
    /// # Errors
    ///
    /// Returns an error if no snapshot was recorded for the date, if the
    /// file is not valid JSON, or if normalization rejects the payload.
    pub fn load_snapshot(&self, label: &str, date: NaiveDate) -> Result<Snapshot, String> {
        let path = self.snapshot_path(date);
        if !self.ctx.fs.exists(&path) {
            return Err(format!("No snapshot recorded for {date} ({})", path.display()));
        }
        let contents = self
            .ctx
            .fs
            .read_to_string(&path)
            .map_err(|e| format!("Failed to read snapshot for {date}: {e}"))?;
        let raw: Value = serde_json::from_str(&contents)
            .map_err(|e| format!("Snapshot for {date} is not valid JSON: {e}"))?;
        Snapshot::from_value(label, &raw).map_err(|e| e.to_string())
    }

    /// Saves a daily report as `<root>/reports/<date>.md`.
    ///
    /// # Errors
    ///
    /// Returns an error if file writing fails.
    pub fn save_report(&self, date: NaiveDate, content: &str) -> Result<(), String> {
        self.ctx
            .fs
            .write(&self.report_path(date), content)
            .map_err(|e| format!("Failed to write report for {date}: {e}"))
    }

    /// Loads the daily report for a date.
    ///
    /// # Errors
    ///
    /// Returns an error if the report cannot be read.
    pub fn load_report(&self, date: NaiveDate) -> Result<String, String> {
        self.ctx
            .fs
            .read_to_string(&self.report_path(date))
            .map_err(|e| format!("Failed to read report for {date}: {e}"))
    }

    /// Lists the dates of all stored daily reports, in ascending order.
    ///
    /// Files whose names are not `<ISO date>.md` are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if the reports directory cannot be listed.
    pub fn report_dates(&self) -> Result<Vec<NaiveDate>, String> {
        let reports_dir = self.root.join("reports");
        if !self.ctx.fs.exists(&reports_dir) {
            return Ok(Vec::new());
        }
        let entries = self
            .ctx
            .fs
            .list_dir(&reports_dir)
            .map_err(|e| format!("Failed to list reports directory: {e}"))?;
        let mut dates: Vec<NaiveDate> = entries
            .into_iter()
            .filter_map(|name| {
                name.strip_suffix(".md").and_then(|base| base.parse::<NaiveDate>().ok())
            })
            .collect();
        dates.sort_unstable();
        Ok(dates)
    }

    /// Saves a weekly digest as `<root>/weekly/<year>-W<week>.md` and
    /// returns the path.
    ///
    /// # Errors
    ///
    /// Returns an error if file writing fails.
    pub fn save_weekly(&self, year: i32, week: u32, content: &str) -> Result<PathBuf, String> {
        let path = self.root.join("weekly").join(format!("{year}-W{week:02}.md"));
        self.ctx
            .fs
            .write(&path, content)
            .map_err(|e| format!("Failed to write weekly digest {year}-W{week:02}: {e}"))?;
        Ok(path)
    }

    fn snapshot_path(&self, date: NaiveDate) -> PathBuf {
        self.root.join("data").join(format!("{date}.json"))
    }

    fn report_path(&self, date: NaiveDate) -> PathBuf {
        self.root.join("reports").join(format!("{date}.md"))
    }
}


#[cfg(test)]
mod tests {
    use super::testutil::{mem_context, MemFs};
    use super::*;
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    fn ctx() -> ServiceContext {
        mem_context(MemFs::new(), Utc.with_ymd_and_hms(2025, 11, 5, 9, 0, 0).unwrap())
    }

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn snapshot_round_trips_through_normalization() {
        let ctx = ctx();
        let store = ActivityStore::new(&ctx, Path::new("/club"));

        let tasks = vec![json!({"id": "t1", "name": "Book A", "status": {"status": "open"}})];
        store.save_snapshot(date("2025-11-05"), &tasks).unwrap();

        assert!(store.has_snapshot(date("2025-11-05")));
        let snapshot = store.load_snapshot("current", date("2025-11-05")).unwrap();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot.get("t1").unwrap().status, "open");
    }

    #[test]
    fn missing_snapshot_names_the_date() {
        let ctx = ctx();
        let store = ActivityStore::new(&ctx, Path::new("/club"));

        let err = store.load_snapshot("previous", date("2025-11-04")).unwrap_err();
        assert!(err.contains("2025-11-04"));
        assert!(!store.has_snapshot(date("2025-11-04")));
    }

    #[test]
    fn malformed_snapshot_surfaces_normalization_error() {
        let ctx = ctx();
        let store = ActivityStore::new(&ctx, Path::new("/club"));

        ctx.fs.write(Path::new("/club/data/2025-11-05.json"), "{\"tasks\": []}").unwrap();
        let err = store.load_snapshot("current", date("2025-11-05")).unwrap_err();
        assert!(err.contains("current snapshot is not an array"));
    }

    #[test]
    fn report_dates_skip_non_date_files() {
        let ctx = ctx();
        let store = ActivityStore::new(&ctx, Path::new("/club"));

        store.save_report(date("2025-11-03"), "# a").unwrap();
        store.save_report(date("2025-11-01"), "# b").unwrap();
        ctx.fs.write(Path::new("/club/reports/README.md"), "not a report").unwrap();

        assert_eq!(store.report_dates().unwrap(), vec![date("2025-11-01"), date("2025-11-03")]);
        assert_eq!(store.load_report(date("2025-11-03")).unwrap(), "# a");
    }

    #[test]
    fn report_dates_empty_when_directory_missing() {
        let ctx = ctx();
        let store = ActivityStore::new(&ctx, Path::new("/club"));
        assert!(store.report_dates().unwrap().is_empty());
    }

    #[test]
    fn weekly_path_zero_pads_the_week() {
        let ctx = ctx();
        let store = ActivityStore::new(&ctx, Path::new("/club"));

        let path = store.save_weekly(2026, 7, "# digest").unwrap();
        assert_eq!(path, Path::new("/club/weekly/2026-W07.md"));
        assert_eq!(ctx.fs.read_to_string(&path).unwrap(), "# digest");
    }
}
