//! `taskpulse compare` command.

use std::path::Path;

use chrono::{Duration, NaiveDate};

use crate::commands::log;
use crate::config::Config;
use crate::context::ServiceContext;
use crate::report;
use crate::snapshot;
use crate::store::ActivityStore;

/// Execute the `compare` command.
///
/// Diffs the snapshot of `date` (default: today) against the previous
/// day's, writes a markdown report to `<root>/reports/<date>.md`, and
/// prints category counts.
///
/// # Errors
///
/// Returns an error string if either snapshot is missing or malformed, or
/// if the report cannot be written.
pub fn run(ctx: &ServiceContext, root: &Path, date: Option<NaiveDate>) -> Result<(), String> {
    let config = Config::load(ctx, root)?;
    let store = ActivityStore::new(ctx, root);

    let date = date.unwrap_or_else(|| ctx.clock.now().date_naive());
    let previous_date = date - Duration::days(1);

    log(ctx, &format!("Comparing snapshots {previous_date} -> {date}"));
    let previous = store.load_snapshot("previous", previous_date)?;
    let current = store.load_snapshot("current", date)?;

    let diff = snapshot::diff_with(&previous, &current, &config.terminal_statuses());

    let markdown = report::render_daily(date, &diff);
    store.save_report(date, &markdown)?;

    println!(
        "New: {}  Completed: {}  Status changes: {}  Removed: {}  Progress: {}",
        diff.added.len(),
        diff.completed.len(),
        diff.status_changes.len(),
        diff.removed.len(),
        diff.progress.len(),
    );
    println!("Report saved to reports/{date}.md");
    Ok(())
}
