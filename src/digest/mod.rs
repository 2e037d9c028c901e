//! Weekly digest generation.
//!
//! Collects the daily reports falling in the last full week (Monday to
//! Monday), embeds them in a prompt, and asks the LLM for a prose digest.
//! When the week has no reports a placeholder digest is written instead,
//! so the output file always exists for the week.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use chrono::{Datelike, Duration, NaiveDate};

use crate::config::Config;
use crate::context::ServiceContext;
use crate::ports::llm::CompletionRequest;
use crate::store::ActivityStore;

/// The half-open date window covered by a digest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekWindow {
    /// Last Monday (inclusive).
    pub start: NaiveDate,
    /// This Monday (exclusive).
    pub end: NaiveDate,
}

impl WeekWindow {
    /// The window covering the full week before the one containing `today`.
    #[must_use]
    pub fn before(today: NaiveDate) -> Self {
        let this_monday =
            today - Duration::days(i64::from(today.weekday().num_days_from_monday()));
        Self { start: this_monday - Duration::days(7), end: this_monday }
    }

    /// Whether the date falls inside the window.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date < self.end
    }

    /// The last day inside the window (the Sunday).
    #[must_use]
    pub fn last_day(&self) -> NaiveDate {
        self.end - Duration::days(1)
    }

    /// ISO year and week number of the covered week.
    #[must_use]
    pub fn iso_week(&self) -> (i32, u32) {
        let iso = self.last_day().iso_week();
        (iso.year(), iso.week())
    }
}

/// Generate the weekly digest and return the path it was written to.
///
/// The window is derived from the context clock; reports are read from and
/// the digest written to the store under `root`.
///
/// # Errors
///
/// Returns an error string if report collection, the LLM call, or the
/// final write fails.
pub async fn generate(
    ctx: &ServiceContext,
    config: &Config,
    root: &Path,
) -> Result<PathBuf, String> {
    let store = ActivityStore::new(ctx, root);
    let window = WeekWindow::before(ctx.clock.now().date_naive());
    let (year, week) = window.iso_week();

    let reports = collect_reports(&store, window)?;
    if reports.is_empty() {
        return store.save_weekly(year, week, &placeholder(window, year, week));
    }

    let request = CompletionRequest {
        model: config.model.clone(),
        prompt: build_prompt(&reports, window),
        max_tokens: config.max_tokens,
    };
    let response =
        ctx.llm.complete(&request).await.map_err(|e| format!("Digest generation failed: {e}"))?;

    store.save_weekly(year, week, response.text.trim())
}

/// Load the daily reports whose dates fall inside the window, ascending.
///
/// # Errors
///
/// Returns an error string if the reports directory cannot be listed or a
/// selected report cannot be read.
pub fn collect_reports(
    store: &ActivityStore<'_>,
    window: WeekWindow,
) -> Result<Vec<(NaiveDate, String)>, String> {
    let mut picked = Vec::new();
    for date in store.report_dates()? {
        if window.contains(date) {
            picked.push((date, store.load_report(date)?));
        }
    }
    Ok(picked)
}

/// Build the digest prompt embedding the daily reports.
#[must_use]
pub fn build_prompt(reports: &[(NaiveDate, String)], window: WeekWindow) -> String {
    let mut prompt = format!(
        "You are the record keeper of a reading club. Based on the daily \
         activity reports for {} to {} below, write a weekly digest in \
         Markdown.\n\n\
         Cover:\n\
         - What happened this week: new tasks, finished books, status moves.\n\
         - Which members were most active.\n\
         - The books or topics read, naming titles where the reports do.\n\
         - A final \"Next week\" section with 1-3 suggested follow-up reads \
         or discussion directions.\n\n\
         Keep the tone natural and clear, like an internal club summary.\n\n\
         === Daily reports ===\n",
        window.start,
        window.last_day(),
    );
    for (date, content) in reports {
        let _ = write!(prompt, "\n## {date}\n\n{content}\n");
    }
    prompt
}

/// Digest written when the week contains no daily reports.
#[must_use]
pub fn placeholder(window: WeekWindow, year: i32, week: u32) -> String {
    format!(
        "# Weekly digest {year}-W{week:02}\n\n\
         Window: {} to {}\n\n\
         No daily reports were found for this week.\n",
        window.start,
        window.last_day(),
    )
}
