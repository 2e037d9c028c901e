//! `taskpulse fetch` command.

use std::path::Path;

use crate::commands::log;
use crate::config::Config;
use crate::context::ServiceContext;
use crate::store::ActivityStore;

/// Execute the `fetch` command.
///
/// Fetches every task in the configured space and saves the raw payload
/// as today's snapshot under `<root>/data/`. Lists that failed mid-walk
/// are reported on stderr; the tasks gathered from the other lists are
/// still saved.
///
/// # Errors
///
/// Returns an error string if the space id is not configured, the space
/// itself cannot be listed, or the snapshot cannot be written.
pub async fn run(ctx: &ServiceContext, root: &Path) -> Result<(), String> {
    let config = Config::load(ctx, root)?;
    if config.space_id.is_empty() {
        return Err(format!(
            "space_id is not configured; set it in {}/{}",
            root.display(),
            crate::config::CONFIG_FILE
        ));
    }

    log(ctx, &format!("Fetching tasks from space {}", config.space_id));
    let outcome = ctx
        .tasks
        .fetch_space_tasks(&config.space_id)
        .await
        .map_err(|e| format!("Fetch failed: {e}"))?;

    for failure in &outcome.failures {
        log(ctx, &format!("Skipped list: {failure}"));
    }

    let date = ctx.clock.now().date_naive();
    let store = ActivityStore::new(ctx, root);
    store.save_snapshot(date, &outcome.tasks)?;

    if outcome.failures.is_empty() {
        println!("Saved {} tasks to data/{date}.json", outcome.tasks.len());
    } else {
        println!(
            "Saved {} tasks to data/{date}.json ({} list(s) skipped)",
            outcome.tasks.len(),
            outcome.failures.len(),
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::tasks::FetchOutcome;
    use crate::store::testutil::{mem_context, MemFs, StaticTaskSource};
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    #[tokio::test]
    async fn fetch_saves_todays_snapshot() {
        let fs = MemFs::new();
        let now = Utc.with_ymd_and_hms(2025, 11, 5, 8, 0, 0).unwrap();
        let mut ctx = mem_context(fs, now);
        ctx.tasks = Box::new(StaticTaskSource(FetchOutcome {
            tasks: vec![json!({"id": "t1", "name": "Book A"})],
            failures: Vec::new(),
        }));
        ctx.fs.write(Path::new("/club/taskpulse.yaml"), "space_id: \"42\"\n").unwrap();

        run(&ctx, Path::new("/club")).await.unwrap();

        let saved = ctx.fs.read_to_string(Path::new("/club/data/2025-11-05.json")).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&saved).unwrap();
        assert_eq!(parsed[0]["id"], "t1");
    }

    #[tokio::test]
    async fn fetch_saves_partial_snapshot_when_a_list_fails() {
        let fs = MemFs::new();
        let now = Utc.with_ymd_and_hms(2025, 11, 5, 8, 0, 0).unwrap();
        let mut ctx = mem_context(fs, now);
        ctx.tasks = Box::new(StaticTaskSource(FetchOutcome {
            tasks: vec![json!({"id": "t1", "name": "Book A"})],
            failures: vec!["tasks request failed for list Fiction (500): boom".to_string()],
        }));
        ctx.fs.write(Path::new("/club/taskpulse.yaml"), "space_id: \"42\"\n").unwrap();

        run(&ctx, Path::new("/club")).await.unwrap();

        // The surviving lists' tasks are still written as the snapshot.
        let saved = ctx.fs.read_to_string(Path::new("/club/data/2025-11-05.json")).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&saved).unwrap();
        assert_eq!(parsed.as_array().unwrap().len(), 1);
        assert_eq!(parsed[0]["id"], "t1");
    }

    #[tokio::test]
    async fn fetch_requires_a_configured_space() {
        let fs = MemFs::new();
        let now = Utc.with_ymd_and_hms(2025, 11, 5, 8, 0, 0).unwrap();
        let ctx = mem_context(fs, now);

        let err = run(&ctx, Path::new("/club")).await.unwrap_err();
        assert!(err.contains("space_id"));
    }
}
