//! Markdown rendering for snapshot diffs.

use chrono::NaiveDate;

use crate::snapshot::{ItemChange, SnapshotDiff, TaskRecord};

/// Render a daily activity report for a snapshot diff.
///
/// Sections appear only when non-empty; a diff with no changes renders a
/// single stable-state line under the heading.
#[must_use]
pub fn render_daily(date: NaiveDate, diff: &SnapshotDiff) -> String {
    let mut lines = vec![format!("# Task activity {date}"), String::new()];

    if !diff.added.is_empty() {
        lines.push("## New tasks".to_string());
        for task in &diff.added {
            lines.push(task_line(task));
        }
        lines.push(String::new());
    }

    if !diff.completed.is_empty() {
        lines.push("## Completed".to_string());
        for task in &diff.completed {
            lines.push(format!("- {}", task.name));
        }
        lines.push(String::new());
    }

    if !diff.status_changes.is_empty() {
        lines.push("## Status changes".to_string());
        for change in &diff.status_changes {
            let actor = actor_note(&change.actor);
            lines.push(format!("- {}: {} -> {}{actor}", change.name, change.from, change.to));
        }
        lines.push(String::new());
    }

    if !diff.removed.is_empty() {
        lines.push("## Removed tasks".to_string());
        for task in &diff.removed {
            lines.push(format!("- {}", task.name));
        }
        lines.push(String::new());
    }

    if !diff.progress.is_empty() {
        lines.push("## Checklist progress".to_string());
        for update in &diff.progress {
            lines.push(format!("- {}:", update.name));
            for change in &update.changes {
                lines.push(format!("  - {}", describe(change)));
            }
        }
        lines.push(String::new());
    }

    if diff.is_empty() {
        lines.push("No changes since the previous snapshot.".to_string());
        lines.push(String::new());
    }

    lines.join("\n")
}

/// One bullet for an added or removed task, crediting the updater if known.
fn task_line(task: &TaskRecord) -> String {
    format!("- {}{}", task.name, actor_note(&task.updated_by))
}

/// Human-readable descriptor for a checklist change.
fn describe(change: &ItemChange) -> String {
    match change {
        ItemChange::Added { name, resolved, actor } => {
            let state = if *resolved { ", resolved" } else { "" };
            format!("added {name}{state}{}", actor_note(actor))
        }
        ItemChange::Resolved { name, actor } => format!("resolved {name}{}", actor_note(actor)),
        ItemChange::Unresolved { name, actor } => format!("reopened {name}{}", actor_note(actor)),
        ItemChange::Removed { name } => format!("removed {name}"),
    }
}

fn actor_note(actor: &str) -> String {
    if actor.is_empty() {
        String::new()
    } else {
        format!(" ({actor})")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::{diff, ChecklistItem, Snapshot, TaskRecord};

    fn date() -> NaiveDate {
        "2025-11-05".parse().unwrap()
    }

    fn task(id: &str, name: &str, status: &str, updated_by: &str) -> TaskRecord {
        TaskRecord {
            id: id.to_string(),
            name: name.to_string(),
            status: status.to_string(),
            creator: String::new(),
            updated_by: updated_by.to_string(),
            items: Vec::new(),
        }
    }

    #[test]
    fn empty_diff_renders_stable_state_line() {
        let output = render_daily(date(), &SnapshotDiff::default());
        assert!(output.starts_with("# Task activity 2025-11-05"));
        assert!(output.contains("No changes since the previous snapshot."));
        assert!(!output.contains("##"));
    }

    #[test]
    fn all_sections_render_in_order() {
        let mut before = task("1", "Book A", "open", "");
        before.items = vec![ChecklistItem {
            name: "Ch1".to_string(),
            resolved: false,
            actor: "aoife".to_string(),
        }];
        let mut after = task("1", "Book A", "done", "conor");
        after.items = vec![ChecklistItem {
            name: "Ch1".to_string(),
            resolved: true,
            actor: "aoife".to_string(),
        }];

        let previous = Snapshot::from_records(vec![before, task("2", "Old Book", "open", "")]);
        let current = Snapshot::from_records(vec![after, task("3", "New Book", "open", "maeve")]);

        let output = render_daily(date(), &diff(&previous, &current));

        let new_pos = output.find("## New tasks").unwrap();
        let completed_pos = output.find("## Completed").unwrap();
        let status_pos = output.find("## Status changes").unwrap();
        let removed_pos = output.find("## Removed tasks").unwrap();
        let progress_pos = output.find("## Checklist progress").unwrap();
        assert!(new_pos < completed_pos);
        assert!(completed_pos < status_pos);
        assert!(status_pos < removed_pos);
        assert!(removed_pos < progress_pos);

        assert!(output.contains("- New Book (maeve)"));
        assert!(output.contains("- Book A: open -> done (conor)"));
        assert!(output.contains("- Old Book"));
        assert!(output.contains("  - resolved Ch1 (aoife)"));
        assert!(!output.contains("No changes"));
    }

    #[test]
    fn removed_item_descriptor_has_no_actor() {
        let mut before = task("1", "Book A", "open", "");
        before.items = vec![ChecklistItem {
            name: "Ch9".to_string(),
            resolved: true,
            actor: "aoife".to_string(),
        }];
        let after = task("1", "Book A", "open", "");

        let d = diff(
            &Snapshot::from_records(vec![before]),
            &Snapshot::from_records(vec![after]),
        );
        let output = render_daily(date(), &d);
        assert!(output.contains("  - removed Ch9\n"));
        assert!(!output.contains("removed Ch9 ("));
    }

    #[test]
    fn added_item_mentions_initial_resolved_state() {
        let before = task("1", "Book A", "open", "");
        let mut after = task("1", "Book A", "open", "");
        after.items = vec![ChecklistItem {
            name: "Ch1".to_string(),
            resolved: true,
            actor: "conor".to_string(),
        }];

        let d = diff(
            &Snapshot::from_records(vec![before]),
            &Snapshot::from_records(vec![after]),
        );
        let output = render_daily(date(), &d);
        assert!(output.contains("  - added Ch1, resolved (conor)"));
    }
}
