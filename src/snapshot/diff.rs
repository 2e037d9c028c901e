//! Diffing logic for task snapshots.

use crate::snapshot::{ChecklistItem, Snapshot, TaskRecord};

/// Status labels treated as finished when no custom set is configured.
pub const DEFAULT_TERMINAL_STATUSES: &[&str] = &["complete", "closed", "done"];

/// A task whose status label changed between snapshots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusChange {
    /// Task identifier.
    pub id: String,
    /// Task display name.
    pub name: String,
    /// Status in the previous snapshot.
    pub from: String,
    /// Status in the current snapshot.
    pub to: String,
    /// User credited with the change (current record's updater).
    pub actor: String,
}

/// One checklist-level change within a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemChange {
    /// Item present in current but not previous.
    Added {
        /// Item name.
        name: String,
        /// Resolved state at addition.
        resolved: bool,
        /// Attributed actor.
        actor: String,
    },
    /// Item flipped from unresolved to resolved.
    Resolved {
        /// Item name.
        name: String,
        /// Attributed actor.
        actor: String,
    },
    /// Item flipped from resolved back to unresolved.
    Unresolved {
        /// Item name.
        name: String,
        /// Attributed actor.
        actor: String,
    },
    /// Item present in previous but not current. Carries only the name.
    Removed {
        /// Item name.
        name: String,
    },
}

/// Checklist changes for a single task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressUpdate {
    /// Task identifier.
    pub id: String,
    /// Task display name.
    pub name: String,
    /// Item changes: additions first (current order), then resolve
    /// transitions (current order), then removals (previous order).
    pub changes: Vec<ItemChange>,
}

/// Structured differences between two snapshots.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SnapshotDiff {
    /// Tasks present only in the current snapshot.
    pub added: Vec<TaskRecord>,
    /// Tasks present only in the previous snapshot.
    pub removed: Vec<TaskRecord>,
    /// Tasks whose status label changed.
    pub status_changes: Vec<StatusChange>,
    /// Tasks that entered the terminal status set.
    pub completed: Vec<TaskRecord>,
    /// Per-task checklist changes.
    pub progress: Vec<ProgressUpdate>,
}

impl SnapshotDiff {
    /// Whether nothing changed between the two snapshots.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.added.is_empty()
            && self.removed.is_empty()
            && self.status_changes.is_empty()
            && self.completed.is_empty()
            && self.progress.is_empty()
    }
}

/// Compute differences between two snapshots using the default terminal
/// status set.
#[must_use]
pub fn diff(previous: &Snapshot, current: &Snapshot) -> SnapshotDiff {
    diff_with(previous, current, DEFAULT_TERMINAL_STATUSES)
}

/// Compute differences between two snapshots.
///
/// Pure and deterministic: tasks are matched by identifier, never by name,
/// and output ordering follows the input collections. A task is completed
/// only when its status enters `terminal` coming from outside it; residing
/// in the terminal set across both snapshots records nothing.
#[must_use]
pub fn diff_with(previous: &Snapshot, current: &Snapshot, terminal: &[&str]) -> SnapshotDiff {
    let mut result = SnapshotDiff::default();

    for task in current.tasks() {
        let Some(old) = previous.get(&task.id) else {
            result.added.push(task.clone());
            continue;
        };

        if task.status != old.status {
            result.status_changes.push(StatusChange {
                id: task.id.clone(),
                name: task.name.clone(),
                from: old.status.clone(),
                to: task.status.clone(),
                actor: task.updated_by.clone(),
            });
        }
        let was_terminal = terminal.contains(&old.status.as_str());
        let is_terminal = terminal.contains(&task.status.as_str());
        if !was_terminal && is_terminal {
            result.completed.push(task.clone());
        }

        let changes = diff_items(&old.items, &task.items);
        if !changes.is_empty() {
            result.progress.push(ProgressUpdate {
                id: task.id.clone(),
                name: task.name.clone(),
                changes,
            });
        }
    }

    for task in previous.tasks() {
        if current.get(&task.id).is_none() {
            result.removed.push(task.clone());
        }
    }

    result
}

/// Diff two name-keyed checklist item lists of the same task.
fn diff_items(previous: &[ChecklistItem], current: &[ChecklistItem]) -> Vec<ItemChange> {
    let mut changes = Vec::new();

    for item in current {
        if !previous.iter().any(|p| p.name == item.name) {
            changes.push(ItemChange::Added {
                name: item.name.clone(),
                resolved: item.resolved,
                actor: item.actor.clone(),
            });
        }
    }

    for item in current {
        if let Some(old) = previous.iter().find(|p| p.name == item.name) {
            if old.resolved != item.resolved {
                changes.push(if item.resolved {
                    ItemChange::Resolved { name: item.name.clone(), actor: item.actor.clone() }
                } else {
                    ItemChange::Unresolved { name: item.name.clone(), actor: item.actor.clone() }
                });
            }
        }
    }

    for item in previous {
        if !current.iter().any(|c| c.name == item.name) {
            changes.push(ItemChange::Removed { name: item.name.clone() });
        }
    }

    changes
}
