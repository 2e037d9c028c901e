//! Snapshot model and normalization.
//!
//! A snapshot is the full set of task records fetched from the tracker at
//! one point in time, stored as a raw JSON array. Normalization turns that
//! raw payload into typed [`TaskRecord`]s, tolerating missing optional
//! fields and heterogeneous encodings, so the differ never has to branch
//! on raw JSON shapes.

pub mod diff;

pub use diff::{diff, diff_with, ItemChange, ProgressUpdate, SnapshotDiff, StatusChange};

use serde_json::Value;

/// Malformed snapshot input that cannot be normalized.
///
/// Field-level problems (missing status, odd resolved encodings) are
/// coerced to defaults and never raised; these variants cover structural
/// failures where proceeding would silently drop data.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    /// The top-level JSON value was not an array of task objects.
    #[error("{label} snapshot is not an array of tasks")]
    NotAnArray {
        /// Which snapshot failed ("previous" or "current").
        label: String,
    },
    /// A task record carried no usable identifier.
    #[error("{label} snapshot record {index} has no id")]
    MissingId {
        /// Which snapshot failed ("previous" or "current").
        label: String,
        /// Zero-based index of the offending record.
        index: usize,
    },
}

/// A checklist sub-item of a task, keyed by name within its parent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChecklistItem {
    /// Item name; unique within the parent task.
    pub name: String,
    /// Whether the item is resolved, normalized from bool/number/string.
    pub resolved: bool,
    /// User credited with the item's state, via the attribution chain.
    pub actor: String,
}

/// One task as of a single snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRecord {
    /// Unique identifier within the snapshot.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Status label, e.g. "open" or "done". Empty when absent upstream.
    pub status: String,
    /// Username of the task creator, or empty.
    pub creator: String,
    /// User credited with the latest change, via the attribution chain.
    pub updated_by: String,
    /// Checklist items in source order, keyed by name.
    pub items: Vec<ChecklistItem>,
}

impl TaskRecord {
    /// Looks up a checklist item by name.
    #[must_use]
    pub fn item(&self, name: &str) -> Option<&ChecklistItem> {
        self.items.iter().find(|i| i.name == name)
    }
}

/// An id-keyed, insertion-ordered collection of task records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    tasks: Vec<TaskRecord>,
}

impl Snapshot {
    /// Normalizes a raw JSON payload into a snapshot.
    ///
    /// `label` names the snapshot in error messages ("previous" or
    /// "current"). A later record with a duplicate id replaces the earlier
    /// one in place, keeping the original position.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError`] if the payload is not an array or a
    /// record has no usable id. Missing optional fields are coerced to
    /// empty defaults instead of failing.
    pub fn from_value(label: &str, raw: &Value) -> Result<Self, SnapshotError> {
        let records = raw
            .as_array()
            .ok_or_else(|| SnapshotError::NotAnArray { label: label.to_string() })?;

        let mut snapshot = Self::default();
        for (index, record) in records.iter().enumerate() {
            let task = normalize_task(record).ok_or_else(|| SnapshotError::MissingId {
                label: label.to_string(),
                index,
            })?;
            snapshot.insert(task);
        }
        Ok(snapshot)
    }

    /// Builds a snapshot from already-typed records (duplicate ids replace).
    #[must_use]
    pub fn from_records(records: Vec<TaskRecord>) -> Self {
        let mut snapshot = Self::default();
        for task in records {
            snapshot.insert(task);
        }
        snapshot
    }

    /// Looks up a task by identifier.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&TaskRecord> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// All tasks in insertion order.
    #[must_use]
    pub fn tasks(&self) -> &[TaskRecord] {
        &self.tasks
    }

    /// Number of tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Whether the snapshot holds no tasks. Empty snapshots are valid
    /// diff input, not an error.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    fn insert(&mut self, task: TaskRecord) {
        if let Some(existing) = self.tasks.iter_mut().find(|t| t.id == task.id) {
            *existing = task;
        } else {
            self.tasks.push(task);
        }
    }
}

/// Summarizes one raw task object, or `None` when it has no usable id.
fn normalize_task(record: &Value) -> Option<TaskRecord> {
    let id = id_field(record)?;
    let creator = user_field(record.get("creator"));
    let first_assignee = record
        .get("assignees")
        .and_then(Value::as_array)
        .and_then(|a| a.first())
        .map(|a| user_field(Some(a)))
        .unwrap_or_default();

    Some(TaskRecord {
        id,
        name: str_field(record, "name"),
        status: status_field(record),
        // Updater priority: first assignee, then creator. The upstream
        // payload has no dedicated updated_by field.
        updated_by: attribute([Some(first_assignee.as_str()), Some(creator.as_str())]),
        creator,
        items: normalize_items(record.get("checklists")),
    })
}

/// Flattens all checklists of a task into one name-keyed item list.
///
/// Items are matched by name within the task, so a duplicate name in a
/// later checklist replaces the earlier entry in place.
fn normalize_items(checklists: Option<&Value>) -> Vec<ChecklistItem> {
    let mut items: Vec<ChecklistItem> = Vec::new();
    let Some(checklists) = checklists.and_then(Value::as_array) else {
        return items;
    };

    for checklist in checklists {
        let checklist_name = str_field(checklist, "name");
        let Some(raw_items) = checklist.get("items").and_then(Value::as_array) else {
            continue;
        };
        for raw in raw_items {
            let assignee = user_field(raw.get("assignee"));
            let creator = user_field(raw.get("creator"));
            let item = ChecklistItem {
                name: str_field(raw, "name"),
                resolved: coerce_resolved(raw.get("resolved")),
                // Attribution chain: item assignee, item creator, then the
                // parent checklist name as a last resort.
                actor: attribute([
                    Some(assignee.as_str()),
                    Some(creator.as_str()),
                    Some(checklist_name.as_str()),
                ]),
            };
            if let Some(existing) = items.iter_mut().find(|i| i.name == item.name) {
                *existing = item;
            } else {
                items.push(item);
            }
        }
    }
    items
}

/// Evaluates an ordered candidate list, returning the first non-empty one.
///
/// Keeps attribution fallback policies auditable as a flat priority list
/// instead of nested conditionals.
fn attribute<const N: usize>(candidates: [Option<&str>; N]) -> String {
    candidates
        .into_iter()
        .flatten()
        .find(|c| !c.is_empty())
        .unwrap_or_default()
        .to_string()
}

/// Extracts the task id, accepting string or numeric encodings.
fn id_field(record: &Value) -> Option<String> {
    match record.get("id") {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    }
}

/// Reads a string field, coercing missing or non-string values to empty.
fn str_field(record: &Value, key: &str) -> String {
    record.get(key).and_then(Value::as_str).unwrap_or_default().to_string()
}

/// Reads the status label from either a plain string or a
/// `{"status": "..."}` object.
fn status_field(record: &Value) -> String {
    match record.get("status") {
        Some(Value::String(s)) => s.clone(),
        Some(obj @ Value::Object(_)) => str_field(obj, "status"),
        _ => String::new(),
    }
}

/// Reads a username from a `{"username": "..."}` object or a plain string.
fn user_field(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(obj @ Value::Object(_)) => str_field(obj, "username"),
        _ => String::new(),
    }
}

/// Normalizes the heterogeneous resolved encodings into a single bool.
///
/// Accepts booleans, numbers (non-zero is resolved), and the strings
/// "true"/"1"/"yes" (case-insensitive). Anything else is unresolved.
fn coerce_resolved(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::String(s)) => {
            matches!(s.to_ascii_lowercase().as_str(), "true" | "1" | "yes")
        }
        _ => false,
    }
}
