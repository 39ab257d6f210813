//! Scope state: the declared task, its allowed files, the attempt ledger, and
//! the violation log.
//!
//! [`ScopeRegistry`] holds data and keeps its invariants; it makes no policy
//! decisions. The file-count ceiling and the enable switch live in
//! [`ScopeGuard`](crate::ScopeGuard).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use uuid::Uuid;

use crate::operation::OperationKind;
use crate::path::{is_scope_match, normalize_path, normalize_scope_entry};

/// Description used when a task is declared without one, and recorded on
/// violations that happen before any task is declared.
pub const UNSPECIFIED_TASK: &str = "unspecified";

/// A declared unit of work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Free-text description of the work.
    pub description: String,
    /// When the task was declared.
    pub declared_at: DateTime<Utc>,
}

impl Task {
    /// Create a task declared now. A blank description becomes
    /// [`UNSPECIFIED_TASK`].
    #[must_use]
    pub fn new(description: impl Into<String>) -> Self {
        let description = description.into();
        let description = if description.trim().is_empty() {
            UNSPECIFIED_TASK.to_owned()
        } else {
            description
        };
        Self {
            description,
            declared_at: Utc::now(),
        }
    }
}

/// Unique identifier for a violation record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ViolationId(pub Uuid);

impl ViolationId {
    /// Create a new random violation ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ViolationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ViolationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "violation:{}", self.0)
    }
}

/// An attempt to modify a file outside the active scope.
///
/// Records are immutable once created; the registry only ever appends them
/// or clears the whole log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Unique record ID.
    pub id: ViolationId,
    /// Normalized path of the target file.
    pub file: String,
    /// What the attempt tried to do.
    pub operation: OperationKind,
    /// When the attempt was evaluated.
    pub timestamp: DateTime<Utc>,
    /// Task description active at evaluation time.
    pub task: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} of '{}' outside scope of task '{}'",
            self.operation, self.file, self.task
        )
    }
}

/// Attempt count for one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerEntry {
    /// Normalized path.
    pub file: String,
    /// Number of modification attempts, allowed or not.
    pub modification_count: u64,
}

/// Task, scope, ledger and violation state for one guard.
#[derive(Debug, Default)]
pub struct ScopeRegistry {
    task: Option<Task>,
    allowed: BTreeSet<String>,
    ledger: HashMap<String, u64>,
    /// Ledger keys in first-touch order.
    touch_order: Vec<String>,
    violations: Vec<Violation>,
}

impl ScopeRegistry {
    /// Create an empty registry with no task declared.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the current task and its allowed files.
    ///
    /// Entries are normalized like requested paths (see
    /// [`normalize_scope_entry`]), keeping a trailing `/` on directory
    /// entries. Blank entries are dropped. The ledger and violation log are left untouched.
    pub fn set_task<I, S>(&mut self, description: impl Into<String>, declared_files: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.task = Some(Task::new(description));
        self.allowed = declared_files
            .into_iter()
            .filter_map(|f| normalize_scope_entry(f.as_ref()))
            .collect();
    }

    /// Whether `path` falls inside any allowed entry.
    ///
    /// See [`is_scope_match`] for the matching rule and its false positives.
    #[must_use]
    pub fn is_path_allowed(&self, path: &str) -> bool {
        let normalized = normalize_path(path);
        self.allowed
            .iter()
            .any(|entry| is_scope_match(&normalized, entry))
    }

    /// Count one modification attempt against `path` and return the new
    /// count for it.
    pub fn record_access(&mut self, path: &str) -> u64 {
        let normalized = normalize_path(path);
        if let Some(count) = self.ledger.get_mut(&normalized) {
            *count = count.saturating_add(1);
            return *count;
        }
        self.touch_order.push(normalized.clone());
        self.ledger.insert(normalized, 1);
        1
    }

    /// Append a violation for `path` under the active task and return it.
    pub fn record_violation(&mut self, path: &str, operation: OperationKind) -> Violation {
        let violation = Violation {
            id: ViolationId::new(),
            file: normalize_path(path),
            operation,
            timestamp: Utc::now(),
            task: self.task_description().to_owned(),
        };
        self.violations.push(violation.clone());
        violation
    }

    /// Drop the task, scope, ledger and violation log.
    pub fn clear(&mut self) {
        self.task = None;
        self.allowed.clear();
        self.ledger.clear();
        self.touch_order.clear();
        self.violations.clear();
    }

    /// The active task, if one has been declared.
    #[must_use]
    pub fn task(&self) -> Option<&Task> {
        self.task.as_ref()
    }

    /// Description of the active task, or [`UNSPECIFIED_TASK`].
    #[must_use]
    pub fn task_description(&self) -> &str {
        self.task
            .as_ref()
            .map_or(UNSPECIFIED_TASK, |t| t.description.as_str())
    }

    /// The allowed file entries, sorted.
    #[must_use]
    pub fn allowed_files(&self) -> &BTreeSet<String> {
        &self.allowed
    }

    /// Attempts recorded against `path` (normalized before lookup).
    #[must_use]
    pub fn access_count(&self, path: &str) -> u64 {
        self.ledger
            .get(&normalize_path(path))
            .copied()
            .unwrap_or_default()
    }

    /// Ledger entries in first-touch order.
    #[must_use]
    pub fn modified_files(&self) -> Vec<LedgerEntry> {
        self.touch_order
            .iter()
            .map(|file| LedgerEntry {
                file: file.clone(),
                modification_count: self.ledger.get(file).copied().unwrap_or_default(),
            })
            .collect()
    }

    /// Violations in chronological order.
    #[must_use]
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }
}
