//! End-of-task report.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::registry::{LedgerEntry, ScopeRegistry, Task, Violation};

/// Read-only snapshot of a guard's state.
///
/// Serializes as
/// `{task, totalModifications, modifiedFiles, violations, hasViolations, timestamp}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScopeReport {
    /// The active task, or `null` when none is declared.
    pub task: Option<Task>,
    /// Number of distinct files with at least one attempt.
    pub total_modifications: usize,
    /// Per-file attempt counts in first-touch order.
    pub modified_files: Vec<LedgerEntry>,
    /// Every violation in chronological order.
    pub violations: Vec<Violation>,
    /// Whether `violations` is non-empty.
    pub has_violations: bool,
    /// When the snapshot was taken.
    pub timestamp: DateTime<Utc>,
}

impl ScopeReport {
    /// Snapshot `registry` now.
    #[must_use]
    pub fn snapshot(registry: &ScopeRegistry) -> Self {
        let modified_files = registry.modified_files();
        let violations = registry.violations().to_vec();
        Self {
            task: registry.task().cloned(),
            total_modifications: modified_files.len(),
            modified_files,
            has_violations: !violations.is_empty(),
            violations,
            timestamp: Utc::now(),
        }
    }

    /// Total attempts across all files.
    #[must_use]
    pub fn total_attempts(&self) -> u64 {
        self.modified_files
            .iter()
            .fold(0u64, |acc, e| acc.saturating_add(e.modification_count))
    }

    /// One-line human summary, used in logs and by the CLI.
    #[must_use]
    pub fn summary(&self) -> String {
        let task = self
            .task
            .as_ref()
            .map_or("<none>", |t| t.description.as_str());
        format!(
            "task '{task}': {} file(s) touched, {} attempt(s), {} violation(s)",
            self.total_modifications,
            self.total_attempts(),
            self.violations.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operation::OperationKind;

    #[test]
    fn test_empty_snapshot() {
        let report = ScopeReport::snapshot(&ScopeRegistry::new());
        assert!(report.task.is_none());
        assert_eq!(report.total_modifications, 0);
        assert!(report.modified_files.is_empty());
        assert!(report.violations.is_empty());
        assert!(!report.has_violations);
    }

    #[test]
    fn test_snapshot_counts() {
        let mut registry = ScopeRegistry::new();
        registry.set_task("fix login validation", ["login.js"]);
        registry.record_access("login.js");
        registry.record_access("export.js");
        registry.record_access("export.js");
        registry.record_violation("export.js", OperationKind::Write);

        let report = ScopeReport::snapshot(&registry);
        assert_eq!(report.total_modifications, 2);
        assert_eq!(report.total_attempts(), 3);
        assert!(report.has_violations);
        assert_eq!(
            report.summary(),
            "task 'fix login validation': 2 file(s) touched, 3 attempt(s), 1 violation(s)"
        );
    }

    #[test]
    fn test_report_wire_shape() {
        let mut registry = ScopeRegistry::new();
        registry.set_task("t", ["a.js"]);
        registry.record_access("a.js");

        let json = serde_json::to_value(ScopeReport::snapshot(&registry)).unwrap();
        for key in [
            "task",
            "totalModifications",
            "modifiedFiles",
            "violations",
            "hasViolations",
            "timestamp",
        ] {
            assert!(json.get(key).is_some(), "missing key {key}");
        }
        assert_eq!(json["task"]["description"], "t");
        assert_eq!(json["modifiedFiles"][0]["file"], "a.js");
        assert_eq!(json["modifiedFiles"][0]["modificationCount"], 1);
    }

    #[test]
    fn test_no_task_serializes_as_null() {
        let json = serde_json::to_value(ScopeReport::snapshot(&ScopeRegistry::new())).unwrap();
        assert!(json["task"].is_null());
    }
}
