use super::*;
use crate::registry::UNSPECIFIED_TASK;
use crate::GuardError;
use std::path::PathBuf;
use std::sync::Arc;

fn login_guard() -> ScopeGuard {
    let guard = ScopeGuard::default();
    assert!(guard.declare_scope("fix login validation", &["login.js"]).allowed);
    guard
}

fn six_files() -> Vec<String> {
    (1..=6).map(|i| format!("file{i}.js")).collect()
}

/// Sink that always fails.
struct BrokenSink;

impl ReportSink for BrokenSink {
    fn persist(&self, _report: &ScopeReport) -> crate::GuardResult<PathBuf> {
        Err(GuardError::Io {
            path: PathBuf::from("/dev/full/report.json"),
            source: std::io::Error::other("disk full"),
        })
    }
}

// ---------------------------------------------------------------------------
// Declarations
// ---------------------------------------------------------------------------

#[test]
fn test_declare_within_ceiling_commits_scope() {
    let guard = ScopeGuard::default();
    let files = ["a.js", "b.js", "c.js", "d.js", "e.js"];
    let result = guard.declare_scope("five files", &files);

    assert!(result.allowed);
    assert!(result.recommendation.is_none());
    assert_eq!(result.declared_count, 5);
    assert_eq!(result.max_files, DEFAULT_MAX_DECLARED_FILES);
    for file in files {
        assert!(guard.check_modification(file, OperationKind::Write).allowed);
    }
}

#[test]
fn test_declare_over_ceiling_rejected_without_prior_scope() {
    let guard = ScopeGuard::default();
    let result = guard.declare_scope("too big", &six_files());

    assert!(!result.allowed);
    assert!(result.message.contains("6 files declared"));
    assert!(result.message.contains("at most 5"));
    assert!(result.recommendation.unwrap().contains("Split"));
    guard.inspect(|r| {
        assert!(r.task().is_none());
        assert!(r.allowed_files().is_empty());
    });
}

#[test]
fn test_declare_over_ceiling_keeps_previous_scope() {
    let guard = login_guard();
    let result = guard.declare_scope("too big", &six_files());

    assert!(!result.allowed);
    guard.inspect(|r| {
        assert_eq!(r.task_description(), "fix login validation");
        assert_eq!(r.allowed_files().len(), 1);
        assert!(r.allowed_files().contains("login.js"));
    });
    assert!(guard.check_modification("login.js", OperationKind::Write).allowed);
    assert!(!guard.check_modification("file1.js", OperationKind::Write).allowed);
}

#[test]
fn test_custom_ceiling() {
    let guard = ScopeGuard::new(GuardConfig {
        max_declared_files: 2,
        ..GuardConfig::default()
    });
    assert!(guard.declare_scope("ok", &["a.js", "b.js"]).allowed);
    let rejected = guard.declare_scope("no", &["a.js", "b.js", "c.js"]);
    assert!(!rejected.allowed);
    assert_eq!(rejected.max_files, 2);
}

#[test]
fn test_declare_with_blank_task_is_unspecified() {
    let guard = ScopeGuard::default();
    let result = guard.declare_scope("", &["a.js"]);
    assert!(result.allowed);
    assert!(result.message.contains(UNSPECIFIED_TASK));
}

#[test]
fn test_declare_preserves_ledger_and_violations() {
    let guard = login_guard();
    guard.check_modification("export.js", OperationKind::Write);

    assert!(guard.declare_scope("export feature", &["export.js"]).allowed);
    assert!(guard.check_modification("export.js", OperationKind::Write).allowed);

    let report = guard.report();
    assert_eq!(report.violations.len(), 1);
    assert_eq!(report.violations[0].task, "fix login validation");
    guard.inspect(|r| assert_eq!(r.access_count("export.js"), 2));
}

// ---------------------------------------------------------------------------
// Checks
// ---------------------------------------------------------------------------

#[test]
fn test_login_scenario() {
    let guard = login_guard();

    let ok = guard.check_modification("login.js", OperationKind::Write);
    assert!(ok.allowed);
    assert!(ok.violation.is_none());

    let first = guard.check_modification("export.js", OperationKind::Write);
    assert!(!first.allowed);
    let violation = first.violation.unwrap();
    assert_eq!(violation.operation, OperationKind::Write);
    assert_eq!(violation.file, "export.js");
    assert!(first.message.unwrap().contains("export.js"));
    guard.inspect(|r| assert_eq!(r.access_count("export.js"), 1));

    let second = guard.check_modification("export.js", OperationKind::Delete);
    assert!(!second.allowed);
    assert_eq!(second.violation.unwrap().operation, OperationKind::Delete);
    guard.inspect(|r| {
        assert_eq!(r.access_count("export.js"), 2);
        assert_eq!(r.violations().len(), 2);
    });

    let report = guard.report();
    assert!(report.has_violations);
    assert_eq!(report.modified_files.len(), 2);
    assert_eq!(report.total_modifications, 2);
    assert_eq!(report.violations.len(), 2);
}

#[test]
fn test_blocked_check_appends_one_violation_and_one_count() {
    let guard = login_guard();
    for n in 1..=3u64 {
        let decision = guard.check_modification("src/other.rs", OperationKind::SearchReplace);
        assert!(!decision.allowed);
        guard.inspect(|r| {
            assert_eq!(r.access_count("src/other.rs"), n);
            assert_eq!(r.violations().len() as u64, n);
        });
    }
}

#[test]
fn test_attempts_counted_regardless_of_outcome() {
    let guard = login_guard();
    for _ in 0..4 {
        guard.check_modification("login.js", OperationKind::Write);
    }
    guard.inspect(|r| {
        assert_eq!(r.access_count("login.js"), 4);
        assert!(r.violations().is_empty());
    });
}

#[test]
fn test_check_without_declaration_blocks() {
    let guard = ScopeGuard::default();
    let decision = guard.check_modification("login.js", OperationKind::Write);
    assert!(!decision.allowed);
    assert_eq!(decision.violation.unwrap().task, UNSPECIFIED_TASK);
}

#[test]
fn test_directory_entry_covers_contained_files() {
    let guard = ScopeGuard::default();
    guard.declare_scope("auth refactor", &["src/auth/"]);
    assert!(guard.check_modification("src/auth/session.rs", OperationKind::Write).allowed);
    assert!(!guard.check_modification("src/db/pool.rs", OperationKind::Write).allowed);
}

#[test]
fn test_dot_prefixed_directory_entry() {
    let guard = ScopeGuard::default();
    guard.declare_scope("auth refactor", &["./src/auth/"]);
    assert!(guard.check_modification("./src/auth/session.js", OperationKind::Write).allowed);
    assert!(!guard.check_modification("src/authz/policy.js", OperationKind::Write).allowed);
}

// ---------------------------------------------------------------------------
// Enable / disable
// ---------------------------------------------------------------------------

#[test]
fn test_disabled_guard_allows_without_mutation() {
    let guard = login_guard();
    guard.set_enabled(false);
    assert!(!guard.is_enabled());

    let decision = guard.check_modification("export.js", OperationKind::Delete);
    assert!(decision.allowed);
    assert!(decision.message.is_none());

    let report = guard.report();
    assert_eq!(report.total_modifications, 0);
    assert!(!report.has_violations);
}

#[test]
fn test_reenable_resumes_previous_scope() {
    let guard = login_guard();
    guard.set_enabled(false);
    guard.check_modification("export.js", OperationKind::Write);
    guard.set_enabled(true);

    assert!(guard.check_modification("login.js", OperationKind::Write).allowed);
    assert!(!guard.check_modification("export.js", OperationKind::Write).allowed);
    guard.inspect(|r| {
        assert_eq!(r.task_description(), "fix login validation");
        assert_eq!(r.access_count("export.js"), 1);
    });
}

#[test]
fn test_guard_can_start_disabled() {
    let guard = ScopeGuard::new(GuardConfig {
        enabled: false,
        ..GuardConfig::default()
    });
    assert!(!guard.is_enabled());
    assert!(guard.check_modification("anything.js", OperationKind::Write).allowed);
}

// ---------------------------------------------------------------------------
// Reset and reports
// ---------------------------------------------------------------------------

#[test]
fn test_reset_yields_empty_report() {
    let guard = login_guard();
    guard.check_modification("export.js", OperationKind::Write);
    guard.reset();

    let report = guard.report();
    assert!(report.task.is_none());
    assert_eq!(report.total_modifications, 0);
    assert!(report.violations.is_empty());
    assert!(!report.has_violations);
    guard.inspect(|r| assert!(r.allowed_files().is_empty()));
}

#[test]
fn test_declare_after_reset_starts_independent_history() {
    let guard = login_guard();
    guard.check_modification("export.js", OperationKind::Write);
    guard.reset();

    guard.declare_scope("export feature", &["export.js"]);
    assert!(guard.check_modification("export.js", OperationKind::Write).allowed);

    let report = guard.report();
    assert!(!report.has_violations);
    assert_eq!(report.modified_files.len(), 1);
    assert_eq!(report.modified_files[0].modification_count, 1);
}

#[test]
fn test_report_does_not_mutate() {
    let guard = login_guard();
    guard.check_modification("export.js", OperationKind::Write);
    let first = guard.report();
    let second = guard.report();
    assert_eq!(first.violations, second.violations);
    assert_eq!(first.modified_files, second.modified_files);
}

#[test]
fn test_persist_report_success() {
    let dir = tempfile::tempdir().unwrap();
    let guard = login_guard();
    let outcome = guard.persist_report(&crate::FileReportSink::new(dir.path()));
    assert!(outcome.success);
    assert!(outcome.path.unwrap().exists());
}

#[test]
fn test_persist_report_failure_is_structured() {
    let guard = login_guard();
    guard.check_modification("export.js", OperationKind::Write);

    let outcome = guard.persist_report(&BrokenSink);
    assert!(!outcome.success);
    assert!(outcome.error.unwrap().contains("disk full"));
    // Guard keeps working and its state is intact.
    assert_eq!(guard.report().violations.len(), 1);
    assert!(guard.check_modification("login.js", OperationKind::Write).allowed);
}

// ---------------------------------------------------------------------------
// Concurrency
// ---------------------------------------------------------------------------

#[test]
fn test_concurrent_checks_lose_no_updates() {
    let guard = Arc::new(login_guard());
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let guard = Arc::clone(&guard);
            std::thread::spawn(move || {
                for _ in 0..50 {
                    guard.check_modification("export.js", OperationKind::Write);
                    guard.check_modification("login.js", OperationKind::Write);
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    guard.inspect(|r| {
        assert_eq!(r.access_count("export.js"), 400);
        assert_eq!(r.access_count("login.js"), 400);
        assert_eq!(r.violations().len(), 400);
    });
}

#[test]
fn test_decision_wire_shape() {
    let guard = login_guard();
    let allowed = serde_json::to_value(guard.check_modification("login.js", OperationKind::Write))
        .unwrap();
    assert_eq!(allowed, serde_json::json!({"allowed": true}));

    let blocked =
        serde_json::to_value(guard.check_modification("export.js", OperationKind::Write)).unwrap();
    assert_eq!(blocked["allowed"], false);
    assert!(blocked["message"].is_string());
    assert_eq!(blocked["violation"]["operation"], "write");
}
