//! Scope guard: the policy engine.
//!
//! [`ScopeGuard`] is the only component that decides. It owns a
//! [`ScopeRegistry`] behind a lock and applies two rules on top of it:
//!
//! 1. **Scope-size ceiling**: a declaration naming more than
//!    [`GuardConfig::max_declared_files`] files is rejected outright and the
//!    caller is told to split the task.
//! 2. **Scope membership**: every modification attempt is counted, then
//!    blocked and logged as a violation unless its path matches the declared
//!    scope.
//!
//! A disabled guard is transparent: checks pass and nothing is recorded.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::operation::OperationKind;
use crate::registry::{ScopeRegistry, Violation};
use crate::report::ScopeReport;
use crate::sink::{PersistOutcome, ReportSink};

/// Default ceiling on the number of files one declaration may name.
pub const DEFAULT_MAX_DECLARED_FILES: usize = 5;

/// Guard policy settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuardConfig {
    /// Whether the guard starts enabled.
    pub enabled: bool,
    /// Largest number of files a single declaration may name.
    pub max_declared_files: usize,
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_declared_files: DEFAULT_MAX_DECLARED_FILES,
        }
    }
}

/// Result of a scope declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScopeDeclaration {
    /// Whether the scope was committed.
    pub allowed: bool,
    /// Human-readable outcome.
    pub message: String,
    /// What to do instead, when rejected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommendation: Option<String>,
    /// Number of files the caller named.
    pub declared_count: usize,
    /// The ceiling in force.
    pub max_files: usize,
}

/// Result of one modification check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    /// Whether the modification may proceed.
    pub allowed: bool,
    /// Explanation, present on every block.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// The violation recorded for a block.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub violation: Option<Violation>,
}

impl Decision {
    /// An allowed decision with no message.
    #[must_use]
    pub fn allow() -> Self {
        Self {
            allowed: true,
            message: None,
            violation: None,
        }
    }

    /// A blocked decision carrying its violation record.
    #[must_use]
    pub fn block(message: impl Into<String>, violation: Violation) -> Self {
        Self {
            allowed: false,
            message: Some(message.into()),
            violation: Some(violation),
        }
    }
}

/// Stateful scope enforcer for one agent session.
///
/// All methods take `&self`; share one guard across call sites with `Arc`.
/// Each check runs count → match → record under a single write lock, so
/// concurrent callers never lose ledger updates.
///
/// # Example
///
/// ```
/// use tether_guard::{OperationKind, ScopeGuard};
///
/// let guard = ScopeGuard::default();
/// assert!(guard.declare_scope("fix login validation", &["login.js"]).allowed);
///
/// assert!(guard.check_modification("login.js", OperationKind::Write).allowed);
/// let decision = guard.check_modification("export.js", OperationKind::Write);
/// assert!(!decision.allowed);
/// assert!(guard.report().has_violations);
/// ```
#[derive(Debug)]
pub struct ScopeGuard {
    config: GuardConfig,
    enabled: AtomicBool,
    registry: RwLock<ScopeRegistry>,
}

impl Default for ScopeGuard {
    fn default() -> Self {
        Self::new(GuardConfig::default())
    }
}

impl ScopeGuard {
    /// Create a guard with an empty registry.
    #[must_use]
    pub fn new(config: GuardConfig) -> Self {
        Self {
            enabled: AtomicBool::new(config.enabled),
            config,
            registry: RwLock::new(ScopeRegistry::new()),
        }
    }

    /// The policy settings this guard was built with.
    #[must_use]
    pub fn config(&self) -> &GuardConfig {
        &self.config
    }

    /// Declare the task and the files it may modify.
    ///
    /// Rejected without touching state when `files` names more than the
    /// ceiling. On success the task and scope are replaced; the ledger and
    /// violation log carry over.
    pub fn declare_scope<S: AsRef<str>>(&self, task: &str, files: &[S]) -> ScopeDeclaration {
        let limit = self.config.max_declared_files;
        let declared_count = files.len();

        if declared_count > limit {
            tracing::warn!(
                task,
                declared = declared_count,
                limit,
                "scope declaration rejected: too many files"
            );
            return ScopeDeclaration {
                allowed: false,
                message: format!(
                    "Scope declaration rejected: {declared_count} files declared, at most {limit} allowed per task"
                ),
                recommendation: Some(format!(
                    "Split this task into smaller tasks that each modify at most {limit} files, \
                     and declare each one separately before starting it."
                )),
                declared_count,
                max_files: limit,
            };
        }

        let mut registry = self.write_registry();
        registry.set_task(task, files);
        let description = registry.task_description().to_owned();
        drop(registry);

        tracing::info!(task = %description, files = declared_count, "scope declared");
        ScopeDeclaration {
            allowed: true,
            message: format!(
                "Scope declared for task '{description}': {declared_count} file(s) may be modified"
            ),
            recommendation: None,
            declared_count,
            max_files: limit,
        }
    }

    /// Decide whether a modification of `path` may proceed.
    ///
    /// When enabled, the attempt is counted before the scope is consulted, so
    /// the ledger measures attempts rather than successes.
    pub fn check_modification(&self, path: &str, operation: OperationKind) -> Decision {
        if !self.is_enabled() {
            tracing::debug!(path, %operation, "guard disabled, modification passes unchecked");
            return Decision::allow();
        }

        let mut registry = self.write_registry();
        let attempts = registry.record_access(path);

        if registry.is_path_allowed(path) {
            drop(registry);
            tracing::info!(path, %operation, attempts, "modification allowed");
            return Decision::allow();
        }

        let violation = registry.record_violation(path, operation);
        drop(registry);

        tracing::warn!(
            file = %violation.file,
            %operation,
            task = %violation.task,
            attempts,
            "modification blocked: file outside declared scope"
        );
        let message = format!(
            "Modification blocked: '{}' is outside the declared scope of task '{}' (operation: {operation})",
            violation.file, violation.task
        );
        Decision::block(message, violation)
    }

    /// Start a fresh task window: drop task, scope, ledger and violations.
    pub fn reset(&self) {
        self.write_registry().clear();
        tracing::info!("scope guard reset");
    }

    /// Turn enforcement on or off. Registry state is untouched either way.
    pub fn set_enabled(&self, enabled: bool) {
        let was = self.enabled.swap(enabled, Ordering::SeqCst);
        if was != enabled {
            tracing::info!(enabled, "scope guard toggled");
        }
    }

    /// Whether enforcement is on.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }

    /// Snapshot the current state.
    #[must_use]
    pub fn report(&self) -> ScopeReport {
        ScopeReport::snapshot(&self.read_registry())
    }

    /// Snapshot the current state and hand it to `sink`.
    ///
    /// Failures come back as `success: false`; guard state is never affected.
    pub fn persist_report(&self, sink: &dyn ReportSink) -> PersistOutcome {
        let report = self.report();
        let outcome = PersistOutcome::from(sink.persist(&report));
        if let Some(error) = &outcome.error {
            tracing::error!(error = %error, "failed to persist scope report");
        }
        outcome
    }

    /// Run `f` against a consistent view of the registry.
    pub fn inspect<R>(&self, f: impl FnOnce(&ScopeRegistry) -> R) -> R {
        f(&self.read_registry())
    }

    fn read_registry(&self) -> RwLockReadGuard<'_, ScopeRegistry> {
        self.registry.read().unwrap_or_else(|e| {
            tracing::warn!("ScopeGuard lock poisoned, recovering");
            e.into_inner()
        })
    }

    fn write_registry(&self) -> RwLockWriteGuard<'_, ScopeRegistry> {
        self.registry.write().unwrap_or_else(|e| {
            tracing::warn!("ScopeGuard lock poisoned, recovering");
            e.into_inner()
        })
    }
}

#[cfg(test)]
#[path = "guard_tests.rs"]
mod tests;
