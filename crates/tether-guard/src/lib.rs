//! Tether Guard - scope enforcement for agent tool pipelines.
//!
//! An agent declares a task and the small set of files that task may touch.
//! Every file-modifying tool call is then checked against that scope before
//! it runs: calls inside the scope proceed, calls outside it are blocked,
//! explained, and logged. The log is available at any time as a report.
//!
//! # Components
//!
//! - [`ScopeRegistry`]: task, allowed files, attempt ledger, violation log
//! - [`ScopeGuard`]: the policy engine (scope-size ceiling, membership check,
//!   enable switch, reset, reports)
//! - [`CallInterceptor`]: classifies tool calls, extracts target paths, and
//!   turns blocks into [`Feedback`]
//! - [`ReportSink`]: durable storage for [`ScopeReport`]s
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use serde_json::json;
//! use tether_guard::{CallInterceptor, InterceptOutcome, ScopeGuard};
//!
//! let guard = Arc::new(ScopeGuard::default());
//! guard.declare_scope("fix login validation", &["login.js"]);
//!
//! let interceptor = CallInterceptor::new(Arc::clone(&guard));
//! let outcome = interceptor.intercept("write_file", &json!({"file_path": "export.js"}));
//! assert!(outcome.is_blocked());
//!
//! let outcome = interceptor.intercept("read_file", &json!({"path": "export.js"}));
//! assert!(matches!(outcome, InterceptOutcome::NotApplicable { .. }));
//!
//! assert_eq!(guard.report().violations.len(), 1);
//! ```

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod prelude;

/// Error types and results for the guard.
pub mod error;
pub mod guard;
pub mod interceptor;
pub mod operation;
pub mod path;
pub mod registry;
pub mod report;
pub mod sink;

pub use error::{GuardError, GuardResult};
pub use guard::{DEFAULT_MAX_DECLARED_FILES, Decision, GuardConfig, ScopeDeclaration, ScopeGuard};
pub use interceptor::{
    CallInterceptor, Feedback, InterceptOutcome, InterceptResponse, NotApplicableReason,
};
pub use operation::OperationKind;
pub use path::{is_scope_match, normalize_path, normalize_scope_entry};
pub use registry::{LedgerEntry, ScopeRegistry, Task, UNSPECIFIED_TASK, Violation, ViolationId};
pub use report::ScopeReport;
pub use sink::{FileReportSink, PersistOutcome, ReportSink};
