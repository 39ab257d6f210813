//! Prelude module - commonly used types for convenient import.
//!
//! Use `use tether_guard::prelude::*;` to import all essential types.

// Errors
pub use crate::{GuardError, GuardResult};

// Policy
pub use crate::{Decision, GuardConfig, OperationKind, ScopeDeclaration, ScopeGuard};

// Interception
pub use crate::{CallInterceptor, Feedback, InterceptOutcome};

// Reporting
pub use crate::{FileReportSink, PersistOutcome, ReportSink, ScopeReport, Violation};
