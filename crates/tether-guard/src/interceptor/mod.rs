//! Call interceptor: the boundary between a tool pipeline and the guard.
//!
//! The [`CallInterceptor`] sees every tool call before it executes:
//!
//! 1. **Classify** the tool name. Non-modification tools pass through.
//! 2. **Extract** the target path (`file_path`, then `path`). A modification
//!    tool with no usable path passes through.
//! 3. **Check** the path with [`ScopeGuard::check_modification`].
//! 4. **Explain** a block with [`Feedback`] and the raw [`Violation`].
//!
//! The interceptor fails open on anything it cannot classify. A modification
//! tool whose name or argument shape falls outside the known sets is not
//! guarded.
//!
//! [`Violation`]: crate::Violation

/// Tool name and argument classification.
pub mod classify;
/// Block explanations.
pub mod feedback;
/// Intercept outcomes and their wire shape.
pub mod types;

pub use classify::{extract_target_path, is_modification_tool, operation_for_tool};
pub use feedback::Feedback;
pub use types::*;

use serde_json::Value;
use std::sync::Arc;

use crate::guard::ScopeGuard;

/// Routes modification tool calls through a shared [`ScopeGuard`].
#[derive(Debug, Clone)]
pub struct CallInterceptor {
    guard: Arc<ScopeGuard>,
}

impl CallInterceptor {
    /// Create an interceptor over `guard`.
    #[must_use]
    pub fn new(guard: Arc<ScopeGuard>) -> Self {
        Self { guard }
    }

    /// The guard this interceptor consults.
    #[must_use]
    pub fn guard(&self) -> &Arc<ScopeGuard> {
        &self.guard
    }

    /// Decide whether the tool call `tool_name(args)` may run.
    pub fn intercept(&self, tool_name: &str, args: &Value) -> InterceptOutcome {
        if !is_modification_tool(tool_name) {
            tracing::trace!(tool = tool_name, "tool not guarded");
            return InterceptOutcome::NotApplicable {
                reason: NotApplicableReason::UnguardedTool,
            };
        }

        let Some(path) = extract_target_path(args) else {
            tracing::debug!(tool = tool_name, "modification tool without a path, passing through");
            return InterceptOutcome::NotApplicable {
                reason: NotApplicableReason::MissingPath,
            };
        };

        let operation = operation_for_tool(tool_name);
        let decision = self.guard.check_modification(path, operation);

        match (decision.allowed, decision.violation) {
            (false, Some(violation)) => {
                let feedback = Feedback::for_violation(&violation);
                InterceptOutcome::Blocked {
                    message: decision.message.unwrap_or_else(|| violation.to_string()),
                    feedback: Box::new(feedback),
                    violation: Box::new(violation),
                }
            },
            _ => InterceptOutcome::Allowed {
                file: path.to_owned(),
                operation,
            },
        }
    }
}
