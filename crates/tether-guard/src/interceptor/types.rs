use serde::{Deserialize, Serialize};

use super::feedback::Feedback;
use crate::operation::OperationKind;
use crate::registry::Violation;

/// Why a tool call was passed through without consulting the guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotApplicableReason {
    /// The tool is not a file-modification tool.
    UnguardedTool,
    /// A modification tool was called without a usable path argument.
    MissingPath,
}

/// Result of intercepting one tool call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InterceptOutcome {
    /// The guard was not consulted; the call proceeds.
    NotApplicable {
        /// Why the call was not guarded.
        reason: NotApplicableReason,
    },
    /// The guard allowed the modification.
    Allowed {
        /// Target path as supplied by the caller.
        file: String,
        /// Operation implied by the tool name.
        operation: OperationKind,
    },
    /// The guard blocked the modification.
    Blocked {
        /// One-line reason from the guard.
        message: String,
        /// Structured explanation for a human or upstream agent.
        feedback: Box<Feedback>,
        /// The violation that was recorded.
        violation: Box<Violation>,
    },
}

impl InterceptOutcome {
    /// Whether the pipeline must halt this call.
    #[must_use]
    pub fn is_blocked(&self) -> bool {
        matches!(self, Self::Blocked { .. })
    }

    /// Short label: `not_applicable`, `allowed` or `blocked`.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::NotApplicable { .. } => "not_applicable",
            Self::Allowed { .. } => "allowed",
            Self::Blocked { .. } => "blocked",
        }
    }

    /// Flatten into the wire object handed back to the pipeline.
    #[must_use]
    pub fn to_response(&self) -> InterceptResponse {
        match self {
            Self::NotApplicable { reason } => InterceptResponse {
                blocked: false,
                outcome: self.label().to_owned(),
                reason: Some(*reason),
                message: None,
                feedback: None,
                violation: None,
            },
            Self::Allowed { .. } => InterceptResponse {
                blocked: false,
                outcome: self.label().to_owned(),
                reason: None,
                message: None,
                feedback: None,
                violation: None,
            },
            Self::Blocked {
                message,
                feedback,
                violation,
            } => InterceptResponse {
                blocked: true,
                outcome: self.label().to_owned(),
                reason: None,
                message: Some(message.clone()),
                feedback: Some(feedback.render()),
                violation: Some(violation.as_ref().clone()),
            },
        }
    }
}

/// Wire shape: `{blocked, outcome, reason?, message?, feedback?, violation?}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterceptResponse {
    /// Whether the call must not proceed.
    pub blocked: bool,
    /// Outcome label.
    pub outcome: String,
    /// Pass-through reason, for `not_applicable`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<NotApplicableReason>,
    /// Guard message, on block.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Rendered feedback, on block.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
    /// Recorded violation, on block.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub violation: Option<Violation>,
}
