//! Human-actionable explanation attached to a blocked tool call.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::operation::OperationKind;
use crate::path::base_name;
use crate::registry::Violation;

/// Behaviours an agent must not fall back to after a block.
pub const FORBIDDEN_BEHAVIOURS: &[&str] = &[
    "Retrying the same modification through a different tool",
    "Modifying the file under another path or name",
    "Widening the declared scope without the human's approval",
    "Continuing with unrelated changes while the block is unresolved",
];

/// Structured explanation of a blocked modification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    /// Normalized path of the blocked file.
    pub file: String,
    /// Last path segment of `file`.
    pub file_name: String,
    /// The blocked operation.
    pub operation: OperationKind,
    /// Task the scope belongs to.
    pub task: String,
    /// What not to do next.
    pub forbidden: Vec<String>,
    /// Ordered remediation steps.
    pub remediation: Vec<String>,
}

impl Feedback {
    /// Build feedback for `violation`.
    #[must_use]
    pub fn for_violation(violation: &Violation) -> Self {
        let file_name = base_name(&violation.file).to_owned();
        let remediation = vec![
            "Stop: do not apply this change.".to_owned(),
            format!(
                "Modify only the files declared for task '{}'.",
                violation.task
            ),
            format!(
                "If '{file_name}' really needs changing, ask the human to authorize it \
                 and declare a new scope that includes it."
            ),
        ];
        Self {
            file: violation.file.clone(),
            file_name,
            operation: violation.operation,
            task: violation.task.clone(),
            forbidden: FORBIDDEN_BEHAVIOURS.iter().map(|&s| s.to_owned()).collect(),
            remediation,
        }
    }

    /// Multi-line rendering for humans and upstream agents.
    #[must_use]
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "SCOPE VIOLATION: {} of '{}' was blocked.", self.operation, self.file_name)?;
        writeln!(f, "File: {}", self.file)?;
        writeln!(f, "Task: {}", self.task)?;
        writeln!(f)?;
        writeln!(f, "Do not:")?;
        for item in &self.forbidden {
            writeln!(f, "  - {item}")?;
        }
        writeln!(f)?;
        write!(f, "Next steps:")?;
        for (i, step) in self.remediation.iter().enumerate() {
            write!(f, "\n  {}. {step}", i.saturating_add(1))?;
        }
        Ok(())
    }
}
