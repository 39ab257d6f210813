//! Kinds of file modification the guard distinguishes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::GuardError;

/// The kind of modification an attempt performs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    /// Create or overwrite a file.
    #[default]
    Write,
    /// Targeted in-place replacement inside an existing file.
    SearchReplace,
    /// Remove a file.
    Delete,
}

impl OperationKind {
    /// Stable label used in messages and serialized records.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Write => "write",
            Self::SearchReplace => "search_replace",
            Self::Delete => "delete",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OperationKind {
    type Err = GuardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "write" => Ok(Self::Write),
            "search_replace" => Ok(Self::SearchReplace),
            "delete" => Ok(Self::Delete),
            _ => Err(GuardError::UnknownOperation(s.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_write() {
        assert_eq!(OperationKind::default(), OperationKind::Write);
    }

    #[test]
    fn test_parse_labels() {
        assert_eq!("write".parse::<OperationKind>().unwrap(), OperationKind::Write);
        assert_eq!(
            "Search-Replace".parse::<OperationKind>().unwrap(),
            OperationKind::SearchReplace
        );
        assert_eq!("delete".parse::<OperationKind>().unwrap(), OperationKind::Delete);
        assert!(matches!(
            "chmod".parse::<OperationKind>(),
            Err(GuardError::UnknownOperation(op)) if op == "chmod"
        ));
    }

    #[test]
    fn test_serialized_label_matches_display() {
        for op in [
            OperationKind::Write,
            OperationKind::SearchReplace,
            OperationKind::Delete,
        ] {
            let json = serde_json::to_string(&op).unwrap();
            assert_eq!(json, format!("\"{op}\""));
        }
    }
}
