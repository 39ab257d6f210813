//! Tool-call classification.
//!
//! Decides whether a tool invocation is a file modification, which kind, and
//! which file it targets. Anything that cannot be classified is left to the
//! pipeline unguarded.

use serde_json::Value;

use crate::operation::OperationKind;

/// Tools that create or overwrite a file.
pub const WRITE_TOOLS: &[&str] = &["write", "write_file", "write_to_file", "create_file"];

/// Tools that edit a file in place.
pub const REPLACE_TOOLS: &[&str] = &[
    "search_replace",
    "search_and_replace",
    "replace_in_file",
    "str_replace",
    "edit_file",
];

/// Tools that remove a file.
pub const DELETE_TOOLS: &[&str] = &["delete", "delete_file", "remove_file"];

/// Argument fields that may carry the target path, in lookup order.
pub const PATH_FIELDS: &[&str] = &["file_path", "path"];

/// Lowercase `name` and unify `-` to `_`.
#[must_use]
pub fn normalize_tool_name(name: &str) -> String {
    name.trim().to_ascii_lowercase().replace('-', "_")
}

/// Whether `name` is one of the guarded modification tools.
#[must_use]
pub fn is_modification_tool(name: &str) -> bool {
    let name = normalize_tool_name(name);
    [WRITE_TOOLS, REPLACE_TOOLS, DELETE_TOOLS]
        .iter()
        .any(|set| set.contains(&name.as_str()))
}

/// Operation kind implied by a tool name.
///
/// Only meaningful for names accepted by [`is_modification_tool`].
#[must_use]
pub fn operation_for_tool(name: &str) -> OperationKind {
    let name = normalize_tool_name(name);
    if name.contains("delete") || name.contains("remove") {
        OperationKind::Delete
    } else if name.contains("replace") || name.contains("edit") {
        OperationKind::SearchReplace
    } else {
        OperationKind::Write
    }
}

/// The first non-empty string among [`PATH_FIELDS`] in `args`.
#[must_use]
pub fn extract_target_path(args: &Value) -> Option<&str> {
    PATH_FIELDS
        .iter()
        .filter_map(|field| args.get(field).and_then(Value::as_str))
        .map(str::trim)
        .find(|path| !path.is_empty())
}
