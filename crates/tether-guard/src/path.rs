//! Lexical path normalization and the scope-matching predicate.
//!
//! Nothing here touches the filesystem: paths are compared as strings after
//! `.`/`..` segments are resolved and separators are unified to `/`.

/// Normalize a path lexically.
///
/// - `\` separators become `/`, repeated separators collapse.
/// - `.` segments are dropped; `..` pops the previous segment when there is
///   one. A leading `..` on a relative path is kept; on an absolute path it
///   is dropped (there is nothing above the root).
/// - An absolute path keeps its leading `/`. An empty result is `"."`.
///
/// Matching is case-sensitive, so case is preserved.
#[must_use]
pub fn normalize_path(path: &str) -> String {
    let unified = path.trim().replace('\\', "/");
    let absolute = unified.starts_with('/');

    let mut segments: Vec<&str> = Vec::new();
    for segment in unified.split('/') {
        match segment {
            "" | "." => {},
            ".." => match segments.last() {
                Some(&last) if last != ".." => {
                    segments.pop();
                },
                _ if absolute => {},
                _ => segments.push(".."),
            },
            other => segments.push(other),
        }
    }

    let joined = segments.join("/");
    match (absolute, joined.is_empty()) {
        (true, _) => format!("/{joined}"),
        (false, true) => ".".to_owned(),
        (false, false) => joined,
    }
}

/// Normalize a declared scope entry the way requested paths are normalized,
/// keeping a trailing `/` so a directory entry only covers its contents.
///
/// Returns `None` for entries that are blank or resolve to the current
/// directory.
#[must_use]
pub fn normalize_scope_entry(entry: &str) -> Option<String> {
    let unified = entry.trim().replace('\\', "/");
    if unified.is_empty() {
        return None;
    }
    let normalized = normalize_path(&unified);
    match normalized.as_str() {
        "." => None,
        "/" => Some(normalized),
        _ if unified.ends_with('/') => Some(format!("{normalized}/")),
        _ => Some(normalized),
    }
}

/// The last segment of a normalized path, or `""` for the root.
#[must_use]
pub fn base_name(normalized: &str) -> &str {
    normalized.rsplit('/').next().unwrap_or_default()
}

/// Whether `normalized` falls inside the scope entry `entry`.
///
/// True when the path contains the entry as a substring (a declared
/// directory or a relative fragment of an absolute path), or when the entry
/// contains the path's file name (a declared path that is more specific than
/// the requested one).
///
/// This is deliberately not path equality. Two unrelated files that share a
/// name (`a/index.js`, `b/index.js`) both match an entry naming either one.
/// Empty entries never match.
#[must_use]
pub fn is_scope_match(normalized: &str, entry: &str) -> bool {
    if entry.is_empty() {
        return false;
    }
    if normalized.contains(entry) {
        return true;
    }
    let name = base_name(normalized);
    !name.is_empty() && name != "." && name != ".." && entry.contains(name)
}
