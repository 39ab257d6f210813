//! Configuration types for Tether.
//!
//! These types have no dependency on the guard crate; the host converts them
//! into domain types at startup. Every struct implements [`Default`] so that a
//! bare `[section]` header in TOML produces a working configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Scope guard policy and report handling.
    pub guard: GuardSection,
    /// Logging level, format, and per-crate directives.
    pub logging: LoggingSection,
}

// ---------------------------------------------------------------------------
// GuardSection
// ---------------------------------------------------------------------------

/// Scope guard settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuardSection {
    /// Whether the guard enforces scope at startup. A disabled guard lets
    /// every modification through and records nothing.
    pub enabled: bool,
    /// Largest number of files a single scope declaration may name.
    pub max_declared_files: usize,
    /// Directory that end-of-task reports are written to.
    pub report_dir: Option<PathBuf>,
    /// Write the final report to `report_dir` when the host shuts down.
    pub persist_on_exit: bool,
}

impl Default for GuardSection {
    fn default() -> Self {
        Self {
            enabled: true,
            max_declared_files: 5,
            report_dir: None,
            persist_on_exit: false,
        }
    }
}

// ---------------------------------------------------------------------------
// LoggingSection
// ---------------------------------------------------------------------------

/// Logging and tracing configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Global log level filter (`"trace"`, `"debug"`, `"info"`, `"warn"`,
    /// `"error"`).
    pub level: String,
    /// Output format: `"pretty"`, `"compact"`, `"json"`, or `"full"`.
    pub format: String,
    /// Per-crate tracing directives (e.g. `["tether_guard=debug"]`).
    pub directives: Vec<String>,
    /// Where logs go: `"stderr"`, `"stdout"`, or `"file"`. Keep logs off
    /// stdout when running `tether serve`.
    pub target: String,
    /// Directory for daily-rotated log files. Required when `target` is
    /// `"file"`.
    pub directory: Option<PathBuf>,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            format: "compact".to_owned(),
            directives: Vec::new(),
            target: "stderr".to_owned(),
            directory: None,
        }
    }
}
