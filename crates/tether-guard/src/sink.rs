//! Report persistence.
//!
//! The guard itself never does I/O. A host hands a [`ReportSink`] to
//! [`ScopeGuard::persist_report`](crate::ScopeGuard::persist_report), which
//! turns any failure into a [`PersistOutcome`] instead of an error.

use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Path, PathBuf};
use uuid::Uuid;

use crate::error::{GuardError, GuardResult};
use crate::report::ScopeReport;

/// Destination for end-of-task reports.
pub trait ReportSink: Send + Sync {
    /// Store `report` durably and return where it went.
    ///
    /// # Errors
    ///
    /// Returns a [`GuardError`] if the report cannot be serialized or stored.
    fn persist(&self, report: &ScopeReport) -> GuardResult<PathBuf>;
}

/// Writes each report as pretty JSON into a directory.
///
/// File names are `scope-report-<UTC timestamp>-<random suffix>.json`, so
/// reports taken in the same millisecond never share a file. Existing files
/// are never overwritten.
#[derive(Debug, Clone)]
pub struct FileReportSink {
    dir: PathBuf,
}

impl FileReportSink {
    /// Create a sink writing into `dir`. The directory is created on first
    /// use.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The target directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn file_name(report: &ScopeReport) -> String {
        let suffix = Uuid::new_v4().simple().to_string();
        format!(
            "scope-report-{}-{}.json",
            report.timestamp.format("%Y%m%dT%H%M%S%.3fZ"),
            &suffix[..12]
        )
    }
}

impl ReportSink for FileReportSink {
    fn persist(&self, report: &ScopeReport) -> GuardResult<PathBuf> {
        std::fs::create_dir_all(&self.dir).map_err(|source| GuardError::Io {
            path: self.dir.clone(),
            source,
        })?;

        let path = self.dir.join(Self::file_name(report));
        let body = serde_json::to_string_pretty(report)?;
        std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .and_then(|mut file| file.write_all(body.as_bytes()))
            .map_err(|source| GuardError::Io {
                path: path.clone(),
                source,
            })?;

        tracing::info!(path = %path.display(), "scope report written");
        Ok(path)
    }
}

/// Result of a persistence attempt: `{success, path?, error?}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistOutcome {
    /// Whether the report was stored.
    pub success: bool,
    /// Where it was stored, on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    /// Why it was not stored, on failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PersistOutcome {
    /// A successful write to `path`.
    #[must_use]
    pub fn stored(path: PathBuf) -> Self {
        Self {
            success: true,
            path: Some(path),
            error: None,
        }
    }

    /// A failed write.
    #[must_use]
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            path: None,
            error: Some(error.into()),
        }
    }
}

impl From<GuardResult<PathBuf>> for PersistOutcome {
    fn from(result: GuardResult<PathBuf>) -> Self {
        match result {
            Ok(path) => Self::stored(path),
            Err(e) => Self::failed(e.to_string()),
        }
    }
}
