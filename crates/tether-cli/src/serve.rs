//! `tether serve`: the guard behind a newline-delimited JSON protocol.
//!
//! Each input line is one request tagged by `"op"`; each request produces
//! exactly one response line. Blank lines are skipped. A line that cannot be
//! parsed yields `{"error": "..."}` and the session continues.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::io::{BufRead, Write};
use std::sync::Arc;
use tether_guard::{
    CallInterceptor, FileReportSink, GuardConfig, OperationKind, PersistOutcome, ScopeGuard,
};

/// One protocol request.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Request {
    /// Declare a task and its files.
    Declare {
        /// Task description.
        #[serde(default)]
        task: String,
        /// Files the task may modify.
        #[serde(default)]
        files: Vec<String>,
    },
    /// Run a tool call through the interceptor.
    Intercept {
        /// Tool name.
        tool: String,
        /// Tool arguments.
        #[serde(default)]
        args: Value,
    },
    /// Check one path directly.
    Check {
        /// Target path.
        path: String,
        /// `write`, `search_replace` or `delete`; defaults to `write`.
        #[serde(default)]
        operation: Option<String>,
    },
    /// Snapshot the current report.
    Report,
    /// Persist the current report to the report directory.
    PersistReport,
    /// Clear all guard state.
    Reset,
    /// Turn enforcement on.
    Enable,
    /// Turn enforcement off.
    Disable,
}

/// Serves one guard session.
pub struct ServeHost {
    guard: Arc<ScopeGuard>,
    interceptor: CallInterceptor,
    sink: Option<FileReportSink>,
    persist_on_exit: bool,
}

impl ServeHost {
    /// Create a host with a fresh guard.
    #[must_use]
    pub fn new(config: GuardConfig, sink: Option<FileReportSink>, persist_on_exit: bool) -> Self {
        let guard = Arc::new(ScopeGuard::new(config));
        Self {
            interceptor: CallInterceptor::new(Arc::clone(&guard)),
            guard,
            sink,
            persist_on_exit,
        }
    }

    /// The guard this host drives.
    #[must_use]
    pub fn guard(&self) -> &Arc<ScopeGuard> {
        &self.guard
    }

    /// Apply one request and build its response.
    pub fn handle(&self, request: Request) -> Value {
        match request {
            Request::Declare { task, files } => to_json(&self.guard.declare_scope(&task, &files)),
            Request::Intercept { tool, args } => {
                to_json(&self.interceptor.intercept(&tool, &args).to_response())
            },
            Request::Check { path, operation } => {
                let operation = match operation.as_deref().map(str::parse::<OperationKind>) {
                    None => OperationKind::default(),
                    Some(Ok(op)) => op,
                    Some(Err(e)) => return error_response(&e),
                };
                to_json(&self.guard.check_modification(&path, operation))
            },
            Request::Report => to_json(&self.guard.report()),
            Request::PersistReport => to_json(&self.persist()),
            Request::Reset => {
                self.guard.reset();
                ok_response()
            },
            Request::Enable => {
                self.guard.set_enabled(true);
                ok_response()
            },
            Request::Disable => {
                self.guard.set_enabled(false);
                ok_response()
            },
        }
    }

    /// Parse and apply one input line. Returns `None` for a blank line.
    pub fn handle_line(&self, line: &str) -> Option<Value> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }
        match serde_json::from_str::<Request>(line) {
            Ok(request) => Some(self.handle(request)),
            Err(e) => {
                tracing::warn!(error = %e, "malformed request");
                Some(error_response(&e))
            },
        }
    }

    /// Read requests from `input` until EOF, writing one response per line.
    ///
    /// A line that is not valid UTF-8 gets an error response and the session
    /// continues.
    ///
    /// # Errors
    ///
    /// Returns an error if reading input or writing output fails.
    pub fn run<R: BufRead, W: Write>(&self, mut input: R, mut output: W) -> Result<()> {
        let mut buf = Vec::new();
        loop {
            buf.clear();
            let read = input
                .read_until(b'\n', &mut buf)
                .context("failed to read request")?;
            if read == 0 {
                return Ok(());
            }

            let response = match std::str::from_utf8(&buf) {
                Ok(line) => self.handle_line(line.trim_end_matches(['\n', '\r'])),
                Err(e) => {
                    tracing::warn!(error = %e, "request is not valid UTF-8");
                    Some(error_response(&e))
                },
            };
            if let Some(response) = response {
                writeln!(output, "{response}").context("failed to write response")?;
                output.flush().context("failed to flush response")?;
            }
        }
    }

    /// End-of-session handling: log the summary and, when configured,
    /// persist the final report.
    pub fn finish(&self) -> Option<PersistOutcome> {
        let report = self.guard.report();
        tracing::info!(summary = %report.summary(), "session finished");
        if !self.persist_on_exit {
            return None;
        }
        Some(self.persist())
    }

    fn persist(&self) -> PersistOutcome {
        match &self.sink {
            Some(sink) => self.guard.persist_report(sink),
            None => PersistOutcome::failed("no report directory configured"),
        }
    }
}

fn to_json<T: Serialize>(value: &T) -> Value {
    serde_json::to_value(value).unwrap_or_else(|e| error_response(&e))
}

fn error_response(error: &dyn std::fmt::Display) -> Value {
    json!({ "error": error.to_string() })
}

fn ok_response() -> Value {
    json!({ "ok": true })
}
