//! CLI handler for `tether serve`.

use anyhow::Result;
use std::path::PathBuf;
use tether_cli::{ServeHost, config_bridge};
use tether_config::Config;
use tether_guard::FileReportSink;

/// Serve a guard session on stdin/stdout until EOF.
pub(crate) fn run_serve(cfg: &Config, report_dir: Option<PathBuf>, disabled: bool) -> Result<()> {
    let mut guard_config = config_bridge::to_guard_config(cfg);
    if disabled {
        guard_config.enabled = false;
    }
    let sink = report_dir
        .map(FileReportSink::new)
        .or_else(|| config_bridge::to_report_sink(cfg));

    tracing::info!(
        enabled = guard_config.enabled,
        max_declared_files = guard_config.max_declared_files,
        report_dir = ?sink.as_ref().map(FileReportSink::dir),
        "serving scope guard on stdin/stdout"
    );

    let host = ServeHost::new(guard_config, sink, cfg.guard.persist_on_exit);
    let stdin = std::io::stdin();
    let session = host.run(stdin.lock(), std::io::stdout().lock());
    if let Err(e) = &session {
        tracing::error!(error = %e, "session ended abnormally");
    }

    if let Some(outcome) = host.finish() {
        match (&outcome.path, &outcome.error) {
            (Some(path), _) => eprintln!("Scope report written to {}", path.display()),
            (None, Some(error)) => eprintln!("Failed to write scope report: {error}"),
            (None, None) => {},
        }
    }
    session
}
