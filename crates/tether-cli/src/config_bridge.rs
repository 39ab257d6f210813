//! Bridge from `tether_config::Config` to domain types.

use tether_config::Config;
use tether_guard::{FileReportSink, GuardConfig};
use tether_telemetry::{LogConfig, LogFormat, LogTarget};

/// Convert config to [`GuardConfig`].
#[must_use]
pub fn to_guard_config(cfg: &Config) -> GuardConfig {
    GuardConfig {
        enabled: cfg.guard.enabled,
        max_declared_files: cfg.guard.max_declared_files,
    }
}

/// Convert config to [`LogConfig`].
#[must_use]
pub fn to_log_config(cfg: &Config) -> LogConfig {
    let format = cfg
        .logging
        .format
        .parse::<LogFormat>()
        .unwrap_or(LogFormat::Compact);

    let mut log_config = LogConfig::new(&cfg.logging.level).with_format(format);

    log_config = match (
        cfg.logging.target.to_ascii_lowercase().as_str(),
        &cfg.logging.directory,
    ) {
        ("file", Some(dir)) => log_config.with_file_logging(dir),
        ("stdout", _) => log_config.with_target(LogTarget::Stdout),
        _ => log_config.with_target(LogTarget::Stderr),
    };

    for directive in &cfg.logging.directives {
        log_config = log_config.with_directive(directive);
    }

    log_config
}

/// Build the report sink for the configured report directory, if any.
#[must_use]
pub fn to_report_sink(cfg: &Config) -> Option<FileReportSink> {
    cfg.guard.report_dir.as_ref().map(FileReportSink::new)
}
