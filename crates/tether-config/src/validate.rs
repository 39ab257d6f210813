//! Post-merge configuration validation.

use crate::error::{ConfigError, ConfigResult};
use crate::types::Config;

/// Upper bound on `guard.max_declared_files`.
const MAX_DECLARED_FILES_UPPER_BOUND: usize = 1_000;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error", "off"];
const LOG_FORMATS: &[&str] = &["pretty", "compact", "json", "full"];
const LOG_TARGETS: &[&str] = &["stderr", "stdout", "file"];

/// Validate a fully-merged and deserialized configuration.
///
/// # Errors
///
/// Returns the first validation error found.
pub fn validate(config: &Config) -> ConfigResult<()> {
    validate_guard(config)?;
    validate_logging(config)?;
    Ok(())
}

fn validate_guard(config: &Config) -> ConfigResult<()> {
    let g = &config.guard;

    if g.max_declared_files == 0 || g.max_declared_files > MAX_DECLARED_FILES_UPPER_BOUND {
        return Err(ConfigError::ValidationError {
            field: "guard.max_declared_files".to_owned(),
            message: format!(
                "max_declared_files must be between 1 and {MAX_DECLARED_FILES_UPPER_BOUND}"
            ),
        });
    }

    if g.persist_on_exit && g.report_dir.is_none() {
        return Err(ConfigError::ValidationError {
            field: "guard.persist_on_exit".to_owned(),
            message: "persist_on_exit requires guard.report_dir to be set".to_owned(),
        });
    }

    Ok(())
}

fn validate_logging(config: &Config) -> ConfigResult<()> {
    let l = &config.logging;

    if !LOG_LEVELS.contains(&l.level.to_ascii_lowercase().as_str()) {
        return Err(ConfigError::ValidationError {
            field: "logging.level".to_owned(),
            message: format!(
                "unknown level '{}'; expected one of: {}",
                l.level,
                LOG_LEVELS.join(", ")
            ),
        });
    }

    if !LOG_FORMATS.contains(&l.format.to_ascii_lowercase().as_str()) {
        return Err(ConfigError::ValidationError {
            field: "logging.format".to_owned(),
            message: format!(
                "unknown format '{}'; expected one of: {}",
                l.format,
                LOG_FORMATS.join(", ")
            ),
        });
    }

    let target = l.target.to_ascii_lowercase();
    if !LOG_TARGETS.contains(&target.as_str()) {
        return Err(ConfigError::ValidationError {
            field: "logging.target".to_owned(),
            message: format!(
                "unknown target '{}'; expected one of: {}",
                l.target,
                LOG_TARGETS.join(", ")
            ),
        });
    }

    if target == "file" && l.directory.is_none() {
        return Err(ConfigError::ValidationError {
            field: "logging.directory".to_owned(),
            message: "target = \"file\" requires logging.directory to be set".to_owned(),
        });
    }

    Ok(())
}
