//! Telemetry error types.

use thiserror::Error;

/// Errors that can occur while configuring logging.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// The filter level or a directive could not be parsed.
    #[error("invalid log configuration: {0}")]
    ConfigError(String),

    /// A global subscriber was already installed, or installation failed.
    #[error("failed to initialize logging: {0}")]
    InitError(String),

    /// IO error (e.g. creating the log directory).
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type for telemetry operations.
pub type TelemetryResult<T> = Result<T, TelemetryError>;
