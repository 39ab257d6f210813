use std::path::PathBuf;

/// Errors raised by the guard's collaborators.
///
/// Scope decisions are never errors: a rejected declaration or a blocked
/// modification is an ordinary return value. These variants cover input
/// parsing and report persistence.
#[derive(Debug, thiserror::Error)]
pub enum GuardError {
    /// An operation name did not match any known modification kind.
    #[error("unknown operation '{0}'; expected write, search_replace or delete")]
    UnknownOperation(String),

    /// Writing a report to durable storage failed.
    #[error("failed to write report to {path}: {source}")]
    Io {
        /// Destination that could not be written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A report could not be serialized.
    #[error("failed to serialize report: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for guard operations.
pub type GuardResult<T> = Result<T, GuardError>;
