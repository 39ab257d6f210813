use std::io;
use thiserror::Error;

/// Errors raised while locating, reading, or checking Tether configuration.
///
/// Every variant names the file, field, or variable at fault so `tether
/// config check` can point straight at it.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A config layer could not be read from disk.
    #[error("cannot read {path}: {source}")]
    ReadError {
        /// File that was being read.
        path: String,
        /// I/O failure.
        #[source]
        source: io::Error,
    },

    /// A config layer exceeded the size cap.
    #[error("{path} is {size} bytes; config files are capped at {limit} bytes")]
    FileTooLarge {
        /// Offending file.
        path: String,
        /// Its size.
        size: u64,
        /// The cap in force.
        limit: u64,
    },

    /// A layer is not valid TOML, or does not fit the config schema.
    #[error("invalid TOML in {path}: {source}")]
    ParseError {
        /// File (or `<embedded defaults>` / `<merged config>`) being parsed.
        path: String,
        /// TOML error with line and column.
        #[source]
        source: toml::de::Error,
    },

    /// The merged config breaks a rule, e.g. `guard.max_declared_files = 0`.
    #[error("{field}: {message}")]
    ValidationError {
        /// Dotted path of the field.
        field: String,
        /// The rule that was broken.
        message: String,
    },

    /// A `TETHER_*` variable could not be coerced to its field's type.
    #[error("{var_name}: {message}")]
    EnvError {
        /// The variable.
        var_name: String,
        /// What was expected.
        message: String,
    },

    /// No home directory, so `~/.tether/config.toml` cannot be located.
    #[error("no home directory found for the user config layer")]
    NoHomeDir,
}

/// Result alias for `tether-config`.
pub type ConfigResult<T> = Result<T, ConfigError>;
