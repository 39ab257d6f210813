//! Configuration for the Tether scope guard.
//!
//! A single [`Config`] type loaded from layered TOML files.
//!
//! # Usage
//!
//! ```rust,no_run
//! use tether_config::Config;
//!
//! let resolved = Config::load(Some(std::path::Path::new(".")), None).unwrap();
//! println!("scope ceiling: {}", resolved.config.guard.max_declared_files);
//! ```
//!
//! # Configuration Precedence
//!
//! From highest to lowest priority:
//!
//! 1. **Explicit** file passed on the command line
//! 2. **Workspace** (`{workspace}/.tether/config.toml`)
//! 3. **User** (`~/.tether/config.toml`)
//! 4. **Environment variables** (`TETHER_*`), fallback only
//! 5. **Embedded defaults** (`defaults.toml` compiled into the binary)

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

/// Configuration error types.
pub mod error;
/// Configuration file discovery and loading.
pub mod loader;
/// Configuration struct definitions.
pub mod types;
/// Configuration validation rules.
pub mod validate;

pub use error::{ConfigError, ConfigResult};
pub use loader::ResolvedConfig;
pub use types::*;

impl Config {
    /// Load configuration with the full precedence chain.
    ///
    /// See [`loader::load`] for the full algorithm.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if any config file is malformed or the final
    /// configuration fails validation.
    pub fn load(
        workspace_root: Option<&std::path::Path>,
        explicit: Option<&std::path::Path>,
    ) -> ConfigResult<ResolvedConfig> {
        loader::load(workspace_root, None, explicit)
    }

    /// Load a single configuration file without layering.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the file cannot be read, parsed, or fails
    /// validation.
    pub fn load_file(path: &std::path::Path) -> ConfigResult<Self> {
        loader::load_file(path)
    }

    /// Render this configuration as TOML.
    ///
    /// # Errors
    ///
    /// Returns a [`toml::ser::Error`] if serialization fails.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}
