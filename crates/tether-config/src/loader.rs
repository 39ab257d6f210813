//! Config file discovery and layered loading.
//!
//! Implements the `Config::load()` algorithm:
//! 1. Parse `defaults.toml` → base
//! 2. Merge `~/.tether/config.toml` (user)
//! 3. Merge `{workspace}/.tether/config.toml` (workspace)
//! 4. Merge the explicit `--config` file, if any
//! 5. Apply `TETHER_*` env var fallbacks for fields no file set
//! 6. Deserialize merged tree → `Config`
//! 7. Validate

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{ConfigError, ConfigResult};
use crate::types::Config;
use crate::validate;

/// Embedded default configuration.
const DEFAULTS_TOML: &str = include_str!("defaults.toml");

/// Maximum allowed config file size (1 MB).
const MAX_CONFIG_FILE_SIZE: u64 = 1_048_576;

/// Environment variable → dotted field path. Env vars are fallbacks: they
/// only apply to fields that no config file set.
const ENV_MAPPINGS: &[(&str, &str)] = &[
    ("TETHER_GUARD_ENABLED", "guard.enabled"),
    ("TETHER_MAX_DECLARED_FILES", "guard.max_declared_files"),
    ("TETHER_REPORT_DIR", "guard.report_dir"),
    ("TETHER_LOG_LEVEL", "logging.level"),
    ("TETHER_LOG_FORMAT", "logging.format"),
    ("TETHER_LOG_DIR", "logging.directory"),
];

/// A configuration together with where it came from.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// The merged, validated configuration.
    pub config: Config,
    /// Files that contributed, lowest precedence first.
    pub loaded_files: Vec<String>,
    /// Environment variables that filled unset fields.
    pub env_applied: Vec<String>,
}

/// Load the configuration with layered file precedence, reading env
/// fallbacks from the process environment.
///
/// `workspace_root` enables the `{workspace}/.tether/config.toml` layer;
/// `home_override` replaces the user directory (the path is treated as the
/// `.tether` directory itself); `explicit` is a file that overrides all others.
///
/// # Errors
///
/// Returns a [`ConfigError`] if any config file is malformed, or if the
/// final merged configuration fails validation.
pub fn load(
    workspace_root: Option<&Path>,
    home_override: Option<&Path>,
    explicit: Option<&Path>,
) -> ConfigResult<ResolvedConfig> {
    let env_vars: HashMap<String, String> = std::env::vars()
        .filter(|(k, _)| k.starts_with("TETHER_"))
        .collect();
    load_with_env(workspace_root, home_override, explicit, &env_vars)
}

/// [`load`] with an explicit environment, for hosts and tests that must not
/// read the process environment.
///
/// # Errors
///
/// See [`load`].
pub fn load_with_env(
    workspace_root: Option<&Path>,
    home_override: Option<&Path>,
    explicit: Option<&Path>,
    env_vars: &HashMap<String, String>,
) -> ConfigResult<ResolvedConfig> {
    let mut merged: toml::Value =
        toml::from_str(DEFAULTS_TOML).map_err(|e| ConfigError::ParseError {
            path: "<embedded defaults>".to_owned(),
            source: e,
        })?;

    let mut file_fields = HashSet::new();
    let mut loaded_files = Vec::new();

    let user_path = match home_override {
        Some(dir) => Some(dir.join("config.toml")),
        None => home_directory()
            .ok()
            .map(|home| home.join(".tether").join("config.toml")),
    };
    let workspace_path = workspace_root.map(|root| root.join(".tether").join("config.toml"));

    let layers = [
        ("user", user_path),
        ("workspace", workspace_path),
        ("explicit", explicit.map(Path::to_path_buf)),
    ];

    for (layer, path) in layers {
        let Some(path) = path else { continue };
        // An explicitly named file must exist; discovered layers are optional.
        let overlay = if layer == "explicit" {
            Some(read_file(&path)?)
        } else {
            try_load_file(&path)?
        };
        if let Some(overlay) = overlay {
            record_leaves(&overlay, "", &mut file_fields);
            deep_merge(&mut merged, &overlay);
            loaded_files.push(path.display().to_string());
            info!(layer, path = %path.display(), "loaded config");
        }
    }

    let env_applied = apply_env_fallbacks(&mut merged, &file_fields, env_vars)?;
    if !env_applied.is_empty() {
        debug!(count = env_applied.len(), "applied environment variable fallbacks");
    }

    let config: Config =
        merged
            .try_into()
            .map_err(|e: toml::de::Error| ConfigError::ParseError {
                path: "<merged config>".to_owned(),
                source: e,
            })?;

    validate::validate(&config)?;

    Ok(ResolvedConfig {
        config,
        loaded_files,
        env_applied,
    })
}

/// Load a config from a specific file path (no layering).
///
/// Fields absent from the file take their built-in defaults.
///
/// # Errors
///
/// Returns a [`ConfigError`] if the file cannot be read or parsed, or fails
/// validation.
pub fn load_file(path: &Path) -> ConfigResult<Config> {
    let value = read_file(path)?;
    let config: Config = value
        .try_into()
        .map_err(|e: toml::de::Error| ConfigError::ParseError {
            path: path.display().to_string(),
            source: e,
        })?;
    validate::validate(&config)?;
    Ok(config)
}

/// Try to load a file, returning `None` if the file doesn't exist.
fn try_load_file(path: &Path) -> ConfigResult<Option<toml::Value>> {
    match read_file(path) {
        Ok(value) => Ok(Some(value)),
        Err(ConfigError::ReadError { source, .. })
            if source.kind() == std::io::ErrorKind::NotFound =>
        {
            debug!(path = %path.display(), "config file not found, skipping");
            Ok(None)
        },
        Err(e) => Err(e),
    }
}

fn read_file(path: &Path) -> ConfigResult<toml::Value> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.display().to_string(),
        source: e,
    })?;

    // Size is checked after reading to avoid a stat/read race.
    if content.len() as u64 > MAX_CONFIG_FILE_SIZE {
        return Err(ConfigError::FileTooLarge {
            path: path.display().to_string(),
            size: content.len() as u64,
            limit: MAX_CONFIG_FILE_SIZE,
        });
    }

    toml::from_str(&content).map_err(|e| ConfigError::ParseError {
        path: path.display().to_string(),
        source: e,
    })
}

/// Recursively deep-merge `overlay` into `base`. Tables merge per-field;
/// scalars and arrays replace.
fn deep_merge(base: &mut toml::Value, overlay: &toml::Value) {
    match (base, overlay) {
        (toml::Value::Table(base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                if let Some(base_val) = base_table.get_mut(key) {
                    deep_merge(base_val, overlay_val);
                } else {
                    base_table.insert(key.clone(), overlay_val.clone());
                }
            }
        },
        (base, overlay) => {
            *base = overlay.clone();
        },
    }
}

/// Collect the dotted paths of every leaf in `val`.
fn record_leaves(val: &toml::Value, prefix: &str, out: &mut HashSet<String>) {
    if let toml::Value::Table(table) = val {
        for (key, child) in table {
            let path = if prefix.is_empty() {
                key.clone()
            } else {
                format!("{prefix}.{key}")
            };
            record_leaves(child, &path, out);
        }
    } else {
        out.insert(prefix.to_owned());
    }
}

fn apply_env_fallbacks(
    merged: &mut toml::Value,
    file_fields: &HashSet<String>,
    env_vars: &HashMap<String, String>,
) -> ConfigResult<Vec<String>> {
    let mut applied = Vec::new();

    for (var_name, field_path) in ENV_MAPPINGS {
        if file_fields.contains(*field_path) {
            continue;
        }
        let Some(raw) = env_vars.get(*var_name) else {
            continue;
        };

        let value = coerce_env_value(var_name, field_path, raw)?;
        let Some((section, key)) = field_path.split_once('.') else {
            continue;
        };
        if let Some(table) = merged.as_table_mut() {
            let section_table = table
                .entry(section.to_owned())
                .or_insert_with(|| toml::Value::Table(toml::map::Map::new()));
            if let Some(section_table) = section_table.as_table_mut() {
                section_table.insert(key.to_owned(), value);
            }
        }

        debug!(var = var_name, field = field_path, "applying env var fallback");
        applied.push((*var_name).to_owned());
    }

    Ok(applied)
}

fn coerce_env_value(var_name: &str, field_path: &str, raw: &str) -> ConfigResult<toml::Value> {
    match field_path {
        "guard.enabled" => match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(toml::Value::Boolean(true)),
            "0" | "false" | "no" | "off" => Ok(toml::Value::Boolean(false)),
            _ => Err(ConfigError::EnvError {
                var_name: var_name.to_owned(),
                message: format!("expected a boolean, got '{raw}'"),
            }),
        },
        "guard.max_declared_files" => raw
            .trim()
            .parse::<i64>()
            .map(toml::Value::Integer)
            .map_err(|e| ConfigError::EnvError {
                var_name: var_name.to_owned(),
                message: format!("expected an integer: {e}"),
            }),
        _ => Ok(toml::Value::String(raw.to_owned())),
    }
}

/// Determine the user's home directory.
fn home_directory() -> ConfigResult<PathBuf> {
    directories::BaseDirs::new()
        .map(|d| d.home_dir().to_path_buf())
        .ok_or(ConfigError::NoHomeDir)
}
