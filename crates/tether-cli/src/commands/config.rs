//! CLI handlers for the `tether config` subcommand.

use anyhow::Result;
use tether_config::{ConfigResult, ResolvedConfig};

/// Print the resolved configuration.
pub(crate) fn show_config(resolved: ConfigResult<ResolvedConfig>, format: &str) -> Result<()> {
    let resolved = resolved?;

    let output = match format {
        "json" => serde_json::to_string_pretty(&resolved.config)?,
        _ => resolved
            .config
            .to_toml()
            .map_err(|e| anyhow::anyhow!("failed to format config: {e}"))?,
    };

    println!("{output}");
    Ok(())
}

/// Validate the configuration, exiting non-zero on failure.
#[allow(clippy::unnecessary_wraps)]
pub(crate) fn check_config(resolved: ConfigResult<ResolvedConfig>) -> Result<()> {
    match resolved {
        Ok(resolved) => {
            println!("Configuration is valid.");
            if !resolved.loaded_files.is_empty() {
                println!("\nLoaded files:");
                for path in &resolved.loaded_files {
                    println!("  - {path}");
                }
            }
            if !resolved.env_applied.is_empty() {
                println!("\nEnvironment fallbacks applied:");
                for var in &resolved.env_applied {
                    println!("  - {var}");
                }
            }
            Ok(())
        },
        Err(e) => {
            eprintln!("Configuration error: {e}");
            std::process::exit(1);
        },
    }
}
