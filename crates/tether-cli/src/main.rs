//! Tether - scope enforcement for agent tool pipelines.
//!
//! The CLI hosts a single guard session: an agent pipeline writes requests to
//! `tether serve` on stdin and reads decisions from stdout. Logs go to stderr.

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tether_cli::config_bridge;
use tether_config::Config;

mod commands;

/// Tether - scope enforcement for agent tool pipelines
#[derive(Parser)]
#[command(name = "tether")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file overriding all other layers
    #[arg(short, long, global = true, env = "TETHER_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve a guard session over newline-delimited JSON on stdin/stdout
    Serve {
        /// Directory for end-of-task reports (overrides `guard.report_dir`)
        #[arg(long)]
        report_dir: Option<PathBuf>,

        /// Start with enforcement turned off
        #[arg(long)]
        disabled: bool,
    },

    /// View and validate configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show the resolved configuration
    Show {
        /// Output format: toml (default) or json
        #[arg(long, default_value = "toml")]
        format: String,
    },
    /// Validate configuration files
    Check,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let workspace_root = std::env::current_dir().ok();
    let resolved = Config::load(workspace_root.as_deref(), cli.config.as_deref());

    // Set up logging from config, with --verbose override.
    let log_config = if let Ok(r) = &resolved {
        let mut lc = config_bridge::to_log_config(&r.config);
        if cli.verbose {
            "debug".clone_into(&mut lc.level);
        }
        lc
    } else {
        // Fallback if config loading fails.
        let level = if cli.verbose { "debug" } else { "info" };
        tether_telemetry::LogConfig::new(level).with_format(tether_telemetry::LogFormat::Compact)
    };
    if let Err(e) = tether_telemetry::setup_logging(&log_config) {
        eprintln!("Failed to initialize logging: {e}");
    }

    match cli.command {
        Commands::Serve {
            report_dir,
            disabled,
        } => {
            let resolved = resolved?;
            commands::serve::run_serve(&resolved.config, report_dir, disabled)?;
        },
        Commands::Config { command } => match command {
            ConfigCommands::Show { format } => commands::config::show_config(resolved, &format)?,
            ConfigCommands::Check => commands::config::check_config(resolved)?,
        },
    }

    Ok(())
}
