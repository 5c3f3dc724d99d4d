use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use recordhook_config::{ConfigManager, RecordHookConfig, RuntimeOverrides};
use serde_json::Value;

mod config;
mod get;
mod save;

pub use config::handle_config_command;
pub use get::handle_get_command;
pub use save::handle_save_command;

#[derive(Debug, Parser)]
#[command(name = "recordhook")]
#[command(about = "Load and save records through workflow webhooks")]
#[command(version)]
pub struct Cli {
    /// Configuration file (skips the workspace and home search)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Override the load webhook URL
    #[arg(long, global = true, value_name = "URL")]
    pub load_url: Option<String>,

    /// Override the save webhook URL
    #[arg(long, global = true, value_name = "URL")]
    pub save_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Fetch a record by id and print it as JSON
    Get {
        /// Record id, sent as the `id` query parameter
        id: String,

        /// Print JSON on a single line
        #[arg(long)]
        compact: bool,
    },

    /// Send a JSON record to the save webhook
    Save {
        /// Read the record from this file instead of stdin ("-" for stdin)
        #[arg(short, long, value_name = "PATH")]
        file: Option<PathBuf>,

        /// Print the webhook's response on a single line
        #[arg(long)]
        compact: bool,
    },

    /// Write a default configuration file
    Config {
        #[arg(short, long, value_name = "PATH", default_value = "recordhook.toml")]
        output: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

impl Cli {
    fn runtime_overrides(&self) -> RuntimeOverrides {
        RuntimeOverrides {
            load_url: self.load_url.clone(),
            save_url: self.save_url.clone(),
            request_timeout_seconds: self.timeout,
        }
    }
}

/// Resolve the effective configuration for a request command.
pub fn load_config(args: &Cli) -> Result<RecordHookConfig> {
    let mut manager = match &args.config {
        Some(path) => ConfigManager::load_from_file(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => ConfigManager::load()?,
    };

    manager
        .apply_runtime_overrides(&args.runtime_overrides())
        .context("Invalid command-line override")?;

    if let Some(path) = manager.config_path() {
        tracing::debug!(path = %path.display(), "using configuration file");
    }
    Ok(manager.into_config())
}

pub(crate) fn print_json(value: &Value, compact: bool) -> Result<()> {
    let rendered = if compact {
        serde_json::to_string(value)
    } else {
        serde_json::to_string_pretty(value)
    }
    .context("Failed to render JSON output")?;
    println!("{rendered}");
    Ok(())
}
