//! Configuration management for the Scheme language server.
//!
//! Handles:
//! - Command-line argument parsing
//! - Formatter command and script path resolution
//! - Workspace settings sent by the client

use anyhow::Result;
use clap::Parser;
use serde::Deserialize;
use std::path::PathBuf;

/// Executable used to run the formatting script when nothing is configured.
pub const DEFAULT_FORMATTER_COMMAND: &str = "python3";

/// File name of the bundled formatting script.
pub const SCRIPT_FILE_NAME: &str = "scheme-fmt.py";

/// Command-line arguments for the Scheme language server
#[derive(Debug, Parser)]
#[command(name = "scheme-language-server")]
#[command(about = "Language server for Scheme files")]
#[command(version)]
pub struct Args {
    /// Executable that runs the formatting script
    #[arg(long, help = "Executable that runs the formatting script")]
    pub formatter_command: Option<String>,

    /// Formatting script to run
    #[arg(long, help = "Formatting script, invoked as `<command> <script> -`")]
    pub script: Option<PathBuf>,

    /// Log level for the language server
    #[arg(
        long,
        default_value = "info",
        help = "Log level (trace, debug, info, warn, error)"
    )]
    pub log_level: String,
}

/// Combined configuration from all sources
#[derive(Debug, Clone)]
pub struct Config {
    /// Fallback formatter executable when the client provides no setting
    pub formatter_command: String,
    /// Path of the formatting script passed to the executable
    pub script_path: PathBuf,
    /// Whether the script path was left at its default (install location)
    pub script_is_default: bool,
    /// Log level
    pub log_level: String,
}

impl Config {
    /// Create configuration from command-line arguments
    pub fn from_args_and_env() -> Result<Self> {
        Self::from_args(Args::parse())
    }

    /// Create configuration from explicit arguments (useful for testing)
    pub fn from_args(args: Args) -> Result<Self> {
        let script_is_default = args.script.is_none();
        let script_path = match args.script {
            Some(path) => path,
            None => default_script_path()?,
        };

        Ok(Config {
            formatter_command: args
                .formatter_command
                .unwrap_or_else(|| DEFAULT_FORMATTER_COMMAND.to_string()),
            script_path,
            script_is_default,
            log_level: args.log_level,
        })
    }
}

/// Install location of the bundled script: `<config dir>/scheme-ls/scheme-fmt.py`.
pub fn default_script_path() -> Result<PathBuf> {
    let config_dir = dirs::config_dir()
        .ok_or_else(|| anyhow::anyhow!("could not determine user config directory"))?;
    Ok(config_dir.join("scheme-ls").join(SCRIPT_FILE_NAME))
}

/// User settings under the `scheme` configuration section.
///
/// Requested from the client on every formatting request, so edits to the
/// setting take effect immediately.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Executable that runs the formatting script (e.g. `python3`)
    pub formatter_command: Option<String>,
}
