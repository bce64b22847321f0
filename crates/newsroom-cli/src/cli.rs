//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Newsroom CLI - Ingest wire content and maintain the archive.
#[derive(Debug, Parser)]
#[command(name = "newsroom")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "NEWSROOM_CONFIG")]
    pub config: Option<PathBuf>,

    /// Archive database path (overrides the configuration file)
    #[arg(long, global = true, env = "NEWSROOM_DB")]
    pub db: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (IDs only)
    Quiet,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Ingest wire documents into the archive
    Ingest(IngestArgs),

    /// Remove expired items from the archive
    Expire(ExpireArgs),

    /// Inspect or create the configuration file
    Config(ConfigArgs),
}

/// Arguments for the ingest command.
#[derive(Debug, Parser)]
pub struct IngestArgs {
    /// Files or directories to ingest (directories expand to their *.xml files)
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Declared wire format (sniffed from the document when omitted)
    #[arg(short, long)]
    pub format: Option<String>,

    /// Provider name recorded on archived items
    #[arg(short, long)]
    pub provider: Option<String>,
}

/// Arguments for the expire command.
#[derive(Debug, Parser)]
pub struct ExpireArgs {
    /// Count expired items without removing them
    #[arg(long)]
    pub dry_run: bool,

    /// Keep sweeping on the configured interval until Ctrl+C
    #[arg(short, long, conflicts_with = "cycles")]
    pub watch: bool,

    /// Run a fixed number of scheduled sweeps
    #[arg(long)]
    pub cycles: Option<usize>,
}

/// Arguments for the config command.
#[derive(Debug, Parser)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the effective configuration as TOML
    Show,

    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}
