//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};

/// Provenance CLI - Capture and flatten provenance metadata.
#[derive(Debug, Parser)]
#[command(name = "provenance")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Separator used when joining key paths
    #[arg(short, long, global = true)]
    pub separator: Option<String>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "PROVENANCE_CONFIG")]
    pub config: Option<String>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (key=value lines)
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
    /// Capture a JSON document and print its flattened provenance
    Flatten(InputArgs),

    /// Capture a JSON document and summarize the resulting record
    Inspect(InputArgs),
}

/// Arguments shared by commands that read a document.
#[derive(Debug, Parser)]
pub struct InputArgs {
    /// JSON document to read, or "-" for stdin
    #[arg(default_value = "-")]
    pub input: String,
}
