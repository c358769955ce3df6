//! Provenance CLI - Capture, summarize and flatten provenance metadata.

use clap::Parser;
use provenance_cli::commands;
use provenance_cli::config::OutputFormat;
use provenance_cli::{Cli, CliError, Command, Config, Formatter};
use provenance_domain::{CaptureRegistry, SchemeRegistry, Tracker};
use provenance_json::JsonDocument;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        let formatter = Formatter::new(OutputFormat::Quiet, true, ".");
        eprintln!("{}", formatter.error(&e.to_string()));
        std::process::exit(1);
    }
}

/// Initialize tracing (log to stderr); RUST_LOG overrides -v.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}

fn run(cli: Cli) -> provenance_cli::Result<()> {
    // Load config from the given path or the default location
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);
    let separator = cli.separator.unwrap_or(config.settings.separator);
    if separator.is_empty() {
        return Err(CliError::InvalidInput("separator cannot be empty".to_string()));
    }
    let color_enabled = !cli.no_color && config.settings.color;

    let formatter = Formatter::new(format, color_enabled, separator);

    let captures = CaptureRegistry::builder()
        .register_provenance::<JsonDocument>()
        .build();
    let tracker = Tracker::new(captures, SchemeRegistry::default());

    let mut stdout = std::io::stdout().lock();
    match cli.command {
        Command::Flatten(args) => commands::execute_flatten(args, &tracker, &formatter, &mut stdout)?,
        Command::Inspect(args) => commands::execute_inspect(args, &tracker, &formatter, &mut stdout)?,
    }

    Ok(())
}
