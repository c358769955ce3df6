//! Flatten command implementation.

use crate::cli::InputArgs;
use crate::commands::load_document;
use crate::error::Result;
use crate::output::Formatter;
use provenance_domain::Tracker;
use std::io::Write;
use tracing::info;

/// Execute the flatten command, writing the mapping to `out`.
pub fn execute_flatten<W: Write>(
    args: InputArgs,
    tracker: &Tracker,
    formatter: &Formatter,
    out: &mut W,
) -> Result<()> {
    let doc = load_document(&args.input)?;
    let record = tracker.construct(&doc)?;
    let flat = record.flatten();

    info!("Flattened {} into {} leaves", args.input, flat.len());
    writeln!(out, "{}", formatter.format_flattened(&flat)?)?;

    Ok(())
}
