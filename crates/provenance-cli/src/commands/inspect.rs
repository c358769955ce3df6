//! Inspect command implementation.

use crate::cli::InputArgs;
use crate::commands::load_document;
use crate::error::Result;
use crate::output::{Formatter, RecordSummary};
use provenance_domain::Tracker;
use std::io::Write;

/// Execute the inspect command, writing the summary to `out`.
///
/// The no-provenance warning goes to stderr so `out` stays machine-readable.
pub fn execute_inspect<W: Write>(
    args: InputArgs,
    tracker: &Tracker,
    formatter: &Formatter,
    out: &mut W,
) -> Result<()> {
    let doc = load_document(&args.input)?;
    let record = tracker.construct(&doc)?;
    let signed = tracker.is_signed(&record)?;

    if !record.has_provenance() {
        eprintln!("{}", formatter.warning(&format!("{} carries no provenance", args.input)));
    }

    let summary = RecordSummary {
        record: &record,
        signed,
    };
    writeln!(out, "{}", formatter.format_summary(&summary)?)?;

    Ok(())
}
