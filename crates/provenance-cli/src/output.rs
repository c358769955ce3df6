//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use provenance_domain::{FlattenedMap, ProvenanceRecord};
use provenance_json::export;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Summary of a record for the inspect command.
#[derive(Debug, Clone)]
pub struct RecordSummary<'a> {
    /// The record being described
    pub record: &'a ProvenanceRecord,
    /// Whether the record's scheme reports it as signed
    pub signed: bool,
}

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
    separator: String,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool, separator: impl Into<String>) -> Self {
        Self {
            format,
            color_enabled,
            separator: separator.into(),
        }
    }

    /// Format a flattened mapping.
    ///
    /// Every format keys entries by the joined path, so paths that join to
    /// the same string collapse to one entry (the later path in sort order).
    pub fn format_flattened(&self, flat: &FlattenedMap) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&export::to_json(flat, &self.separator))?),
            OutputFormat::Table => Ok(self.format_flattened_table(flat)),
            OutputFormat::Quiet => Ok(self.format_flattened_quiet(flat)),
        }
    }

    /// Format flattened entries as a table.
    fn format_flattened_table(&self, flat: &FlattenedMap) -> String {
        if flat.is_empty() {
            return self.colorize("No provenance found.", "yellow");
        }

        let mut builder = Builder::default();
        builder.push_record(["Key", "Value"]);

        for (key, leaf) in flat.joined(&self.separator) {
            builder.push_record([key, leaf.to_string()]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        table.to_string()
    }

    /// Format flattened entries as key=value lines.
    fn format_flattened_quiet(&self, flat: &FlattenedMap) -> String {
        flat.joined(&self.separator)
            .iter()
            .map(|(key, leaf)| format!("{}={}", key, leaf))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Format a record summary.
    pub fn format_summary(&self, summary: &RecordSummary<'_>) -> Result<String> {
        let record = summary.record;
        let leaves = record.flatten().len();

        match self.format {
            OutputFormat::Json => {
                let mut json = export::record_to_json(record);
                json["signed"] = summary.signed.into();
                json["leaves"] = leaves.into();
                Ok(serde_json::to_string_pretty(&json)?)
            }
            OutputFormat::Table => {
                let mut builder = Builder::default();
                builder.push_record(["Field", "Value"]);
                builder.push_record(["Timestamp".to_string(), record.timestamp().to_string()]);
                builder.push_record(["Scheme".to_string(), record.signature().scheme().to_string()]);
                builder.push_record(["Signed".to_string(), self.yes_no(summary.signed)]);
                builder.push_record(["Has provenance".to_string(), self.yes_no(record.has_provenance())]);
                builder.push_record(["Leaves".to_string(), leaves.to_string()]);

                let mut table = builder.build();
                table
                    .with(Style::rounded())
                    .with(Modify::new(Rows::first()).with(Alignment::center()));
                Ok(table.to_string())
            }
            OutputFormat::Quiet => Ok(format!(
                "{} {} {}",
                record.timestamp(),
                record.signature().scheme(),
                leaves
            )),
        }
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    fn yes_no(&self, value: bool) -> String {
        if value {
            self.colorize("yes", "green")
        } else {
            self.colorize("no", "yellow")
        }
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}
