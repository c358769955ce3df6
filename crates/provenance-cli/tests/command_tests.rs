//! Integration tests for provenance-cli commands
//!
//! Commands write to any `Write`; these tests capture it in a buffer.

use provenance_cli::cli::InputArgs;
use provenance_cli::commands::{execute_flatten, execute_inspect, load_document};
use provenance_cli::config::OutputFormat;
use provenance_cli::{CliError, Formatter};
use provenance_domain::{CaptureRegistry, SchemeRegistry, Tracker};
use provenance_json::JsonDocument;
use std::io::Write;
use tempfile::NamedTempFile;

fn tracker() -> Tracker {
    let captures = CaptureRegistry::builder()
        .register_provenance::<JsonDocument>()
        .build();
    Tracker::new(captures, SchemeRegistry::default())
}

fn document(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", contents).unwrap();
    file
}

fn args(file: &NamedTempFile) -> InputArgs {
    InputArgs {
        input: file.path().to_string_lossy().into_owned(),
    }
}

#[test]
fn test_flatten_command() {
    let file = document(r#"{"run": {"id": 12, "host": "builder-3"}}"#);
    let formatter = Formatter::new(OutputFormat::Quiet, false, ".");
    let mut out = Vec::new();

    execute_flatten(args(&file), &tracker(), &formatter, &mut out).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), "run.host=builder-3\nrun.id=12\n");
}

#[test]
fn test_flatten_command_custom_separator() {
    let file = document(r#"{"run": {"id": 12}}"#);
    let formatter = Formatter::new(OutputFormat::Json, false, "::");
    let mut out = Vec::new();

    execute_flatten(args(&file), &tracker(), &formatter, &mut out).unwrap();
    let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(json, serde_json::json!({ "run::id": 12 }));
}

#[test]
fn test_inspect_command() {
    let file = document(r#"{"run": {"id": 12}}"#);
    let formatter = Formatter::new(OutputFormat::Json, false, ".");
    let mut out = Vec::new();

    execute_inspect(args(&file), &tracker(), &formatter, &mut out).unwrap();
    let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(json["signed"], false);
    assert_eq!(json["leaves"], 1);
    assert_eq!(json["signature"]["scheme"], "none");
}

#[test]
fn test_flatten_rejects_scalar_document() {
    let file = document("\"just a string\"");
    let formatter = Formatter::new(OutputFormat::Table, false, ".");

    let mut out = Vec::new();

    let result = execute_flatten(args(&file), &tracker(), &formatter, &mut out);
    assert!(matches!(result, Err(CliError::Provenance(_))));
    assert!(out.is_empty());
}

#[test]
fn test_load_document_invalid_json() {
    let file = document("{ broken");
    let result = load_document(&file.path().to_string_lossy());
    assert!(matches!(result, Err(CliError::Document(_))));
}
