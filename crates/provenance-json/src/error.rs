//! Error types for the JSON bridge

use thiserror::Error;

/// Errors that can occur while loading JSON documents
#[derive(Error, Debug)]
pub enum JsonError {
    /// Input was not valid JSON
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Input could not be read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Document root is not a JSON object
    #[error("Expected a JSON object at the document root, found {0}")]
    NotAnObject(&'static str),
}
