//! Command implementations.

pub mod flatten;
pub mod inspect;

pub use self::flatten::execute_flatten;
pub use self::inspect::execute_inspect;

use crate::error::Result;
use provenance_json::JsonDocument;

/// Load the document named on the command line; "-" reads stdin.
pub fn load_document(input: &str) -> Result<JsonDocument> {
    let doc = if input == "-" {
        tracing::debug!("Reading JSON document from stdin");
        JsonDocument::from_reader(std::io::stdin().lock())?
    } else {
        JsonDocument::from_path(input)?
    };
    Ok(doc)
}
