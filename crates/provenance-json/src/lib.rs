//! Provenance JSON bridge
//!
//! Connects the provenance protocol to JSON on both ends:
//!
//! - [`JsonDocument`] is a producer: its captured provenance is the JSON
//!   object itself, converted to structured data
//! - [`export`] renders flattened mappings and records back to JSON
//!
//! # Examples
//!
//! ```
//! use provenance_domain::ProvenanceRecord;
//! use provenance_json::{export, JsonDocument};
//!
//! let doc = JsonDocument::parse(r#"{"build": {"commit": "abc", "clean": true}}"#).unwrap();
//! let record = ProvenanceRecord::capture(&doc).unwrap();
//!
//! let json = export::to_json(&record.flatten(), ".");
//! assert_eq!(json["build.commit"], "abc");
//! assert_eq!(json["build.clean"], true);
//! ```

#![warn(missing_docs)]

mod document;
mod error;
pub mod export;

pub use document::{structured_from_json, value_from_json, JsonDocument};
pub use error::JsonError;
