//! Provenance Domain Layer
//!
//! This crate defines the provenance protocol: how objects describe their
//! own origin, how that description is timestamped and optionally signed,
//! and how nested descriptions are flattened into a single key-path mapping.
//! It never interprets provenance, performs cryptography, or persists data.
//!
//! ## Key Concepts
//!
//! - **Provenance**: Trait producers implement to capture an object's origin
//! - **Capture Registry**: Type-keyed dispatch table of capture logic
//! - **Signature Scheme**: Pluggable sign/verify strategy; [`NoSignature`] by default
//! - **Provenance Record**: Immutable (signature, timestamp, data) triple
//! - **Flattening**: Nested structured data to a `KeyPath -> Leaf` mapping
//!
//! ## Architecture
//!
//! - Registries are built once, then immutable and shareable across threads
//! - Producer and scheme failures propagate unchanged; nothing is retried
//! - Concrete signing schemes and serialization live in other crates

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod capture;
pub mod error;
pub mod flatten;
pub mod record;
pub mod signature;
pub mod timestamp;
pub mod tracker;
pub mod traits;
pub mod value;

// Re-exports for convenience
pub use capture::{CaptureRegistry, CaptureRegistryBuilder};
pub use error::{CaptureError, ProvenanceError, SignatureError};
pub use flatten::{flatten, flatten_into, flatten_value, FlattenedMap, KeyPath};
pub use record::{construct, ProvenanceRecord};
pub use signature::{NoSignature, SchemeRegistry, SchemeRegistryBuilder, Signature};
pub use timestamp::{FixedClock, SystemClock, Timestamp};
pub use tracker::Tracker;
pub use traits::{Clock, Provenance, SignatureScheme};
pub use value::{Leaf, StructuredData, StructuredValue};
