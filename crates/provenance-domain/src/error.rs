//! Error types for the provenance protocol

use std::error::Error as StdError;
use thiserror::Error;

/// Errors surfaced by record construction and signature dispatch
#[derive(Error, Debug)]
pub enum ProvenanceError {
    /// A record names a signature scheme with no registered implementation
    #[error("Missing capability: signature scheme '{scheme}' is not registered")]
    MissingCapability {
        /// Scheme identifier that could not be resolved
        scheme: String,
    },

    /// A producer's capture implementation failed
    #[error("Capture failed: {0}")]
    Capture(#[from] CaptureError),

    /// A signature scheme failed to sign or verify
    #[error("Signature error: {0}")]
    Signature(#[from] SignatureError),

    /// A scheme tried to register under a reserved identifier
    #[error("Scheme identifier '{0}' is reserved")]
    ReservedScheme(String),

    /// A scheme returned a signature labelled with another scheme's identifier
    #[error("Signature scheme mismatch: '{expected}' produced a signature labelled '{actual}'")]
    SchemeMismatch {
        /// Identifier of the scheme that signed
        expected: String,
        /// Identifier found on the returned signature
        actual: String,
    },
}

/// Failure raised by a producer while capturing provenance
///
/// The registry never creates these; it only passes them through.
#[derive(Error, Debug)]
#[error("{message}")]
pub struct CaptureError {
    message: String,
    #[source]
    source: Option<Box<dyn StdError + Send + Sync + 'static>>,
}

impl CaptureError {
    /// Create a capture error from a message
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Create a capture error wrapping the producer's own error
    pub fn with_source<E>(message: impl Into<String>, source: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Human-readable message
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Failure raised by a signature scheme
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SignatureError {
    /// Key material or another prerequisite is not available right now
    #[error("Signature capability unavailable: {0}")]
    Unavailable(String),

    /// The scheme could not produce or check a signature
    #[error("Signature operation failed: {0}")]
    Failed(String),
}
