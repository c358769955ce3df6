//! Provenance records and their construction

use crate::error::{CaptureError, ProvenanceError};
use crate::flatten::{flatten, FlattenedMap};
use crate::signature::{NoSignature, Signature};
use crate::timestamp::{SystemClock, Timestamp};
use crate::traits::{Clock, Provenance, SignatureScheme};
use crate::value::StructuredData;
use std::any::Any;

/// Signed, timestamped snapshot of an object's provenance
///
/// Records are immutable once constructed and can be shared across threads
/// without synchronization.
#[derive(Debug, Clone, PartialEq)]
pub struct ProvenanceRecord {
    signature: Signature,
    timestamp: Timestamp,
    data: Option<StructuredData>,
}

impl ProvenanceRecord {
    /// Capture an object's provenance without signing it
    ///
    /// # Examples
    ///
    /// ```
    /// use provenance_domain::{CaptureError, Provenance, ProvenanceRecord, StructuredData};
    ///
    /// struct Dataset;
    ///
    /// impl Provenance for Dataset {
    ///     fn capture(&self) -> Result<Option<StructuredData>, CaptureError> {
    ///         Ok(Some(StructuredData::new().with("source", "survey-2024")))
    ///     }
    /// }
    ///
    /// let record = ProvenanceRecord::capture(&Dataset).unwrap();
    /// assert!(record.has_provenance());
    /// assert!(record.signature().is_none());
    /// ```
    pub fn capture<O: Provenance + Any>(object: &O) -> Result<Self, ProvenanceError> {
        Self::capture_signed(object, &NoSignature)
    }

    /// Capture an object's provenance and sign it with `scheme`
    pub fn capture_signed<O: Provenance + Any>(
        object: &O,
        scheme: &dyn SignatureScheme,
    ) -> Result<Self, ProvenanceError> {
        construct(object, |o: &O| o.capture(), scheme, &SystemClock)
    }

    /// Reassemble a record from parts previously taken from one
    pub fn from_parts(signature: Signature, timestamp: Timestamp, data: Option<StructuredData>) -> Self {
        Self {
            signature,
            timestamp,
            data,
        }
    }

    /// Signature attached at construction
    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    /// Time of construction
    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    /// Captured data, if the object had any provenance
    pub fn data(&self) -> Option<&StructuredData> {
        self.data.as_ref()
    }

    /// Whether provenance data is present, regardless of signing
    pub fn has_provenance(&self) -> bool {
        self.data.is_some()
    }

    /// Flatten this record's data into a key-path mapping
    pub fn flatten(&self) -> FlattenedMap {
        flatten(self)
    }

    /// Split the record into its parts
    pub fn into_parts(self) -> (Signature, Timestamp, Option<StructuredData>) {
        (self.signature, self.timestamp, self.data)
    }
}

/// Build a record: timestamp, then capture, then sign
///
/// Capture runs strictly before signing so the signature covers exactly the
/// data stored in the record. `object` must not change while this runs.
///
/// # Errors
/// Returns [`ProvenanceError::SchemeMismatch`] if the signature does not
/// carry the signing scheme's own identifier.
pub fn construct<O, F>(
    object: &O,
    capture: F,
    scheme: &dyn SignatureScheme,
    clock: &dyn Clock,
) -> Result<ProvenanceRecord, ProvenanceError>
where
    O: Any,
    F: FnOnce(&O) -> Result<Option<StructuredData>, CaptureError>,
{
    let timestamp = clock.now();
    let data = capture(object)?;
    let signature = scheme.sign(object, timestamp, data.as_ref())?;
    if signature.scheme() != scheme.id() {
        return Err(ProvenanceError::SchemeMismatch {
            expected: scheme.id().to_string(),
            actual: signature.scheme().to_string(),
        });
    }

    Ok(ProvenanceRecord {
        signature,
        timestamp,
        data,
    })
}
