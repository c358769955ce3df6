//! Trait definitions for the protocol's extension points
//!
//! Producers implement [`Provenance`] for the types they own. Consumers
//! implement [`SignatureScheme`] for each signing strategy they add.
//! Implementations live outside this crate.

use crate::error::{CaptureError, SignatureError};
use crate::record::ProvenanceRecord;
use crate::signature::Signature;
use crate::timestamp::Timestamp;
use crate::value::StructuredData;
use std::any::Any;

/// Trait for objects that can describe their own provenance
///
/// The default implementation reports no provenance.
///
/// # Examples
///
/// ```
/// use provenance_domain::{CaptureError, Provenance, StructuredData};
///
/// struct Build {
///     commit: String,
/// }
///
/// impl Provenance for Build {
///     fn capture(&self) -> Result<Option<StructuredData>, CaptureError> {
///         Ok(Some(StructuredData::new().with("commit", self.commit.as_str())))
///     }
/// }
/// ```
pub trait Provenance {
    /// Capture the object's current provenance
    ///
    /// Must be a pure function of the object's state.
    fn capture(&self) -> Result<Option<StructuredData>, CaptureError> {
        Ok(None)
    }
}

/// Trait for pluggable signing strategies
///
/// Every scheme must say whether its records count as signed. There is no
/// default for [`SignatureScheme::is_signed`] so a new scheme cannot report
/// the wrong trust status by omission.
pub trait SignatureScheme: Send + Sync {
    /// Identifier embedded in every signature this scheme produces
    fn id(&self) -> &str;

    /// Produce a signature bound to the object, timestamp and captured data
    ///
    /// Schemes missing key material must return
    /// [`SignatureError::Unavailable`] rather than an empty signature.
    fn sign(
        &self,
        object: &dyn Any,
        timestamp: Timestamp,
        data: Option<&StructuredData>,
    ) -> Result<Signature, SignatureError>;

    /// Whether records produced by this scheme carry a real signature
    fn is_signed(&self, record: &ProvenanceRecord) -> bool;

    /// Check that the record's signature could have been produced for `object`
    fn verify(&self, object: &dyn Any, record: &ProvenanceRecord) -> Result<bool, SignatureError>;
}

/// Source of record timestamps
pub trait Clock: Send + Sync {
    /// Current time
    fn now(&self) -> Timestamp;
}
