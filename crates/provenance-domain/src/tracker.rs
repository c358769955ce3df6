//! Tracker: the registries and clock bundled for call sites

use crate::capture::CaptureRegistry;
use crate::error::{CaptureError, ProvenanceError};
use crate::record::{construct, ProvenanceRecord};
use crate::signature::{NoSignature, SchemeRegistry};
use crate::timestamp::SystemClock;
use crate::traits::Clock;
use crate::value::StructuredData;
use std::any::Any;
use std::sync::Arc;

/// Constructs and checks provenance records
///
/// Holds the capture registry, the scheme registry and a clock. Build one at
/// startup and pass it to the code that needs provenance.
///
/// # Examples
///
/// ```
/// use provenance_domain::{CaptureRegistry, SchemeRegistry, StructuredData, Tracker};
///
/// struct Model {
///     name: &'static str,
/// }
///
/// let captures = CaptureRegistry::builder()
///     .register(|m: &Model| Ok(Some(StructuredData::new().with("name", m.name))))
///     .build();
/// let tracker = Tracker::new(captures, SchemeRegistry::default());
///
/// let record = tracker.construct(&Model { name: "resnet" }).unwrap();
/// assert!(record.has_provenance());
/// assert!(!tracker.is_signed(&record).unwrap());
/// ```
#[derive(Clone)]
pub struct Tracker {
    captures: CaptureRegistry,
    schemes: SchemeRegistry,
    clock: Arc<dyn Clock>,
}

impl Tracker {
    /// Create a tracker using the system clock
    pub fn new(captures: CaptureRegistry, schemes: SchemeRegistry) -> Self {
        Self {
            captures,
            schemes,
            clock: Arc::new(SystemClock),
        }
    }

    /// Replace the clock
    pub fn with_clock<C: Clock + 'static>(mut self, clock: C) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// Capture registry in use
    pub fn captures(&self) -> &CaptureRegistry {
        &self.captures
    }

    /// Scheme registry in use
    pub fn schemes(&self) -> &SchemeRegistry {
        &self.schemes
    }

    /// Capture provenance for `object` without building a record
    pub fn capture<O: Any>(&self, object: &O) -> Result<Option<StructuredData>, CaptureError> {
        self.captures.capture(object)
    }

    /// Construct an unsigned record for `object`
    pub fn construct<O: Any>(&self, object: &O) -> Result<ProvenanceRecord, ProvenanceError> {
        construct(
            object,
            |o: &O| self.captures.capture(o),
            &NoSignature,
            self.clock.as_ref(),
        )
    }

    /// Construct a record signed by the scheme registered as `scheme_id`
    ///
    /// # Errors
    /// Returns [`ProvenanceError::MissingCapability`] if no such scheme exists.
    pub fn construct_with<O: Any>(
        &self,
        object: &O,
        scheme_id: &str,
    ) -> Result<ProvenanceRecord, ProvenanceError> {
        let scheme = self.schemes.get(scheme_id)?;
        construct(
            object,
            |o: &O| self.captures.capture(o),
            scheme.as_ref(),
            self.clock.as_ref(),
        )
    }

    /// Whether the record carries a real signature
    pub fn is_signed(&self, record: &ProvenanceRecord) -> Result<bool, ProvenanceError> {
        self.schemes.is_signed(record)
    }

    /// Verify a record against the object it describes
    pub fn verify<O: Any>(&self, object: &O, record: &ProvenanceRecord) -> Result<bool, ProvenanceError> {
        self.schemes.verify(object, record)
    }
}

impl Default for Tracker {
    fn default() -> Self {
        Self::new(CaptureRegistry::default(), SchemeRegistry::default())
    }
}

impl std::fmt::Debug for Tracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tracker")
            .field("captures", &self.captures)
            .field("schemes", &self.schemes)
            .finish_non_exhaustive()
    }
}
