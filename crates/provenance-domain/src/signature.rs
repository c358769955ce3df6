//! Signature values, the default scheme, and scheme dispatch

use crate::error::{ProvenanceError, SignatureError};
use crate::record::ProvenanceRecord;
use crate::timestamp::Timestamp;
use crate::traits::SignatureScheme;
use crate::value::StructuredData;
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Signature attached to a provenance record
///
/// Carries the identifier of the scheme that produced it and the scheme's
/// opaque output. Unsigned records hold [`Signature::none`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Signature {
    scheme: String,
    value: Vec<u8>,
}

impl Signature {
    /// Scheme identifier reserved for the "no signature" sentinel
    pub const NONE_SCHEME: &'static str = "none";

    /// Create a signature produced by `scheme`
    pub fn new(scheme: impl Into<String>, value: Vec<u8>) -> Self {
        Self {
            scheme: scheme.into(),
            value,
        }
    }

    /// The "no signature" sentinel
    pub fn none() -> Self {
        Self::new(Self::NONE_SCHEME, Vec::new())
    }

    /// Identifier of the producing scheme
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// Raw signature bytes
    pub fn value(&self) -> &[u8] {
        &self.value
    }

    /// Check whether this is the sentinel
    pub fn is_none(&self) -> bool {
        self.scheme == Self::NONE_SCHEME
    }
}

impl Default for Signature {
    fn default() -> Self {
        Self::none()
    }
}

/// The default scheme: signs nothing, verifies everything
///
/// Records carrying this scheme assert nothing about integrity. Callers
/// that need guarantees must opt into a real scheme.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSignature;

impl SignatureScheme for NoSignature {
    fn id(&self) -> &str {
        Signature::NONE_SCHEME
    }

    fn sign(
        &self,
        _object: &dyn Any,
        _timestamp: Timestamp,
        _data: Option<&StructuredData>,
    ) -> Result<Signature, SignatureError> {
        Ok(Signature::none())
    }

    fn is_signed(&self, _record: &ProvenanceRecord) -> bool {
        false
    }

    fn verify(&self, _object: &dyn Any, _record: &ProvenanceRecord) -> Result<bool, SignatureError> {
        Ok(true)
    }
}

/// Builder for a [`SchemeRegistry`]
///
/// Starts out holding [`NoSignature`].
pub struct SchemeRegistryBuilder {
    schemes: HashMap<String, Arc<dyn SignatureScheme>>,
}

impl SchemeRegistryBuilder {
    /// Create a builder holding only the default scheme
    pub fn new() -> Self {
        let mut schemes: HashMap<String, Arc<dyn SignatureScheme>> = HashMap::new();
        schemes.insert(Signature::NONE_SCHEME.to_string(), Arc::new(NoSignature));
        Self { schemes }
    }

    /// Register a scheme under its own identifier
    ///
    /// # Errors
    /// Returns [`ProvenanceError::ReservedScheme`] if the scheme claims the
    /// sentinel identifier.
    pub fn register<S: SignatureScheme + 'static>(self, scheme: S) -> Result<Self, ProvenanceError> {
        self.register_shared(Arc::new(scheme))
    }

    /// Register a scheme that is already shared elsewhere
    pub fn register_shared(
        mut self,
        scheme: Arc<dyn SignatureScheme>,
    ) -> Result<Self, ProvenanceError> {
        let id = scheme.id().to_string();
        if id == Signature::NONE_SCHEME {
            return Err(ProvenanceError::ReservedScheme(id));
        }

        if self.schemes.insert(id.clone(), scheme).is_some() {
            tracing::debug!("Replaced signature scheme '{}'", id);
        } else {
            tracing::debug!("Registered signature scheme '{}'", id);
        }
        Ok(self)
    }

    /// Freeze the registry
    pub fn build(self) -> SchemeRegistry {
        SchemeRegistry {
            schemes: self.schemes,
        }
    }
}

impl Default for SchemeRegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Immutable table from scheme identifier to implementation
///
/// Built once at startup and then shared read-only.
#[derive(Clone)]
pub struct SchemeRegistry {
    schemes: HashMap<String, Arc<dyn SignatureScheme>>,
}

impl SchemeRegistry {
    /// Start building a registry
    pub fn builder() -> SchemeRegistryBuilder {
        SchemeRegistryBuilder::new()
    }

    /// Look up a scheme by identifier
    ///
    /// # Errors
    /// Returns [`ProvenanceError::MissingCapability`] for unknown identifiers.
    pub fn get(&self, id: &str) -> Result<&Arc<dyn SignatureScheme>, ProvenanceError> {
        self.schemes
            .get(id)
            .ok_or_else(|| ProvenanceError::MissingCapability {
                scheme: id.to_string(),
            })
    }

    /// Check whether a scheme is registered
    pub fn contains(&self, id: &str) -> bool {
        self.schemes.contains_key(id)
    }

    /// Registered identifiers, sorted
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.schemes.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// Whether the record carries a real signature, per its own scheme
    pub fn is_signed(&self, record: &ProvenanceRecord) -> Result<bool, ProvenanceError> {
        let scheme = self.get(record.signature().scheme())?;
        Ok(scheme.is_signed(record))
    }

    /// Verify the record against `object` using the record's own scheme
    pub fn verify(&self, object: &dyn Any, record: &ProvenanceRecord) -> Result<bool, ProvenanceError> {
        let scheme = self.get(record.signature().scheme())?;
        Ok(scheme.verify(object, record)?)
    }
}

impl Default for SchemeRegistry {
    fn default() -> Self {
        SchemeRegistryBuilder::new().build()
    }
}

impl fmt::Debug for SchemeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchemeRegistry")
            .field("schemes", &self.ids())
            .finish()
    }
}
