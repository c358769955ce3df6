//! Capture registry
//!
//! Maps an object's concrete type to the producer-supplied capture logic for
//! that type. Types with nothing registered have no known provenance.

use crate::error::CaptureError;
use crate::traits::Provenance;
use crate::value::StructuredData;
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

type CaptureFn =
    Arc<dyn Fn(&dyn Any) -> Result<Option<StructuredData>, CaptureError> + Send + Sync>;

#[derive(Clone)]
struct CaptureEntry {
    type_name: &'static str,
    capture: CaptureFn,
}

/// Builder for a [`CaptureRegistry`]
#[derive(Default)]
pub struct CaptureRegistryBuilder {
    entries: HashMap<TypeId, CaptureEntry>,
}

impl CaptureRegistryBuilder {
    /// Create an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Register capture logic for objects of type `T`
    ///
    /// Registering the same type again replaces the earlier logic.
    pub fn register<T, F>(mut self, capture: F) -> Self
    where
        T: Any,
        F: Fn(&T) -> Result<Option<StructuredData>, CaptureError> + Send + Sync + 'static,
    {
        let type_name = std::any::type_name::<T>();
        let entry = CaptureEntry {
            type_name,
            capture: Arc::new(move |object: &dyn Any| match object.downcast_ref::<T>() {
                Some(object) => capture(object),
                None => Ok(None),
            }),
        };

        if self.entries.insert(TypeId::of::<T>(), entry).is_some() {
            tracing::debug!("Replaced capture for {}", type_name);
        } else {
            tracing::debug!("Registered capture for {}", type_name);
        }
        self
    }

    /// Register the [`Provenance`] implementation of `T`
    pub fn register_provenance<T: Provenance + Any>(self) -> Self {
        self.register::<T, _>(|object: &T| object.capture())
    }

    /// Freeze the registry
    pub fn build(self) -> CaptureRegistry {
        CaptureRegistry {
            entries: self.entries,
        }
    }
}

/// Immutable dispatch table from object type to capture logic
///
/// Built once during initialization; safe to share across threads afterwards.
///
/// # Examples
///
/// ```
/// use provenance_domain::{CaptureRegistry, StructuredData};
///
/// struct Artifact {
///     digest: String,
/// }
///
/// let registry = CaptureRegistry::builder()
///     .register(|a: &Artifact| Ok(Some(StructuredData::new().with("digest", a.digest.as_str()))))
///     .build();
///
/// let data = registry.capture(&Artifact { digest: "abc".into() }).unwrap();
/// assert!(data.is_some());
/// assert!(registry.capture(&42u8).unwrap().is_none());
/// ```
#[derive(Clone, Default)]
pub struct CaptureRegistry {
    entries: HashMap<TypeId, CaptureEntry>,
}

impl CaptureRegistry {
    /// Start building a registry
    pub fn builder() -> CaptureRegistryBuilder {
        CaptureRegistryBuilder::new()
    }

    /// Capture provenance for `object`
    ///
    /// Returns `Ok(None)` when nothing is registered for the object's type.
    /// Producer failures are returned unchanged.
    pub fn capture<O: Any>(&self, object: &O) -> Result<Option<StructuredData>, CaptureError> {
        self.capture_dyn(object)
    }

    /// Capture provenance for a type-erased object
    pub fn capture_dyn(&self, object: &dyn Any) -> Result<Option<StructuredData>, CaptureError> {
        match self.entries.get(&Any::type_id(object)) {
            Some(entry) => (entry.capture)(object),
            None => Ok(None),
        }
    }

    /// Check whether capture logic exists for `T`
    pub fn is_registered<T: Any>(&self) -> bool {
        self.entries.contains_key(&TypeId::of::<T>())
    }

    /// Number of registered types
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check whether no types are registered
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for CaptureRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.entries.values().map(|e| e.type_name).collect();
        names.sort_unstable();
        f.debug_struct("CaptureRegistry")
            .field("types", &names)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Commit {
        sha: String,
    }

    impl Provenance for Commit {
        fn capture(&self) -> Result<Option<StructuredData>, CaptureError> {
            Ok(Some(StructuredData::new().with("sha", self.sha.as_str())))
        }
    }

    struct Opaque;

    impl Provenance for Opaque {}

    #[test]
    fn test_unregistered_type_has_no_provenance() {
        let registry = CaptureRegistry::default();
        assert!(registry.capture(&"plain string").unwrap().is_none());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_registered_provenance_impl() {
        let registry = CaptureRegistry::builder()
            .register_provenance::<Commit>()
            .build();

        let data = registry
            .capture(&Commit { sha: "deadbeef".to_string() })
            .unwrap()
            .unwrap();
        assert_eq!(data, StructuredData::new().with("sha", "deadbeef"));
        assert!(registry.is_registered::<Commit>());
        assert!(!registry.is_registered::<Opaque>());
    }

    #[test]
    fn test_default_provenance_impl_is_absent() {
        let registry = CaptureRegistry::builder()
            .register_provenance::<Opaque>()
            .build();
        assert!(registry.capture(&Opaque).unwrap().is_none());
    }

    #[test]
    fn test_reregistration_replaces() {
        let registry = CaptureRegistry::builder()
            .register(|_: &u32| Ok(Some(StructuredData::new().with("v", 1))))
            .register(|_: &u32| Ok(Some(StructuredData::new().with("v", 2))))
            .build();

        assert_eq!(registry.len(), 1);
        let data = registry.capture(&5u32).unwrap().unwrap();
        assert_eq!(data, StructuredData::new().with("v", 2));
    }

    #[test]
    fn test_capture_error_propagates() {
        let registry = CaptureRegistry::builder()
            .register(|_: &Commit| Err(CaptureError::new("repository unreadable")))
            .build();

        let err = registry
            .capture(&Commit { sha: String::new() })
            .unwrap_err();
        assert_eq!(err.message(), "repository unreadable");
    }

    #[test]
    fn test_capture_dyn_dispatches_on_concrete_type() {
        let registry = CaptureRegistry::builder()
            .register_provenance::<Commit>()
            .build();

        let object: Box<dyn Any> = Box::new(Commit { sha: "cafe".to_string() });
        assert!(registry.capture_dyn(object.as_ref()).unwrap().is_some());
    }
}
