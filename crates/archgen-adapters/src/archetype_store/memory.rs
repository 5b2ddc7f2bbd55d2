//! In-memory archetype store with built-in archetypes.

use std::{
    collections::HashMap,
    path::Path,
    sync::{Arc, RwLock},
};

use archgen_core::{
    application::{ApplicationError, ports::ArchetypeStore},
    domain::{ArchetypeCoordinates, ArchetypeDescriptor, DomainValidator as validator},
    error::ArchgenResult,
};
use tracing::debug;

use crate::{builtin_archetypes, archetype_loader::FilesystemArchetypeLoader};

/// Thread-safe in-memory archetype store.
#[derive(Clone)]
pub struct InMemoryStore {
    inner: Arc<RwLock<HashMap<ArchetypeCoordinates, ArchetypeDescriptor>>>,
}

impl InMemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Create a store with built-in archetypes loaded.
    pub fn with_builtin() -> ArchgenResult<Self> {
        let store = Self::new();
        store.load_builtin()?;
        Ok(store)
    }

    /// Load built-in archetypes, then any found in the archetypes directory.
    pub fn load_builtin(&self) -> ArchgenResult<()> {
        for descriptor in builtin_archetypes::all_archetypes()? {
            self.insert(descriptor)?;
        }
        Ok(())
    }

    /// Load every archetype under `dir`. Returns how many were added.
    pub fn load_dir(&self, dir: &Path) -> ArchgenResult<usize> {
        let descriptors = FilesystemArchetypeLoader::new(dir).load_all()?;
        let count = descriptors.len();
        for descriptor in descriptors {
            self.insert(descriptor)?;
        }
        debug!(dir = %dir.display(), count, "Loaded archetypes from directory");
        Ok(count)
    }

    /// Get the number of archetypes.
    pub fn len(&self) -> usize {
        self.inner.read().map(|inner| inner.len()).unwrap_or(0)
    }

    /// Check if store is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

fn not_found(coordinates: &ArchetypeCoordinates) -> ApplicationError {
    ApplicationError::ArchetypeNotFound {
        coordinates: coordinates.to_string(),
    }
}

impl ArchetypeStore for InMemoryStore {
    fn get(&self, coordinates: &ArchetypeCoordinates) -> ArchgenResult<ArchetypeDescriptor> {
        let inner = self
            .inner
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?;

        inner
            .get(coordinates)
            .cloned()
            .ok_or_else(|| not_found(coordinates).into())
    }

    fn list(&self) -> ArchgenResult<Vec<ArchetypeDescriptor>> {
        let inner = self
            .inner
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?;

        Ok(inner.values().cloned().collect())
    }

    fn insert(&self, descriptor: ArchetypeDescriptor) -> ArchgenResult<()> {
        validator::validate_descriptor(&descriptor)?;

        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?;

        inner.insert(descriptor.coordinates().clone(), descriptor);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use archgen_core::domain::RequiredProperty;

    fn descriptor(artifact_id: &str) -> ArchetypeDescriptor {
        ArchetypeDescriptor::builder()
            .coordinates(ArchetypeCoordinates::new("com.acme", artifact_id, "1.0"))
            .property(RequiredProperty::new("serviceName"))
            .build()
            .unwrap()
    }

    #[test]
    fn insert_then_get() {
        let store = InMemoryStore::new();
        assert!(store.is_empty());

        let d = descriptor("svc");
        store.insert(d.clone()).unwrap();

        assert_eq!(store.len(), 1);
        assert_eq!(store.get(d.coordinates()).unwrap(), d);
    }

    #[test]
    fn unknown_archetype_is_not_found() {
        let store = InMemoryStore::new();
        let err = store
            .get(&ArchetypeCoordinates::new("g", "missing", "1"))
            .unwrap_err();
        assert!(err.to_string().contains("g:missing:1"));
    }

    #[test]
    fn insert_replaces_same_coordinates() {
        let store = InMemoryStore::new();
        store.insert(descriptor("svc")).unwrap();
        store.insert(descriptor("svc")).unwrap();
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn clones_share_contents() {
        let store = InMemoryStore::new();
        let clone = store.clone();
        store.insert(descriptor("svc")).unwrap();
        assert_eq!(clone.len(), 1);
        assert!(clone.get(&ArchetypeCoordinates::new("com.acme", "svc", "1.0")).is_ok());
    }

    #[test]
    fn builtin_store_has_the_default_archetype() {
        let store = InMemoryStore::with_builtin().unwrap();
        assert!(store.get(&ArchetypeCoordinates::default_archetype()).is_ok());
    }

    #[test]
    fn load_dir_adds_archetypes() {
        let dir = tempfile::TempDir::new().unwrap();
        let sub = dir.path().join("svc");
        std::fs::create_dir(&sub).unwrap();
        std::fs::write(
            sub.join("archetype.toml"),
            r#"
[archetype]
group_id = "com.acme"
artifact_id = "svc"
version = "2.0"

[[properties]]
key = "serviceName"
"#,
        )
        .unwrap();

        let store = InMemoryStore::new();
        assert_eq!(store.load_dir(dir.path()).unwrap(), 1);
        assert!(store
            .get(&ArchetypeCoordinates::new("com.acme", "svc", "2.0"))
            .is_ok());
    }
}
