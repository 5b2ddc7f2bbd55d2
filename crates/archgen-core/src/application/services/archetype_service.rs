//! Archetype Service - archetype catalogue operations.
//!
//! Descriptor lookup and listing for `list` and `show`. Kept apart from the
//! configurator so that browsing archetypes never touches the resolver.

use serde::Serialize;

use crate::{
    application::ports::ArchetypeStore,
    domain::{ArchetypeCoordinates, ArchetypeDescriptor},
    error::ArchgenResult,
};

/// Information about an archetype for display purposes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArchetypeSummary {
    #[serde(serialize_with = "serialize_display")]
    pub coordinates: ArchetypeCoordinates,
    pub name: String,
    pub description: String,
    pub property_count: usize,
}

impl From<&ArchetypeDescriptor> for ArchetypeSummary {
    fn from(d: &ArchetypeDescriptor) -> Self {
        Self {
            coordinates: d.coordinates().clone(),
            name: d.name().to_string(),
            description: d.description().to_string(),
            property_count: d.required_properties().len(),
        }
    }
}

fn serialize_display<S: serde::Serializer>(
    value: &ArchetypeCoordinates,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_str(value)
}

/// Service for archetype operations.
pub struct ArchetypeService {
    store: Box<dyn ArchetypeStore>,
}

impl ArchetypeService {
    /// Create a new archetype service.
    pub fn new(store: Box<dyn ArchetypeStore>) -> Self {
        Self { store }
    }

    /// Get a descriptor by coordinates.
    pub fn get(&self, coordinates: &ArchetypeCoordinates) -> ArchgenResult<ArchetypeDescriptor> {
        self.store.get(coordinates)
    }

    /// List all archetypes, sorted by coordinates.
    pub fn list(&self) -> ArchgenResult<Vec<ArchetypeSummary>> {
        let mut summaries: Vec<ArchetypeSummary> = self
            .store
            .list()?
            .iter()
            .map(ArchetypeSummary::from)
            .collect();
        summaries.sort_by(|a, b| a.coordinates.cmp(&b.coordinates));
        Ok(summaries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::test_support::FakeStore;
    use crate::domain::RequiredProperty;

    fn descriptor(artifact_id: &str) -> ArchetypeDescriptor {
        ArchetypeDescriptor::builder()
            .coordinates(ArchetypeCoordinates::new("com.acme", artifact_id, "1.0"))
            .description(format!("{artifact_id} archetype"))
            .property(RequiredProperty::new("serviceName"))
            .build()
            .unwrap()
    }

    #[test]
    fn list_is_sorted_by_coordinates() {
        let service = ArchetypeService::new(Box::new(FakeStore::with(vec![
            descriptor("zeta"),
            descriptor("alpha"),
        ])));

        let summaries = service.list().unwrap();
        let ids: Vec<_> = summaries
            .iter()
            .map(|s| s.coordinates.artifact_id())
            .collect();
        assert_eq!(ids, ["alpha", "zeta"]);
        assert_eq!(summaries[0].property_count, 1);
        assert_eq!(summaries[0].description, "alpha archetype");
    }

    #[test]
    fn get_finds_by_coordinates() {
        let d = descriptor("svc");
        let service = ArchetypeService::new(Box::new(FakeStore::with(vec![
            descriptor("other"),
            d.clone(),
        ])));

        assert_eq!(service.get(d.coordinates()).unwrap(), d);
        assert!(
            service
                .get(&ArchetypeCoordinates::new("com.acme", "missing", "1.0"))
                .is_err()
        );
    }
}
