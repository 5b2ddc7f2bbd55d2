//! Archetype descriptor entity.
//!
//! An [`ArchetypeDescriptor`] is what an archetype declares about the project
//! it generates: its coordinates, a display name, and the ordered list of
//! [`RequiredProperty`] values a user must end up with.
//!
//! ```text
//! ArchetypeDescriptor
//! ├── coordinates   org.apache.maven.archetypes:maven-archetype-quickstart:1.4
//! ├── name          "Quickstart"
//! └── required_properties (declaration order is significant)
//!     ├── groupId
//!     ├── artifactId
//!     └── package    = ${groupId}
//! ```

use std::collections::HashSet;

use crate::domain::{
    entities::{
        coordinates::ArchetypeCoordinates,
        property::{RequiredProperty, reserved},
    },
    error::DomainError,
};

/// Everything an archetype declares about its required properties.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchetypeDescriptor {
    coordinates: ArchetypeCoordinates,
    name: String,
    description: String,
    required_properties: Vec<RequiredProperty>,
}

impl ArchetypeDescriptor {
    /// Create a builder.
    pub fn builder() -> ArchetypeDescriptorBuilder {
        ArchetypeDescriptorBuilder::default()
    }

    pub fn coordinates(&self) -> &ArchetypeCoordinates {
        &self.coordinates
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Required properties in declaration order.
    pub fn required_properties(&self) -> &[RequiredProperty] {
        &self.required_properties
    }

    /// Look up a declared property by key.
    pub fn property(&self, key: &str) -> Option<&RequiredProperty> {
        self.required_properties.iter().find(|p| p.key() == key)
    }

    /// Mutable access for adjusting a declared property in place.
    pub fn property_mut(&mut self, key: &str) -> Option<&mut RequiredProperty> {
        self.required_properties.iter_mut().find(|p| p.key() == key)
    }

    /// Append a property declaration.
    pub fn add_required_property(&mut self, property: RequiredProperty) {
        self.required_properties.push(property);
    }

    /// The declared properties plus any reserved property the archetype left
    /// out, which is prepended with its standard default.
    ///
    /// Reserved keys keep the descriptor's own declaration when present.
    pub fn with_reserved_properties(&self) -> Vec<RequiredProperty> {
        let mut properties: Vec<RequiredProperty> = reserved::ALL
            .iter()
            .filter(|key| self.property(key).is_none())
            .map(|key| match *key {
                reserved::VERSION => {
                    RequiredProperty::new(*key).with_default(reserved::DEFAULT_VERSION)
                }
                reserved::PACKAGE => {
                    RequiredProperty::new(*key).with_default(reserved::DEFAULT_PACKAGE)
                }
                _ => RequiredProperty::new(*key),
            })
            .collect();

        properties.extend(self.required_properties.iter().cloned());
        properties
    }

    /// Validate every property and reject duplicate keys.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.name.trim().is_empty() {
            return Err(DomainError::InvalidDescriptor(format!(
                "archetype '{}' has an empty name",
                self.coordinates
            )));
        }

        let mut seen = HashSet::new();
        for property in &self.required_properties {
            property.validate()?;
            if !seen.insert(property.key()) {
                return Err(DomainError::DuplicateProperty {
                    key: property.key().to_string(),
                });
            }
        }

        Ok(())
    }
}

/// Builder for [`ArchetypeDescriptor`].
#[derive(Debug, Default)]
pub struct ArchetypeDescriptorBuilder {
    coordinates: Option<ArchetypeCoordinates>,
    name: Option<String>,
    description: Option<String>,
    required_properties: Vec<RequiredProperty>,
}

impl ArchetypeDescriptorBuilder {
    pub fn coordinates(mut self, coordinates: ArchetypeCoordinates) -> Self {
        self.coordinates = Some(coordinates);
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn property(mut self, property: RequiredProperty) -> Self {
        self.required_properties.push(property);
        self
    }

    pub fn properties(mut self, properties: impl IntoIterator<Item = RequiredProperty>) -> Self {
        self.required_properties.extend(properties);
        self
    }

    /// Build and validate the descriptor.
    ///
    /// The name defaults to the artifact id.
    pub fn build(self) -> Result<ArchetypeDescriptor, DomainError> {
        let coordinates = self.coordinates.ok_or(DomainError::MissingRequiredField {
            field: "coordinates",
        })?;

        let descriptor = ArchetypeDescriptor {
            name: self
                .name
                .unwrap_or_else(|| coordinates.artifact_id().to_string()),
            description: self.description.unwrap_or_default(),
            coordinates,
            required_properties: self.required_properties,
        };

        descriptor.validate()?;
        Ok(descriptor)
    }
}
