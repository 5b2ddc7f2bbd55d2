//! Filesystem-based archetype loader.
//!
//! Discovers and parses `archetype.toml` descriptors from a directory tree.
//!
//! # Directory layout expected
//!
//! ```text
//! archetypes/
//! ├── quickstart/
//! │   └── archetype.toml
//! └── acme/
//!     └── service/
//!         └── archetype.toml
//! ```
//!
//! # `archetype.toml` format
//!
//! ```toml
//! [archetype]
//! group_id    = "com.acme.archetypes"
//! artifact_id = "acme-service"
//! version     = "1.0"
//! name        = "Acme service"          # optional, defaults to artifact_id
//! description = "HTTP service skeleton" # optional
//!
//! [[properties]]
//! key        = "serviceName"
//! default    = "${artifactId.toCamelCase()}"   # optional
//! validation = "[A-Z][A-Za-z0-9]*"             # optional, whole value
//! ```
//!
//! Properties resolve in declaration order, after any reserved property
//! (`groupId`, `artifactId`, `version`, `package`) the file does not declare.

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};
use walkdir::WalkDir;

use archgen_core::domain::{
    ArchetypeCoordinates, ArchetypeDescriptor, DomainError, RequiredProperty,
};

/// File name of an archetype descriptor.
pub const DESCRIPTOR_FILE: &str = "archetype.toml";

/// Deepest directory level searched below the archetypes root.
const MAX_DEPTH: usize = 4;

// ── Manifest types ────────────────────────────────────────────────────────────

/// Deserialised representation of an `archetype.toml` file.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct ArchetypeManifest {
    pub archetype: ArchetypeSection,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub properties: Vec<PropertyEntry>,
}

/// `[archetype]` section: identity and display information.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct ArchetypeSection {
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// One entry under `[[properties]]`.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct PropertyEntry {
    pub key: String,
    #[serde(default, alias = "default_value", skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    #[serde(default, alias = "validation_regex", skip_serializing_if = "Option::is_none")]
    pub validation: Option<String>,
}

impl ArchetypeManifest {
    /// Parse a manifest from TOML text.
    pub fn from_toml(raw: &str) -> Result<Self, DomainError> {
        toml::from_str(raw).map_err(|e| DomainError::InvalidDescriptor(e.to_string()))
    }

    /// Render the manifest as TOML.
    pub fn to_toml(&self) -> Result<String, DomainError> {
        toml::to_string_pretty(self).map_err(|e| DomainError::InvalidDescriptor(e.to_string()))
    }

    /// Convert into a validated descriptor.
    pub fn into_descriptor(self) -> Result<ArchetypeDescriptor, DomainError> {
        let section = self.archetype;
        let coordinates = ArchetypeCoordinates::parse(&format!(
            "{}:{}:{}",
            section.group_id, section.artifact_id, section.version
        ))?;

        let mut builder = ArchetypeDescriptor::builder()
            .coordinates(coordinates)
            .properties(self.properties.into_iter().map(|p| {
                let property = RequiredProperty::new(p.key).with_optional_default(p.default);
                match p.validation {
                    Some(pattern) => property.with_validation(pattern),
                    None => property,
                }
            }));
        if let Some(name) = section.name {
            builder = builder.name(name);
        }
        if let Some(description) = section.description {
            builder = builder.description(description);
        }
        builder.build()
    }
}

impl From<&ArchetypeDescriptor> for ArchetypeManifest {
    fn from(d: &ArchetypeDescriptor) -> Self {
        let coordinates = d.coordinates();
        Self {
            archetype: ArchetypeSection {
                group_id: coordinates.group_id().to_string(),
                artifact_id: coordinates.artifact_id().to_string(),
                version: coordinates.version().to_string(),
                name: Some(d.name().to_string()),
                description: Some(d.description().to_string()).filter(|s| !s.is_empty()),
            },
            properties: d
                .required_properties()
                .iter()
                .map(|p| PropertyEntry {
                    key: p.key().to_string(),
                    default: p.default_value().map(str::to_string),
                    validation: p.validation_regex().map(str::to_string),
                })
                .collect(),
        }
    }
}

/// Load one descriptor file.
#[instrument(skip_all, fields(path = %path.display()))]
pub fn load_descriptor_file(path: &Path) -> Result<ArchetypeDescriptor, DomainError> {
    let raw = fs::read_to_string(path).map_err(|e| {
        DomainError::InvalidDescriptor(format!("failed to read '{}': {e}", path.display()))
    })?;

    let manifest: ArchetypeManifest = toml::from_str(&raw).map_err(|e| {
        DomainError::InvalidDescriptor(format!("failed to parse '{}': {e}", path.display()))
    })?;

    manifest.into_descriptor()
}

// ── Loader ────────────────────────────────────────────────────────────────────

/// Loads descriptors from every `archetype.toml` below a directory.
///
/// Files that fail to parse or validate emit a `WARN` log and are skipped;
/// they do not prevent other archetypes from loading.
pub struct FilesystemArchetypeLoader {
    archetypes_dir: PathBuf,
}

impl FilesystemArchetypeLoader {
    pub fn new(archetypes_dir: impl Into<PathBuf>) -> Self {
        Self {
            archetypes_dir: archetypes_dir.into(),
        }
    }

    /// Load every valid descriptor found under the archetypes directory,
    /// sorted by path.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidDescriptor`] if the directory does not
    /// exist or cannot be walked.
    #[instrument(skip(self), fields(dir = %self.archetypes_dir.display()))]
    pub fn load_all(&self) -> Result<Vec<ArchetypeDescriptor>, DomainError> {
        if !self.archetypes_dir.is_dir() {
            return Err(DomainError::InvalidDescriptor(format!(
                "archetypes directory not found: {}",
                self.archetypes_dir.display()
            )));
        }

        let mut descriptors = Vec::new();
        let walker = WalkDir::new(&self.archetypes_dir)
            .min_depth(1)
            .max_depth(MAX_DEPTH)
            .sort_by_file_name();

        for entry in walker {
            let entry = entry
                .map_err(|e| DomainError::InvalidDescriptor(format!("directory walk error: {e}")))?;
            if !entry.file_type().is_file() || entry.file_name() != DESCRIPTOR_FILE {
                continue;
            }

            match load_descriptor_file(entry.path()) {
                Ok(descriptor) => {
                    debug!(archetype = %descriptor.coordinates(), "loaded archetype");
                    descriptors.push(descriptor);
                }
                Err(e) => {
                    warn!(
                        path  = %entry.path().display(),
                        error = %e,
                        "skipping archetype due to load error"
                    );
                }
            }
        }

        debug!(count = descriptors.len(), "finished loading archetypes");
        Ok(descriptors)
    }
}
