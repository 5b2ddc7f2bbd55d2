//! Archetype coordinates (`groupId:artifactId:version`).

use std::fmt;
use std::str::FromStr;

use crate::domain::error::DomainError;

/// Group used when only an artifact id is given.
pub const DEFAULT_ARCHETYPE_GROUP_ID: &str = "org.apache.maven.archetypes";

/// Artifact used when no archetype is given in batch mode.
pub const DEFAULT_ARCHETYPE_ARTIFACT_ID: &str = "maven-archetype-quickstart";

/// Version used when the archetype version is omitted.
pub const DEFAULT_ARCHETYPE_VERSION: &str = "1.4";

/// Fully-specified identity of an archetype.
///
/// ## Format
///
/// `groupId:artifactId:version`. Parsing also accepts `groupId:artifactId`
/// and a bare `artifactId`; missing parts take the defaults above.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ArchetypeCoordinates {
    group_id: String,
    artifact_id: String,
    version: String,
}

impl ArchetypeCoordinates {
    /// Build coordinates from their parts.
    ///
    /// # Panics
    /// Panics if any part is empty or contains `:`.
    pub fn new(
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        let coordinates = Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
            version: version.into(),
        };
        assert!(
            coordinates.parts().iter().all(|p| valid_part(p)),
            "invalid archetype coordinates: {coordinates}"
        );
        coordinates
    }

    /// Parse `groupId:artifactId:version`, `groupId:artifactId` or `artifactId`.
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        let parts: Vec<&str> = s.trim().split(':').collect();

        let (group_id, artifact_id, version) = match parts.as_slice() {
            [artifact] => (
                DEFAULT_ARCHETYPE_GROUP_ID,
                *artifact,
                DEFAULT_ARCHETYPE_VERSION,
            ),
            [group, artifact] => (*group, *artifact, DEFAULT_ARCHETYPE_VERSION),
            [group, artifact, version] => (*group, *artifact, *version),
            _ => return Err(DomainError::InvalidCoordinates(s.to_string())),
        };

        if ![group_id, artifact_id, version].iter().all(|p| valid_part(p)) {
            return Err(DomainError::InvalidCoordinates(s.to_string()));
        }

        Ok(Self {
            group_id: group_id.to_string(),
            artifact_id: artifact_id.to_string(),
            version: version.to_string(),
        })
    }

    /// The archetype used when nothing was requested.
    pub fn default_archetype() -> Self {
        Self::new(
            DEFAULT_ARCHETYPE_GROUP_ID,
            DEFAULT_ARCHETYPE_ARTIFACT_ID,
            DEFAULT_ARCHETYPE_VERSION,
        )
    }

    pub fn group_id(&self) -> &str {
        &self.group_id
    }

    pub fn artifact_id(&self) -> &str {
        &self.artifact_id
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    fn parts(&self) -> [&str; 3] {
        [&self.group_id, &self.artifact_id, &self.version]
    }
}

fn valid_part(part: &str) -> bool {
    !part.is_empty() && !part.contains(':') && !part.chars().any(char::is_whitespace)
}

impl fmt::Display for ArchetypeCoordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group_id, self.artifact_id, self.version)
    }
}

impl FromStr for ArchetypeCoordinates {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
