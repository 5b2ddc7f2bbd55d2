//! Requests handed to the resolver and the configurator.

use crate::domain::entities::{
    coordinates::{ArchetypeCoordinates, DEFAULT_ARCHETYPE_GROUP_ID, DEFAULT_ARCHETYPE_VERSION},
    properties::Properties,
    property::reserved,
};

/// How missing values are obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResolutionMode {
    /// Every value must come from an override or a default.
    Batch,
    /// Values may be prompted for, followed by a confirm/edit cycle.
    #[default]
    Interactive,
}

impl ResolutionMode {
    pub fn is_interactive(self) -> bool {
        matches!(self, Self::Interactive)
    }
}

impl From<bool> for ResolutionMode {
    /// `true` selects interactive mode.
    fn from(interactive: bool) -> Self {
        if interactive {
            Self::Interactive
        } else {
            Self::Batch
        }
    }
}

/// Input of one resolution pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolutionRequest {
    /// Values supplied up front. They bypass default evaluation and prompting.
    pub overrides: Properties,
    pub mode: ResolutionMode,
}

impl ResolutionRequest {
    pub fn new(overrides: Properties, mode: ResolutionMode) -> Self {
        Self { overrides, mode }
    }

    pub fn batch(overrides: Properties) -> Self {
        Self::new(overrides, ResolutionMode::Batch)
    }

    pub fn interactive(overrides: Properties) -> Self {
        Self::new(overrides, ResolutionMode::Interactive)
    }
}

/// A project generation request.
///
/// The archetype fields may be partially filled in by the caller; the
/// archetype selector completes them. After configuration the well-known
/// fields carry the resolved `groupId`, `artifactId`, `version` and
/// `package`, and `properties` holds every resolved value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationRequest {
    pub archetype_group_id: Option<String>,
    pub archetype_artifact_id: Option<String>,
    pub archetype_version: Option<String>,

    pub group_id: Option<String>,
    pub artifact_id: Option<String>,
    pub version: Option<String>,
    pub package: Option<String>,

    pub properties: Properties,
}

impl GenerationRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// A request for a fully known archetype.
    pub fn for_archetype(coordinates: &ArchetypeCoordinates) -> Self {
        let mut request = Self::default();
        request.set_archetype(coordinates);
        request
    }

    /// The requested archetype, if an artifact id is known.
    ///
    /// A missing group or version takes the default archetype group and
    /// version.
    pub fn archetype(&self) -> Option<ArchetypeCoordinates> {
        let artifact_id = self.archetype_artifact_id.as_deref()?;
        let group_id = self
            .archetype_group_id
            .as_deref()
            .unwrap_or(DEFAULT_ARCHETYPE_GROUP_ID);
        let version = self
            .archetype_version
            .as_deref()
            .unwrap_or(DEFAULT_ARCHETYPE_VERSION);

        ArchetypeCoordinates::parse(&format!("{group_id}:{artifact_id}:{version}")).ok()
    }

    pub fn set_archetype(&mut self, coordinates: &ArchetypeCoordinates) {
        self.archetype_group_id = Some(coordinates.group_id().to_string());
        self.archetype_artifact_id = Some(coordinates.artifact_id().to_string());
        self.archetype_version = Some(coordinates.version().to_string());
    }

    /// Store the resolved set and copy the reserved keys into their fields.
    pub fn apply_resolved(&mut self, resolved: Properties) {
        let field = |key: &str| resolved.get(key).map(str::to_string);

        if let Some(v) = field(reserved::GROUP_ID) {
            self.group_id = Some(v);
        }
        if let Some(v) = field(reserved::ARTIFACT_ID) {
            self.artifact_id = Some(v);
        }
        if let Some(v) = field(reserved::VERSION) {
            self.version = Some(v);
        }
        if let Some(v) = field(reserved::PACKAGE) {
            self.package = Some(v);
        }

        self.properties = resolved;
    }
}
