//! Archetype Selector - decides which archetype a request uses.
//!
//! - Full coordinates on the request are kept as given.
//! - An artifact id alone takes the default archetype group and version.
//! - No archetype at all: batch mode falls back to the default archetype,
//!   interactive mode asks the user to pick one from the store.

use tracing::{debug, info, instrument};

use crate::{
    application::{
        ApplicationError, ArchetypeSummary,
        ports::{ArchetypeStore, SelectionQueryer},
    },
    domain::{
        ArchetypeCoordinates, DEFAULT_ARCHETYPE_GROUP_ID, DEFAULT_ARCHETYPE_VERSION,
        GenerationRequest, ResolutionMode,
    },
    error::ArchgenResult,
};

const SELECTION_SUBJECT: &str = "archetype selection";

pub struct ArchetypeSelector<'a> {
    store: &'a dyn ArchetypeStore,
    queryer: &'a dyn SelectionQueryer,
}

impl<'a> ArchetypeSelector<'a> {
    pub fn new(store: &'a dyn ArchetypeStore, queryer: &'a dyn SelectionQueryer) -> Self {
        Self { store, queryer }
    }

    /// Complete the archetype coordinates on `request`.
    #[instrument(skip_all, fields(mode = ?mode))]
    pub fn select_archetype(
        &self,
        request: &mut GenerationRequest,
        mode: ResolutionMode,
    ) -> ArchgenResult<ArchetypeCoordinates> {
        let coordinates = match request.archetype_artifact_id.as_deref() {
            Some(artifact_id) => {
                let group_id = request
                    .archetype_group_id
                    .as_deref()
                    .unwrap_or(DEFAULT_ARCHETYPE_GROUP_ID);
                let version = request
                    .archetype_version
                    .as_deref()
                    .unwrap_or(DEFAULT_ARCHETYPE_VERSION);
                ArchetypeCoordinates::parse(&format!("{group_id}:{artifact_id}:{version}"))?
            }
            None if !mode.is_interactive() => {
                debug!("No archetype requested; using the default");
                ArchetypeCoordinates::default_archetype()
            }
            None => self.ask()?,
        };

        info!(archetype = %coordinates, "Archetype selected");
        request.set_archetype(&coordinates);
        Ok(coordinates)
    }

    fn ask(&self) -> ArchgenResult<ArchetypeCoordinates> {
        let mut archetypes: Vec<ArchetypeSummary> = self
            .store
            .list()?
            .iter()
            .map(ArchetypeSummary::from)
            .collect();

        if archetypes.is_empty() {
            return Err(ApplicationError::ArchetypeNotFound {
                coordinates: "(no archetypes available)".into(),
            }
            .into());
        }
        archetypes.sort_by(|a, b| a.coordinates.cmp(&b.coordinates));

        self.queryer
            .select_archetype(&archetypes)
            .map_err(|e| ApplicationError::from_prompt(SELECTION_SUBJECT, e).into())
    }
}
