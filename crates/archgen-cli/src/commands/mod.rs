//! Subcommand implementations.
//!
//! Each module exposes an `execute` function called from `main`.

pub mod completions;
pub mod config;
pub mod generate;
pub mod init;
pub mod list;
pub mod show;

use std::path::Path;

use tracing::{debug, info};

use archgen_adapters::InMemoryStore;
use archgen_core::prelude::*;

use crate::config::AppConfig;
use crate::error::{CliError, CliResult};

/// Built-in archetypes, then `archetypes.local_path`, then `extra_dir`.
///
/// Later sources replace archetypes with the same coordinates.
pub(crate) fn open_store(config: &AppConfig, extra_dir: Option<&Path>) -> CliResult<InMemoryStore> {
    let store = InMemoryStore::with_builtin()?;

    let dirs = config.archetypes.local_path.as_deref().into_iter().chain(extra_dir);
    for dir in dirs {
        let loaded = store.load_dir(dir)?;
        info!(dir = %dir.display(), loaded, "Loaded archetypes");
    }

    debug!(archetypes = store.len(), "Archetype store ready");
    Ok(store)
}

/// Coordinates for `raw`, which may be `g:a:v`, `g:a` or a bare artifact id.
///
/// A bare artifact id that names exactly one known archetype resolves to
/// it; otherwise the default archetype group and version apply.
pub(crate) fn resolve_coordinates(
    store: &dyn ArchetypeStore,
    raw: &str,
) -> CliResult<ArchetypeCoordinates> {
    let raw = raw.trim();
    if !raw.contains(':') {
        let matches: Vec<ArchetypeCoordinates> = store
            .list()?
            .into_iter()
            .map(|d| d.coordinates().clone())
            .filter(|c| c.artifact_id() == raw)
            .collect();
        if let [only] = matches.as_slice() {
            debug!(archetype = %only, "Resolved archetype by artifact id");
            return Ok(only.clone());
        }
    }

    ArchetypeCoordinates::parse(raw).map_err(|e| CliError::InvalidInput {
        message: e.to_string(),
        source: Some(Box::new(e)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_artifact_id_finds_builtin_group() {
        let store = InMemoryStore::with_builtin().unwrap();
        let coords = resolve_coordinates(&store, "archgen-service").unwrap();
        assert_eq!(coords.group_id(), archgen_adapters::builtin_archetypes::ARCHGEN_GROUP_ID);
    }

    #[test]
    fn unknown_bare_artifact_id_takes_defaults() {
        let store = InMemoryStore::new();
        let coords = resolve_coordinates(&store, "my-archetype").unwrap();
        assert_eq!(coords.to_string(), "org.apache.maven.archetypes:my-archetype:1.4");
    }

    #[test]
    fn malformed_coordinates_are_invalid_input() {
        let store = InMemoryStore::new();
        assert!(matches!(
            resolve_coordinates(&store, "a:b:c:d"),
            Err(CliError::InvalidInput { .. })
        ));
    }

    #[test]
    fn extra_dir_archetypes_are_added() {
        let dir = tempfile::TempDir::new().unwrap();
        let sub = dir.path().join("team");
        std::fs::create_dir_all(&sub).unwrap();
        std::fs::write(
            sub.join("archetype.toml"),
            "[archetype]\ngroup_id = \"com.acme\"\nartifact_id = \"team-lib\"\nversion = \"2.0\"\n",
        )
        .unwrap();

        let store = open_store(&AppConfig::default(), Some(dir.path())).unwrap();
        let coords = resolve_coordinates(&store, "team-lib").unwrap();
        assert_eq!(coords.to_string(), "com.acme:team-lib:2.0");
    }
}
