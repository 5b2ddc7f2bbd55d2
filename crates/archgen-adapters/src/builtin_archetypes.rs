//! Built-in archetype discovery.
//!
//! [`all_archetypes`] returns the archetypes compiled into archgen followed by
//! those found in the first archetypes directory that exists. A directory
//! archetype with the same coordinates as a built-in one replaces it once
//! inserted into a store.
//!
//! # Directory resolution order
//!
//! 1. **`$ARCHGEN_ARCHETYPES_DIR`**: environment variable override.
//! 2. **`./archetypes`**: relative to the current working directory.
//! 3. **`<executable-dir>/archetypes`**: sibling to the `archgen` binary.
//! 4. **`../archetypes`**: one level above CWD, handy under `target/debug/`.

use std::path::PathBuf;

use tracing::{debug, info, instrument};

use archgen_core::domain::{
    ArchetypeCoordinates, ArchetypeDescriptor, DEFAULT_ARCHETYPE_GROUP_ID,
    DEFAULT_ARCHETYPE_VERSION, DomainError, RequiredProperty,
};

use crate::archetype_loader::FilesystemArchetypeLoader;

/// Environment variable naming an extra archetypes directory.
pub const ARCHETYPES_DIR_ENV: &str = "ARCHGEN_ARCHETYPES_DIR";

/// Group id of the archetypes that ship with archgen itself.
pub const ARCHGEN_GROUP_ID: &str = "io.archgen.archetypes";

/// Compiled-in archetypes plus any found on disk.
///
/// Returns `Err` only when a discovered directory cannot be read; broken
/// descriptors inside it are skipped with a warning.
#[instrument]
pub fn all_archetypes() -> Result<Vec<ArchetypeDescriptor>, DomainError> {
    let mut archetypes = compiled()?;

    for candidate in candidate_paths() {
        debug!(path = %candidate.display(), "checking candidate archetypes path");
        if !candidate.is_dir() {
            continue;
        }

        let loaded = FilesystemArchetypeLoader::new(&candidate).load_all()?;
        if loaded.is_empty() {
            debug!(path = %candidate.display(), "directory has no archetypes, trying next");
            continue;
        }

        info!(
            path  = %candidate.display(),
            count = loaded.len(),
            "archetypes loaded from directory"
        );
        archetypes.extend(loaded);
        break;
    }

    Ok(archetypes)
}

/// The archetypes compiled into the binary.
pub fn compiled() -> Result<Vec<ArchetypeDescriptor>, DomainError> {
    Ok(vec![quickstart()?, webapp()?, service()?])
}

fn candidate_paths() -> Vec<PathBuf> {
    let mut paths = Vec::with_capacity(4);

    if let Ok(env_dir) = std::env::var(ARCHETYPES_DIR_ENV) {
        paths.push(PathBuf::from(env_dir));
    }
    paths.push(PathBuf::from("archetypes"));
    if let Some(exe_sibling) = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|p| p.join("archetypes")))
    {
        paths.push(exe_sibling);
    }
    paths.push(PathBuf::from("../archetypes"));

    paths
}

/// `maven-archetype-quickstart`: only the reserved properties.
fn quickstart() -> Result<ArchetypeDescriptor, DomainError> {
    ArchetypeDescriptor::builder()
        .coordinates(ArchetypeCoordinates::new(
            DEFAULT_ARCHETYPE_GROUP_ID,
            "maven-archetype-quickstart",
            DEFAULT_ARCHETYPE_VERSION,
        ))
        .name("Quickstart")
        .description("A minimal Java project with a main class and a unit test.")
        .build()
}

fn webapp() -> Result<ArchetypeDescriptor, DomainError> {
    ArchetypeDescriptor::builder()
        .coordinates(ArchetypeCoordinates::new(
            DEFAULT_ARCHETYPE_GROUP_ID,
            "maven-archetype-webapp",
            DEFAULT_ARCHETYPE_VERSION,
        ))
        .name("Webapp")
        .description("A Java web application packaged as a WAR.")
        .property(RequiredProperty::new("contextPath").with_default("/${artifactId}"))
        .build()
}

/// A service skeleton whose names derive from the artifact id.
fn service() -> Result<ArchetypeDescriptor, DomainError> {
    ArchetypeDescriptor::builder()
        .coordinates(ArchetypeCoordinates::new(
            ARCHGEN_GROUP_ID,
            "archgen-service",
            "1.0",
        ))
        .name("Service")
        .description("An HTTP service with names derived from the artifact id.")
        .property(
            RequiredProperty::new("package")
                .with_default("${groupId}.${artifactId.replaceAll('[^A-Za-z0-9]', '').toLowerCase()}")
                .with_validation(r"[a-z_][a-z0-9_]*(\.[a-z_][a-z0-9_]*)*"),
        )
        .property(
            RequiredProperty::new("serviceName")
                .with_default("${artifactId.toCamelCase()}")
                .with_validation("[A-Z][A-Za-z0-9]*"),
        )
        .property(
            RequiredProperty::new("serviceConstant")
                .with_default("${artifactId.toSnakeCase().toUpperCase()}"),
        )
        .property(
            RequiredProperty::new("port")
                .with_default("8080")
                .with_validation("[0-9]{1,5}"),
        )
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use archgen_core::domain::reserved;

    #[test]
    fn compiled_archetypes_are_valid() {
        let archetypes = compiled().unwrap();
        assert_eq!(archetypes.len(), 3);
        for archetype in &archetypes {
            archetype.validate().unwrap();
        }
    }

    #[test]
    fn the_default_archetype_is_compiled_in() {
        let archetypes = compiled().unwrap();
        assert!(archetypes
            .iter()
            .any(|a| *a.coordinates() == ArchetypeCoordinates::default_archetype()));
    }

    #[test]
    fn service_declares_package_but_not_the_other_reserved_keys() {
        let service = service().unwrap();
        let keys: Vec<_> = service
            .with_reserved_properties()
            .iter()
            .map(|p| p.key().to_string())
            .collect();
        assert_eq!(
            keys,
            [
                reserved::GROUP_ID,
                reserved::ARTIFACT_ID,
                reserved::VERSION,
                "package",
                "serviceName",
                "serviceConstant",
                "port",
            ]
        );
    }

    #[test]
    fn candidate_paths_end_with_the_development_fallback() {
        let paths = candidate_paths();
        assert_eq!(paths.last(), Some(&PathBuf::from("../archetypes")));
        assert!(paths.contains(&PathBuf::from("archetypes")));
    }
}
