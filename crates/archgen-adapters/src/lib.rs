//! Infrastructure adapters for archgen.
//!
//! This crate implements the ports defined in `archgen-core::application::ports`:
//! the default value template evaluator and the archetype stores, plus loading
//! archetype descriptors from disk.

pub mod archetype_loader;
pub mod archetype_store;
pub mod builtin_archetypes;
pub mod evaluator;

// Re-export commonly used adapters
pub use archetype_loader::{ArchetypeManifest, FilesystemArchetypeLoader, load_descriptor_file};
pub use archetype_store::InMemoryStore;
pub use evaluator::InterpolatingEvaluator;
