// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for archgen.
//!
//! Pure data and rules about archetype descriptors and property sets. The
//! template language, prompting and archetype storage are reached through
//! ports defined in the application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: No filesystem, terminal, or network access
//! - **Few crates**: std plus thiserror, regex, indexmap and serde derives
//! - **Immutable entities**: All domain objects are Clone + PartialEq
pub mod entities;
pub mod error;
pub mod ordering;

mod validation;

pub use entities::{
    coordinates::{
        ArchetypeCoordinates, DEFAULT_ARCHETYPE_ARTIFACT_ID, DEFAULT_ARCHETYPE_GROUP_ID,
        DEFAULT_ARCHETYPE_VERSION,
    },
    descriptor::{ArchetypeDescriptor, ArchetypeDescriptorBuilder},
    properties::Properties,
    property::{RequiredProperty, reserved},
    request::{GenerationRequest, ResolutionMode, ResolutionRequest},
};

pub use error::{DomainError, ErrorCategory};
pub use ordering::order_by_dependencies;
pub use validation::DomainValidator;
