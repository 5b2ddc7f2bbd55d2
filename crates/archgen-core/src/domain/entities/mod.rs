pub mod coordinates;
pub mod descriptor;
pub mod properties;
pub mod property;
pub mod request;

pub use crate::domain::DomainError;
pub use coordinates::ArchetypeCoordinates;
pub use descriptor::{ArchetypeDescriptor, ArchetypeDescriptorBuilder};
pub use properties::Properties;
pub use property::{RequiredProperty, reserved};
pub use request::{GenerationRequest, ResolutionMode, ResolutionRequest};
