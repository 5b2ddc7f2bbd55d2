//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "configure an archetype" or "list archetypes".

pub mod archetype_selector;
pub mod archetype_service;
pub mod configurator;
pub mod property_resolver;
pub mod queryer;

#[cfg(test)]
pub(crate) mod test_support;

pub use archetype_selector::ArchetypeSelector;
pub use archetype_service::{ArchetypeService, ArchetypeSummary};
pub use configurator::ArchetypeConfigurator;
pub use property_resolver::PropertyResolver;
pub use queryer::DefaultQueryer;
