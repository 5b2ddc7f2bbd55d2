//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `archgen-adapters` and the CLI
//! implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `ExpressionEvaluator`: Default value templates
//!   - `ArchetypeStore`: Descriptor storage/retrieval
//!   - `Prompter`: Raw terminal interaction
//!   - `GenerationQueryer`: Property prompting and confirmation
//!   - `SelectionQueryer`: Archetype selection
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (Defined in CLI layer, implemented by services)

pub mod output;

pub use output::{
    ArchetypeStore, ExpressionEvaluator, GenerationQueryer, Prompter, SelectionQueryer,
};

#[cfg(test)]
pub use output::MockPrompter;
