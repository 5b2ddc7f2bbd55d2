//! Application layer for archgen.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (ArchetypeConfigurator, PropertyResolver,
//!   ArchetypeSelector, ArchetypeService)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! business logic itself. All business rules live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

// Re-export main services
pub use services::{
    ArchetypeConfigurator, ArchetypeSelector, ArchetypeService,
    ArchetypeSummary, // DTO for archetype listings
    DefaultQueryer, PropertyResolver,
};

// Re-export port traits (for adapter implementation)
pub use ports::{ArchetypeStore, ExpressionEvaluator, GenerationQueryer, Prompter, SelectionQueryer};

pub use error::{ApplicationError, EvaluationError, PromptError};
