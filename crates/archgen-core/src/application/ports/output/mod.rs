//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `archgen-adapters` crate provides the evaluator and stores; the CLI
//! provides the terminal prompter.

use regex::Regex;

use crate::application::{
    error::{EvaluationError, PromptError},
    services::ArchetypeSummary,
};
use crate::domain::{ArchetypeCoordinates, ArchetypeDescriptor, Properties};
use crate::error::ArchgenResult;

/// Port for evaluating default value templates.
///
/// Implemented by:
/// - `archgen_adapters::evaluator::InterpolatingEvaluator`
///
/// The resolver never looks inside a template; everything it knows about the
/// syntax comes through this trait.
pub trait ExpressionEvaluator: Send + Sync {
    /// Evaluate `template` against `bindings`.
    ///
    /// Fails with [`EvaluationError::Unbound`] if the template reads a name
    /// that `bindings` does not contain.
    fn evaluate(&self, template: &str, bindings: &Properties) -> Result<String, EvaluationError>;

    /// Names `template` reads, in order of first appearance.
    ///
    /// Malformed templates report the names found before the error.
    fn references(&self, template: &str) -> Vec<String>;
}

/// Port for archetype descriptor storage and retrieval.
///
/// Implemented by:
/// - `archgen_adapters::archetype_store::InMemoryStore` (built-in and loaded archetypes)
pub trait ArchetypeStore: Send + Sync {
    /// Get a descriptor by coordinates.
    fn get(&self, coordinates: &ArchetypeCoordinates) -> ArchgenResult<ArchetypeDescriptor>;

    /// List all available descriptors.
    fn list(&self) -> ArchgenResult<Vec<ArchetypeDescriptor>>;

    /// Insert or update a descriptor.
    fn insert(&self, descriptor: ArchetypeDescriptor) -> ArchgenResult<()>;
}

/// Port for raw user interaction.
///
/// Implemented by:
/// - `archgen_cli::prompt::TerminalPrompter` (dialoguer)
/// - `archgen_cli::prompt::LinePrompter` (plain line-based input)
#[cfg_attr(test, mockall::automock)]
pub trait Prompter: Send + Sync {
    /// Ask for a line of text. An empty `default` means there is none.
    fn prompt(&self, message: &str, default: &str) -> Result<String, PromptError>;

    /// Ask a yes/no question.
    fn confirm(&self, message: &str) -> Result<bool, PromptError>;

    /// Pick one item; returns its index.
    fn select(&self, message: &str, items: &[String]) -> Result<usize, PromptError>;

    /// Pick any number of items; returns their indices.
    fn multi_select(&self, message: &str, items: &[String]) -> Result<Vec<usize>, PromptError>;
}

impl<P: Prompter + ?Sized> Prompter for std::sync::Arc<P> {
    fn prompt(&self, message: &str, default: &str) -> Result<String, PromptError> {
        (**self).prompt(message, default)
    }

    fn confirm(&self, message: &str) -> Result<bool, PromptError> {
        (**self).confirm(message)
    }

    fn select(&self, message: &str, items: &[String]) -> Result<usize, PromptError> {
        (**self).select(message, items)
    }

    fn multi_select(&self, message: &str, items: &[String]) -> Result<Vec<usize>, PromptError> {
        (**self).multi_select(message, items)
    }
}

/// Port for asking the user about generation properties.
///
/// Implemented by:
/// - `crate::application::DefaultQueryer` (over any [`Prompter`])
pub trait GenerationQueryer: Send + Sync {
    /// Ask for the value of `key` until it matches `pattern`.
    ///
    /// An empty answer takes `default`. Cancelling is
    /// [`PromptError::Aborted`], never an empty string.
    fn get_property_value(
        &self,
        key: &str,
        default: &str,
        pattern: Option<&Regex>,
    ) -> Result<String, PromptError>;

    /// Show the resolved set and ask whether to accept it.
    fn confirm_configuration(&self, properties: &Properties) -> Result<bool, PromptError>;

    /// After a declined confirmation: which keys to change.
    fn select_properties_to_edit(&self, properties: &Properties)
    -> Result<Vec<String>, PromptError>;
}

/// Port for choosing an archetype when none was requested.
pub trait SelectionQueryer: Send + Sync {
    fn select_archetype(
        &self,
        archetypes: &[ArchetypeSummary],
    ) -> Result<ArchetypeCoordinates, PromptError>;
}
