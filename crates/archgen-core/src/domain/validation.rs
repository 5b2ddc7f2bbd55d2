use regex::Regex;

use crate::domain::{entities::ArchetypeDescriptor, error::DomainError};

/// Centralized domain validation.
pub struct DomainValidator;

impl DomainValidator {
    pub fn validate_descriptor(descriptor: &ArchetypeDescriptor) -> Result<(), DomainError> {
        descriptor.validate()
    }

    /// Whether `value` satisfies `pattern`. No pattern accepts anything.
    ///
    /// Patterns from [`crate::domain::RequiredProperty::compiled_pattern`] are anchored, so
    /// this is a whole-value match for them.
    pub fn value_matches(value: &str, pattern: Option<&Regex>) -> bool {
        pattern.is_none_or(|re| re.is_match(value))
    }
}
