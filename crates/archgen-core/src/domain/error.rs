// ============================================================================
// domain/error.rs - DESCRIPTOR ERROR DOMAIN
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (for retry logic)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    #[error("Invalid property '{key}': {reason}")]
    InvalidProperty { key: String, reason: String },

    #[error("Property '{key}' is declared more than once")]
    DuplicateProperty { key: String },

    #[error("Property '{key}' has an invalid validation pattern '{pattern}': {reason}")]
    InvalidValidationPattern {
        key: String,
        pattern: String,
        reason: String,
    },

    #[error("Invalid archetype coordinates '{0}'")]
    InvalidCoordinates(String),

    #[error("Invalid archetype descriptor: {0}")]
    InvalidDescriptor(String),

    // ========================================================================
    // Constraint Violations
    // ========================================================================
    #[error("Default values reference each other in a cycle: {}", .keys.join(" -> "))]
    CyclicDefaults { keys: Vec<String> },

    #[error("Required field missing: {field}")]
    MissingRequiredField { field: &'static str },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidProperty { key, reason } => vec![
                format!("Property '{}' is malformed: {}", key, reason),
                "Keys must be non-empty and may not contain whitespace, '$', '{' or '}'".into(),
            ],
            Self::DuplicateProperty { key } => vec![
                format!("Remove the second declaration of '{}'", key),
                "Each required property must be declared exactly once".into(),
            ],
            Self::InvalidValidationPattern { key, pattern, .. } => vec![
                format!("Fix the validation pattern of '{}': {}", key, pattern),
                "Patterns use Rust regex syntax (https://docs.rs/regex)".into(),
            ],
            Self::InvalidCoordinates(raw) => vec![
                format!("Could not parse '{}'", raw),
                "Use groupId:artifactId:version, groupId:artifactId or artifactId".into(),
                "Example: org.apache.maven.archetypes:maven-archetype-quickstart:1.4".into(),
            ],
            Self::CyclicDefaults { keys } => vec![
                format!("These properties depend on each other: {}", keys.join(", ")),
                "Break the cycle by removing one of the ${...} references".into(),
                "Or supply one of the values up front with -D key=value".into(),
            ],
            _ => vec!["See documentation for more details".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidCoordinates(_) | Self::MissingRequiredField { .. } => {
                ErrorCategory::Validation
            }
            Self::InvalidProperty { .. }
            | Self::DuplicateProperty { .. }
            | Self::InvalidValidationPattern { .. }
            | Self::InvalidDescriptor(_)
            | Self::CyclicDefaults { .. } => ErrorCategory::Configuration,
        }
    }

    /// The property key this error is about, if any.
    pub fn property_key(&self) -> Option<&str> {
        match self {
            Self::InvalidProperty { key, .. }
            | Self::DuplicateProperty { key }
            | Self::InvalidValidationPattern { key, .. } => Some(key),
            Self::CyclicDefaults { keys } => keys.first().map(String::as_str),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Configuration,
    Internal,
}
