//! Application layer errors.
//!
//! These errors represent failures in orchestration, not business logic.
//! Business logic errors are `DomainError` from `crate::domain`.
//!
//! The port-level errors [`EvaluationError`] and [`PromptError`] are what
//! adapters return; services translate them into [`ApplicationError`] with the
//! property key attached.

use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApplicationError {
    /// Batch mode: a property has no override and no usable default.
    #[error("Property '{key}' cannot be resolved: {reason}")]
    UnresolvableDefault { key: String, reason: String },

    /// The user cancelled a prompt.
    #[error("Cancelled while prompting for {subject}")]
    PromptAborted { subject: String },

    /// The prompt itself failed (terminal gone, I/O error).
    #[error("Prompt for {subject} failed: {reason}")]
    PromptFailed { subject: String, reason: String },

    /// A value does not match the property's validation pattern.
    #[error("Value '{value}' for property '{key}' does not match '{pattern}'")]
    InvalidPropertyValue {
        key: String,
        value: String,
        pattern: String,
    },

    /// No archetype with these coordinates is known.
    #[error("Archetype not found: {coordinates}")]
    ArchetypeNotFound { coordinates: String },

    /// Store access failed (lock poisoned, etc.).
    #[error("Archetype store error")]
    StoreLockError,

    /// Validation failed (application-level, not domain).
    #[error("Validation failed: {0}")]
    ValidationFailed(String),
}

impl ApplicationError {
    /// Wrap a prompt failure for `subject` (usually a property key).
    pub fn from_prompt(subject: impl Into<String>, error: PromptError) -> Self {
        let subject = subject.into();
        match error {
            PromptError::Aborted => Self::PromptAborted { subject },
            PromptError::Io(reason) => Self::PromptFailed { subject, reason },
        }
    }

    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::UnresolvableDefault { key, .. } => vec![
                format!("Supply a value with -D {}=<value>", key),
                "Or run without --batch-mode to be prompted".into(),
            ],
            Self::PromptAborted { .. } => vec!["Nothing was generated".into()],
            Self::PromptFailed { .. } => vec![
                "Make sure a terminal is attached".into(),
                "Or use --batch-mode and pass values with -D key=value".into(),
            ],
            Self::InvalidPropertyValue { key, pattern, .. } => vec![
                format!("'{}' must match the pattern {}", key, pattern),
                format!("Pass a matching value with -D {}=<value>", key),
            ],
            Self::ArchetypeNotFound { .. } => vec![
                "Try: archgen list to see available archetypes".into(),
                "Or point --descriptor at an archetype.toml file".into(),
            ],
            Self::StoreLockError => vec![
                "The archetype store is locked".into(),
                "Try again in a moment".into(),
            ],
            Self::ValidationFailed(_) => vec!["Check the error details above".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::UnresolvableDefault { .. } => ErrorCategory::Configuration,
            Self::PromptAborted { .. } => ErrorCategory::Cancelled,
            Self::PromptFailed { .. } | Self::StoreLockError => ErrorCategory::Internal,
            Self::InvalidPropertyValue { .. } | Self::ValidationFailed(_) => {
                ErrorCategory::Validation
            }
            Self::ArchetypeNotFound { .. } => ErrorCategory::NotFound,
        }
    }

    /// The property key this error is about, if any.
    pub fn property_key(&self) -> Option<&str> {
        match self {
            Self::UnresolvableDefault { key, .. } | Self::InvalidPropertyValue { key, .. } => {
                Some(key)
            }
            _ => None,
        }
    }
}

/// Failure to evaluate a default value template.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EvaluationError {
    /// The template reads a name that has no binding.
    #[error("'{name}' is not defined")]
    Unbound { name: String },

    /// The template is malformed.
    #[error("syntax error at offset {position}: {reason}")]
    Syntax { position: usize, reason: String },

    /// A method call failed (unknown method, wrong arguments, bad regex).
    #[error("{method}(): {reason}")]
    Method { method: String, reason: String },
}

/// Failure of an interactive prompt.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PromptError {
    /// The user cancelled (Ctrl-C, Esc, end of input).
    #[error("prompt cancelled")]
    Aborted,

    /// Reading or writing the terminal failed.
    #[error("prompt I/O failed: {0}")]
    Io(String),
}

impl From<std::io::Error> for PromptError {
    fn from(e: std::io::Error) -> Self {
        match e.kind() {
            std::io::ErrorKind::Interrupted | std::io::ErrorKind::UnexpectedEof => Self::Aborted,
            _ => Self::Io(e.to_string()),
        }
    }
}
