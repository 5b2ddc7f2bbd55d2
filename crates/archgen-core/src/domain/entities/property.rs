//! Required property declarations.
//!
//! A [`RequiredProperty`] is the static half of property resolution: the key
//! a generated project needs, an optional default template such as
//! `com.example.${groupName}`, and an optional validation pattern. The
//! template text is opaque here; only the expression evaluator port knows its
//! syntax.

use std::fmt;

use regex::Regex;

use crate::domain::error::DomainError;

/// Keys every archetype generation needs, whether or not the descriptor
/// declares them.
pub mod reserved {
    pub const GROUP_ID: &str = "groupId";
    pub const ARTIFACT_ID: &str = "artifactId";
    pub const VERSION: &str = "version";
    pub const PACKAGE: &str = "package";

    /// Default for `version` when neither the descriptor nor the user sets it.
    pub const DEFAULT_VERSION: &str = "1.0-SNAPSHOT";

    /// Default for `package`: the resolved group id.
    pub const DEFAULT_PACKAGE: &str = "${groupId}";

    /// Reserved keys in the order they are prepended to a descriptor.
    pub const ALL: [&str; 4] = [GROUP_ID, ARTIFACT_ID, VERSION, PACKAGE];

    /// Whether `key` is one of the reserved keys.
    pub fn is_reserved(key: &str) -> bool {
        ALL.contains(&key)
    }
}

/// A property the user must end up with a value for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequiredProperty {
    key: String,
    default_value: Option<String>,
    validation_regex: Option<String>,
}

impl RequiredProperty {
    /// A property with no default and no validation.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            default_value: None,
            validation_regex: None,
        }
    }

    /// Set the default value template.
    pub fn with_default(mut self, template: impl Into<String>) -> Self {
        self.default_value = Some(template.into());
        self
    }

    /// Set or clear the default value template.
    pub fn with_optional_default(mut self, template: Option<String>) -> Self {
        self.default_value = template;
        self
    }

    /// Set the pattern a value must match.
    pub fn with_validation(mut self, pattern: impl Into<String>) -> Self {
        self.validation_regex = Some(pattern.into());
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn default_value(&self) -> Option<&str> {
        self.default_value.as_deref()
    }

    pub fn validation_regex(&self) -> Option<&str> {
        self.validation_regex.as_deref()
    }

    /// Compile the validation pattern, if any.
    ///
    /// The compiled pattern is anchored at both ends: a value is valid only
    /// when the whole of it matches.
    pub fn compiled_pattern(&self) -> Result<Option<Regex>, DomainError> {
        self.validation_regex
            .as_deref()
            .map(|pattern| {
                Regex::new(&format!("^(?:{pattern})$")).map_err(|e| {
                    DomainError::InvalidValidationPattern {
                        key: self.key.clone(),
                        pattern: pattern.to_string(),
                        reason: e.to_string(),
                    }
                })
            })
            .transpose()
    }

    /// Check the key shape and that the pattern compiles.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.key.is_empty() {
            return Err(DomainError::InvalidProperty {
                key: self.key.clone(),
                reason: "key cannot be empty".into(),
            });
        }

        if let Some(bad) = self
            .key
            .chars()
            .find(|c| c.is_whitespace() || matches!(c, '$' | '{' | '}'))
        {
            return Err(DomainError::InvalidProperty {
                key: self.key.clone(),
                reason: format!("key cannot contain {bad:?}"),
            });
        }

        self.compiled_pattern().map(|_| ())
    }
}

impl fmt::Display for RequiredProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.default_value {
            Some(default) => write!(f, "{} (default: {})", self.key, default),
            None => f.write_str(&self.key),
        }
    }
}
