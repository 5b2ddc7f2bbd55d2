//! Default Queryer - the prompting policy on top of a raw [`Prompter`].
//!
//! Handles retry-until-valid, default substitution and the wording of every
//! question; the prompter only moves text to and from the terminal.

use regex::Regex;
use tracing::{debug, warn};

use crate::{
    application::{
        error::PromptError,
        ports::{GenerationQueryer, Prompter, SelectionQueryer},
        services::ArchetypeSummary,
    },
    domain::{ArchetypeCoordinates, DomainValidator, Properties},
};

/// [`GenerationQueryer`] and [`SelectionQueryer`] over any [`Prompter`].
pub struct DefaultQueryer<P: Prompter> {
    prompter: P,
}

impl<P: Prompter> DefaultQueryer<P> {
    pub fn new(prompter: P) -> Self {
        Self { prompter }
    }
}

impl<P: Prompter> GenerationQueryer for DefaultQueryer<P> {
    fn get_property_value(
        &self,
        key: &str,
        default: &str,
        pattern: Option<&Regex>,
    ) -> Result<String, PromptError> {
        let message = match pattern {
            Some(re) => format!(
                "Define value for property '{key}' (should match expression '{}')",
                display_pattern(re)
            ),
            None => format!("Define value for property '{key}'"),
        };

        loop {
            let answer = self.prompter.prompt(&message, default)?;
            let value = if answer.trim().is_empty() {
                default.to_string()
            } else {
                answer
            };

            if value.is_empty() {
                warn!(key, "A value is required");
                continue;
            }

            if DomainValidator::value_matches(&value, pattern) {
                debug!(key, value = %value, "Property value accepted");
                return Ok(value);
            }

            warn!(
                key,
                value = %value,
                pattern = pattern.map(display_pattern).unwrap_or_default(),
                "Value does not match the required pattern"
            );
        }
    }

    fn confirm_configuration(&self, properties: &Properties) -> Result<bool, PromptError> {
        let mut message = String::from("Confirm properties configuration:\n");
        for (key, value) in properties.iter() {
            message.push_str(&format!("{key}: {value}\n"));
        }
        self.prompter.confirm(&message)
    }

    fn select_properties_to_edit(
        &self,
        properties: &Properties,
    ) -> Result<Vec<String>, PromptError> {
        let keys: Vec<String> = properties.keys().map(str::to_string).collect();
        let labels: Vec<String> = properties
            .iter()
            .map(|(key, value)| format!("{key} ({value})"))
            .collect();

        let selected = self
            .prompter
            .multi_select("Select the properties to change", &labels)?;

        Ok(selected
            .into_iter()
            .filter_map(|i| keys.get(i).cloned())
            .collect())
    }
}

impl<P: Prompter> SelectionQueryer for DefaultQueryer<P> {
    fn select_archetype(
        &self,
        archetypes: &[ArchetypeSummary],
    ) -> Result<ArchetypeCoordinates, PromptError> {
        let labels: Vec<String> = archetypes
            .iter()
            .map(|a| {
                if a.description.is_empty() {
                    format!("{} ({})", a.coordinates, a.name)
                } else {
                    format!("{} ({}): {}", a.coordinates, a.name, a.description)
                }
            })
            .collect();

        let index = self
            .prompter
            .select("Choose an archetype", &labels)?;

        archetypes
            .get(index)
            .map(|a| a.coordinates.clone())
            .ok_or_else(|| PromptError::Io(format!("selection {index} is out of range")))
    }
}

/// The user-written pattern, without the anchors added when compiling.
fn display_pattern(re: &Regex) -> &str {
    let s = re.as_str();
    s.strip_prefix("^(?:")
        .and_then(|rest| rest.strip_suffix(")$"))
        .unwrap_or(s)
}
