//! Property Resolver - turns required properties into a resolved set.
//!
//! Resolution walks the property list strictly in order. Each property is
//! bound from its override, its evaluated default, or (interactively) the
//! user's answer, and the binding is visible to every later default at once.
//!
//! Interactive resolution then runs a confirm/edit cycle:
//!
//! ```text
//! Prompting(0) → … → Prompting(n-1) → AllResolved → Confirming ──yes──▶ Accepted
//!                                                      ▲   │
//!                                                      │   no
//!                                                      │   ▼
//!                                    Editing(keys) ◀── SelectingEdits
//! ```
//!
//! A cancelled prompt in any state ends resolution with no result.

use std::collections::HashSet;

use regex::Regex;
use tracing::{debug, info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::{ExpressionEvaluator, GenerationQueryer},
    },
    domain::{DomainValidator, Properties, RequiredProperty, ResolutionMode, ResolutionRequest},
    error::ArchgenResult,
};

/// Subject used for prompt errors outside a single property.
const CONFIGURATION_SUBJECT: &str = "configuration";

/// Where a bound value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Origin {
    Override,
    /// The property's own default template produced it.
    Derived,
    /// Typed by the user.
    Entered,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum State {
    Prompting(usize),
    AllResolved,
    Confirming,
    SelectingEdits,
    Editing(Vec<String>),
    Accepted,
}

/// Resolves an ordered list of required properties.
///
/// Holds only borrowed ports; the binding set lives for one
/// [`resolve`](Self::resolve) call.
pub struct PropertyResolver<'a> {
    evaluator: &'a dyn ExpressionEvaluator,
    queryer: &'a dyn GenerationQueryer,
}

impl<'a> PropertyResolver<'a> {
    pub fn new(evaluator: &'a dyn ExpressionEvaluator, queryer: &'a dyn GenerationQueryer) -> Self {
        Self { evaluator, queryer }
    }

    /// Resolve `properties` in list order.
    ///
    /// A default may reference any property earlier in the list and any
    /// override. Overrides are bound as given and their defaults are never
    /// evaluated.
    ///
    /// # Errors
    /// - [`ApplicationError::UnresolvableDefault`] in batch mode when a
    ///   property has no override and no default that evaluates.
    /// - [`ApplicationError::InvalidPropertyValue`] when an override (or a
    ///   batch default) violates the property's validation pattern.
    /// - [`ApplicationError::PromptAborted`] when the user cancels.
    #[instrument(skip_all, fields(properties = properties.len(), mode = ?request.mode))]
    pub fn resolve(
        &self,
        properties: &[RequiredProperty],
        request: &ResolutionRequest,
    ) -> ArchgenResult<Properties> {
        let patterns = properties
            .iter()
            .map(RequiredProperty::compiled_pattern)
            .collect::<Result<Vec<_>, _>>()?;

        let mut pass = Pass {
            properties,
            patterns: &patterns,
            overrides: &request.overrides,
            bindings: Properties::new(),
            origins: Vec::with_capacity(properties.len()),
        };

        match request.mode {
            ResolutionMode::Batch => self.resolve_batch(&mut pass)?,
            ResolutionMode::Interactive => self.resolve_interactive(&mut pass)?,
        }

        info!(resolved = pass.bindings.len(), "Properties resolved");
        Ok(pass.bindings)
    }

    fn resolve_batch(&self, pass: &mut Pass<'_>) -> ArchgenResult<()> {
        let (properties, overrides) = (pass.properties, pass.overrides);
        for (index, property) in properties.iter().enumerate() {
            let key = property.key();

            if let Some(value) = overrides.get(key) {
                pass.check(index, value)?;
                pass.bind(index, value.to_string(), Origin::Override);
                continue;
            }

            let template = property.default_value().ok_or_else(|| {
                ApplicationError::UnresolvableDefault {
                    key: key.to_string(),
                    reason: "no value was supplied and the property has no default".into(),
                }
            })?;

            let value = self
                .evaluator
                .evaluate(template, &pass.context())
                .map_err(|e| ApplicationError::UnresolvableDefault {
                    key: key.to_string(),
                    reason: format!("default '{template}' failed: {e}"),
                })?;

            pass.check(index, &value)?;
            debug!(key, value = %value, "Default applied");
            pass.bind(index, value, Origin::Derived);
        }

        Ok(())
    }

    fn resolve_interactive(&self, pass: &mut Pass<'_>) -> ArchgenResult<()> {
        let mut state = if pass.properties.is_empty() {
            State::AllResolved
        } else {
            State::Prompting(0)
        };

        loop {
            debug!(?state, "Resolver state");
            state = match state {
                State::Prompting(index) => {
                    self.prompt_property(pass, index)?;
                    if index + 1 < pass.properties.len() {
                        State::Prompting(index + 1)
                    } else {
                        State::AllResolved
                    }
                }
                State::AllResolved => State::Confirming,
                State::Confirming => {
                    let accepted = self
                        .queryer
                        .confirm_configuration(&pass.bindings)
                        .map_err(|e| ApplicationError::from_prompt(CONFIGURATION_SUBJECT, e))?;
                    if accepted {
                        State::Accepted
                    } else {
                        State::SelectingEdits
                    }
                }
                State::SelectingEdits => {
                    let keys = self
                        .queryer
                        .select_properties_to_edit(&pass.bindings)
                        .map_err(|e| ApplicationError::from_prompt(CONFIGURATION_SUBJECT, e))?;
                    let keys: Vec<String> = keys
                        .into_iter()
                        .filter(|k| pass.position(k).is_some())
                        .collect();
                    if keys.is_empty() {
                        State::Confirming
                    } else {
                        State::Editing(keys)
                    }
                }
                State::Editing(keys) => {
                    self.edit(pass, &keys)?;
                    State::Confirming
                }
                State::Accepted => return Ok(()),
            };
        }
    }

    /// First pass over one property in interactive mode.
    fn prompt_property(&self, pass: &mut Pass<'_>, index: usize) -> ArchgenResult<()> {
        let (properties, overrides) = (pass.properties, pass.overrides);
        let property = &properties[index];
        let key = property.key();

        if let Some(value) = overrides.get(key) {
            pass.check(index, value)?;
            pass.bind(index, value.to_string(), Origin::Override);
            return Ok(());
        }

        let default = property.default_value().and_then(|template| {
            match self.evaluator.evaluate(template, &pass.context()) {
                Ok(value) => Some(value),
                Err(e) => {
                    warn!(
                        key,
                        template,
                        error = %e,
                        "Default could not be evaluated; prompting without one"
                    );
                    None
                }
            }
        });

        let answer = self
            .queryer
            .get_property_value(key, default.as_deref().unwrap_or(""), pass.pattern(index))
            .map_err(|e| ApplicationError::from_prompt(key, e))?;

        let origin = if default.as_deref() == Some(answer.as_str()) {
            Origin::Derived
        } else {
            Origin::Entered
        };
        pass.bind(index, answer, origin);
        Ok(())
    }

    /// Re-prompt the selected keys, then re-derive dependent defaults.
    fn edit(&self, pass: &mut Pass<'_>, keys: &[String]) -> ArchgenResult<()> {
        let properties = pass.properties;
        let mut changed: HashSet<String> = HashSet::new();

        for (index, property) in properties.iter().enumerate() {
            let key = property.key();
            if !keys.iter().any(|k| k == key) {
                continue;
            }

            let current = pass.bindings.get(key).unwrap_or_default().to_string();
            let answer = self
                .queryer
                .get_property_value(key, &current, pass.pattern(index))
                .map_err(|e| ApplicationError::from_prompt(key, e))?;

            if answer != current {
                changed.insert(key.to_string());
            }
            pass.bind(index, answer, Origin::Entered);
        }

        for (index, property) in properties.iter().enumerate() {
            if pass.origins[index] != Origin::Derived {
                continue;
            }
            let Some(template) = property.default_value() else {
                continue;
            };
            let depends_on_change = self
                .evaluator
                .references(template)
                .iter()
                .any(|name| changed.contains(name));
            if !depends_on_change {
                continue;
            }

            let key = property.key();
            match self.evaluator.evaluate(template, &pass.context()) {
                Ok(value) => {
                    if pass.bindings.get(key) != Some(value.as_str()) {
                        debug!(key, value = %value, "Re-derived after edit");
                        changed.insert(key.to_string());
                        pass.bind(index, value, Origin::Derived);
                    }
                }
                Err(e) => {
                    warn!(
                        key,
                        error = %e,
                        "Could not re-derive after edit; keeping previous value"
                    );
                }
            }
        }

        Ok(())
    }
}

/// State of one resolution call.
struct Pass<'p> {
    properties: &'p [RequiredProperty],
    patterns: &'p [Option<Regex>],
    overrides: &'p Properties,
    bindings: Properties,
    /// Parallel to `properties`; filled as properties are bound.
    origins: Vec<Origin>,
}

impl Pass<'_> {
    /// Evaluation context: overrides with the bindings so far on top.
    fn context(&self) -> Properties {
        self.overrides.overlay(&self.bindings)
    }

    fn pattern(&self, index: usize) -> Option<&Regex> {
        self.patterns[index].as_ref()
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.properties.iter().position(|p| p.key() == key)
    }

    fn bind(&mut self, index: usize, value: String, origin: Origin) {
        self.bindings.insert(self.properties[index].key(), value);
        if index < self.origins.len() {
            self.origins[index] = origin;
        } else {
            self.origins.push(origin);
        }
    }

    fn check(&self, index: usize, value: &str) -> ArchgenResult<()> {
        if DomainValidator::value_matches(value, self.pattern(index)) {
            return Ok(());
        }
        let property = &self.properties[index];
        Err(ApplicationError::InvalidPropertyValue {
            key: property.key().to_string(),
            value: value.to_string(),
            pattern: property.validation_regex().unwrap_or_default().to_string(),
        }
        .into())
    }
}
