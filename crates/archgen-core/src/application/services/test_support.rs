//! Fakes shared by the service tests.

use std::sync::{Mutex, RwLock};

use regex::Regex;

use crate::{
    application::{
        ApplicationError,
        error::{EvaluationError, PromptError},
        ports::{ArchetypeStore, ExpressionEvaluator, GenerationQueryer, SelectionQueryer},
        services::ArchetypeSummary,
    },
    domain::{ArchetypeCoordinates, ArchetypeDescriptor, Properties},
    error::ArchgenResult,
};

/// Vec-backed store.
#[derive(Default)]
pub struct FakeStore {
    descriptors: RwLock<Vec<ArchetypeDescriptor>>,
}

impl FakeStore {
    pub fn with(descriptors: Vec<ArchetypeDescriptor>) -> Self {
        Self {
            descriptors: RwLock::new(descriptors),
        }
    }
}

impl ArchetypeStore for FakeStore {
    fn get(&self, coordinates: &ArchetypeCoordinates) -> ArchgenResult<ArchetypeDescriptor> {
        self.descriptors
            .read()
            .unwrap()
            .iter()
            .find(|d| d.coordinates() == coordinates)
            .cloned()
            .ok_or_else(|| {
                ApplicationError::ArchetypeNotFound {
                    coordinates: coordinates.to_string(),
                }
                .into()
            })
    }

    fn list(&self) -> ArchgenResult<Vec<ArchetypeDescriptor>> {
        Ok(self.descriptors.read().unwrap().clone())
    }

    fn insert(&self, descriptor: ArchetypeDescriptor) -> ArchgenResult<()> {
        let mut all = self.descriptors.write().unwrap();
        all.retain(|d| d.coordinates() != descriptor.coordinates());
        all.push(descriptor);
        Ok(())
    }
}

/// Resolves `${name}` only, enough to drive the resolver.
pub struct PlaceholderEvaluator;

impl ExpressionEvaluator for PlaceholderEvaluator {
    fn evaluate(&self, template: &str, bindings: &Properties) -> Result<String, EvaluationError> {
        let mut out = String::new();
        let mut rest = template;
        while let Some(start) = rest.find("${") {
            out.push_str(&rest[..start]);
            let after = &rest[start + 2..];
            let end = after.find('}').ok_or(EvaluationError::Syntax {
                position: start,
                reason: "unclosed".into(),
            })?;
            let name = &after[..end];
            let value = bindings.get(name).ok_or_else(|| EvaluationError::Unbound {
                name: name.to_string(),
            })?;
            out.push_str(value);
            rest = &after[end + 1..];
        }
        out.push_str(rest);
        Ok(out)
    }

    fn references(&self, template: &str) -> Vec<String> {
        template
            .split("${")
            .skip(1)
            .filter_map(|r| r.split_once('}').map(|(n, _)| n.to_string()))
            .collect()
    }
}

/// Scripted queryer: answers per key, falls back to the default.
#[derive(Default)]
pub struct ScriptedQueryer {
    answers: Mutex<Vec<(String, Result<String, PromptError>)>>,
    confirmations: Mutex<Vec<bool>>,
    edits: Mutex<Vec<Vec<String>>>,
    asked: Mutex<Vec<(String, String)>>,
}

impl ScriptedQueryer {
    pub fn answer(self, key: &str, value: &str) -> Self {
        self.answers
            .lock()
            .unwrap()
            .push((key.into(), Ok(value.into())));
        self
    }

    pub fn abort_on(self, key: &str) -> Self {
        self.answers
            .lock()
            .unwrap()
            .push((key.into(), Err(PromptError::Aborted)));
        self
    }

    pub fn confirmations(self, values: &[bool]) -> Self {
        *self.confirmations.lock().unwrap() = values.to_vec();
        self
    }

    pub fn edit(self, keys: &[&str]) -> Self {
        self.edits
            .lock()
            .unwrap()
            .push(keys.iter().map(|k| k.to_string()).collect());
        self
    }

    pub fn asked(&self) -> Vec<(String, String)> {
        self.asked.lock().unwrap().clone()
    }
}

impl GenerationQueryer for ScriptedQueryer {
    fn get_property_value(
        &self,
        key: &str,
        default: &str,
        _pattern: Option<&Regex>,
    ) -> Result<String, PromptError> {
        self.asked
            .lock()
            .unwrap()
            .push((key.to_string(), default.to_string()));
        let mut answers = self.answers.lock().unwrap();
        match answers.iter().position(|(k, _)| k == key) {
            Some(pos) => answers.remove(pos).1,
            None => Ok(default.to_string()),
        }
    }

    fn confirm_configuration(&self, _: &Properties) -> Result<bool, PromptError> {
        let mut c = self.confirmations.lock().unwrap();
        Ok(if c.is_empty() { true } else { c.remove(0) })
    }

    fn select_properties_to_edit(&self, _: &Properties) -> Result<Vec<String>, PromptError> {
        let mut e = self.edits.lock().unwrap();
        Ok(if e.is_empty() { Vec::new() } else { e.remove(0) })
    }
}

/// Picks a fixed archetype, or aborts when given none.
pub struct FixedSelection(pub Option<ArchetypeCoordinates>);

impl SelectionQueryer for FixedSelection {
    fn select_archetype(
        &self,
        _archetypes: &[ArchetypeSummary],
    ) -> Result<ArchetypeCoordinates, PromptError> {
        self.0.clone().ok_or(PromptError::Aborted)
    }
}
