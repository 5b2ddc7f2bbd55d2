//! Archetype Configurator - main application orchestrator.
//!
//! This service coordinates one configuration run:
//! 1. Load the descriptor for the requested archetype
//! 2. Add the reserved properties it does not declare
//! 3. Order properties so defaults only read earlier ones
//! 4. Resolve them (batch or interactive)
//! 5. Write the result back into the request

use tracing::{info, instrument};

use crate::{
    application::{
        ApplicationError, PropertyResolver,
        ports::{ArchetypeStore, ExpressionEvaluator, GenerationQueryer},
    },
    domain::{
        ArchetypeDescriptor, GenerationRequest, Properties, RequiredProperty, ResolutionMode,
        ResolutionRequest, order_by_dependencies, reserved,
    },
    error::ArchgenResult,
};

/// Main configuration service.
pub struct ArchetypeConfigurator {
    store: Box<dyn ArchetypeStore>,
    evaluator: Box<dyn ExpressionEvaluator>,
    queryer: Box<dyn GenerationQueryer>,
}

impl ArchetypeConfigurator {
    /// Create a configurator with the given adapters.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use archgen_core::prelude::*;
    ///
    /// let configurator = ArchetypeConfigurator::new(
    ///     store,     // impl ArchetypeStore
    ///     evaluator, // impl ExpressionEvaluator
    ///     queryer,   // impl GenerationQueryer
    /// );
    /// ```
    pub fn new(
        store: Box<dyn ArchetypeStore>,
        evaluator: Box<dyn ExpressionEvaluator>,
        queryer: Box<dyn GenerationQueryer>,
    ) -> Self {
        Self {
            store,
            evaluator,
            queryer,
        }
    }

    /// Configure `request` from the archetype it names.
    ///
    /// Values already on the request (its properties and well-known fields)
    /// count as overrides, with `overrides` applied on top.
    #[instrument(skip_all, fields(mode = ?mode))]
    pub fn configure_archetype(
        &self,
        request: &mut GenerationRequest,
        mode: ResolutionMode,
        overrides: &Properties,
    ) -> ArchgenResult<()> {
        let coordinates = request.archetype().ok_or_else(|| {
            ApplicationError::ValidationFailed("no archetype was selected".into())
        })?;

        let descriptor = self.store.get(&coordinates)?;
        self.configure_descriptor(&descriptor, request, mode, overrides)
    }

    /// Configure `request` from an explicit descriptor.
    #[instrument(skip_all, fields(archetype = %descriptor.coordinates(), mode = ?mode))]
    pub fn configure_descriptor(
        &self,
        descriptor: &ArchetypeDescriptor,
        request: &mut GenerationRequest,
        mode: ResolutionMode,
        overrides: &Properties,
    ) -> ArchgenResult<()> {
        let overrides = request_overrides(request).overlay(overrides);
        let properties = self.ordered_properties(descriptor, &overrides)?;

        let resolver = PropertyResolver::new(self.evaluator.as_ref(), self.queryer.as_ref());
        let resolved = resolver.resolve(&properties, &ResolutionRequest::new(overrides, mode))?;

        info!(
            archetype = %descriptor.coordinates(),
            properties = resolved.len(),
            "Archetype configured"
        );
        request.set_archetype(descriptor.coordinates());
        request.apply_resolved(resolved);
        Ok(())
    }

    /// Reserved plus declared properties, dependency ordered.
    ///
    /// Overridden properties are never evaluated, so their defaults do not
    /// constrain the order.
    fn ordered_properties(
        &self,
        descriptor: &ArchetypeDescriptor,
        overrides: &Properties,
    ) -> ArchgenResult<Vec<RequiredProperty>> {
        let properties = descriptor.with_reserved_properties();
        let ordered = order_by_dependencies(properties, |p| {
            if overrides.contains_key(p.key()) {
                return Vec::new();
            }
            p.default_value()
                .map(|template| self.evaluator.references(template))
                .unwrap_or_default()
        })?;
        Ok(ordered)
    }
}

/// Values the caller already put on the request.
fn request_overrides(request: &GenerationRequest) -> Properties {
    let mut overrides = request.properties.clone();
    let fields = [
        (reserved::GROUP_ID, &request.group_id),
        (reserved::ARTIFACT_ID, &request.artifact_id),
        (reserved::VERSION, &request.version),
        (reserved::PACKAGE, &request.package),
    ];
    for (key, value) in fields {
        if let Some(value) = value {
            overrides.insert(key, value.as_str());
        }
    }
    overrides
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::test_support::{
        FakeStore, PlaceholderEvaluator, ScriptedQueryer,
    };
    use crate::domain::{ArchetypeCoordinates, DomainError};
    use crate::error::ArchgenError;

    fn coordinates() -> ArchetypeCoordinates {
        ArchetypeCoordinates::new("archetypeGroupId", "archetypeArtifactId", "archetypeVersion")
    }

    /// groupId and package read groupName, which is declared after them.
    fn descriptor() -> ArchetypeDescriptor {
        ArchetypeDescriptor::builder()
            .coordinates(coordinates())
            .property(RequiredProperty::new("groupId").with_default("com.example.${groupName}"))
            .property(RequiredProperty::new("artifactId").with_default("${serviceName}"))
            .property(RequiredProperty::new("package").with_default("com.example.${groupName}"))
            .property(RequiredProperty::new("groupName"))
            .property(RequiredProperty::new("serviceName"))
            .build()
            .unwrap()
    }

    fn configurator(queryer: ScriptedQueryer) -> ArchetypeConfigurator {
        ArchetypeConfigurator::new(
            Box::new(FakeStore::with(vec![descriptor()])),
            Box::new(PlaceholderEvaluator),
            Box::new(queryer),
        )
    }

    fn overrides() -> Properties {
        [("groupName", "myGroupName"), ("serviceName", "myServiceName")]
            .into_iter()
            .collect()
    }

    #[test]
    fn batch_defaults_with_variables() {
        let mut request = GenerationRequest::for_archetype(&coordinates());
        configurator(ScriptedQueryer::default())
            .configure_archetype(&mut request, ResolutionMode::Batch, &overrides())
            .unwrap();

        assert_eq!(request.group_id.as_deref(), Some("com.example.myGroupName"));
        assert_eq!(request.artifact_id.as_deref(), Some("myServiceName"));
        assert_eq!(request.version.as_deref(), Some("1.0-SNAPSHOT"));
        assert_eq!(request.package.as_deref(), Some("com.example.myGroupName"));
    }

    #[test]
    fn interactive_matches_batch() {
        let queryer = ScriptedQueryer::default()
            .answer("groupName", "myGroupName")
            .answer("serviceName", "myServiceName");

        let mut request = GenerationRequest::for_archetype(&coordinates());
        configurator(queryer)
            .configure_archetype(&mut request, ResolutionMode::Interactive, &Properties::new())
            .unwrap();

        assert_eq!(request.group_id.as_deref(), Some("com.example.myGroupName"));
        assert_eq!(request.artifact_id.as_deref(), Some("myServiceName"));
        assert_eq!(request.version.as_deref(), Some("1.0-SNAPSHOT"));
        assert_eq!(request.package.as_deref(), Some("com.example.myGroupName"));
    }

    #[test]
    fn request_fields_act_as_overrides() {
        let mut request = GenerationRequest::for_archetype(&coordinates());
        request.version = Some("2.0.0".into());

        configurator(ScriptedQueryer::default())
            .configure_archetype(&mut request, ResolutionMode::Batch, &overrides())
            .unwrap();

        assert_eq!(request.version.as_deref(), Some("2.0.0"));
        assert_eq!(request.properties.get("version"), Some("2.0.0"));
    }

    #[test]
    fn explicit_overrides_beat_request_properties() {
        let mut request = GenerationRequest::for_archetype(&coordinates());
        request.properties.insert("groupName", "fromRequest");

        configurator(ScriptedQueryer::default())
            .configure_archetype(&mut request, ResolutionMode::Batch, &overrides())
            .unwrap();

        assert_eq!(request.group_id.as_deref(), Some("com.example.myGroupName"));
    }

    #[test]
    fn unknown_archetype_is_not_found() {
        let mut request =
            GenerationRequest::for_archetype(&ArchetypeCoordinates::new("x", "y", "z"));
        let err = configurator(ScriptedQueryer::default())
            .configure_archetype(&mut request, ResolutionMode::Batch, &overrides())
            .unwrap_err();

        assert!(matches!(
            err,
            ArchgenError::Application(ApplicationError::ArchetypeNotFound { .. })
        ));
    }

    #[test]
    fn request_without_archetype_is_rejected() {
        let mut request = GenerationRequest::new();
        let err = configurator(ScriptedQueryer::default())
            .configure_archetype(&mut request, ResolutionMode::Batch, &overrides())
            .unwrap_err();
        assert!(matches!(
            err,
            ArchgenError::Application(ApplicationError::ValidationFailed(_))
        ));
    }

    #[test]
    fn cyclic_defaults_are_rejected_unless_overridden() {
        let cyclic = ArchetypeDescriptor::builder()
            .coordinates(coordinates())
            .property(RequiredProperty::new("a").with_default("${b}"))
            .property(RequiredProperty::new("b").with_default("${a}"))
            .build()
            .unwrap();
        let configurator = configurator(ScriptedQueryer::default());

        let mut request = GenerationRequest::new();
        let err = configurator
            .configure_descriptor(&cyclic, &mut request, ResolutionMode::Batch, &Properties::new())
            .unwrap_err();
        assert!(matches!(
            err,
            ArchgenError::Domain(DomainError::CyclicDefaults { .. })
        ));

        let overrides: Properties = [("groupId", "g"), ("artifactId", "a-id"), ("a", "x")]
            .into_iter()
            .collect();
        let mut request = GenerationRequest::new();
        configurator
            .configure_descriptor(&cyclic, &mut request, ResolutionMode::Batch, &overrides)
            .unwrap();
        assert_eq!(request.properties.get("b"), Some("x"));
        assert_eq!(request.package.as_deref(), Some("g"));
    }

    #[test]
    fn configure_descriptor_records_the_archetype() {
        let mut request = GenerationRequest::new();
        configurator(ScriptedQueryer::default())
            .configure_descriptor(&descriptor(), &mut request, ResolutionMode::Batch, &overrides())
            .unwrap();
        assert_eq!(request.archetype(), Some(coordinates()));
    }
}
