//! End-to-end property resolution over the real evaluator and stores.

use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
};

use archgen_adapters::{InMemoryStore, InterpolatingEvaluator, load_descriptor_file};
use archgen_core::{
    application::{PromptError, Prompter},
    error::ArchgenError,
    prelude::*,
};

enum Reply {
    Text(&'static str),
    Confirm(bool),
    Edit(&'static [&'static str]),
    Abort,
}

#[derive(Clone, Default)]
struct ScriptedPrompter {
    replies: Arc<Mutex<VecDeque<Reply>>>,
    asked: Arc<Mutex<Vec<(String, String)>>>,
}

impl ScriptedPrompter {
    fn new(replies: impl IntoIterator<Item = Reply>) -> Self {
        Self {
            replies: Arc::new(Mutex::new(replies.into_iter().collect())),
            ..Default::default()
        }
    }

    fn next(&self) -> Reply {
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .expect("prompted more often than scripted")
    }

    /// `(message, default)` for every text prompt, in order.
    fn asked(&self) -> Vec<(String, String)> {
        self.asked.lock().unwrap().clone()
    }

    fn remaining(&self) -> usize {
        self.replies.lock().unwrap().len()
    }
}

impl Prompter for ScriptedPrompter {
    fn prompt(&self, message: &str, default: &str) -> Result<String, PromptError> {
        self.asked
            .lock()
            .unwrap()
            .push((message.to_string(), default.to_string()));
        match self.next() {
            Reply::Text(answer) => Ok(answer.to_string()),
            Reply::Abort => Err(PromptError::Aborted),
            _ => panic!("unexpected text prompt: {message}"),
        }
    }

    fn confirm(&self, message: &str) -> Result<bool, PromptError> {
        match self.next() {
            Reply::Confirm(yes) => Ok(yes),
            Reply::Abort => Err(PromptError::Aborted),
            _ => panic!("unexpected confirmation: {message}"),
        }
    }

    fn select(&self, message: &str, _items: &[String]) -> Result<usize, PromptError> {
        panic!("unexpected selection: {message}")
    }

    fn multi_select(&self, message: &str, items: &[String]) -> Result<Vec<usize>, PromptError> {
        match self.next() {
            Reply::Edit(keys) => Ok(keys
                .iter()
                .filter_map(|key| {
                    items
                        .iter()
                        .position(|label| label.starts_with(&format!("{key} (")))
                })
                .collect()),
            Reply::Abort => Err(PromptError::Aborted),
            _ => panic!("unexpected multi-selection: {message}"),
        }
    }
}

fn service_coordinates() -> ArchetypeCoordinates {
    ArchetypeCoordinates::new("io.archgen.archetypes", "archgen-service", "1.0")
}

fn configurator(prompter: ScriptedPrompter) -> ArchetypeConfigurator {
    ArchetypeConfigurator::new(
        Box::new(InMemoryStore::with_builtin().unwrap()),
        Box::new(InterpolatingEvaluator::new()),
        Box::new(DefaultQueryer::new(prompter)),
    )
}

fn props(pairs: &[(&str, &str)]) -> Properties {
    pairs.iter().map(|(k, v)| (*k, *v)).collect()
}

#[test]
fn batch_derives_every_default_from_the_coordinates() {
    let mut request = GenerationRequest::for_archetype(&service_coordinates());
    let overrides = props(&[("groupId", "com.acme"), ("artifactId", "order-service")]);

    configurator(ScriptedPrompter::default())
        .configure_archetype(&mut request, ResolutionMode::Batch, &overrides)
        .unwrap();

    assert_eq!(request.group_id.as_deref(), Some("com.acme"));
    assert_eq!(request.artifact_id.as_deref(), Some("order-service"));
    assert_eq!(request.version.as_deref(), Some("1.0-SNAPSHOT"));
    assert_eq!(request.package.as_deref(), Some("com.acme.orderservice"));
    assert_eq!(request.properties.get("serviceName"), Some("OrderService"));
    assert_eq!(request.properties.get("serviceConstant"), Some("ORDER_SERVICE"));
    assert_eq!(request.properties.get("port"), Some("8080"));
}

#[test]
fn batch_quickstart_package_defaults_to_group_id() {
    let mut request = GenerationRequest::for_archetype(&ArchetypeCoordinates::default_archetype());
    let overrides = props(&[("groupId", "org.example"), ("artifactId", "demo")]);

    configurator(ScriptedPrompter::default())
        .configure_archetype(&mut request, ResolutionMode::Batch, &overrides)
        .unwrap();

    assert_eq!(request.package.as_deref(), Some("org.example"));
    let keys: Vec<_> = request.properties.keys().collect();
    assert_eq!(keys, ["groupId", "artifactId", "version", "package"]);
}

#[test]
fn batch_without_artifact_id_names_the_missing_property() {
    let mut request = GenerationRequest::for_archetype(&service_coordinates());
    let overrides = props(&[("groupId", "com.acme")]);

    let err = configurator(ScriptedPrompter::default())
        .configure_archetype(&mut request, ResolutionMode::Batch, &overrides)
        .unwrap_err();

    assert_eq!(err.property_key(), Some("artifactId"));
    assert!(request.artifact_id.is_none());
}

#[test]
fn batch_rejects_an_override_that_breaks_its_pattern() {
    let mut request = GenerationRequest::for_archetype(&service_coordinates());
    let overrides = props(&[
        ("groupId", "com.acme"),
        ("artifactId", "svc"),
        ("port", "eighty"),
    ]);

    let err = configurator(ScriptedPrompter::default())
        .configure_archetype(&mut request, ResolutionMode::Batch, &overrides)
        .unwrap_err();

    assert_eq!(err.property_key(), Some("port"));
}

#[test]
fn interactive_prompts_in_dependency_order_with_derived_defaults() {
    let prompter = ScriptedPrompter::new([
        Reply::Text("com.acme"),    // groupId
        Reply::Text("billing-api"), // artifactId
        Reply::Text(""),            // version
        Reply::Text(""),            // package
        Reply::Text("bad name"),    // serviceName, rejected by the pattern
        Reply::Text(""),            // serviceName
        Reply::Text(""),            // serviceConstant
        Reply::Text("9090"),        // port
        Reply::Confirm(true),
    ]);
    let mut request = GenerationRequest::for_archetype(&service_coordinates());

    configurator(prompter.clone())
        .configure_archetype(&mut request, ResolutionMode::Interactive, &Properties::new())
        .unwrap();

    let defaults: Vec<_> = prompter.asked().into_iter().map(|(_, d)| d).collect();
    assert_eq!(
        defaults,
        [
            "",
            "",
            "1.0-SNAPSHOT",
            "com.acme.billingapi",
            "BillingApi",
            "BillingApi",
            "BILLING_API",
            "8080",
        ]
    );
    assert_eq!(request.properties.get("serviceName"), Some("BillingApi"));
    assert_eq!(request.properties.get("port"), Some("9090"));
    assert_eq!(prompter.remaining(), 0);
}

#[test]
fn interactive_skips_prompts_for_overridden_properties() {
    let prompter = ScriptedPrompter::new([
        Reply::Text(""), // version
        Reply::Text(""), // package
        Reply::Confirm(true),
    ]);
    let mut request = GenerationRequest::for_archetype(&ArchetypeCoordinates::default_archetype());
    request.group_id = Some("org.example".into());
    request.artifact_id = Some("demo".into());

    configurator(prompter.clone())
        .configure_archetype(&mut request, ResolutionMode::Interactive, &Properties::new())
        .unwrap();

    let messages: Vec<_> = prompter.asked().into_iter().map(|(m, _)| m).collect();
    assert_eq!(
        messages,
        [
            "Define value for property 'version'",
            "Define value for property 'package'",
        ]
    );
    assert_eq!(request.package.as_deref(), Some("org.example"));
}

#[test]
fn editing_a_property_re_derives_its_dependents() {
    let prompter = ScriptedPrompter::new([
        Reply::Text("order-service"), // artifactId
        Reply::Text(""),              // version
        Reply::Text(""),              // package
        Reply::Text(""),              // serviceName
        Reply::Text(""),              // serviceConstant
        Reply::Text(""),              // port
        Reply::Confirm(false),
        Reply::Edit(&["artifactId"]),
        Reply::Text("shipping"), // artifactId again
        Reply::Confirm(true),
    ]);
    let mut request = GenerationRequest::for_archetype(&service_coordinates());
    let overrides = props(&[("groupId", "com.acme")]);

    configurator(prompter.clone())
        .configure_archetype(&mut request, ResolutionMode::Interactive, &overrides)
        .unwrap();

    assert_eq!(request.artifact_id.as_deref(), Some("shipping"));
    assert_eq!(request.package.as_deref(), Some("com.acme.shipping"));
    assert_eq!(request.properties.get("serviceName"), Some("Shipping"));
    assert_eq!(request.properties.get("serviceConstant"), Some("SHIPPING"));

    let (_, edit_default) = &prompter.asked()[6];
    assert_eq!(edit_default, "order-service");
}

#[test]
fn aborting_a_prompt_cancels_the_run() {
    let prompter = ScriptedPrompter::new([Reply::Text("svc"), Reply::Abort]);
    let mut request = GenerationRequest::for_archetype(&service_coordinates());
    let overrides = props(&[("groupId", "com.acme")]);

    let err = configurator(prompter)
        .configure_archetype(&mut request, ResolutionMode::Interactive, &overrides)
        .unwrap_err();

    assert!(err.is_aborted());
    assert!(matches!(err, ArchgenError::Application(_)));
    assert!(request.properties.is_empty());
}

#[test]
fn descriptor_from_disk_resolves_like_a_builtin() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("archetype.toml");
    std::fs::write(
        &path,
        r#"
[archetype]
group_id = "com.acme.archetypes"
artifact_id = "jira-archetype"
version = "1.0"

[[properties]]
key = "groupName"
default = '${groupId.replaceAll("^.*[.]", "")}'

[[properties]]
key = "groupId"

[[properties]]
key = "serviceName"
default = "${artifactId}Service"
"#,
    )
    .unwrap();
    let descriptor = load_descriptor_file(&path).unwrap();

    let mut request = GenerationRequest::new();
    let overrides = props(&[("groupId", "com.example.billing"), ("artifactId", "invoices")]);
    configurator(ScriptedPrompter::default())
        .configure_descriptor(&descriptor, &mut request, ResolutionMode::Batch, &overrides)
        .unwrap();

    assert_eq!(request.properties.get("groupName"), Some("billing"));
    assert_eq!(request.properties.get("serviceName"), Some("invoicesService"));
    assert_eq!(
        request.archetype(),
        Some(ArchetypeCoordinates::new("com.acme.archetypes", "jira-archetype", "1.0"))
    );
}
