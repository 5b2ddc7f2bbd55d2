//! `archgen generate`: select an archetype and resolve its properties.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, instrument};

use archgen_adapters::{InterpolatingEvaluator, load_descriptor_file};
use archgen_core::prelude::*;

use crate::{
    cli::{GenerateArgs, GenerateFormat, GlobalArgs},
    commands::{open_store, resolve_coordinates},
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
    output::{OutputManager, properties_lines},
    prompt::LinePrompter,
};

/// JSON shape of a resolved archetype.
#[derive(Debug, Serialize)]
struct Resolved<'a> {
    archetype: String,
    properties: &'a Properties,
}

#[instrument(skip_all, fields(batch = args.batch_mode))]
pub fn execute(
    args: GenerateArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let format = output_format(args.format, &config)?;
    let overrides = overrides(&args, &config)?;
    let mode = ResolutionMode::from(!args.batch_mode && config.generate.interactive);
    debug!(?mode, overrides = overrides.len(), "Starting property resolution");

    let store = open_store(&config, args.archetypes_dir.as_deref())?;
    let prompter = make_prompter(&global, &config);
    let selection = DefaultQueryer::new(Arc::clone(&prompter));

    let mut request = GenerationRequest::new();

    let descriptor = match &args.descriptor {
        Some(path) => Some(load_descriptor_file(path).map_err(ArchgenError::from)?),
        None => {
            if let Some(raw) = args.archetype.as_deref().or(config.generate.archetype.as_deref()) {
                request.set_archetype(&resolve_coordinates(&store, raw)?);
            }
            ArchetypeSelector::new(&store, &selection).select_archetype(&mut request, mode)?;
            None
        }
    };

    let configurator = ArchetypeConfigurator::new(
        Box::new(store),
        Box::new(InterpolatingEvaluator::new()),
        Box::new(DefaultQueryer::new(prompter)),
    );

    match &descriptor {
        Some(descriptor) => {
            configurator.configure_descriptor(descriptor, &mut request, mode, &overrides)?
        }
        None => configurator.configure_archetype(&mut request, mode, &overrides)?,
    }

    let archetype = request
        .archetype()
        .map(|c| c.to_string())
        .unwrap_or_default();
    info!(archetype = %archetype, "Properties resolved");

    if let Some(path) = &args.output {
        std::fs::write(path, properties_lines(&request.properties))
            .with_cli_context(|| format!("Failed to write properties to '{}'", path.display()))?;
    }

    match format {
        GenerateFormat::Human => {
            output.header(&format!("Archetype {archetype}"))?;
            output.properties(&request.properties)?;
            if let Some(path) = &args.output {
                output.success(&format!("Properties written to {}", path.display()))?;
            }
        }
        GenerateFormat::Json => {
            let json = serde_json::to_string_pretty(&Resolved {
                archetype,
                properties: &request.properties,
            })
            .map_err(|e| CliError::ConfigError {
                message: format!("Failed to encode properties as JSON: {e}"),
                source: Some(Box::new(e)),
            })?;
            output.data(&json)?;
        }
        GenerateFormat::Properties => output.data(&properties_lines(&request.properties))?,
    }

    Ok(())
}

/// `--format`, else `output.format` from the configuration.
fn output_format(flag: Option<GenerateFormat>, config: &AppConfig) -> CliResult<GenerateFormat> {
    if let Some(format) = flag {
        return Ok(format);
    }
    match config.output.format.as_str() {
        "human" => Ok(GenerateFormat::Human),
        "json" => Ok(GenerateFormat::Json),
        "properties" => Ok(GenerateFormat::Properties),
        other => Err(CliError::ConfigError {
            message: format!(
                "output.format must be 'human', 'json' or 'properties', not '{other}'"
            ),
            source: None,
        }),
    }
}

/// `generate.properties` from the configuration, then `-D` in order.
fn overrides(args: &GenerateArgs, config: &AppConfig) -> CliResult<Properties> {
    let mut overrides = config
        .default_properties()
        .map_err(|message| CliError::ConfigError {
            message: format!("generate.properties: {message}"),
            source: None,
        })?;
    overrides.extend(args.defines.iter().cloned());
    Ok(overrides)
}

/// dialoguer on a terminal, plain lines when input is piped.
fn make_prompter(global: &GlobalArgs, config: &AppConfig) -> Arc<dyn Prompter> {
    if let Some(prompter) = terminal_prompter(global, config) {
        return prompter;
    }
    debug!("Using line prompts");
    Arc::new(LinePrompter::stdio())
}

#[cfg(feature = "interactive")]
fn terminal_prompter(global: &GlobalArgs, config: &AppConfig) -> Option<Arc<dyn Prompter>> {
    use std::io::IsTerminal as _;

    if !(std::io::stdin().is_terminal() && std::io::stderr().is_terminal()) {
        return None;
    }
    let colored = !(global.no_color || config.output.no_color);
    Some(Arc::new(crate::prompt::TerminalPrompter::new(colored)))
}

#[cfg(not(feature = "interactive"))]
fn terminal_prompter(_global: &GlobalArgs, _config: &AppConfig) -> Option<Arc<dyn Prompter>> {
    None
}
