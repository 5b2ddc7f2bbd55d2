//! Implementation of the `archgen show` command.

use archgen_adapters::ArchetypeManifest;
use archgen_core::{domain::reserved, prelude::*};

use crate::{
    cli::{ShowArgs, ShowFormat},
    commands::{open_store, resolve_coordinates},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

pub fn execute(args: ShowArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let store = open_store(&config, args.archetypes_dir.as_deref())?;
    let coordinates = resolve_coordinates(&store, &args.archetype)?;
    let service = ArchetypeService::new(Box::new(store));
    let descriptor = service.get(&coordinates)?;

    match args.format {
        ShowFormat::Human => show_human(&descriptor, &output)?,
        ShowFormat::Toml => {
            let toml = ArchetypeManifest::from(&descriptor)
                .to_toml()
                .map_err(ArchgenError::from)?;
            output.data(&toml)?;
        }
        ShowFormat::Json => {
            let json = serde_json::to_string_pretty(&ArchetypeManifest::from(&descriptor))
                .map_err(|e| CliError::ConfigError {
                    message: format!("Failed to encode archetype: {e}"),
                    source: Some(Box::new(e)),
                })?;
            output.data(&json)?;
        }
    }

    Ok(())
}

/// Every property the archetype resolves, reserved ones included.
fn show_human(descriptor: &ArchetypeDescriptor, output: &OutputManager) -> CliResult<()> {
    output.header(&descriptor.coordinates().to_string())?;
    output.print(&format!("  {}", descriptor.name()))?;
    if !descriptor.description().is_empty() {
        output.print(&format!("  {}", descriptor.description()))?;
    }
    output.print("")?;
    output.header("Properties:")?;

    let properties = descriptor.with_reserved_properties();
    let width = properties.iter().map(|p| p.key().len()).max().unwrap_or(0);
    for property in &properties {
        let mut line = format!("  {:<width$}", property.key());
        match property.default_value() {
            Some(default) => line.push_str(&format!("  default: {default}")),
            None => line.push_str("  (required)"),
        }
        if let Some(pattern) = property.validation_regex() {
            line.push_str(&format!("  matches: {pattern}"));
        }
        if reserved::is_reserved(property.key()) && descriptor.property(property.key()).is_none() {
            line.push_str("  [reserved]");
        }
        output.print(&line)?;
    }
    Ok(())
}
