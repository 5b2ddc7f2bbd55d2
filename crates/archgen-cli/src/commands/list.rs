//! Implementation of the `archgen list` command.

use archgen_core::prelude::*;

use crate::{
    cli::{ListArgs, ListFormat},
    commands::open_store,
    config::AppConfig,
    error::{CliError, CliResult},
    output::{OutputManager, csv_field},
};

pub fn execute(args: ListArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let store = open_store(&config, args.archetypes_dir.as_deref())?;
    let service = ArchetypeService::new(Box::new(store));
    let mut archetypes = service.list()?;
    archetypes.sort_by(|a, b| a.coordinates.cmp(&b.coordinates));

    match args.format {
        ListFormat::Table => {
            if archetypes.is_empty() {
                output.warning("No archetypes available")?;
                return Ok(());
            }
            output.header("Available Archetypes:")?;
            let width = archetypes
                .iter()
                .map(|a| a.coordinates.to_string().len())
                .max()
                .unwrap_or(0);
            for archetype in &archetypes {
                let coordinates = archetype.coordinates.to_string();
                output.print(&format!(
                    "  {coordinates:<width$}  {} ({} properties)",
                    archetype.name, archetype.property_count
                ))?;
                if !archetype.description.is_empty() {
                    output.print(&format!("  {:width$}  {}", "", archetype.description))?;
                }
            }
        }

        ListFormat::Json => {
            // JSON must stay parseable in pipes, so it is written as data.
            let json = serde_json::to_string_pretty(&archetypes).map_err(|e| {
                CliError::ConfigError {
                    message: format!("Failed to encode archetype list: {e}"),
                    source: Some(Box::new(e)),
                }
            })?;
            output.data(&json)?;
        }

        ListFormat::List => {
            for a in &archetypes {
                output.data(&a.coordinates.to_string())?;
            }
        }

        ListFormat::Csv => {
            output.data("coordinates,name,description,properties")?;
            for a in &archetypes {
                output.data(&format!(
                    "{},{},{},{}",
                    csv_field(&a.coordinates.to_string()),
                    csv_field(&a.name),
                    csv_field(&a.description),
                    a.property_count
                ))?;
            }
        }
    }

    Ok(())
}
