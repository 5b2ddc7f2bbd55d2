//! `archgen config`: read and write configuration values.

use std::path::Path;

use toml::{Table, Value};
use tracing::debug;

use crate::{
    cli::{ConfigCommands, GlobalArgs},
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

/// Dispatch to the correct config subcommand.
pub fn execute(
    cmd: ConfigCommands,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let path = global.config.unwrap_or_else(AppConfig::active_path);

    match cmd {
        ConfigCommands::Get { key } => {
            output.data(&get_config_value(&config, &key)?)?;
        }

        ConfigCommands::Set { key, value } => {
            let mut table = read_table(&path)?;
            set_config_value(&mut table, &key, &value)?;
            write_table(&path, &table)?;
            output.success(&format!("Set {key} in {}", path.display()))?;
        }

        ConfigCommands::List => {
            output.header("Current Configuration:")?;
            let serialised =
                toml::to_string_pretty(&config).map_err(|e| CliError::ConfigError {
                    message: format!("Failed to serialise config: {e}"),
                    source: Some(Box::new(e)),
                })?;
            output.data(&serialised)?;
        }

        ConfigCommands::Path => {
            output.data(&path.display().to_string())?;
        }
    }

    Ok(())
}

// ── helpers ───────────────────────────────────────────────────────────────────

fn unknown_key(key: &str) -> CliError {
    CliError::ConfigError {
        message: format!("Unknown config key: '{key}'"),
        source: None,
    }
}

/// The effective value at a dotted `key`; strings print without quotes.
fn get_config_value(config: &AppConfig, key: &str) -> CliResult<String> {
    let root = Value::try_from(config).map_err(|e| CliError::ConfigError {
        message: format!("Failed to serialise config: {e}"),
        source: Some(Box::new(e)),
    })?;

    let mut current = &root;
    for part in key.split('.') {
        current = current.get(part).ok_or_else(|| unknown_key(key))?;
    }

    Ok(match current {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    })
}

/// A TOML literal if `raw` parses as one, else the raw text as a string.
fn parse_value(raw: &str) -> Value {
    toml::from_str::<Table>(&format!("value = {raw}"))
        .ok()
        .and_then(|mut t| t.remove("value"))
        .unwrap_or_else(|| Value::String(raw.to_string()))
}

/// Set `key` in `table`, rejecting keys and values [`AppConfig`] does not accept.
fn set_config_value(table: &mut Table, key: &str, raw: &str) -> CliResult<()> {
    let parts: Vec<&str> = key.split('.').collect();
    let Some((last, sections)) = parts.split_last() else {
        return Err(unknown_key(key));
    };

    // Only keys the configuration knows about.
    let known = Value::try_from(AppConfig::default()).ok();
    let mut probe = known.as_ref();
    for part in sections {
        probe = probe.and_then(|v| v.get(part));
    }
    let is_known = probe
        .and_then(Value::as_table)
        .is_some_and(|section| section.contains_key(*last) || is_optional_key(key));
    if !is_known {
        return Err(unknown_key(key));
    }

    let mut current = &mut *table;
    for part in sections {
        let entry = current
            .entry(part.to_string())
            .or_insert(Value::Table(Table::new()));
        current = entry.as_table_mut().ok_or_else(|| CliError::ConfigError {
            message: format!("'{part}' is not a section"),
            source: None,
        })?;
    }
    current.insert(last.to_string(), parse_value(raw));

    Value::Table(table.clone())
        .try_into::<AppConfig>()
        .map_err(|e| CliError::ConfigError {
            message: format!("Invalid value for '{key}': {e}"),
            source: Some(Box::new(e)),
        })?;
    Ok(())
}

/// Keys absent from a serialised default because they default to `None`.
fn is_optional_key(key: &str) -> bool {
    matches!(key, "generate.archetype" | "archetypes.local_path")
}

fn read_table(path: &Path) -> CliResult<Table> {
    if !path.exists() {
        debug!(path = %path.display(), "Config file does not exist yet");
        return Ok(Table::new());
    }
    let raw = std::fs::read_to_string(path)
        .with_cli_context(|| format!("Failed to read '{}'", path.display()))?;
    toml::from_str(&raw).map_err(|e| CliError::ConfigError {
        message: format!("Failed to parse '{}': {e}", path.display()),
        source: Some(Box::new(e)),
    })
}

fn write_table(path: &Path, table: &Table) -> CliResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).with_cli_context(|| {
            format!("Failed to create config directory '{}'", parent.display())
        })?;
    }
    let text = toml::to_string_pretty(table).map_err(|e| CliError::ConfigError {
        message: format!("Failed to serialise config: {e}"),
        source: Some(Box::new(e)),
    })?;
    std::fs::write(path, text).with_cli_context(|| format!("Failed to write '{}'", path.display()))
}

// ── tests ─────────────────────────────────────────────────────────────────────
