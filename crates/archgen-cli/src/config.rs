//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables: `ARCHGEN_<SECTION>__<KEY>`, e.g.
//!    `ARCHGEN_GENERATE__INTERACTIVE=false`
//! 3. Config file: `--config FILE`, else `.archgen.toml` in the current
//!    directory, else the platform config file
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use tracing::debug;

use archgen_core::domain::Properties;

use crate::cli::parse_define;

/// Name of the per-directory configuration file.
pub const LOCAL_CONFIG_FILE: &str = ".archgen.toml";

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Defaults for `archgen generate`.
    pub generate: GenerateConfig,
    /// Where to find archetypes.
    pub archetypes: ArchetypesConfig,
    /// Output settings.
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerateConfig {
    /// Prompt for values unless `-B` is given.
    pub interactive: bool,
    /// Archetype used when none is given on the command line.
    pub archetype: Option<String>,
    /// Property overrides applied before any `-D`, as `key=value` entries.
    pub properties: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArchetypesConfig {
    /// Extra directory of `archetype.toml` descriptors.
    pub local_path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
    /// `human`, `json` or `properties`.
    pub format: String,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            interactive: true,
            archetype: None,
            properties: Vec::new(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            no_color: false,
            format: "human".into(),
        }
    }
}

impl AppConfig {
    /// Load configuration: defaults, then the config file, then `ARCHGEN_*`
    /// environment variables.
    ///
    /// An explicit `config_file` must exist; the implicit locations are
    /// optional.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let mut builder = Config::builder().add_source(
            Config::try_from(&Self::default()).context("failed to encode default configuration")?,
        );

        builder = match config_file {
            Some(path) => builder.add_source(File::from(path.as_path()).format(FileFormat::Toml)),
            None => {
                let path = Self::active_path();
                debug!(path = %path.display(), "using implicit configuration file");
                builder.add_source(
                    File::from(path.as_path())
                        .format(FileFormat::Toml)
                        .required(false),
                )
            }
        };

        let config = builder
            .add_source(
                Environment::with_prefix("ARCHGEN")
                    .prefix_separator("_")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("generate.properties")
                    .try_parsing(true),
            )
            .build()
            .context("failed to read configuration")?;

        config
            .try_deserialize()
            .context("invalid configuration values")
    }

    /// Path to the platform configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.archgen.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("io", "archgen", "archgen")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(LOCAL_CONFIG_FILE))
    }

    /// The file `load(None)` reads: the local file if present, else the
    /// platform one.
    pub fn active_path() -> PathBuf {
        let local = Path::new(LOCAL_CONFIG_FILE);
        if local.is_file() {
            local.to_path_buf()
        } else {
            Self::config_path()
        }
    }

    /// `generate.properties` as a property set.
    ///
    /// Entries without `=` are rejected with the offending text.
    pub fn default_properties(&self) -> Result<Properties, String> {
        self.generate
            .properties
            .iter()
            .map(|entry| parse_define(entry))
            .collect()
    }
}
