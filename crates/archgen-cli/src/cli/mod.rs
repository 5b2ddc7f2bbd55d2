//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::GlobalArgs;

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "archgen",
    bin_name = "archgen",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Resolve archetype properties for new projects",
    long_about = "archgen works out the property values (groupId, artifactId, version, \
                  package and archetype-specific keys) a project archetype needs, \
                  from -D overrides, derived defaults and interactive prompts.",
    after_help = "EXAMPLES:\n\
        \x20 archgen generate -B -DgroupId=com.acme -DartifactId=shop\n\
        \x20 archgen generate io.archgen.archetypes:archgen-service:1.0\n\
        \x20 archgen list --format json\n\
        \x20 archgen completions bash > /usr/share/bash-completion/completions/archgen",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Resolve the properties of an archetype.
    #[command(
        visible_alias = "gen",
        about = "Resolve archetype properties",
        after_help = "EXAMPLES:\n\
            \x20 archgen generate                                  # pick an archetype interactively\n\
            \x20 archgen generate -B -DgroupId=com.acme -DartifactId=shop\n\
            \x20 archgen generate archgen-service -DgroupId=com.acme --format json\n\
            \x20 archgen generate --descriptor ./archetype.toml -B -DgroupId=g -DartifactId=a"
    )]
    Generate(GenerateArgs),

    /// List available archetypes.
    #[command(
        visible_alias = "ls",
        about = "List available archetypes",
        after_help = "EXAMPLES:\n\
            \x20 archgen list\n\
            \x20 archgen list --format json\n\
            \x20 archgen list --archetypes-dir ./archetypes"
    )]
    List(ListArgs),

    /// Show the properties an archetype declares.
    #[command(
        about = "Show an archetype's properties",
        after_help = "EXAMPLES:\n\
            \x20 archgen show archgen-service\n\
            \x20 archgen show org.apache.maven.archetypes:maven-archetype-webapp:1.4 --format toml"
    )]
    Show(ShowArgs),

    /// Initialise an archgen configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 archgen init           # platform config location\n\
            \x20 archgen init --local   # .archgen.toml in CWD"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 archgen completions bash > ~/.local/share/bash-completion/completions/archgen\n\
            \x20 archgen completions zsh  > ~/.zfunc/_archgen\n\
            \x20 archgen completions fish > ~/.config/fish/completions/archgen.fish"
    )]
    Completions(CompletionsArgs),

    /// Manage the archgen configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 archgen config get generate.archetype\n\
            \x20 archgen config set generate.interactive false\n\
            \x20 archgen config list"
    )]
    Config(ConfigCommands),
}

// ── generate ──────────────────────────────────────────────────────────────────

/// Arguments for `archgen generate`.
#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Archetype as `groupId:artifactId:version`, `groupId:artifactId` or
    /// `artifactId`.  Omitted: chosen interactively, or the default
    /// archetype in batch mode.
    #[arg(value_name = "ARCHETYPE", help = "Archetype coordinates")]
    pub archetype: Option<String>,

    /// Property overrides.
    #[arg(
        short = 'D',
        long = "define",
        value_name = "KEY=VALUE",
        value_parser = parse_define,
        help = "Set a property value (repeatable)"
    )]
    pub defines: Vec<(String, String)>,

    /// Never prompt.
    #[arg(
        short = 'B',
        long = "batch-mode",
        help = "Run without prompting; fail on unresolvable properties"
    )]
    pub batch_mode: bool,

    /// Use a descriptor file instead of a known archetype.
    #[arg(
        long = "descriptor",
        value_name = "FILE",
        conflicts_with = "archetype",
        help = "Path to an archetype.toml descriptor"
    )]
    pub descriptor: Option<PathBuf>,

    /// Extra directory of archetype descriptors.
    #[arg(
        long = "archetypes-dir",
        value_name = "DIR",
        help = "Load additional archetypes from DIR"
    )]
    pub archetypes_dir: Option<PathBuf>,

    /// Output format (defaults to `output.format` from the configuration).
    #[arg(long = "format", value_enum, help = "Output format")]
    pub format: Option<GenerateFormat>,

    /// Also write the resolved properties to a file.
    #[arg(
        short = 'o',
        long = "output",
        value_name = "FILE",
        help = "Write resolved properties to FILE (key=value lines)"
    )]
    pub output: Option<PathBuf>,
}

/// Output format for the `generate` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GenerateFormat {
    /// Human-readable summary.
    Human,
    /// JSON object with the archetype and its properties.
    Json,
    /// `key=value` lines.
    Properties,
}

/// Parse a `-D key=value` argument.
pub fn parse_define(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{raw}'"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("missing property name in '{raw}'"));
    }
    Ok((key.to_string(), value.to_string()))
}

// ── list ──────────────────────────────────────────────────────────────────────

/// Arguments for `archgen list`.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Extra directory of archetype descriptors.
    #[arg(long = "archetypes-dir", value_name = "DIR", help = "Load additional archetypes from DIR")]
    pub archetypes_dir: Option<PathBuf>,

    /// Output format.
    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: ListFormat,
}

/// Output format for the `list` command.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ListFormat {
    /// Human-readable table.
    Table,
    /// One coordinate per line.
    List,
    /// JSON array.
    Json,
    /// CSV rows.
    Csv,
}

// ── show ──────────────────────────────────────────────────────────────────────

/// Arguments for `archgen show`.
#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Archetype coordinates.
    #[arg(value_name = "ARCHETYPE", help = "Archetype coordinates")]
    pub archetype: String,

    /// Extra directory of archetype descriptors.
    #[arg(long = "archetypes-dir", value_name = "DIR", help = "Load additional archetypes from DIR")]
    pub archetypes_dir: Option<PathBuf>,

    /// Output format.
    #[arg(long = "format", value_enum, default_value = "human", help = "Output format")]
    pub format: ShowFormat,
}

/// Output format for the `show` command.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ShowFormat {
    Human,
    /// An `archetype.toml` that can be edited and loaded back.
    Toml,
    Json,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `archgen init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Write to `.archgen.toml` in the current directory.
    #[arg(
        long = "local",
        help = "Create local configuration in current directory"
    )]
    pub local: bool,

    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `archgen completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `archgen config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `generate.archetype`.
        key: String,
    },
    /// Set a configuration key in the configuration file.
    Set {
        /// Dotted key path.
        key: String,
        /// New value.
        value: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the active configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────
