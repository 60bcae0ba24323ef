//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums. No business logic lives here.

use clap::{Args, Parser, Subcommand, ValueEnum};

use faststart_core::domain::{AuthType, DatabaseType, ProjectType};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "faststart",
    bin_name = "faststart",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "\u{26a1} FastAPI service scaffolding",
    long_about = "FastStart renders the API layer of a FastAPI service \
                  (endpoints, authentication, router) from a project type, \
                  a database and an authentication scheme.",
    after_help = "EXAMPLES:\n\
        \x20 faststart new orders --db postgres --auth jwt\n\
        \x20 faststart new ../services/scorer --type ml-api --auth api-key\n\
        \x20 faststart matrix --auth oauth2\n\
        \x20 faststart completions bash > /usr/share/bash-completion/completions/faststart",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create a new project.
    #[command(
        visible_alias = "n",
        about = "Create a new FastAPI project",
        after_help = "EXAMPLES:\n\
            \x20 faststart new orders\n\
            \x20 faststart new orders --db postgres --auth jwt --sync\n\
            \x20 faststart new gateway --type microservice --auth oauth2 --dry-run"
    )]
    New(NewArgs),

    /// List payload templates.
    #[command(
        visible_alias = "ls",
        about = "List payload templates",
        after_help = "EXAMPLES:\n\
            \x20 faststart list\n\
            \x20 faststart list --format json"
    )]
    List(ListArgs),

    /// Print the decision matrix.
    #[command(
        about = "Show which templates every combination selects",
        after_help = "EXAMPLES:\n\
            \x20 faststart matrix\n\
            \x20 faststart matrix --auth jwt --db redis\n\
            \x20 faststart matrix --format json"
    )]
    Matrix(MatrixArgs),

    /// Initialise a FastStart configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 faststart init           # default location\n\
            \x20 faststart init --global  # global config\n\
            \x20 faststart init --local   # .faststart.toml in CWD"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 faststart completions bash > ~/.local/share/bash-completion/completions/faststart\n\
            \x20 faststart completions zsh  > ~/.zfunc/_faststart\n\
            \x20 faststart completions fish > ~/.config/fish/completions/faststart.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the FastStart configuration.
    #[command(
        about = "Configuration inspection",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 faststart config get defaults.auth\n\
            \x20 faststart config list\n\
            \x20 faststart config path"
    )]
    Config(ConfigCommands),
}

// ── new ───────────────────────────────────────────────────────────────────────

/// Arguments for `faststart new`.
#[derive(Debug, Args)]
pub struct NewArgs {
    /// Project name or path. A plain name creates `./name`; a path like
    /// `../foo` places the project one level up and names it `foo`.
    #[arg(value_name = "NAME", help = "Project name or path")]
    pub name: String,

    #[arg(
        short = 't',
        long = "type",
        value_name = "TYPE",
        value_enum,
        help = "Project type [default: api]"
    )]
    pub project_type: Option<ProjectTypeArg>,

    #[arg(
        short = 'd',
        long = "db",
        value_name = "DATABASE",
        value_enum,
        help = "Database [default: none]"
    )]
    pub database: Option<DatabaseArg>,

    #[arg(
        short = 'a',
        long = "auth",
        value_name = "AUTH",
        value_enum,
        help = "Authentication scheme [default: none]"
    )]
    pub auth: Option<AuthArg>,

    /// Generate synchronous handlers and sessions.
    #[arg(long = "sync", help = "Generate synchronous code instead of async")]
    pub sync: bool,

    /// Skip the confirmation prompt.
    #[arg(
        short = 'y',
        long = "yes",
        help = "Skip confirmation and create immediately"
    )]
    pub yes: bool,

    /// Write into an existing directory, replacing generated files.
    #[arg(long = "force", help = "Write into an existing directory")]
    pub force: bool,

    /// Render and list the files without writing anything.
    #[arg(long = "dry-run", help = "Show what would be created without creating")]
    pub dry_run: bool,
}

// ── list ──────────────────────────────────────────────────────────────────────

/// Arguments for `faststart list`.
#[derive(Debug, Args)]
pub struct ListArgs {
    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: ListFormat,
}

/// Output format for `list` and `matrix`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListFormat {
    /// Human-readable table.
    Table,
    /// One name per line.
    List,
    /// JSON array.
    Json,
    /// CSV rows.
    Csv,
}

// ── matrix ────────────────────────────────────────────────────────────────────

/// Arguments for `faststart matrix`.
#[derive(Debug, Args)]
pub struct MatrixArgs {
    #[arg(short = 't', long = "type", value_enum, help = "Filter by project type")]
    pub project_type: Option<ProjectTypeArg>,

    #[arg(short = 'd', long = "db", value_enum, help = "Filter by database")]
    pub database: Option<DatabaseArg>,

    #[arg(short = 'a', long = "auth", value_enum, help = "Filter by authentication")]
    pub auth: Option<AuthArg>,

    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: ListFormat,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `faststart init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Write to the global config location.
    #[arg(long = "global", conflicts_with = "local", help = "Create global configuration")]
    pub global: bool,

    /// Write to `.faststart.toml` in the current directory.
    #[arg(
        long = "local",
        help = "Create local configuration in current directory"
    )]
    pub local: bool,

    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `faststart completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
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

/// Subcommands for `faststart config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `defaults.auth`.
        key: String,
    },
    /// Print the effective configuration.
    List,
    /// Print the path to the configuration file.
    Path,
}

// ── value enums ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ProjectTypeArg {
    Api,
    #[value(name = "ml-api", alias = "ml")]
    MlApi,
    #[value(alias = "service")]
    Microservice,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DatabaseArg {
    None,
    #[value(alias = "postgresql", alias = "pg")]
    Postgres,
    Mysql,
    Sqlite,
    #[value(alias = "mongo")]
    Mongodb,
    Redis,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AuthArg {
    None,
    Jwt,
    #[value(name = "oauth2")]
    OAuth2,
    #[value(name = "api-key", alias = "apikey")]
    ApiKey,
}

impl From<ProjectTypeArg> for ProjectType {
    fn from(arg: ProjectTypeArg) -> Self {
        match arg {
            ProjectTypeArg::Api => Self::Api,
            ProjectTypeArg::MlApi => Self::MlApi,
            ProjectTypeArg::Microservice => Self::Microservice,
        }
    }
}

impl From<DatabaseArg> for DatabaseType {
    fn from(arg: DatabaseArg) -> Self {
        match arg {
            DatabaseArg::None => Self::None,
            DatabaseArg::Postgres => Self::Postgres,
            DatabaseArg::Mysql => Self::Mysql,
            DatabaseArg::Sqlite => Self::Sqlite,
            DatabaseArg::Mongodb => Self::Mongodb,
            DatabaseArg::Redis => Self::Redis,
        }
    }
}

impl From<AuthArg> for AuthType {
    fn from(arg: AuthArg) -> Self {
        match arg {
            AuthArg::None => Self::None,
            AuthArg::Jwt => Self::Jwt,
            AuthArg::OAuth2 => Self::OAuth2,
            AuthArg::ApiKey => Self::ApiKey,
        }
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────
