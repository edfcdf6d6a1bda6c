//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use lenskit_curator::DEFAULT_OUTPUT;
use std::path::PathBuf;

/// Default existing-relationships file
pub const DEFAULT_CONNECTIONS: &str = "lens_connections.json";

/// Lenskit - maintenance jobs for the lens knowledge graph.
#[derive(Debug, Parser)]
#[command(name = "lenskit")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log debug detail
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Supabase project URL
    #[arg(long, env = "SUPABASE_URL", global = true, hide_env_values = true)]
    pub supabase_url: Option<String>,

    /// Supabase API key
    #[arg(long, env = "SUPABASE_KEY", global = true, hide_env_values = true)]
    pub supabase_key: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Report how many lenses have embeddings and how they are stored
    Audit,

    /// Show the raw format of lens rows and their embedding column
    Inspect(InspectArgs),

    /// Recompute every lens embedding with the configured model
    Reembed(ReembedArgs),

    /// Generate contrast relationships for lenses that lack one
    Contrasts(ContrastsArgs),

    /// Summarize what moving embeddings to a vector column involves
    Migration,

    /// Show or initialize the configuration file
    Config(ConfigArgs),
}

/// Arguments for the inspect command.
#[derive(Debug, Parser)]
pub struct InspectArgs {
    /// Rows fetched with every column
    #[arg(long, default_value = "1")]
    pub full_rows: usize,

    /// Rows whose embedding column is described
    #[arg(short, long, default_value = "5")]
    pub rows: usize,
}

/// Arguments for the reembed command.
#[derive(Debug, Parser)]
pub struct ReembedArgs {
    /// Process only the first N lenses
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// List what would be updated without writing
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the contrasts command.
#[derive(Debug, Parser)]
pub struct ContrastsArgs {
    /// Process only the first N uncovered lenses
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// Output JSON file
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// Existing-relationships JSON file
    #[arg(long, default_value = DEFAULT_CONNECTIONS)]
    pub connections: PathBuf,

    /// Candidates ranked per lens (overrides the config file)
    #[arg(long)]
    pub top_n: Option<usize>,
}

/// Arguments for the config command.
#[derive(Debug, Parser)]
pub struct ConfigArgs {
    /// Write the default configuration if no file exists
    #[arg(long)]
    pub init: bool,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
        }
    }
}
