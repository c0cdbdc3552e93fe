//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

/// Wharf - import dependencies from other tools into a manifest and lock
#[derive(Parser)]
#[command(name = "wharf")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Import dependency records and write Wharf.toml and Wharf.lock
    Import(ImportArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args)]
pub struct ImportArgs {
    /// TOML file of `[[package]]` records to import
    pub imports: PathBuf,

    /// Catalog of known projects and their versions
    #[arg(long, env = "WHARF_CATALOG")]
    pub catalog: PathBuf,

    /// Directory to write the manifest and lock into (defaults to current directory)
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Do not derive constraints from locked versions
    #[arg(long)]
    pub no_default_constraints: bool,

    /// Show what would be written without writing it
    #[arg(long)]
    pub dry_run: bool,

    /// Print per-project decisions as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
