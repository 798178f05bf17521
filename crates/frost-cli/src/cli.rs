use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "frost",
    about = "Frost — immutable records with ordered deep merge",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// TOML file with merge settings (max_depth, share_unchanged)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Merge a patch document into a base document
    Merge(MergeArgs),
    /// Set a single property
    Set(SetArgs),
    /// Delete a single property
    Delete(DeleteArgs),
    /// Print the values of a document in key order
    Values(ValuesArgs),
    /// Build one document from several sources
    Construct(ConstructArgs),
}

#[derive(Args)]
pub struct MergeArgs {
    pub base: PathBuf,
    pub patch: PathBuf,
    /// Recurse into nested mappings present on both sides
    #[arg(long)]
    pub deep: bool,
    /// Seal every nested mapping of the base, not just the top level
    #[arg(long)]
    pub seal_nested: bool,
}

#[derive(Args)]
pub struct SetArgs {
    pub base: PathBuf,
    pub key: String,
    /// New value, as JSON (bare words are taken as strings)
    pub value: String,
}

#[derive(Args)]
pub struct DeleteArgs {
    pub base: PathBuf,
    pub key: String,
}

#[derive(Args)]
pub struct ValuesArgs {
    pub file: PathBuf,
}

#[derive(Args)]
pub struct ConstructArgs {
    #[arg(required = true)]
    pub sources: Vec<PathBuf>,
}
