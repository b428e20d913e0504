//! Core CLI types - Cli, Command, and argument structs

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// trainconf: optimizer configuration and ONNX import
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "trainconf")]
#[command(author = "PAIML")]
#[command(version)]
#[command(about = "Build training configurations from optimizer specs and dry-run ONNX imports")]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Validate an optimizer configuration file
    Validate(ValidateArgs),

    /// Print the training configuration a config file produces
    Show(ShowArgs),

    /// Print the learning rate schedule step by step
    Preview(PreviewArgs),

    /// Dry-run an ONNX graph import and print the emitted calls
    Import(ImportArgs),
}

/// Arguments for the validate command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct ValidateArgs {
    /// Path to YAML configuration file
    #[arg(value_name = "CONFIG")]
    pub config: PathBuf,

    /// Print a summary of the parsed configuration
    #[arg(short, long)]
    pub detailed: bool,
}

/// Arguments for the show command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct ShowArgs {
    /// Path to YAML configuration file
    #[arg(value_name = "CONFIG")]
    pub config: PathBuf,

    /// Output format (yaml, json)
    #[arg(short, long, default_value = "yaml")]
    pub format: OutputFormat,
}

/// Arguments for the preview command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct PreviewArgs {
    /// Path to YAML configuration file
    #[arg(value_name = "CONFIG")]
    pub config: PathBuf,

    /// Number of steps to evaluate
    #[arg(short, long)]
    pub steps: u64,

    /// Print every Nth step
    #[arg(short, long, default_value_t = 1)]
    pub every: u64,
}

/// Arguments for the import command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct ImportArgs {
    /// Path to YAML graph description
    #[arg(value_name = "GRAPH")]
    pub graph: PathBuf,

    /// Override the graph's opset version
    #[arg(long)]
    pub opset: Option<u32>,

    /// Seed for generated batch-norm layer names
    #[arg(long)]
    pub seed: Option<u64>,
}

/// Serialization format for the show command
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum OutputFormat {
    #[default]
    Yaml,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "yaml" => Ok(OutputFormat::Yaml),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown output format: {s}. Valid formats: yaml, json")),
        }
    }
}

/// Parse CLI arguments from a string slice (for testing)
pub fn parse_args<I, T>(args: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(args)
}
