//! CLI argument definitions using clap derive API

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Starlift - integrate CRM and ERP extracts into a star-schema warehouse
#[derive(Parser, Debug)]
#[command(name = "sl")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all commands
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to project directory
    #[arg(short = 'p', long, global = true, default_value = ".")]
    pub project_dir: String,

    /// Override config file path
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Override target (store paths)
    #[arg(short, long, global = true)]
    pub target: Option<String>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Ingest source extracts into the staging stores
    Stage(StageArgs),

    /// Build the warehouse dimensions and fact from staging
    Build(BuildArgs),

    /// (Re)create the analytical views over the warehouse
    Publish(PublishArgs),

    /// Run the full pipeline: stage, build, publish
    Run(RunArgs),

    /// Parse-validate every generated SQL statement without a database
    Check(CheckArgs),

    /// Report store contents and view readiness
    Status(StatusArgs),
}

/// Arguments for the stage command
#[derive(Args, Debug)]
pub struct StageArgs {
    /// Source system to stage
    #[arg(short, long, value_enum, default_value = "all")]
    pub system: StageSystem,
}

/// Source-system selector for staging
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageSystem {
    /// CRM extracts only
    Crm,
    /// ERP extracts only
    Erp,
    /// Both source systems
    All,
}

/// Arguments for the build command
#[derive(Args, Debug)]
pub struct BuildArgs {}

/// Arguments for the publish command
#[derive(Args, Debug)]
pub struct PublishArgs {}

/// Arguments for the run command
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Suppress the progress bar
    #[arg(short, long)]
    pub quiet: bool,
}

/// Arguments for the check command
#[derive(Args, Debug)]
pub struct CheckArgs {}

/// Arguments for the status command
#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub output: OutputFormat,
}

/// Output formats for reporting commands
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text
    Table,
    /// JSON output
    Json,
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
