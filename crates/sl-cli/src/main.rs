//! Starlift CLI - stage, build, and publish the CRM/ERP star schema

use clap::Parser;

mod cli;
mod commands;

use cli::Cli;
use commands::{build, check, publish, run, stage, status};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let result = match &cli.command {
        cli::Commands::Stage(args) => stage::execute(args, &cli.global).await,
        cli::Commands::Build(args) => build::execute(args, &cli.global).await,
        cli::Commands::Publish(args) => publish::execute(args, &cli.global).await,
        cli::Commands::Run(args) => run::execute(args, &cli.global).await,
        cli::Commands::Check(args) => check::execute(args, &cli.global).await,
        cli::Commands::Status(args) => status::execute(args, &cli.global).await,
    };

    if let Err(err) = result {
        // ExitCode carries an already-reported failure; anything else is
        // surfaced here once.
        if let Some(exit) = err.downcast_ref::<commands::common::ExitCode>() {
            std::process::exit(exit.0);
        }
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}
