//! patchlog CLI

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use patchlog_cli::cmd;
use patchlog_cli::{Cli, Commands};

fn main() -> Result<ExitCode> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match &cli.command {
        Commands::Info {
            patch_id,
            identity,
            verbose,
            json,
        } => cmd::info::info(
            &cli.home()?,
            identity.as_deref(),
            patch_id.clone(),
            *verbose,
            *json,
        ),
        Commands::History { identity, json } => {
            cmd::history::history(&cli.home()?, identity.as_deref(), *json)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::List => {
            cmd::list::list(&cli.home()?)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Completions { shell } => {
            cmd::completions::completions(*shell);
            Ok(ExitCode::SUCCESS)
        }
    }
}
