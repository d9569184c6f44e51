//! LintRelay CLI
//!
//! Relays ESLint diagnostics to an editor's diagnostics display.

mod cli;
mod commands;
mod output;
mod utils;

use std::process::ExitCode;

use clap::Parser;
use miette::Result;
use tracing::error;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands};
use crate::commands::init::run_init;
use crate::commands::lint::run_lint;
use crate::commands::normalize::run_normalize;
use crate::commands::serve::run_serve;

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(&cli) {
        Ok(has_errors) => {
            if has_errors {
                ExitCode::from(1)
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(e) => {
            error!("{:?}", e);
            ExitCode::from(2)
        }
    }
}

fn run(cli: &Cli) -> Result<bool> {
    match &cli.command {
        Commands::Lint { file, format } => run_lint(cli, file, *format, false),
        Commands::Fix { file, format } => run_lint(cli, file, *format, true),
        Commands::Normalize { input } => run_normalize(cli, input.as_deref()),
        Commands::Serve => run_serve(cli),
        Commands::Init { force } => run_init(*force).map(|_| false),
    }
}
