//! Layout Manager CLI
//!
//! Checks a project against its file manifest and installs framework files
//! into projects.

mod cli;
mod commands;
mod context;
mod error;
mod interactive;

use std::io;
use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use colored::Colorize;
use tracing::Level;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use cli::{Cli, Commands};
use error::Result;

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Some(cmd) => execute_command(cmd, &cli.project),
        None => {
            println!("{} Layout Manager CLI", "layout".green().bold());
            println!();
            println!("Run {} for available commands.", "layout --help".cyan());
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// `--verbose` logs everything at DEBUG; otherwise `RUST_LOG` decides,
/// defaulting to warnings only.
fn init_tracing(verbose: bool) {
    let result = if verbose {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .with_target(true)
            .with_writer(io::stderr)
            .finish();
        tracing::subscriber::set_global_default(subscriber)
    } else {
        let subscriber = FmtSubscriber::builder()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
            )
            .with_writer(io::stderr)
            .finish();
        tracing::subscriber::set_global_default(subscriber)
    };
    if let Err(e) = result {
        eprintln!("{}: failed to set up logging: {}", "warning".yellow(), e);
    }
    tracing::debug!("Verbose mode enabled");
}

fn execute_command(cmd: Commands, project: &std::path::Path) -> Result<ExitCode> {
    match cmd {
        Commands::Check { ask, json } => {
            let clean = commands::run_check(project, ask, json)?;
            Ok(if clean {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        Commands::CreateRelease => {
            commands::run_create_release(project)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Install { source, target } => {
            commands::run_install(project, &source, &target)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::DesignVsDevice { generate } => {
            commands::run_design_vs_device(project, generate)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "layout", &mut io::stdout());
            Ok(ExitCode::SUCCESS)
        }
    }
}
