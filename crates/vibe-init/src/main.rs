//! vibe-init - Create new projects from the FastAPI vibe template
//!
//! This is the main entry point for the vibe-init command-line interface.

mod cli;
mod commands;
mod output;
mod prompt;

use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::Cli;

fn main() -> ExitCode {
    // Parse CLI args; usage errors exit with 1, --help/--version with 0
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            return if err.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    // Initialize tracing
    init_tracing(cli.verbose, cli.quiet);

    match commands::init::run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report_error(&err);
            ExitCode::FAILURE
        }
    }
}

/// Print the final diagnostic for a failed run
fn report_error(err: &anyhow::Error) {
    match err.downcast_ref::<vibe_init_core::Error>() {
        Some(e) if e.is_declined() => println!("Aborting."),
        _ => output::error(&format!("Error: {:#}", err)),
    }
}

/// Initialize tracing with appropriate verbosity
fn init_tracing(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            // Per-entry copy progress is logged at info
            0 => EnvFilter::new("info"),
            1 => EnvFilter::new("debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(filter)
        .init();
}
