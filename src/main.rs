//! Stubcheck: validation harness for a puzzle tool's stub generator.
//!
//! This is the main entry point for the `stubcheck` CLI. It parses arguments,
//! sets up logging, runs the harness, and maps errors to exit codes.

mod cli;
mod commands;
pub mod config;
pub mod corpus;
pub mod error;
pub mod exit_codes;
pub mod harness;
pub mod process;
pub mod tool;
pub mod validator;

#[cfg(test)]
mod test_support;

use cli::Cli;
use std::process::ExitCode;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() -> ExitCode {
    let cli = Cli::parse_args();

    // RUST_LOG wins over --log-level; logs never touch stdout.
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level)))
        .init();

    match commands::run(cli) {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(err) => {
            // Print user-actionable error message to stderr
            eprintln!("Error: {}", err);

            ExitCode::from(err.exit_code() as u8)
        }
    }
}
