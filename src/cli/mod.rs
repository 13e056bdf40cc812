//! CLI argument parsing for stubcheck.
//!
//! Uses clap derive macros for declarative argument definitions.
//! The run itself lives in the `commands` module.

use clap::Parser;
use std::path::PathBuf;

/// Stubcheck: verify that generated puzzle stubs compile.
///
/// For every cached puzzle the stub tool is asked for a stub in each
/// configured language, and the stub is run through that language's
/// compiler or type-checker. Failures are printed as they happen and a
/// per-language summary is printed at the end.
#[derive(Parser, Debug)]
#[command(name = "stubcheck")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Check a random sample of this many cached puzzles instead of all of them.
    pub sample: Option<usize>,

    /// Seed for the random sample (a random seed is logged when omitted).
    #[arg(long, requires = "sample")]
    pub seed: Option<u64>,

    /// Directory of cached `<id>.json` puzzles.
    #[arg(long, value_name = "DIR")]
    pub clash_dir: Option<PathBuf>,

    /// Stub tool executable.
    #[arg(long, value_name = "PATH")]
    pub tool: Option<String>,

    /// YAML config file.
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Only check these languages (comma-separated or repeated).
    #[arg(short = 'l', long = "lang", value_name = "LANG", value_delimiter = ',')]
    pub languages: Vec<String>,

    /// Seconds before a stub tool invocation is killed.
    #[arg(long, value_name = "SECS")]
    pub tool_timeout: Option<u64>,

    /// Seconds before a checker invocation is killed (overrides every
    /// per-language timeout in the config file).
    #[arg(long, value_name = "SECS")]
    pub check_timeout: Option<u64>,

    /// Exit with status 2 when any language recorded errors.
    #[arg(long)]
    pub fail_on_errors: bool,

    /// Print the final report as JSON (diagnostics then go to stderr).
    #[arg(long)]
    pub json: bool,

    /// Log level when RUST_LOG is not set (error, warn, info, debug, trace).
    #[arg(long, value_name = "LEVEL", default_value = "warn")]
    pub log_level: String,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
