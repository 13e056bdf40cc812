//! Adapter for the external puzzle tool (`coctus`).
//!
//! The tool keeps a "current puzzle" cursor: `select` moves it and
//! `generate_stub` reads it. Callers must therefore select and generate
//! strictly one puzzle at a time.

use crate::config::Config;
use crate::config::types::{LANGUAGE_PLACEHOLDER, PUZZLE_PLACEHOLDER};
use crate::corpus::PuzzleId;
use crate::error::{Result, StubcheckError};
use crate::process::{ProcessOutput, run_process};
use regex::Regex;
use std::time::Duration;

/// Result of asking the tool for one stub.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StubGeneration {
    /// Stub source exactly as the tool printed it.
    Generated(Vec<u8>),
    /// The current puzzle has no stub generator; not an error.
    NoGenerator,
    /// Any other failure (non-zero exit, spawn failure, timeout).
    Failed { detail: String },
}

/// The two operations the harness needs from the external tool.
pub trait StubTool {
    /// Make `puzzle` the tool's current puzzle.
    fn select(&mut self, puzzle: &PuzzleId) -> Result<()>;

    /// Generate a stub for the current puzzle in `language`.
    fn generate_stub(&mut self, language: &str) -> StubGeneration;
}

/// Recognises the tool's "no stub generator" failure.
///
/// A configured exit code is the structured signal and wins when present;
/// stderr patterns are the fallback for tools without one.
pub struct NoGeneratorSignal {
    exit_code: Option<i32>,
    patterns: Vec<(Regex, String)>,
}

impl std::fmt::Debug for NoGeneratorSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NoGeneratorSignal")
            .field("exit_code", &self.exit_code)
            .field(
                "patterns",
                &self.patterns.iter().map(|(_, s)| s).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl NoGeneratorSignal {
    /// Compile the signal from config.
    pub fn from_config(config: &Config) -> Result<Self> {
        let mut patterns = Vec::with_capacity(config.no_generator_patterns.len());

        for pattern_str in &config.no_generator_patterns {
            let regex = Regex::new(pattern_str).map_err(|e| {
                StubcheckError::UserError(format!(
                    "invalid regex pattern in no_generator_patterns: '{}' - {}\n\
                     Fix: edit the config file and correct or remove this pattern.",
                    pattern_str, e
                ))
            })?;
            patterns.push((regex, pattern_str.clone()));
        }

        Ok(Self {
            exit_code: config.no_generator_exit_code,
            patterns,
        })
    }

    /// Whether a failed invocation means "no generator for this language".
    pub fn matches(&self, output: &ProcessOutput) -> bool {
        if output.timed_out {
            return false;
        }
        if let Some(code) = self.exit_code {
            return output.exit_code == Some(code);
        }
        self.patterns
            .iter()
            .any(|(regex, _)| regex.is_match(&output.stderr))
    }
}

/// [`StubTool`] that shells out to the configured executable.
#[derive(Debug)]
pub struct CommandStubTool {
    program: String,
    select_args: Vec<String>,
    stub_args: Vec<String>,
    timeout: Duration,
    no_generator: NoGeneratorSignal,
}

impl CommandStubTool {
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self {
            program: config.tool.clone(),
            select_args: config.select_args.clone(),
            stub_args: config.stub_args.clone(),
            timeout: config.tool_timeout(),
            no_generator: NoGeneratorSignal::from_config(config)?,
        })
    }

    fn argv(&self, args: &[String], placeholder: &str, value: &str) -> Vec<String> {
        std::iter::once(self.program.clone())
            .chain(args.iter().map(|arg| arg.replace(placeholder, value)))
            .collect()
    }
}

impl StubTool for CommandStubTool {
    fn select(&mut self, puzzle: &PuzzleId) -> Result<()> {
        let argv = self.argv(&self.select_args, PUZZLE_PLACEHOLDER, puzzle.as_str());
        let output = run_process(&argv, None, None, self.timeout)?;

        if !output.is_success() {
            return Err(StubcheckError::UserError(format!(
                "selecting puzzle {} failed ({}): {}",
                puzzle,
                output.status_line(),
                output.stderr.trim()
            )));
        }
        Ok(())
    }

    fn generate_stub(&mut self, language: &str) -> StubGeneration {
        let argv = self.argv(&self.stub_args, LANGUAGE_PLACEHOLDER, language);

        let output = match run_process(&argv, None, None, self.timeout) {
            Ok(output) => output,
            Err(e) => {
                return StubGeneration::Failed {
                    detail: e.to_string(),
                };
            }
        };

        if output.is_success() {
            return StubGeneration::Generated(output.stdout);
        }

        if self.no_generator.matches(&output) {
            return StubGeneration::NoGenerator;
        }

        let mut detail = format!("stub tool {}", output.status_line());
        let stderr = output.stderr.trim_end();
        if !stderr.is_empty() {
            detail.push('\n');
            detail.push_str(stderr);
        }
        StubGeneration::Failed { detail }
    }
}
