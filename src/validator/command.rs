//! Validators backed by an external compiler or type-checker.

use super::{CheckOutcome, Validator};
use crate::config::types::FILE_PLACEHOLDER;
use crate::config::{CheckInput, LanguageCheck};
use crate::error::Result;
use crate::process::{parse_command, run_process};
use std::path::Path;
use std::time::Duration;
use tempfile::TempDir;

/// Runs a checker command; exit status 0 means valid.
///
/// Each check runs inside its own temporary working directory, which also
/// holds the source file for file-input checkers. Whatever the checker leaves
/// behind (e.g. the `.rmeta` from `rustc --emit=metadata`) is removed with
/// that directory when the check returns.
#[derive(Debug, Clone)]
pub struct CommandValidator {
    language: String,
    argv: Vec<String>,
    input: CheckInput,
    file_name: Option<String>,
    timeout: Duration,
}

impl CommandValidator {
    /// Build a validator from a configured language entry.
    pub fn from_language(lang: &LanguageCheck, timeout: Duration) -> Result<Self> {
        let argv = parse_command(
            &lang.command,
            &format!("checker command for '{}'", lang.name),
        )?;

        Ok(Self {
            language: lang.name.clone(),
            argv,
            input: lang.input,
            file_name: lang.file_name.clone(),
            timeout,
        })
    }

    fn run_in(&self, workdir: &Path, source: &[u8]) -> CheckOutcome {
        let (argv, stdin) = match self.input {
            CheckInput::Stdin => (self.argv.clone(), Some(source)),
            CheckInput::File => {
                let file_name = self.file_name.as_deref().unwrap_or("stub");
                let path = workdir.join(file_name);
                if let Err(e) = std::fs::write(&path, source) {
                    return CheckOutcome::invalid(format!(
                        "failed to write source to '{}': {}",
                        path.display(),
                        e
                    ));
                }
                let path = path.to_string_lossy();
                let argv = self
                    .argv
                    .iter()
                    .map(|arg| arg.replace(FILE_PLACEHOLDER, &path))
                    .collect();
                (argv, None)
            }
        };

        match run_process(&argv, stdin, Some(workdir), self.timeout) {
            Ok(output) if output.is_success() => CheckOutcome::Valid,
            Ok(output) => {
                let mut detail = format!("checker {}", output.status_line());
                let stdout = output.stdout_lossy();
                for stream in [output.stderr.as_str(), stdout.as_ref()] {
                    let stream = stream.trim_end();
                    if !stream.is_empty() {
                        detail.push('\n');
                        detail.push_str(stream);
                    }
                }
                CheckOutcome::invalid(detail)
            }
            Err(e) => CheckOutcome::invalid(e.to_string()),
        }
    }
}

impl Validator for CommandValidator {
    fn check(&self, source: &[u8]) -> CheckOutcome {
        let workdir = match tempfile::Builder::new().prefix("stubcheck-").tempdir() {
            Ok(dir) => dir,
            Err(e) => {
                return CheckOutcome::invalid(format!(
                    "failed to create checker work directory: {}",
                    e
                ));
            }
        };

        let outcome = self.run_in(workdir.path(), source);
        tracing::debug!(
            language = %self.language,
            valid = outcome.is_valid(),
            "checker finished"
        );

        close_workdir(workdir);
        outcome
    }
}

fn close_workdir(workdir: TempDir) {
    let path = workdir.path().to_path_buf();
    if let Err(e) = workdir.close() {
        tracing::warn!(
            path = %path.display(),
            error = %e,
            "failed to remove checker work directory"
        );
    }
}
