//! Error types for the stubcheck CLI.
//!
//! Uses thiserror for derive macros and provides user-actionable error messages.
//! Only run-level problems live here: failures of a single (puzzle, language)
//! pair are classified and counted by the harness and never become errors.

use crate::exit_codes;
use thiserror::Error;

/// Main error type for stubcheck operations.
#[derive(Error, Debug)]
pub enum StubcheckError {
    /// User provided invalid arguments or configuration.
    #[error("{0}")]
    UserError(String),

    /// A random sample larger than the cached corpus was requested.
    #[error(
        "cannot sample {requested} puzzles: only {available} available in the corpus"
    )]
    InsufficientCorpus { requested: usize, available: usize },

    /// Generated stubs were rejected and the run was asked to fail on errors.
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

impl StubcheckError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            StubcheckError::UserError(_) => exit_codes::USER_ERROR,
            StubcheckError::InsufficientCorpus { .. } => exit_codes::USER_ERROR,
            StubcheckError::ValidationError(_) => exit_codes::VALIDATION_FAILURE,
        }
    }
}

/// Result type alias for stubcheck operations.
pub type Result<T> = std::result::Result<T, StubcheckError>;
