//! Configuration types and defaults for stubcheck.
//!
//! This module defines enums, constants, and default value functions
//! used by the Config struct.

use serde::{Deserialize, Serialize};

/// Placeholder replaced with the puzzle id in `select_args`.
pub const PUZZLE_PLACEHOLDER: &str = "{id}";

/// Placeholder replaced with the language id in `stub_args`.
pub const LANGUAGE_PLACEHOLDER: &str = "{lang}";

/// Placeholder replaced with the temp source path in file-input checker commands.
pub const FILE_PLACEHOLDER: &str = "{file}";

/// How a checker receives the generated source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CheckInput {
    /// Source is piped to the checker's standard input (default).
    #[default]
    Stdin,
    /// Source is written to a temp file whose path replaces `{file}`.
    File,
}

/// One language to check: the id passed to the stub tool plus its checker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageCheck {
    /// Language id understood by the stub tool (e.g. "c", "rust").
    pub name: String,

    /// Checker command line; exit status 0 means the stub is valid.
    pub command: String,

    #[serde(default)]
    pub input: CheckInput,

    /// Temp file name for `input: file` (e.g. "stub.py").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,

    /// Per-language override of `check_timeout_seconds`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_seconds: Option<u64>,
}

impl LanguageCheck {
    /// A checker that reads the source from standard input.
    pub fn stdin(name: impl Into<String>, command: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            command: command.into(),
            input: CheckInput::Stdin,
            file_name: None,
            timeout_seconds: None,
        }
    }

    /// A checker that reads the source from a temp file named `file_name`.
    pub fn file(
        name: impl Into<String>,
        command: impl Into<String>,
        file_name: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            command: command.into(),
            input: CheckInput::File,
            file_name: Some(file_name.into()),
            timeout_seconds: None,
        }
    }
}

pub fn default_tool() -> String {
    "coctus".to_string()
}

pub fn default_select_args() -> Vec<String> {
    vec!["next".to_string(), PUZZLE_PLACEHOLDER.to_string()]
}

pub fn default_stub_args() -> Vec<String> {
    vec!["generate-stub".to_string(), LANGUAGE_PLACEHOLDER.to_string()]
}

pub fn default_tool_timeout_seconds() -> u64 {
    30
}

pub fn default_check_timeout_seconds() -> u64 {
    60
}

/// Stderr patterns that mean "this puzzle has no stub generator".
///
/// Matches both "Current clash provides no input stub generator" and
/// "no input stub generator available".
pub fn default_no_generator_patterns() -> Vec<String> {
    vec!["no input stub generator".to_string()]
}

pub fn default_puzzle_url_base() -> String {
    "https://www.codingame.com/contribute/view/".to_string()
}

/// Default languages and their checkers.
pub fn default_languages() -> Vec<LanguageCheck> {
    vec![
        LanguageCheck::stdin("c", "gcc -fsyntax-only -x c -"),
        LanguageCheck::stdin("cpp", "gcc -fsyntax-only -x c++ -"),
        LanguageCheck::stdin("rust", "rustc --emit=metadata -"),
        LanguageCheck::file("python", "mypy {file}", "stub.py"),
    ]
}
