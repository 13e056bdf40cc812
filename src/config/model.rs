//! Config struct definition and default implementation.

use super::types::*;
use serde::{Deserialize, Serialize};

/// Configuration for a stubcheck run.
///
/// Unknown fields in the YAML are ignored for forward compatibility.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // =========================================================================
    // Stub tool settings
    // =========================================================================
    /// Stub tool executable (default: "coctus" from PATH).
    #[serde(default = "default_tool")]
    pub tool: String,

    /// Arguments that make a puzzle current; `{id}` is the puzzle id.
    #[serde(default = "default_select_args")]
    pub select_args: Vec<String>,

    /// Arguments that print a stub for the current puzzle; `{lang}` is the language.
    #[serde(default = "default_stub_args")]
    pub stub_args: Vec<String>,

    /// Seconds before a stub tool invocation is killed.
    #[serde(default = "default_tool_timeout_seconds")]
    pub tool_timeout_seconds: u64,

    /// Regex patterns matched against tool stderr that mean "no stub generator".
    #[serde(default = "default_no_generator_patterns")]
    pub no_generator_patterns: Vec<String>,

    /// Exit code the tool uses for "no stub generator", when it has one.
    ///
    /// Takes precedence over `no_generator_patterns`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub no_generator_exit_code: Option<i32>,

    // =========================================================================
    // Corpus settings
    // =========================================================================
    /// Directory of cached `<id>.json` puzzles (default: the tool's data dir).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clash_dir: Option<String>,

    /// Prefix of the browsable puzzle link printed with validation failures.
    #[serde(default = "default_puzzle_url_base")]
    pub puzzle_url_base: String,

    // =========================================================================
    // Checker settings
    // =========================================================================
    /// Seconds before a checker invocation is killed (per-language override available).
    #[serde(default = "default_check_timeout_seconds")]
    pub check_timeout_seconds: u64,

    /// Languages to check, in report order.
    #[serde(default = "default_languages")]
    pub languages: Vec<LanguageCheck>,

    /// Exit non-zero when any language recorded errors.
    #[serde(default)]
    pub fail_on_errors: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tool: default_tool(),
            select_args: default_select_args(),
            stub_args: default_stub_args(),
            tool_timeout_seconds: default_tool_timeout_seconds(),
            no_generator_patterns: default_no_generator_patterns(),
            no_generator_exit_code: None,
            clash_dir: None,
            puzzle_url_base: default_puzzle_url_base(),
            check_timeout_seconds: default_check_timeout_seconds(),
            languages: default_languages(),
            fail_on_errors: false,
        }
    }
}
