//! Configuration model for stubcheck.
//!
//! This module defines the Config struct loaded from an optional YAML file
//! (`--config`). It supports forward-compatible YAML parsing (unknown fields
//! are ignored), sensible defaults for every field, and validation of values.
//! Command-line flags are applied on top by the `commands` module.

mod model;
mod operations;
pub mod types;


// Re-export public API
pub use model::Config;
pub use types::{CheckInput, LanguageCheck};
