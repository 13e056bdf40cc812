//! Config loading, validation, and utility operations.

use super::model::Config;
use super::types::{CheckInput, FILE_PLACEHOLDER, LanguageCheck};
use crate::error::{Result, StubcheckError};
use crate::process::parse_command;
use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;

impl Config {
    /// Load config from a YAML file.
    ///
    /// Unknown fields in the YAML are silently ignored for forward compatibility.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            StubcheckError::UserError(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Parse config from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(yaml).map_err(|e| {
            StubcheckError::UserError(format!("failed to parse config YAML: {}", e))
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Serialize config to YAML string.
    #[allow(dead_code)]
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| {
            StubcheckError::UserError(format!("failed to serialize config to YAML: {}", e))
        })
    }

    /// Validate config values and return error on invalid values.
    ///
    /// Validation rules:
    /// - `tool` must be non-empty
    /// - timeouts must be positive
    /// - at least one language, with unique non-empty names
    /// - every checker command must parse; file-input checkers need `{file}`
    ///   and a plain `file_name`
    pub fn validate(&self) -> Result<()> {
        if self.tool.trim().is_empty() {
            return Err(invalid("tool must not be empty"));
        }

        if self.tool_timeout_seconds == 0 {
            return Err(invalid("tool_timeout_seconds must be greater than 0"));
        }

        if self.check_timeout_seconds == 0 {
            return Err(invalid("check_timeout_seconds must be greater than 0"));
        }

        if self.languages.is_empty() {
            return Err(invalid("languages must list at least one language"));
        }

        let mut seen = HashSet::new();
        for lang in &self.languages {
            if lang.name.trim().is_empty() {
                return Err(invalid("language names must be non-empty"));
            }
            if !seen.insert(lang.name.as_str()) {
                return Err(invalid(&format!(
                    "language '{}' is listed more than once",
                    lang.name
                )));
            }
            validate_language(lang)?;
        }

        Ok(())
    }

    /// Restrict `languages` to `names`, in the order given.
    ///
    /// An empty `names` keeps every configured language.
    pub fn retain_languages(&mut self, names: &[String]) -> Result<()> {
        if names.is_empty() {
            return Ok(());
        }

        let mut selected = Vec::with_capacity(names.len());
        for name in names {
            let lang = self
                .languages
                .iter()
                .find(|l| &l.name == name)
                .ok_or_else(|| {
                    StubcheckError::UserError(format!(
                        "unknown language '{}'. Configured languages: {}",
                        name,
                        self.language_names().join(", ")
                    ))
                })?;
            if !selected.iter().any(|l: &LanguageCheck| &l.name == name) {
                selected.push(lang.clone());
            }
        }

        self.languages = selected;
        Ok(())
    }

    pub fn language_names(&self) -> Vec<&str> {
        self.languages.iter().map(|l| l.name.as_str()).collect()
    }

    pub fn tool_timeout(&self) -> Duration {
        Duration::from_secs(self.tool_timeout_seconds)
    }

    /// Effective checker timeout for `lang`.
    pub fn check_timeout(&self, lang: &LanguageCheck) -> Duration {
        Duration::from_secs(lang.timeout_seconds.unwrap_or(self.check_timeout_seconds))
    }
}

fn validate_language(lang: &LanguageCheck) -> Result<()> {
    parse_command(&lang.command, &format!("checker command for '{}'", lang.name))?;

    if lang.timeout_seconds == Some(0) {
        return Err(invalid(&format!(
            "timeout_seconds for '{}' must be greater than 0",
            lang.name
        )));
    }

    if lang.input == CheckInput::File {
        if !lang.command.contains(FILE_PLACEHOLDER) {
            return Err(invalid(&format!(
                "checker for '{}' uses input: file but its command has no {} placeholder",
                lang.name, FILE_PLACEHOLDER
            )));
        }
        match lang.file_name.as_deref() {
            Some(name) if is_plain_file_name(name) => {}
            Some(name) => {
                return Err(invalid(&format!(
                    "file_name for '{}' must be a plain file name (found '{}')",
                    lang.name, name
                )));
            }
            None => {
                return Err(invalid(&format!(
                    "checker for '{}' uses input: file but has no file_name",
                    lang.name
                )));
            }
        }
    }

    Ok(())
}

fn is_plain_file_name(name: &str) -> bool {
    !name.is_empty() && name != "." && name != ".." && !name.contains(['/', '\\'])
}

fn invalid(msg: &str) -> StubcheckError {
    StubcheckError::UserError(format!("config validation failed: {}", msg))
}
