//! Language id to validator mapping.

use super::{CommandValidator, Validator};
use crate::config::Config;
use crate::error::{Result, StubcheckError};

/// A language id paired with its validity check.
pub struct LanguageSpec {
    pub name: String,
    pub validator: Box<dyn Validator>,
}

impl std::fmt::Debug for LanguageSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LanguageSpec")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Ordered set of languages to check.
///
/// Order is preserved and determines both the check order within a puzzle
/// and the order of the final report.
#[derive(Debug, Default)]
pub struct ValidatorRegistry {
    entries: Vec<LanguageSpec>,
}

impl ValidatorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a language; fails if `name` is already registered.
    pub fn with(
        mut self,
        name: impl Into<String>,
        validator: impl Validator + 'static,
    ) -> Result<Self> {
        self.register(name.into(), Box::new(validator))?;
        Ok(self)
    }

    /// Build command validators for every configured language.
    pub fn from_config(config: &Config) -> Result<Self> {
        let mut registry = Self::new();
        for lang in &config.languages {
            let validator = CommandValidator::from_language(lang, config.check_timeout(lang))?;
            registry.register(lang.name.clone(), Box::new(validator))?;
        }
        Ok(registry)
    }

    fn register(&mut self, name: String, validator: Box<dyn Validator>) -> Result<()> {
        if self.get(&name).is_some() {
            return Err(StubcheckError::UserError(format!(
                "language '{}' is registered more than once",
                name
            )));
        }
        self.entries.push(LanguageSpec { name, validator });
        Ok(())
    }

    pub fn get(&self, language: &str) -> Option<&dyn Validator> {
        self.entries
            .iter()
            .find(|spec| spec.name == language)
            .map(|spec| spec.validator.as_ref())
    }

    /// Check `source` with the validator registered for `language`.
    #[allow(dead_code)]
    pub fn validate(&self, language: &str, source: &[u8]) -> Result<bool> {
        let validator = self.get(language).ok_or_else(|| {
            StubcheckError::UserError(format!("no validator registered for '{}'", language))
        })?;
        Ok(validator.is_valid(source))
    }

    pub fn iter(&self) -> impl Iterator<Item = &LanguageSpec> {
        self.entries.iter()
    }

    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|spec| spec.name.as_str()).collect()
    }

    #[allow(dead_code)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
