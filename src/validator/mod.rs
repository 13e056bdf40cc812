//! Per-language validity checks for generated stubs.
//!
//! A [`Validator`] answers one question: are these source bytes a valid
//! program for its language? The bytes are exactly what the stub tool
//! printed, never re-encoded. Checkers decide independently what "valid" means
//! (syntax-only for C/C++, metadata emission for Rust, type-checking for
//! Python). The [`ValidatorRegistry`] maps language ids to validators and is
//! fixed before a run starts.

mod command;
mod registry;


pub use command::CommandValidator;
pub use registry::{LanguageSpec, ValidatorRegistry};

/// Verdict of a single validity check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome {
    Valid,
    /// Rejected; `detail` carries checker output for the failure report.
    Invalid { detail: String },
}

impl CheckOutcome {
    pub fn invalid(detail: impl Into<String>) -> Self {
        CheckOutcome::Invalid {
            detail: detail.into(),
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, CheckOutcome::Valid)
    }
}

/// Capability to judge generated source for one language.
///
/// Implementations never panic on bad input: an invalid program, a missing
/// checker binary, a crash, or a timeout all produce [`CheckOutcome::Invalid`].
pub trait Validator {
    fn check(&self, source: &[u8]) -> CheckOutcome;

    fn is_valid(&self, source: &[u8]) -> bool {
        self.check(source).is_valid()
    }
}

/// Plain predicates are validators.
impl<F> Validator for F
where
    F: Fn(&[u8]) -> bool,
{
    fn check(&self, source: &[u8]) -> CheckOutcome {
        if self(source) {
            CheckOutcome::Valid
        } else {
            CheckOutcome::invalid("rejected by validity predicate")
        }
    }
}
