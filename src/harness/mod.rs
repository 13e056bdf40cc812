//! Stub validation harness.
//!
//! - [`runner`]: classify one (puzzle, language) pair
//! - [`batch`]: drive the runner over puzzles x languages and tally results
//! - [`report`]: diagnostic blocks and the final summary

pub mod batch;
pub mod report;
pub mod runner;


pub use batch::run_batch;
pub use report::Reporter;
pub use runner::check_stub;

use chrono::{DateTime, Utc};

/// Why a checked pair counts as an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The tool failed for a reason other than a missing generator.
    GenerationError,
    /// The tool produced a stub that the checker rejected.
    ValidationFailure,
}

/// Classification of one (puzzle, language) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationOutcome {
    /// No stub generator for this language; routine, not counted as checked.
    Skipped,
    Passed,
    Failed(FailureKind),
}

/// Per-language counters for one run.
///
/// `checked` counts passes and failures; `passed()` is derived so that
/// `checked == passed + errors` always holds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LanguageTally {
    pub checked: usize,
    pub skipped: usize,
    pub errors: usize,
}

impl LanguageTally {
    pub fn record(&mut self, outcome: ValidationOutcome) {
        match outcome {
            ValidationOutcome::Skipped => self.skipped += 1,
            ValidationOutcome::Passed => self.checked += 1,
            ValidationOutcome::Failed(_) => {
                self.checked += 1;
                self.errors += 1;
            }
        }
    }

    pub fn passed(&self) -> usize {
        self.checked - self.errors
    }

    /// Puzzles attempted for this language.
    pub fn attempted(&self) -> usize {
        self.checked + self.skipped
    }
}

/// Result of one batch run: a tally per language, in registry order.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub puzzles_processed: usize,
    tallies: Vec<(String, LanguageTally)>,
}

impl RunReport {
    pub(crate) fn new(languages: &[&str], started_at: DateTime<Utc>) -> Self {
        Self {
            started_at,
            finished_at: started_at,
            puzzles_processed: 0,
            tallies: languages
                .iter()
                .map(|name| (name.to_string(), LanguageTally::default()))
                .collect(),
        }
    }

    pub(crate) fn tally_mut(&mut self, language: &str) -> Option<&mut LanguageTally> {
        self.tallies
            .iter_mut()
            .find(|(name, _)| name == language)
            .map(|(_, tally)| tally)
    }

    #[allow(dead_code)]
    pub fn tally(&self, language: &str) -> Option<&LanguageTally> {
        self.tallies
            .iter()
            .find(|(name, _)| name == language)
            .map(|(_, tally)| tally)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &LanguageTally)> {
        self.tallies.iter().map(|(name, tally)| (name.as_str(), tally))
    }

    pub fn total_errors(&self) -> usize {
        self.tallies.iter().map(|(_, tally)| tally.errors).sum()
    }

    pub fn has_errors(&self) -> bool {
        self.total_errors() > 0
    }

    /// Languages that recorded at least one error.
    pub fn failing_languages(&self) -> Vec<&str> {
        self.iter()
            .filter(|(_, tally)| tally.errors > 0)
            .map(|(name, _)| name)
            .collect()
    }
}
