//! Validation of a single (puzzle, language) pair.

use super::report::Reporter;
use super::{FailureKind, ValidationOutcome};
use crate::corpus::PuzzleId;
use crate::tool::{StubGeneration, StubTool};
use crate::validator::{CheckOutcome, Validator};

/// Generate the stub for `language` and check it.
///
/// `puzzle` must already be the tool's current puzzle. Skips are silent;
/// every failure is written to `reporter`. Never retries and never fails:
/// whatever goes wrong is folded into the returned outcome.
pub fn check_stub(
    tool: &mut dyn StubTool,
    puzzle: &PuzzleId,
    language: &str,
    validator: &dyn Validator,
    reporter: &mut Reporter<'_>,
) -> ValidationOutcome {
    let source = match tool.generate_stub(language) {
        StubGeneration::Generated(source) => source,
        StubGeneration::NoGenerator => {
            tracing::debug!(%puzzle, language, "no stub generator, skipping");
            return ValidationOutcome::Skipped;
        }
        StubGeneration::Failed { detail } => {
            tracing::debug!(%puzzle, language, "stub generation failed");
            reporter.generation_failed(puzzle, language, &detail);
            return ValidationOutcome::Failed(FailureKind::GenerationError);
        }
    };

    match validator.check(&source) {
        CheckOutcome::Valid => {
            tracing::debug!(%puzzle, language, "stub is valid");
            ValidationOutcome::Passed
        }
        CheckOutcome::Invalid { detail } => {
            tracing::debug!(%puzzle, language, "stub rejected by checker");
            reporter.validation_failed(puzzle, language, &detail, &source);
            ValidationOutcome::Failed(FailureKind::ValidationFailure)
        }
    }
}
