//! Cross-product driver: every puzzle, every language.

use super::report::Reporter;
use super::runner::check_stub;
use super::RunReport;
use crate::corpus::PuzzleId;
use crate::tool::StubTool;
use crate::validator::ValidatorRegistry;
use chrono::Utc;

/// Check every puzzle in every registered language.
///
/// Puzzles are processed strictly in order because the tool's current-puzzle
/// cursor is shared by every stub request. A failed `select` is logged and
/// otherwise ignored; its consequences surface as generation failures.
pub fn run_batch(
    tool: &mut dyn StubTool,
    puzzles: &[PuzzleId],
    registry: &ValidatorRegistry,
    reporter: &mut Reporter<'_>,
) -> RunReport {
    let mut report = RunReport::new(&registry.names(), Utc::now());

    for (index, puzzle) in puzzles.iter().enumerate() {
        tracing::info!(%puzzle, progress = index + 1, total = puzzles.len(), "checking puzzle");

        if let Err(e) = tool.select(puzzle) {
            tracing::warn!(%puzzle, error = %e, "failed to select puzzle");
        }

        for entry in registry.iter() {
            let outcome = check_stub(
                tool,
                puzzle,
                &entry.name,
                entry.validator.as_ref(),
                reporter,
            );
            if let Some(tally) = report.tally_mut(&entry.name) {
                tally.record(outcome);
            }
        }

        report.puzzles_processed += 1;
    }

    report.finished_at = Utc::now();
    tracing::info!(
        puzzles = report.puzzles_processed,
        errors = report.total_errors(),
        "run finished"
    );
    report
}
