//! Human-readable diagnostics and run summaries.

use super::RunReport;
use crate::corpus::PuzzleId;
use serde_json::{Map, Value, json};
use std::io::Write;

/// Frame around tool output, checker output, and stub source.
pub const SEPARATOR: &str = "==============================";

/// Streams failure diagnostics as they happen.
///
/// Write errors are logged and dropped: a broken report stream must not
/// abort the batch.
pub struct Reporter<'a> {
    out: &'a mut dyn Write,
    puzzle_url_base: String,
}

impl<'a> Reporter<'a> {
    pub fn new(out: &'a mut dyn Write, puzzle_url_base: impl Into<String>) -> Self {
        Self {
            out,
            puzzle_url_base: puzzle_url_base.into(),
        }
    }

    /// Browsable link for `puzzle`.
    pub fn puzzle_url(&self, puzzle: &PuzzleId) -> String {
        format!("{}{}", self.puzzle_url_base, puzzle)
    }

    pub fn generation_failed(&mut self, puzzle: &PuzzleId, language: &str, detail: &str) {
        let block = format!(
            "\nStub generator for {} returned non-zero for clash {}\n{}\n{}\n{}\n\n",
            language,
            puzzle,
            SEPARATOR,
            detail.trim_end(),
            SEPARATOR
        );
        self.emit(&block);
    }

    pub fn validation_failed(
        &mut self,
        puzzle: &PuzzleId,
        language: &str,
        checker_detail: &str,
        source: &[u8],
    ) {
        let block = format!(
            "\nError with {} stub for clash {}\n{}\n{}\n{}\n{}\n{}\n{}\n\n",
            language,
            puzzle,
            self.puzzle_url(puzzle),
            SEPARATOR,
            checker_detail.trim_end(),
            SEPARATOR,
            String::from_utf8_lossy(source).trim_end(),
            SEPARATOR
        );
        self.emit(&block);
    }

    fn emit(&mut self, block: &str) {
        if let Err(e) = self
            .out
            .write_all(block.as_bytes())
            .and_then(|_| self.out.flush())
        {
            tracing::warn!(error = %e, "failed to write diagnostic");
        }
    }
}

/// One line per language: `c: checked=2 skipped=0 errors=0`.
pub fn format_summary(report: &RunReport) -> String {
    let mut summary = String::new();
    for (language, tally) in report.iter() {
        summary.push_str(&format!(
            "{}: checked={} skipped={} errors={}\n",
            language, tally.checked, tally.skipped, tally.errors
        ));
    }
    summary
}

/// Machine-readable form of the run.
pub fn report_json(report: &RunReport) -> Value {
    let mut languages = Map::new();
    for (language, tally) in report.iter() {
        languages.insert(
            language.to_string(),
            json!({
                "checked": tally.checked,
                "skipped": tally.skipped,
                "errors": tally.errors,
                "passed": tally.passed(),
                "attempted": tally.attempted(),
            }),
        );
    }

    json!({
        "started_at": report.started_at.to_rfc3339(),
        "finished_at": report.finished_at.to_rfc3339(),
        "puzzles": report.puzzles_processed,
        "languages": languages,
    })
}
