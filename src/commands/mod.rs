//! The `stubcheck` run: resolve configuration, pick puzzles, check stubs,
//! and report.

use crate::cli::Cli;
use crate::config::Config;
use crate::corpus::{default_clash_dir, select_puzzles};
use crate::error::{Result, StubcheckError};
use crate::harness::report::{format_summary, report_json};
use crate::harness::{Reporter, RunReport, run_batch};
use crate::tool::CommandStubTool;
use crate::validator::ValidatorRegistry;
use std::io::Write;
use std::path::PathBuf;

#[cfg(test)]
mod tests;

/// Run the harness, streaming diagnostics and the summary to stdout.
///
/// With `--json` the diagnostics go to stderr so stdout stays parseable.
pub fn run(cli: Cli) -> Result<()> {
    let config = resolve_config(&cli)?;

    let report = if cli.json {
        let report = execute(&cli, &config, &mut std::io::stderr().lock())?;
        write_output(&mut std::io::stdout().lock(), &render_json(&report)?)?;
        report
    } else {
        let report = execute(&cli, &config, &mut std::io::stdout().lock())?;
        write_output(&mut std::io::stdout().lock(), &format_summary(&report))?;
        report
    };

    finish(&config, &report)
}

/// Pick puzzles and check them, writing failure diagnostics to `diagnostics`.
///
/// Fails before any puzzle is processed when the configuration or corpus is
/// unusable (including a sample larger than the corpus).
pub(crate) fn execute(
    cli: &Cli,
    config: &Config,
    diagnostics: &mut dyn Write,
) -> Result<RunReport> {
    let clash_dir = resolve_clash_dir(config)?;

    let registry = ValidatorRegistry::from_config(config)?;
    let mut tool = CommandStubTool::from_config(config)?;
    let puzzles = select_puzzles(&clash_dir, cli.sample, cli.seed)?;

    tracing::info!(
        puzzles = puzzles.len(),
        languages = %registry.names().join(","),
        clash_dir = %clash_dir.display(),
        "starting run"
    );

    let mut reporter = Reporter::new(diagnostics, config.puzzle_url_base.clone());
    Ok(run_batch(&mut tool, &puzzles, &registry, &mut reporter))
}

/// Load the config file (or defaults) and apply command-line overrides.
pub(crate) fn resolve_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    if let Some(tool) = &cli.tool {
        config.tool = tool.clone();
    }
    if let Some(secs) = cli.tool_timeout {
        config.tool_timeout_seconds = secs;
    }
    if let Some(secs) = cli.check_timeout {
        // An explicit flag also beats per-language timeouts from the file.
        config.check_timeout_seconds = secs;
        for lang in &mut config.languages {
            lang.timeout_seconds = None;
        }
    }
    if cli.fail_on_errors {
        config.fail_on_errors = true;
    }
    if let Some(dir) = &cli.clash_dir {
        config.clash_dir = Some(dir.to_string_lossy().into_owned());
    }
    config.retain_languages(&cli.languages)?;

    config.validate()?;
    Ok(config)
}

fn resolve_clash_dir(config: &Config) -> Result<PathBuf> {
    match &config.clash_dir {
        Some(dir) => Ok(PathBuf::from(dir)),
        None => default_clash_dir(),
    }
}

pub(crate) fn render_json(report: &RunReport) -> Result<String> {
    serde_json::to_string_pretty(&report_json(report))
        .map(|rendered| format!("{}\n", rendered))
        .map_err(|e| StubcheckError::UserError(format!("failed to serialize report: {}", e)))
}

/// Map the finished report to the process outcome.
///
/// Failing stubs only affect the exit status when `fail_on_errors` is set.
pub(crate) fn finish(config: &Config, report: &RunReport) -> Result<()> {
    if config.fail_on_errors && report.has_errors() {
        tracing::warn!(languages = ?report.failing_languages(), "stub errors recorded");
        let failing = report
            .iter()
            .filter(|(_, tally)| tally.errors > 0)
            .map(|(language, tally)| format!("{}: {} errors", language, tally.errors))
            .collect::<Vec<_>>()
            .join(", ");
        return Err(StubcheckError::ValidationError(failing));
    }

    Ok(())
}

fn write_output(out: &mut dyn Write, text: &str) -> Result<()> {
    out.write_all(text.as_bytes())
        .and_then(|_| out.flush())
        .map_err(|e| StubcheckError::UserError(format!("failed to write output: {}", e)))
}
