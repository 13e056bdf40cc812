//! End-to-end tests for a full run against a scripted stub tool.

use super::*;
use crate::config::LanguageCheck;
use crate::exit_codes;
use crate::harness::LanguageTally;
use crate::test_support::{create_corpus, fake_tool_config};
use clap::Parser;
use std::path::Path;
use std::time::Duration;
use tempfile::TempDir;

const VALID_STUB: &str = "echo 'int main(void){return 0;}'";
const INVALID_STUB: &str = "echo 'int foo(void){return 0;}'";

/// Write a config using the fake tool and a `grep`-based C checker.
fn write_config(dir: &Path, stub_body: &str, languages: Vec<LanguageCheck>) -> String {
    let config = Config {
        languages,
        ..fake_tool_config(dir, stub_body)
    };
    let path = dir.join("stubcheck.yaml");
    std::fs::write(&path, config.to_yaml().unwrap()).unwrap();
    path.to_string_lossy().into_owned()
}

fn c_checker() -> Vec<LanguageCheck> {
    vec![LanguageCheck::stdin("c", "grep -q main")]
}

fn cli(args: &[&str]) -> Cli {
    let mut argv = vec!["stubcheck"];
    argv.extend_from_slice(args);
    Cli::try_parse_from(argv).unwrap()
}

fn run_cli(cli: &Cli) -> Result<(RunReport, String)> {
    let config = resolve_config(cli)?;
    let mut out = Vec::new();
    let report = execute(cli, &config, &mut out)?;
    Ok((report, String::from_utf8(out).unwrap()))
}

#[test]
fn test_resolve_config_applies_overrides() {
    let cli = cli(&[
        "--tool",
        "clash",
        "--tool-timeout",
        "3",
        "--check-timeout",
        "4",
        "--fail-on-errors",
        "--clash-dir",
        "/tmp/clashes",
        "--lang",
        "rust,c",
    ]);

    let config = resolve_config(&cli).unwrap();

    assert_eq!(config.tool, "clash");
    assert_eq!(config.tool_timeout_seconds, 3);
    assert_eq!(config.check_timeout_seconds, 4);
    assert!(config.fail_on_errors);
    assert_eq!(config.clash_dir.as_deref(), Some("/tmp/clashes"));
    assert_eq!(config.language_names(), vec!["rust", "c"]);
}

#[test]
fn test_check_timeout_flag_beats_per_language_timeout() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("stubcheck.yaml");
    std::fs::write(
        &path,
        r#"
check_timeout_seconds: 60
languages:
  - name: rust
    command: "rustc --emit=metadata -"
    timeout_seconds: 99
"#,
    )
    .unwrap();
    let path = path.to_str().unwrap();

    let from_file = resolve_config(&cli(&["--config", path])).unwrap();
    assert_eq!(
        from_file.check_timeout(&from_file.languages[0]),
        Duration::from_secs(99)
    );

    let overridden = resolve_config(&cli(&["--config", path, "--check-timeout", "4"])).unwrap();
    assert_eq!(
        overridden.check_timeout(&overridden.languages[0]),
        Duration::from_secs(4)
    );
}

#[test]
fn test_resolve_config_rejects_zero_timeout_override() {
    let err = resolve_config(&cli(&["--check-timeout", "0"])).unwrap_err();
    assert_eq!(err.exit_code(), exit_codes::USER_ERROR);
}

#[test]
fn test_resolve_config_unknown_language() {
    let err = resolve_config(&cli(&["--lang", "cobol"])).unwrap_err();
    assert!(err.to_string().contains("unknown language 'cobol'"));
}

#[test]
fn test_resolve_config_missing_file() {
    let err = resolve_config(&cli(&["--config", "/nonexistent/stubcheck.yaml"])).unwrap_err();
    assert!(err.to_string().contains("failed to read config file"));
}

#[cfg(unix)]
#[test]
fn test_full_run_over_valid_stubs() {
    let tool_dir = TempDir::new().unwrap();
    let corpus = create_corpus(&["p1", "p2"]);
    let config_path = write_config(tool_dir.path(), VALID_STUB, c_checker());

    let cli = cli(&[
        "--config",
        &config_path,
        "--clash-dir",
        corpus.path().to_str().unwrap(),
    ]);
    let (report, output) = run_cli(&cli).unwrap();

    assert_eq!(
        report.tally("c"),
        Some(&LanguageTally {
            checked: 2,
            skipped: 0,
            errors: 0
        })
    );
    assert!(output.is_empty());
    assert!(finish(&resolve_config(&cli).unwrap(), &report).is_ok());
}

#[cfg(unix)]
#[test]
fn test_full_run_skips_languages_without_generator() {
    let tool_dir = TempDir::new().unwrap();
    let corpus = create_corpus(&["p1", "p2", "p3"]);
    let stub_body = "if [ \"$lang\" = bash ]; then \
                     echo 'Current clash provides no input stub generator' >&2; exit 1; \
                     fi; echo 'int main(void){return 0;}'";
    let config_path = write_config(
        tool_dir.path(),
        stub_body,
        vec![
            LanguageCheck::stdin("c", "grep -q main"),
            LanguageCheck::stdin("bash", "true"),
        ],
    );

    let cli = cli(&[
        "--config",
        &config_path,
        "--clash-dir",
        corpus.path().to_str().unwrap(),
    ]);
    let (report, output) = run_cli(&cli).unwrap();

    let bash = report.tally("bash").unwrap();
    assert_eq!((bash.checked, bash.skipped, bash.errors), (0, 3, 0));
    assert_eq!(report.tally("c").unwrap().checked, 3);
    assert!(output.is_empty());
}

#[cfg(unix)]
#[test]
fn test_full_run_reports_invalid_stubs() {
    let tool_dir = TempDir::new().unwrap();
    let corpus = create_corpus(&["p1", "p2"]);
    let config_path = write_config(tool_dir.path(), INVALID_STUB, c_checker());

    let cli = cli(&[
        "--config",
        &config_path,
        "--clash-dir",
        corpus.path().to_str().unwrap(),
    ]);
    let (report, output) = run_cli(&cli).unwrap();

    let c = report.tally("c").unwrap();
    assert_eq!((c.checked, c.skipped, c.errors), (2, 0, 2));
    assert!(output.contains("Error with c stub for clash p1"));
    assert!(output.contains("https://www.codingame.com/contribute/view/p2"));
    assert!(output.contains("int foo(void){return 0;}"));

    // Failures are reported but do not fail the process by default.
    assert!(finish(&resolve_config(&cli).unwrap(), &report).is_ok());
}

#[cfg(unix)]
#[test]
fn test_stray_byte_in_stub_reaches_checker() {
    let tool_dir = TempDir::new().unwrap();
    let corpus = create_corpus(&["p1"]);
    // The checker fails as soon as it sees a 0xFF byte.
    let config_path = write_config(
        tool_dir.path(),
        "printf 'fn main(){}\\n// \\377\\n'",
        vec![LanguageCheck::stdin(
            "rust",
            "sh -c 'od -An -tx1 | grep -q ff && exit 1; exit 0'",
        )],
    );

    let cli = cli(&[
        "--config",
        &config_path,
        "--clash-dir",
        corpus.path().to_str().unwrap(),
    ]);
    let (report, output) = run_cli(&cli).unwrap();

    let rust = report.tally("rust").unwrap();
    assert_eq!((rust.checked, rust.skipped, rust.errors), (1, 0, 1));
    assert!(output.contains("Error with rust stub for clash p1"));
}

#[cfg(unix)]
#[test]
fn test_fail_on_errors_sets_validation_exit_code() {
    let tool_dir = TempDir::new().unwrap();
    let corpus = create_corpus(&["p1"]);
    let config_path = write_config(tool_dir.path(), INVALID_STUB, c_checker());

    let cli = cli(&[
        "--config",
        &config_path,
        "--clash-dir",
        corpus.path().to_str().unwrap(),
        "--fail-on-errors",
    ]);
    let (report, _) = run_cli(&cli).unwrap();

    let err = finish(&resolve_config(&cli).unwrap(), &report).unwrap_err();
    assert_eq!(err.exit_code(), exit_codes::VALIDATION_FAILURE);
    assert!(err.to_string().contains("c: 1 errors"));
}

#[cfg(unix)]
#[test]
fn test_oversized_sample_fails_before_processing() {
    let tool_dir = TempDir::new().unwrap();
    let corpus = create_corpus(&["p1", "p2"]);
    let config_path = write_config(tool_dir.path(), VALID_STUB, c_checker());

    let cli = cli(&[
        "5",
        "--config",
        &config_path,
        "--clash-dir",
        corpus.path().to_str().unwrap(),
    ]);
    let err = run_cli(&cli).unwrap_err();

    assert!(matches!(
        err,
        StubcheckError::InsufficientCorpus {
            requested: 5,
            available: 2
        }
    ));
    // The fake tool records the current puzzle on `next`; it was never called.
    assert!(!tool_dir.path().join("current").exists());
}

#[cfg(unix)]
#[test]
fn test_seeded_sample_run_is_reproducible() {
    let tool_dir = TempDir::new().unwrap();
    let corpus = create_corpus(&["p1", "p2", "p3", "p4", "p5"]);
    let stub_body = "if [ \"$id\" = p3 ]; then echo 'int foo(void);'; \
                     else echo 'int main(void){return 0;}'; fi";
    let config_path = write_config(tool_dir.path(), stub_body, c_checker());

    let cli = cli(&[
        "3",
        "--seed",
        "11",
        "--config",
        &config_path,
        "--clash-dir",
        corpus.path().to_str().unwrap(),
    ]);
    let (first, first_output) = run_cli(&cli).unwrap();
    let (second, second_output) = run_cli(&cli).unwrap();

    assert_eq!(first.puzzles_processed, 3);
    assert_eq!(first.tally("c"), second.tally("c"));
    assert_eq!(first_output, second_output);
}

#[test]
fn test_missing_corpus_is_user_error() {
    let cli = cli(&["--clash-dir", "/nonexistent/clashes"]);

    let err = run_cli(&cli).unwrap_err();
    assert_eq!(err.exit_code(), exit_codes::USER_ERROR);
}

#[cfg(unix)]
#[test]
fn test_render_json_report() {
    let tool_dir = TempDir::new().unwrap();
    let corpus = create_corpus(&["p1"]);
    let config_path = write_config(tool_dir.path(), VALID_STUB, c_checker());

    let cli = cli(&[
        "--config",
        &config_path,
        "--clash-dir",
        corpus.path().to_str().unwrap(),
        "--json",
    ]);
    let (report, _) = run_cli(&cli).unwrap();
    let rendered = render_json(&report).unwrap();

    let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();
    assert_eq!(value["languages"]["c"]["checked"], 1);
    assert_eq!(value["puzzles"], 1);
}
