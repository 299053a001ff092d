//! End-to-end CLI integration tests using test fixtures.
//!
//! Each fixture in `tests/fixtures/` contains:
//! - `repo/`: a Gradle build tree with generated `module.json` files (and optionally
//!   `modsan.toml` or `publish.json`)
//! - `expected/`: the exact bytes every listed file must have after the run
//! - `expected.report.json`: the expected report (timestamps, version, and error text use
//!   placeholders)
//!
//! The fixture tree is copied to a temp dir before each run since `modsan run` rewrites files
//! in place.

use assert_cmd::Command;
use modsan_test_util::normalize_nondeterministic;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use walkdir::WalkDir;

/// Helper to get a Command for the modsan binary.
#[allow(deprecated)]
fn modsan_cmd() -> Command {
    Command::cargo_bin("modsan").expect("modsan binary not found - run `cargo build` first")
}

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .expect("modsan-cli crate should have a parent directory")
        .parent()
        .expect("crates directory should have a parent (repo root)")
        .join("tests")
        .join("fixtures")
}

fn copy_tree(from: &Path, to: &Path) {
    for entry in WalkDir::new(from) {
        let entry = entry.expect("walk fixture");
        let rel = entry.path().strip_prefix(from).expect("under fixture");
        let dest = to.join(rel);
        if entry.file_type().is_dir() {
            std::fs::create_dir_all(&dest).expect("create dir");
        } else {
            std::fs::copy(entry.path(), &dest).expect("copy file");
        }
    }
}

/// Replace per-file error text, which embeds absolute temp paths.
fn normalize_errors(mut value: Value) -> Value {
    if let Some(files) = value.get_mut("files").and_then(Value::as_array_mut) {
        for file in files {
            if let Some(obj) = file.as_object_mut()
                && obj.contains_key("error")
            {
                obj.insert("error".to_string(), Value::String("__ERROR__".to_string()));
            }
        }
    }
    value
}

struct FixtureRun {
    tmp: TempDir,
    repo: PathBuf,
    exit_code: i32,
    report: Value,
    stderr: String,
}

fn run_fixture(name: &str, extra_args: &[&str]) -> FixtureRun {
    let tmp = TempDir::new().expect("temp dir");
    let repo = tmp.path().join("repo");
    copy_tree(&fixtures_dir().join(name).join("repo"), &repo);
    let report_path = tmp.path().join("out").join("report.json");

    let output = modsan_cmd()
        .arg("--repo-root")
        .arg(&repo)
        .arg("run")
        .arg("--report-out")
        .arg(&report_path)
        .args(extra_args)
        .output()
        .expect("run modsan");

    let report_text = std::fs::read_to_string(&report_path).expect("read report");
    FixtureRun {
        tmp,
        repo,
        exit_code: output.status.code().unwrap_or(-1),
        report: serde_json::from_str(&report_text).expect("parse report"),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    }
}

fn assert_report_matches(run: &FixtureRun, name: &str) {
    let expected_text = std::fs::read_to_string(fixtures_dir().join(name).join("expected.report.json"))
        .expect("read expected report");
    let expected: Value = serde_json::from_str(&expected_text).expect("parse expected report");

    let actual = normalize_errors(normalize_nondeterministic(run.report.clone()));
    let expected = normalize_errors(normalize_nondeterministic(expected));
    assert_eq!(
        actual,
        expected,
        "report mismatch for fixture '{}'.\n\nActual:\n{}\n\nExpected:\n{}",
        name,
        serde_json::to_string_pretty(&actual).unwrap(),
        serde_json::to_string_pretty(&expected).unwrap()
    );
}

fn assert_files_match(run: &FixtureRun, name: &str) {
    let expected_root = fixtures_dir().join(name).join("expected");
    let mut checked = 0;
    for entry in WalkDir::new(&expected_root) {
        let entry = entry.expect("walk expected");
        if !entry.file_type().is_file() {
            continue;
        }
        let rel = entry.path().strip_prefix(&expected_root).expect("under expected");
        let expected = std::fs::read_to_string(entry.path()).expect("read expected file");
        let actual = std::fs::read_to_string(run.repo.join(rel)).expect("read actual file");
        assert_eq!(
            actual,
            expected,
            "file mismatch for fixture '{}': {}",
            name,
            rel.display()
        );
        checked += 1;
    }
    assert!(checked > 0, "fixture '{name}' lists no expected files");
}

// ============================================================================
// Fixture tests
// ============================================================================

#[test]
fn fixture_discover_sanitizes_every_publication_file() {
    let run = run_fixture("discover", &[]);
    assert_eq!(run.exit_code, 0, "stderr: {}", run.stderr);
    assert_report_matches(&run, "discover");
    assert_files_match(&run, "discover");
}

#[test]
fn fixture_publish_json_limits_to_listed_modules() {
    let run = run_fixture("publish_json", &[]);
    assert_eq!(run.exit_code, 0, "stderr: {}", run.stderr);
    assert_report_matches(&run, "publish_json");
    assert_files_match(&run, "publish_json");
}

#[test]
fn fixture_config_modules_use_custom_rules_and_indent() {
    let run = run_fixture("config_modules", &[]);
    assert_eq!(run.exit_code, 0, "stderr: {}", run.stderr);
    assert_report_matches(&run, "config_modules");
    assert_files_match(&run, "config_modules");
}

#[test]
fn fixture_malformed_fails_but_sanitizes_the_rest() {
    let run = run_fixture("malformed", &[]);
    assert_eq!(run.exit_code, 1, "stderr: {}", run.stderr);
    assert_report_matches(&run, "malformed");
    assert_files_match(&run, "malformed");

    let error = run.report["files"][1]["error"].as_str().expect("error text");
    assert!(error.starts_with("malformed document "), "{error}");
}

#[test]
fn check_mode_exits_two_and_leaves_files() {
    let run = run_fixture("discover", &["--check"]);
    assert_eq!(run.exit_code, 2, "stderr: {}", run.stderr);
    assert_eq!(run.report["verdict"], "changed");
    assert_eq!(run.report["mode"], "check");
    assert_eq!(run.report["files"][0]["outcome"], "would_change");
    assert_eq!(run.report["data"]["dependencies_removed"], 3);

    let original = fixtures_dir().join("discover").join("repo");
    for rel in [
        "api/build/publications/apiInterface/module.json",
        "client/build/publications/apiInterface/module.json",
    ] {
        assert_eq!(
            std::fs::read_to_string(run.repo.join(rel)).expect("read"),
            std::fs::read_to_string(original.join(rel)).expect("read"),
            "{rel} was modified in check mode"
        );
    }
}

#[test]
fn check_mode_after_write_passes() {
    let first = run_fixture("discover", &[]);
    assert_eq!(first.exit_code, 0, "stderr: {}", first.stderr);

    let report_path = first.tmp.path().join("second.json");
    let output = modsan_cmd()
        .arg("--repo-root")
        .arg(&first.repo)
        .args(["run", "--check", "--report-out"])
        .arg(&report_path)
        .output()
        .expect("run modsan");
    assert_eq!(output.status.code(), Some(0));
    let report: Value =
        serde_json::from_str(&std::fs::read_to_string(&report_path).expect("read")).expect("json");
    assert_eq!(report["verdict"], "pass");
    assert_eq!(report["data"]["files_changed"], 0);
}

#[test]
fn write_markdown_and_md_command_render_the_report() {
    let tmp = TempDir::new().expect("temp dir");
    let repo = tmp.path().join("repo");
    copy_tree(&fixtures_dir().join("discover").join("repo"), &repo);
    let report_path = tmp.path().join("report.json");
    let markdown_path = tmp.path().join("report.md");

    modsan_cmd()
        .arg("--repo-root")
        .arg(&repo)
        .args(["run", "--write-markdown", "--report-out"])
        .arg(&report_path)
        .arg("--markdown-out")
        .arg(&markdown_path)
        .assert()
        .success();

    let written = std::fs::read_to_string(&markdown_path).expect("read markdown");
    assert!(written.starts_with("# Modsan report"), "{written}");
    assert!(written.contains("[SANITIZED] `api/build/publications/apiInterface/module.json`"));

    let output = modsan_cmd()
        .arg("md")
        .arg("--report")
        .arg(&report_path)
        .output()
        .expect("run md");
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), written);
}

#[test]
fn invalid_config_still_writes_a_failing_report() {
    let tmp = TempDir::new().expect("temp dir");
    let repo = tmp.path().join("repo");
    std::fs::create_dir_all(&repo).expect("create repo");
    std::fs::write(repo.join("modsan.toml"), "indent = 99\n").expect("write config");
    let report_path = tmp.path().join("report.json");

    let output = modsan_cmd()
        .arg("--repo-root")
        .arg(&repo)
        .args(["run", "--report-out"])
        .arg(&report_path)
        .output()
        .expect("run modsan");
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("modsan error: resolve config"));

    let report: Value =
        serde_json::from_str(&std::fs::read_to_string(&report_path).expect("read")).expect("json");
    assert_eq!(report["verdict"], "fail");
    let message = report["data"]["runtime_error"].as_str().expect("runtime error");
    assert!(message.contains("indent 99"), "{message}");
}
