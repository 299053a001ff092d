use assert_cmd::Command;
use predicates::prelude::*;

/// Helper to get a Command for the modsan binary.
#[allow(deprecated)]
fn modsan_cmd() -> Command {
    Command::cargo_bin("modsan").unwrap()
}

#[test]
fn help_works() {
    modsan_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("sanitize"))
        .stdout(predicate::str::contains("run"));
}

#[test]
fn sanitize_requires_a_file() {
    modsan_cmd().arg("sanitize").assert().failure().code(1);
}

#[test]
fn version_exits_zero() {
    modsan_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("modsan"));
}

#[test]
fn mistyped_flag_with_check_is_not_mistaken_for_changes() {
    modsan_cmd()
        .args(["run", "--check", "--reprot-out", "out.json"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("--reprot-out"));
}

#[test]
fn group_without_module_is_rejected() {
    modsan_cmd()
        .args(["sanitize", "module.json", "--group", "com.wonder"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("--module"));
}
