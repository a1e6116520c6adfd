#![allow(deprecated)]

// Integration tests for the webaudit CLI.
//
// These tests use assert_cmd to invoke the binary and verify
// exit codes, stdout/stderr output, and side effects.

use assert_cmd::Command;
use predicates::prelude::*;

/// Helper to build a Command for the webaudit binary.
fn webaudit() -> Command {
    Command::cargo_bin("webaudit").expect("binary should exist")
}

#[test]
fn cli_version_flag() {
    webaudit()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("webaudit"));
}

#[test]
fn cli_help_flag() {
    webaudit()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Website audit"));
}

#[test]
fn run_requires_url() {
    webaudit()
        .arg("run")
        .assert()
        .failure()
        .stderr(predicate::str::contains("required"));
}

#[test]
fn show_rejects_non_numeric_id() {
    webaudit()
        .args(["show", "latest"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn quiet_conflicts_with_verbose() {
    webaudit()
        .args(["-q", "-v", "taxonomy"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}

#[test]
fn run_rejects_unknown_format() {
    webaudit()
        .args(["run", "https://example.com", "--format", "pdf"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}
