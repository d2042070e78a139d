//! Integration tests for the seatbook CLI.
//!
//! These tests verify argument parsing, help text and version output.

mod common;

use common::TestEnv;
use predicates::prelude::*;

#[test]
fn test_cli_no_arguments() {
    let env = TestEnv::new();

    // Missing subcommand is a usage error, reported as invalid arguments.
    env.command_bare()
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Usage:"));
}

#[test]
fn test_cli_version_flag() {
    let env = TestEnv::new();

    env.command_bare()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("seatbook"))
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_cli_help_flag() {
    let env = TestEnv::new();

    env.command_bare()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("confirm-batch"))
        .stdout(predicate::str::contains("Book, move, cancel and confirm flight seats"));
}

#[test]
fn test_unknown_subcommand() {
    let env = TestEnv::new();

    env.command_bare().arg("teleport").assert().code(4);
}

#[test]
fn test_malformed_reservation_id() {
    let env = TestEnv::new();

    env.command()
        .args(["confirm", "abc"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("not a valid reservation id"));
}

#[test]
fn test_malformed_price() {
    let env = TestEnv::new();

    env.command()
        .args(["book", "A1", "--user", "ana@example.com", "--passenger", "Ana"])
        .args(["--identifier", "1234567890101", "--price", "12.345"])
        .assert()
        .code(4);
}

#[test]
fn test_completions_bash() {
    let env = TestEnv::new();

    env.command_bare()
        .args(["--quiet", "completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("seatbook"));
}

#[test]
fn test_manifest_has_no_direct_logging_dependency() {
    // Logging is installed through the library; the binary never calls the facade itself.
    let manifest = std::fs::read_to_string(concat!(env!("CARGO_MANIFEST_DIR"), "/Cargo.toml")).unwrap();
    assert!(!manifest.lines().any(|line| line.trim_start().starts_with("log ")));
}
