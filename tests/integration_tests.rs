//! Integration tests for the snackpub binary.
//!
//! These cover the CLI surface and startup validation; the webhook flow
//! itself is covered by the router tests in `src/server.rs`.

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::TempDir;

/// Helper to create a snackpub Command.
fn snackpub() -> Command {
    cargo_bin_cmd!("snackpub")
}

#[test]
fn test_help() {
    snackpub()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--port"));
}

#[test]
fn test_version() {
    snackpub().arg("--version").assert().success();
}

#[test]
fn test_unknown_flag_fails() {
    snackpub().arg("--bogus").assert().failure();
}

#[test]
fn test_startup_fails_without_secret() {
    // Run from an empty directory so no .env file can supply configuration.
    let dir = TempDir::new().unwrap();
    snackpub()
        .current_dir(dir.path())
        .env_remove("SNACKPUB_SECRET")
        .env_remove("GITHUB_TOKEN")
        .env_remove("SNACKPUB_OWNER")
        .env_remove("SNACKPUB_REPO")
        .assert()
        .failure()
        .stderr(predicate::str::contains("SNACKPUB_SECRET"));
}

#[test]
fn test_startup_fails_without_token() {
    let dir = TempDir::new().unwrap();
    snackpub()
        .current_dir(dir.path())
        .env("SNACKPUB_SECRET", "s3cret")
        .env_remove("GITHUB_TOKEN")
        .env_remove("SNACKPUB_OWNER")
        .env_remove("SNACKPUB_REPO")
        .assert()
        .failure()
        .stderr(predicate::str::contains("GITHUB_TOKEN"));
}
