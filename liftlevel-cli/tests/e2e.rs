//! End-to-end integration tests for liftlevel-cli
//!
//! These tests build and run the binary through cargo and are gated behind
//! the `integration` feature flag. Run with:
//!
//! ```sh
//! cargo test -p liftlevel-cli --features integration
//! ```

#![cfg(feature = "integration")]

use std::process::{Command, Output};

fn liftlevel(args: &[&str], project_dir: &std::path::Path) -> Output {
    Command::new("cargo")
        .args(["run", "-q", "-p", "liftlevel-cli", "--"])
        .args(args)
        .env("LIFTLEVEL_PROJECT_CONFIG_DIR", project_dir)
        .output()
        .expect("Failed to run liftlevel")
}

/// Test that liftlevel --help lists the subcommands
#[test]
fn liftlevel_help_works() {
    let dir = tempfile::tempdir().unwrap();
    let output = liftlevel(&["--help"], dir.path());

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("serve"));
    assert!(stdout.contains("status"));
    assert!(stdout.contains("reset"));
    assert!(stdout.contains("config"));
}

/// Test that config show applies the project layer
#[test]
fn liftlevel_config_show_reads_project_config() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("config.toml"), "[server]\nport = 6123\n").unwrap();

    let output = liftlevel(&["config", "show"], dir.path());

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("[server]"));
    assert!(stdout.contains("port = 6123"));
    assert!(stdout.contains("history_limit = 10"));
}

/// Test that status on a fresh database reports level 1
#[test]
fn liftlevel_status_on_fresh_database() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("liftlevel.db");

    let output = liftlevel(&["status", "--database", db.to_str().unwrap()], dir.path());

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Level:    1"));
    assert!(stdout.contains("Workouts: 0"));
}

/// Test that reset refuses to run without --yes
#[test]
fn liftlevel_reset_requires_yes() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("liftlevel.db");

    let output = liftlevel(&["reset", "--database", db.to_str().unwrap()], dir.path());

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("--yes"));
}
