//! CLI integration tests
//!
//! Each test runs the `loglib` binary inside a fresh temp directory so the
//! default `logfile.log` lands there.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::fs;
use std::process::{Command, Output};
use tempfile::TempDir;

fn run(temp_dir: &TempDir, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_loglib"))
        .current_dir(temp_dir.path())
        .env_remove("LOG_LEVEL")
        .env_remove("LOG_PATTERN")
        .env_remove("LOG_FILE")
        .args(args)
        .output()
        .expect("Failed to execute CLI")
}

fn log_file(temp_dir: &TempDir) -> String {
    fs::read_to_string(temp_dir.path().join("logfile.log")).unwrap()
}

#[test]
fn test_emit_writes_default_log_file() {
    let temp_dir = TempDir::new().unwrap();

    let output = run(
        &temp_dir,
        &["--no-console", "emit", "--level", "ERROR", "disk", "full"],
    );

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let contents = log_file(&temp_dir);
    assert_eq!(contents.lines().count(), 1);
    assert!(contents.starts_with("[E]["));
    assert!(contents.trim_end().ends_with("disk full"));
}

#[test]
fn test_console_output_without_color() {
    let temp_dir = TempDir::new().unwrap();

    let output = run(
        &temp_dir,
        &["--no-file", "--no-color", "--pattern", "%l|%v", "emit", "hello"],
    );

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "info|hello\n");
    assert!(!temp_dir.path().join("logfile.log").exists());
}

#[test]
fn test_console_output_is_colored_by_default() {
    let temp_dir = TempDir::new().unwrap();

    let output = run(&temp_dir, &["--no-file", "emit", "--level", "WARN", "hot"]);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("[\x1b[33m\x1b[1mW\x1b[m]["), "got {stdout:?}");
}

#[test]
fn test_threshold_filters_records() {
    let temp_dir = TempDir::new().unwrap();

    let output = run(
        &temp_dir,
        &["--no-console", "--threshold", "WARN", "emit", "--level", "INFO", "quiet"],
    );

    assert!(output.status.success());
    assert_eq!(log_file(&temp_dir), "");
}

#[test]
fn test_env_level_applies_and_unknown_level_warns() {
    let temp_dir = TempDir::new().unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_loglib"))
        .current_dir(temp_dir.path())
        .env("LOG_LEVEL", "loud")
        .env_remove("LOG_PATTERN")
        .env_remove("LOG_FILE")
        .args(["--no-console", "--pattern", "%L %v", "emit", "--level", "DEBUG", "hidden"])
        .output()
        .expect("Failed to execute CLI");

    assert!(output.status.success());
    assert_eq!(
        log_file(&temp_dir),
        "W Unrecognized log level: \"loud\", using INFO\n"
    );
}

#[test]
fn test_stream_emit_joins_words() {
    let temp_dir = TempDir::new().unwrap();

    let output = run(
        &temp_dir,
        &["--no-console", "--pattern", "%v", "emit", "--stream", "a", "b", "c"],
    );

    assert!(output.status.success());
    assert_eq!(log_file(&temp_dir), "a b c\n");
}

#[test]
fn test_demo_traces_every_worker() {
    let temp_dir = TempDir::new().unwrap();

    let output = run(
        &temp_dir,
        &["--no-console", "--pattern", "%L %v", "demo", "--threads", "3", "--count", "2"],
    );

    assert!(output.status.success());
    let contents = log_file(&temp_dir);
    let entering = contents
        .lines()
        .filter(|l| l.contains("Entering function") && l.contains("worker"))
        .count();
    let exiting = contents
        .lines()
        .filter(|l| l.contains("Exiting function") && l.contains("worker"))
        .count();
    assert_eq!(entering, 3);
    assert_eq!(exiting, 3);
    assert_eq!(contents.lines().filter(|l| l.starts_with("D worker ")).count(), 6);
    assert!(contents.contains("C demo finished with 3 workers"));
    assert!(!contents.contains("sample record at OFF"));
}

#[test]
fn test_unwritable_log_file_fails_cleanly() {
    let temp_dir = TempDir::new().unwrap();
    fs::create_dir(temp_dir.path().join("taken")).unwrap();

    let output = run(&temp_dir, &["--file", "taken", "emit", "x"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to create log sink"), "stderr: {stderr}");
}

#[test]
fn test_rejects_lowercase_level_name() {
    let temp_dir = TempDir::new().unwrap();

    let output = run(&temp_dir, &["emit", "--level", "info", "x"]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Unrecognized log level"));
}
