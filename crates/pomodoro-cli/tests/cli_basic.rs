//! Basic CLI E2E tests.
//!
//! Tests invoke CLI commands via cargo run with HOME pointed at a scratch
//! directory and verify outputs.

use std::path::Path;
use std::process::Command;

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(home: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new("cargo")
        .args(["run", "-q", "-p", "pomodoro-cli", "--"])
        .args(args)
        .env("HOME", home)
        .env_remove("POMODORO_ENV")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

fn run_json(home: &Path, args: &[&str]) -> serde_json::Value {
    let (stdout, stderr, code) = run_cli(home, args);
    assert_eq!(code, 0, "CLI failed for {args:?}: {stderr}");
    serde_json::from_str(&stdout).expect("Failed to parse JSON output")
}

#[test]
fn test_format_pads_minutes_and_seconds() {
    let home = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(home.path(), &["format", "65"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "01:05");
}

#[test]
fn test_simulate_first_pomodoro() {
    let home = tempfile::tempdir().unwrap();
    let json = run_json(home.path(), &["simulate", "--script", "w t1500"]);

    assert_eq!(json["phase"], "resting");
    assert_eq!(json["rest"], "short");
    assert_eq!(json["remaining_secs"], 300);
    assert_eq!(json["readout"], "05:00");
    assert_eq!(json["stats"]["completed_pomodoros"], 1);
    assert_eq!(json["cues"], serde_json::json!(["work_start", "rest_start"]));
}

#[test]
fn test_simulate_full_cycle_with_overrides() {
    let home = tempfile::tempdir().unwrap();
    let json = run_json(
        home.path(),
        &[
            "simulate", "--work", "10", "--short-rest", "2", "--long-rest", "7",
            "--cycles", "2", "--script", "w t10 t2 t10",
        ],
    );

    assert_eq!(json["phase"], "resting");
    assert_eq!(json["rest"], "long");
    assert_eq!(json["remaining_secs"], 7);
    assert_eq!(json["stats"]["completed_cycles"], 1);
    assert_eq!(json["stats"]["total_work_secs"], 20);
    assert_eq!(json["theme"], "resting");
}

#[test]
fn test_simulate_pause_freezes_countdown() {
    let home = tempfile::tempdir().unwrap();
    let json = run_json(home.path(), &["simulate", "--script", "w t5 p t100"]);

    assert_eq!(json["phase"], "working");
    assert_eq!(json["remaining_secs"], 1495);
    assert_eq!(json["counting"], false);
    assert_eq!(json["controls"]["play_pause_label"], "Play");
}

#[test]
fn test_simulate_rejects_bad_script() {
    let home = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_cli(home.path(), &["simulate", "--script", "w jump"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("unknown script step"));
}

#[test]
fn test_simulate_rejects_zero_cycles() {
    let home = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_cli(home.path(), &["simulate", "--cycles", "0"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("cycles"));
}

#[test]
fn test_config_set_then_get() {
    let home = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(home.path(), &["config", "set", "timer.work_secs", "600"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "ok");

    let (stdout, _, code) = run_cli(home.path(), &["config", "get", "timer.work_secs"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "600");

    let json = run_json(home.path(), &["simulate"]);
    assert_eq!(json["remaining_secs"], 600);
    assert_eq!(json["phase"], "idle");
}

#[test]
fn test_config_rejects_unknown_key() {
    let home = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_cli(home.path(), &["config", "set", "timer.speed", "2"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("Unknown configuration key"));
}

#[test]
fn test_config_path_under_home() {
    let home = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(home.path(), &["config", "path"]);
    assert_eq!(code, 0);
    assert!(stdout.trim().ends_with(".config/pomodoro/config.toml"));
}
