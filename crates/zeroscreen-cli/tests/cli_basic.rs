//! Basic CLI E2E tests.
//!
//! Tests invoke the built binary against an isolated data directory and
//! verify outputs.

use std::path::Path;
use std::process::Command;

/// Run a CLI command and return (code, stdout, stderr).
fn run_cli(data_dir: &Path, args: &[&str]) -> (i32, String, String) {
    let output = Command::new(env!("CARGO_BIN_EXE_zeroscreen"))
        .args(args)
        .env("ZEROSCREEN_DATA_DIR", data_dir)
        .env_remove("ZEROSCREEN_LOG")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (code, stdout, stderr)
}

fn run_json(data_dir: &Path, args: &[&str]) -> serde_json::Value {
    let (code, stdout, stderr) = run_cli(data_dir, args);
    assert_eq!(code, 0, "{args:?} failed: {stderr}");
    serde_json::from_str(&stdout).expect("Failed to parse JSON output")
}

#[test]
fn test_status_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let status = run_json(dir.path(), &["status", "--json"]);
    assert_eq!(status["points"], 0);
    assert_eq!(status["level"], 0);
    assert_eq!(status["goal"], "0h 0m");
    assert_eq!(status["onboarding_complete"], false);
}

#[test]
fn test_goal_set_and_show() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(dir.path(), &["goal", "set", "--hours", "2", "--minutes", "30"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("2h 30m"));

    let goal = run_json(dir.path(), &["goal", "show", "--json"]);
    assert_eq!(goal["goal_seconds"], 9000);
}

#[test]
fn test_goal_rejects_out_of_range_hours() {
    let dir = tempfile::tempdir().unwrap();
    let (code, _, _) = run_cli(dir.path(), &["goal", "set", "--hours", "24"]);
    assert_ne!(code, 0);
}

#[test]
fn test_log_scores_and_persists() {
    let dir = tempfile::tempdir().unwrap();
    run_cli(dir.path(), &["goal", "set", "--hours", "1"]);

    let outcome = run_json(dir.path(), &["log", "--json"]);
    assert_eq!(outcome["delta"], 600);
    assert_eq!(outcome["outcome"], "increased");
    assert!(outcome["message"].as_str().unwrap().contains("Thanks for logging"));

    let status = run_json(dir.path(), &["status", "--json"]);
    assert_eq!(status["points"], 600);
}

#[test]
fn test_log_over_budget_resets() {
    let dir = tempfile::tempdir().unwrap();
    run_cli(dir.path(), &["goal", "set", "--hours", "1"]);
    run_cli(dir.path(), &["log"]);

    let (code, stdout, _) = run_cli(dir.path(), &["log", "--hours", "5"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("went over"));

    let status = run_json(dir.path(), &["status", "--json"]);
    assert_eq!(status["points"], 0);
}

#[test]
fn test_onboarding_run() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(dir.path(), &["onboarding", "run"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("Welcome to ZeroScreen!"));

    let status = run_json(dir.path(), &["status", "--json"]);
    assert_eq!(status["onboarding_complete"], true);
    assert_eq!(status["goal_seconds"], 9000);

    let (_, stdout, _) = run_cli(dir.path(), &["onboarding", "run"]);
    assert!(stdout.contains("already complete"));
}

#[test]
fn test_erase_requires_confirmation() {
    let dir = tempfile::tempdir().unwrap();
    run_cli(dir.path(), &["goal", "set", "--hours", "3"]);

    let (code, _, stderr) = run_cli(dir.path(), &["erase"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("--yes"));

    let (code, _, _) = run_cli(dir.path(), &["erase", "--yes"]);
    assert_eq!(code, 0);
    let status = run_json(dir.path(), &["status", "--json"]);
    assert_eq!(status["goal_seconds"], 0);
}

#[test]
fn test_share_writes_svg() {
    let dir = tempfile::tempdir().unwrap();
    let svg_path = dir.path().join("card.svg");
    let (code, stdout, _) = run_cli(
        dir.path(),
        &["share", "--svg", svg_path.to_str().unwrap()],
    );
    assert_eq!(code, 0);
    assert!(stdout.contains("My Score Is"));
    let svg = std::fs::read_to_string(&svg_path).unwrap();
    assert!(svg.contains("<svg"));
}

#[test]
fn test_config_get_set_list() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(dir.path(), &["config", "get", "logging.level"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "warn");

    let (code, _, _) = run_cli(dir.path(), &["config", "set", "debug.print_state", "true"]);
    assert_eq!(code, 0);
    let config = run_json(dir.path(), &["config", "list"]);
    assert_eq!(config["debug"]["print_state"], true);

    let (code, _, _) = run_cli(dir.path(), &["config", "get", "nope"]);
    assert_ne!(code, 0);
}

#[test]
fn test_print_state_warns_when_state_cannot_open() {
    let dir = tempfile::tempdir().unwrap();
    let (code, _, _) = run_cli(dir.path(), &["config", "set", "debug.print_state", "true"]);
    assert_eq!(code, 0);
    std::fs::create_dir(dir.path().join("zeroscreen.db")).unwrap();

    let (code, _, stderr) = run_cli(dir.path(), &["status"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("cannot open state for debug dump"), "{stderr}");
}
