//! Basic CLI E2E tests.
//!
//! Tests invoke the built binary against a throwaway data directory and
//! verify the JSON it prints.

use std::path::Path;
use std::process::Command;

use serde_json::Value;

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(data_dir: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_ritual"))
        .env("RITUAL_DATA_DIR", data_dir)
        .env_remove("RITUAL_LOG")
        .args(args)
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

fn run_json(data_dir: &Path, args: &[&str]) -> Value {
    let (stdout, stderr, code) = run_cli(data_dir, args);
    assert_eq!(code, 0, "command {args:?} failed: {stderr}");
    serde_json::from_str(&stdout).expect("Failed to parse JSON output")
}

fn event_types(output: &Value) -> Vec<String> {
    output["events"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["type"].as_str().unwrap().to_string())
        .collect()
}

#[test]
fn test_habit_list_seeds_default() {
    let dir = tempfile::tempdir().unwrap();
    let out = run_json(dir.path(), &["habit", "list"]);
    assert_eq!(out["active"], "default");
    assert_eq!(out["habits"][0]["name"], "Daily Ritual");
    assert!(dir.path().join("config.toml").exists());
    assert!(dir.path().join("ritual.db").exists());
}

#[test]
fn test_third_day_reports_ember_milestone() {
    let dir = tempfile::tempdir().unwrap();
    let today = ["--today", "2025-03-14"];

    for day in ["12", "13"] {
        let out = run_json(dir.path(), &[&today[..], &["day", "toggle", day][..]].concat());
        assert_eq!(out["marked"], true);
        assert!(!event_types(&out).contains(&"milestone_ready".to_string()));
    }

    let out = run_json(dir.path(), &[&today[..], &["day", "toggle", "14"][..]].concat());
    assert_eq!(out["streak"]["days"], 3);
    assert_eq!(out["streak"]["tier"], "ember");
    let ready: Vec<&Value> = out["events"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|e| e["type"] == "milestone_ready")
        .collect();
    assert_eq!(ready.len(), 1);
    assert_eq!(ready[0]["length"], 3);

    let list = run_json(dir.path(), &[&today[..], &["day", "list"][..]].concat());
    assert_eq!(list["days"], serde_json::json!([12, 13, 14]));
}

#[test]
fn test_backfill_prints_every_milestone() {
    let dir = tempfile::tempdir().unwrap();
    for day in 1..=11 {
        let day = day.to_string();
        run_json(dir.path(), &["--today", "2025-03-12", "day", "toggle", day.as_str()]);
    }
    let out = run_json(dir.path(), &["--today", "2025-03-12", "day", "toggle", "12"]);
    let lengths: Vec<u64> = out["events"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|e| e["type"] == "milestone_ready")
        .map(|e| e["length"].as_u64().unwrap())
        .collect();
    assert_eq!(lengths, vec![3, 10]);
}

#[test]
fn test_status_with_month_flag() {
    let dir = tempfile::tempdir().unwrap();
    run_json(
        dir.path(),
        &["--today", "2025-03-14", "--month", "2025-02", "day", "toggle", "7"],
    );
    let out = run_json(
        dir.path(),
        &["--today", "2025-03-14", "--month", "2025-02", "status"],
    );
    assert_eq!(out["habit"]["id"], "default");
    assert_eq!(out["streak"]["days"], 0);
    assert_eq!(out["progress"]["marked"], 1);
    assert_eq!(out["progress"]["total_days"], 28);
    assert_eq!(out["progress"]["percent"], 4);
}

#[test]
fn test_month_completion_and_clear() {
    let dir = tempfile::tempdir().unwrap();
    let args = ["--today", "2025-03-20", "--month", "2025-02"];
    let mut last = Value::Null;
    for day in 1..=28 {
        let day = day.to_string();
        last = run_json(dir.path(), &[&args[..], &["day", "toggle", day.as_str()][..]].concat());
    }
    assert!(event_types(&last).contains(&"month_completed".to_string()));

    let status = run_json(dir.path(), &[&args[..], &["month", "status"][..]].concat());
    assert_eq!(status["completed"], true);
    assert_eq!(status["label"], "February 2025");

    let cleared = run_json(dir.path(), &[&args[..], &["month", "clear"][..]].concat());
    assert_eq!(cleared["progress"]["marked"], 0);
    let status = run_json(dir.path(), &[&args[..], &["month", "status"][..]].concat());
    assert_eq!(status["completed"], false);
}

#[test]
fn test_habit_lifecycle() {
    let dir = tempfile::tempdir().unwrap();
    let added = run_json(dir.path(), &["habit", "add", "Read"]);
    let id = added["id"].as_str().unwrap().to_string();
    assert!(id.starts_with("h_"));
    assert_eq!(added["habits"].as_array().unwrap().len(), 2);
    assert!(event_types(&added).contains(&"active_habit_changed".to_string()));

    let renamed = run_json(dir.path(), &["habit", "rename", &id, "Read daily"]);
    assert_eq!(renamed["renamed"], true);

    let list = run_json(dir.path(), &["habit", "list"]);
    assert_eq!(list["active"], id.as_str());
    assert_eq!(list["habits"][1]["name"], "Read daily");

    let switched = run_json(dir.path(), &["habit", "switch", "default"]);
    assert_eq!(switched["switched"], true);

    let deleted = run_json(dir.path(), &["habit", "delete", &id]);
    assert_eq!(deleted["active"], "default");
    assert_eq!(deleted["habits"].as_array().unwrap().len(), 1);
}

#[test]
fn test_invalid_operations_fail() {
    let dir = tempfile::tempdir().unwrap();

    let (_, stderr, code) = run_cli(dir.path(), &["habit", "delete", "default"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("error:"));

    let (_, stderr, code) = run_cli(dir.path(), &["habit", "add", "   "]);
    assert_eq!(code, 1);
    assert!(stderr.contains("error:"));

    let (_, _, code) = run_cli(
        dir.path(),
        &["--today", "2025-02-10", "day", "toggle", "30"],
    );
    assert_eq!(code, 1);

    let (_, _, code) = run_cli(dir.path(), &["--month", "2025-13", "status"]);
    assert_ne!(code, 0);
}

#[test]
fn test_config_get_set() {
    let dir = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(dir.path(), &["config", "get", "tracker.max_lookback_days"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "3000");

    let (stdout, _, code) = run_cli(
        dir.path(),
        &["config", "set", "tracker.default_habit_name", "Stretch"],
    );
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "ok");

    let list = run_json(dir.path(), &["habit", "list"]);
    assert_eq!(list["habits"][0]["name"], "Stretch");

    let (_, _, code) = run_cli(dir.path(), &["config", "get", "nope"]);
    assert_eq!(code, 1);

    let (_, stderr, code) = run_cli(dir.path(), &["config", "set", "tracker.max_lookback_days", "0"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("tracker.max_lookback_days"));
    let (stdout, _, _) = run_cli(dir.path(), &["config", "get", "tracker.max_lookback_days"]);
    assert_eq!(stdout.trim(), "3000");

    let (stdout, _, code) = run_cli(dir.path(), &["config", "reset"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("reset"));
}

#[test]
fn test_completions() {
    let dir = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(dir.path(), &["completions", "bash"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("ritual"));
}
