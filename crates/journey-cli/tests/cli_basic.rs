//! Basic CLI E2E tests.
//!
//! Tests invoke the built binary and verify outputs.

use std::path::Path;
use std::process::Command;

/// Run a CLI command with an isolated config file and return output.
fn run_cli(config_dir: &Path, args: &[&str]) -> (i32, String, String) {
    let config = config_dir.join("config.toml");
    let output = Command::new(env!("CARGO_BIN_EXE_journey-cli"))
        .arg("--config")
        .arg(&config)
        .args(args)
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (code, stdout, stderr)
}

fn parse_json(stdout: &str) -> serde_json::Value {
    serde_json::from_str(stdout).expect("Failed to parse JSON output")
}

const SNAPSHOT: &str = r#"{
  "window": { "startDate": "2025-06-10", "endDate": "2025-06-12" },
  "units": [
    { "id": "kickoff", "orderIndex": 0, "title": "Kickoff", "schedule": { "offset": 0 }, "milestoneKind": "kickoff" },
    { "id": "demo", "orderIndex": 1, "title": "Demo day", "schedule": { "offset": 2 }, "revealDaysBefore": 1 }
  ],
  "tasks": [
    { "id": "passport", "unitId": "kickoff", "dueDaysOffset": 3, "linkedExternalCategory": "travel" },
    { "id": "deck", "unitId": "demo" }
  ],
  "externalProgress": { "travel": { "completedCount": 1, "totalCount": 2 } }
}"#;

fn write_snapshot(dir: &Path) -> String {
    let path = dir.join("journey.json");
    std::fs::write(&path, SNAPSHOT).unwrap();
    path.to_string_lossy().to_string()
}

#[test]
fn test_phase_before_start() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(
        dir.path(),
        &["phase", "--start", "2025-06-10", "--now", "2025-06-01"],
    );
    assert_eq!(code, 0, "phase failed");
    let json = parse_json(&stdout);
    assert_eq!(json["phase"], "BEFORE");
    assert_eq!(json["daysUntilStart"], 9);
}

#[test]
fn test_urgency_overdue() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(
        dir.path(),
        &["urgency", "--start", "2025-06-10", "--offset", "3", "--now", "2025-06-08"],
    );
    assert_eq!(code, 0, "urgency failed");
    let json = parse_json(&stdout);
    assert_eq!(json["tier"], "overdue");
    assert_eq!(json["dueDate"], "2025-06-07");
    assert_eq!(json["label"], "Overdue by 1 day");
}

#[test]
fn test_streak_gap() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(dir.path(), &["streak", "2025-06-08", "--now", "2025-06-10"]);
    assert_eq!(code, 0, "streak failed");
    let json = parse_json(&stdout);
    assert_eq!(json["length"], 0);
    assert_eq!(json["isActiveToday"], false);
}

#[test]
fn test_view_json() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_snapshot(dir.path());
    let (code, stdout, _) = run_cli(dir.path(), &["view", &file, "--now", "2025-06-08", "--json"]);
    assert_eq!(code, 0, "view failed");
    let json = parse_json(&stdout);
    assert_eq!(json["phase"], "BEFORE");
    assert_eq!(json["nextAction"]["taskId"], "passport");
    assert_eq!(json["units"][1]["isRevealed"], false);
}

#[test]
fn test_view_text_hides_unrevealed_titles() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_snapshot(dir.path());
    let (code, stdout, _) = run_cli(dir.path(), &["view", &file, "--now", "2025-06-08"]);
    assert_eq!(code, 0, "view failed");
    assert!(stdout.contains("Kickoff (rocket)"));
    assert!(stdout.contains("??? (calendar)"));
    assert!(!stdout.contains("Demo day"));
}

#[test]
fn test_toggle_persists_and_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_snapshot(dir.path());

    let (code, stdout, _) = run_cli(dir.path(), &["toggle", &file, "deck", "--now", "2025-06-08"]);
    assert_eq!(code, 0, "toggle failed");
    let json = parse_json(&stdout);
    assert_eq!(json["target"], true);
    assert_eq!(json["written"], true);

    let (code, stdout, _) = run_cli(dir.path(), &["toggle", &file, "deck", "--set", "true"]);
    assert_eq!(code, 0, "toggle --set failed");
    assert_eq!(parse_json(&stdout)["written"], false);
}

#[test]
fn test_toggle_unknown_task_fails() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_snapshot(dir.path());
    let (code, _, stderr) = run_cli(dir.path(), &["toggle", &file, "missing"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("Unknown task: missing"));
}

#[test]
fn test_config_set_and_get() {
    let dir = tempfile::tempdir().unwrap();
    let (code, _, _) = run_cli(dir.path(), &["config", "set", "reveal.placeholder", "soon"]);
    assert_eq!(code, 0, "config set failed");
    let (code, stdout, _) = run_cli(dir.path(), &["config", "get", "reveal.placeholder"]);
    assert_eq!(code, 0, "config get failed");
    assert_eq!(stdout.trim(), "soon");

    let (code, _, _) = run_cli(dir.path(), &["config", "get", "reveal.nope"]);
    assert_ne!(code, 0);
}
