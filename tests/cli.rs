//! End-to-end tests for the headless `summary` command

use assert_cmd::Command;
use predicates::prelude::*;

fn dashboard() -> Command {
    let mut cmd = Command::cargo_bin("outage_dashboard").unwrap();
    cmd.env_remove("RUST_LOG")
        .env_remove("OUTAGE_SEED")
        .env_remove("OUTAGE_PROJECT_COUNT")
        .env_remove("OUTAGE_TOP_OVERRUNS")
        .env("OUTAGE_LOG_LEVEL", "warn")
        .args(["--seed", "42", "--anchor", "2025-05-12"]);
    cmd
}

#[test]
fn test_financials_summary_lists_top_overruns() {
    dashboard()
        .args(["summary", "--screen", "financials", "--top", "3"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("4. Financial & Budget Master"))
        .stdout(predicate::str::contains("Cost overrun alert (top 3):"));
}

#[test]
fn test_summary_is_reproducible_for_a_seed() {
    let first = dashboard()
        .args(["summary", "--screen", "project-matrix"])
        .output()
        .unwrap();
    let second = dashboard()
        .args(["summary", "--screen", "project-matrix"])
        .output()
        .unwrap();

    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);

    let stdout = String::from_utf8_lossy(&first.stdout);
    assert!(stdout.contains("Showing 85 of 85 projects"));
    assert!(stdout.contains("PRJ-1001 |"));
    assert!(stdout.contains("PRJ-1085 |"));
}

#[test]
fn test_matrix_filters_from_flags() {
    let output = dashboard()
        .args([
            "summary",
            "--screen",
            "3",
            "--category",
            "Turbine",
            "--category",
            "hrsg",
            "--status",
            "delayed",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let rows: Vec<&str> = stdout.lines().filter(|l| l.starts_with("  PRJ-")).collect();
    for row in rows {
        assert!(row.contains("| Delayed |"), "unexpected row: {}", row);
        assert!(row.contains("| Turbine |") || row.contains("| HRSG |"));
    }
}

#[test]
fn test_json_output_is_tagged() {
    let output = dashboard()
        .args(["summary", "--screen", "unit-dashboard", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["screen"], "unit-dashboard");
    assert_eq!(json["context"]["unit"], "Unit 4 Combined Cycle");
    assert_eq!(json["context"]["as_of"], "2025-05-12");
    assert_eq!(json["safety"]["unit_man_hours"], 15_000);
    assert!(json["schedule_variance_days"].as_i64().unwrap() <= 0);
    for project in json["critical_path"].as_array().unwrap() {
        assert_eq!(project["isCriticalPath"], true);
    }
}

#[test]
fn test_unknown_category_fails() {
    dashboard()
        .args(["summary", "--screen", "3", "--category", "Boiler"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown category 'Boiler'"));
}

#[test]
fn test_zero_count_fails() {
    dashboard()
        .args(["--count", "0", "summary"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("project count must be greater than zero"));
}

#[test]
fn test_anchor_at_calendar_limit_fails_cleanly() {
    let mut cmd = Command::cargo_bin("outage_dashboard").unwrap();
    cmd.env_remove("RUST_LOG")
        .env("OUTAGE_LOG_LEVEL", "warn")
        .args(["--anchor", "+262142-12-31", "--seed", "1", "summary"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("anchor date out of range"))
        .stderr(predicate::str::contains("panicked").not());
}

#[test]
fn test_count_from_environment() {
    let mut cmd = Command::cargo_bin("outage_dashboard").unwrap();
    cmd.env_remove("RUST_LOG")
        .env("OUTAGE_PROJECT_COUNT", "12")
        .env("OUTAGE_LOG_LEVEL", "warn")
        .args(["--anchor", "2025-05-12", "summary", "--screen", "project-matrix"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Showing 12 of 12 projects"));
}
