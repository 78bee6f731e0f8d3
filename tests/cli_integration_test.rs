//! End-to-end tests driving the kpiboard binary.

mod common;

use common::{kpiboard, snapshot_fixture};
use pretty_assertions::assert_eq;
use serde_json::Value;
use std::fs;
use tempfile::TempDir;

fn stdout_of(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr_of(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn render_json_contains_kpi_deltas() {
    let dir = TempDir::new().unwrap();
    let assert = kpiboard()
        .current_dir(dir.path())
        .args(["render", "--format", "json"])
        .assert()
        .success();

    let json: Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    let dau = &json["kpis"][0];
    assert_eq!(dau["label"], "Daily Active Users");
    assert_eq!(dau["delta"]["magnitude"], 11);
    assert_eq!(dau["delta"]["positive"], true);
    assert_eq!(json["retention"]["weeks"], 8);
}

#[test]
fn render_terminal_plain_to_file() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("dashboard.txt");
    kpiboard()
        .current_dir(dir.path())
        .args(["render", "--plain", "--section", "kpis,jobs", "--output"])
        .arg(&out)
        .assert()
        .success();

    let text = fs::read_to_string(&out).unwrap();
    assert!(text.contains("Key Metrics"));
    assert!(text.contains("+11%"));
    assert!(text.contains("1 succeeded  1 running  1 failed  1 queued"));
    assert!(!text.contains("Cohort Retention"));
    assert!(!text.contains('\u{1b}'));
}

#[test]
fn render_short_history_reports_absent_deltas() {
    let dir = TempDir::new().unwrap();
    let assert = kpiboard()
        .current_dir(dir.path())
        .args(["render", "--format", "json", "--data"])
        .arg(snapshot_fixture("short_history.json"))
        .assert()
        .success();

    let json: Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    for card in json["kpis"].as_array().unwrap() {
        assert!(card["delta"].is_null(), "unexpected delta in {card}");
    }
    let cells = &json["retention"]["rows"][0]["cells"];
    assert_eq!(cells[1]["value"], 0.0);
    assert_eq!(cells[1]["classification"]["tier"], "tier1");
    assert!(cells[2]["classification"].is_null());
}

#[test]
fn render_rejects_invalid_snapshot() {
    let dir = TempDir::new().unwrap();
    let output = kpiboard()
        .current_dir(dir.path())
        .args(["render", "--data"])
        .arg(snapshot_fixture("invalid.json"))
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(stderr_of(&output).contains("Validation failed"));
}

#[test]
fn check_lists_every_violation() {
    let output = kpiboard()
        .args(["check", "--data"])
        .arg(snapshot_fixture("invalid.json"))
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stderr = stderr_of(&output);
    assert!(stderr.contains("4 violation(s)"), "stderr: {stderr}");
    assert!(stderr.contains("time_series[1].date"));
    assert!(stderr.contains("time_series[1].mrr"));
    assert!(stderr.contains("cohorts[0].weekly_retention[2]"));
    assert!(stderr.contains("payment_methods[0].share"));
}

#[test]
fn check_builtin_data_passes() {
    let output = kpiboard().arg("check").output().unwrap();
    assert!(output.status.success());
    assert!(stdout_of(&output).contains("built-in sample data: OK"));
}

#[test]
fn init_writes_config_used_by_render() {
    let dir = TempDir::new().unwrap();
    kpiboard()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success();
    assert!(dir.path().join(".kpiboard.toml").exists());

    // Second init without --force must refuse
    kpiboard()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .failure();

    fs::write(
        dir.path().join(".kpiboard.toml"),
        "[output]\ndefault_format = \"markdown\"\n",
    )
    .unwrap();
    let output = kpiboard()
        .current_dir(dir.path())
        .args(["render", "--section", "payments"])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert!(stdout_of(&output).starts_with("# Analytics Dashboard"));
    assert!(stdout_of(&output).contains("| Credit card | 64.5% |"));
}

#[test]
fn explicit_missing_config_fails() {
    let dir = TempDir::new().unwrap();
    let output = kpiboard()
        .current_dir(dir.path())
        .args(["render", "--config", "missing.toml"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(stderr_of(&output).contains("missing.toml"));
}
