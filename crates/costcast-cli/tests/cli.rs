//! End-to-end runs of the `costcast` binary.

use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{json, Value};
use tempfile::TempDir;

fn costcast(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("costcast").unwrap();
    // Keep the user's own config out of the run.
    cmd.env("COSTCAST_CONFIG", dir.path().join("absent.toml"));
    cmd.env_remove("RUST_LOG");
    cmd
}

fn write(dir: &TempDir, name: &str, value: &Value) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, serde_json::to_string(value).unwrap()).unwrap();
    path
}

fn flat_baseline(dir: &TempDir, months: u32) -> PathBuf {
    let points: Vec<Value> = (0..months)
        .map(|i| {
            json!({
                "date": format!("{}-{:02}-01", 2025 + i / 12, i % 12 + 1),
                "value": 10_000_000.0
            })
        })
        .collect();
    write(dir, "baseline.json", &json!({ "points": points }))
}

#[test]
fn ramp_prints_linear_profile() {
    let dir = TempDir::new().unwrap();
    costcast(&dir)
        .args(["ramp", "--shape", "linear", "--duration", "4"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0.25"))
        .stdout(predicate::str::contains("0.75"));
}

#[test]
fn ramp_rejects_unknown_shape() {
    let dir = TempDir::new().unwrap();
    costcast(&dir)
        .args(["ramp", "--shape", "sigmoid", "--duration", "4"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("sigmoid"));
}

#[test]
fn simulate_applies_rate_reset() {
    let dir = TempDir::new().unwrap();
    let baseline = flat_baseline(&dir, 24);
    let params = write(
        &dir,
        "params.json",
        &json!({ "beta_multiplier": 1.05, "lag_months": 6 }),
    );

    let output = costcast(&dir)
        .args(["-o", "json", "simulate", "--alpha", "2000000", "--beta", "10000"])
        .arg("--baseline")
        .arg(&baseline)
        .arg("--params")
        .arg(&params)
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: Value = serde_json::from_slice(&output.stdout).unwrap();
    let points = report["series"]["points"].as_array().unwrap();
    assert_eq!(points.len(), 24);
    assert_eq!(points[5]["value"].as_f64().unwrap(), 10_000_000.0);
    assert!((points[6]["value"].as_f64().unwrap() - 10_400_000.0).abs() < 1e-3);
    let multiplier = report["summary"]["final_multiplier"].as_f64().unwrap();
    assert!((multiplier - 1.04).abs() < 1e-9);
}

#[test]
fn simulate_stops_on_rejected_params() {
    let dir = TempDir::new().unwrap();
    let baseline = flat_baseline(&dir, 12);
    let params = write(&dir, "params.json", &json!({ "lag_months": 500 }));

    costcast(&dir)
        .arg("simulate")
        .arg("--baseline")
        .arg(&baseline)
        .arg("--params")
        .arg(&params)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("LAG_BEYOND_HORIZON"));
}

#[test]
fn simulate_fails_when_lag_passes_the_requested_horizon() {
    let dir = TempDir::new().unwrap();
    let baseline = flat_baseline(&dir, 120);
    let params = write(
        &dir,
        "params.json",
        &json!({ "beta_multiplier": 1.2, "lag_months": 60 }),
    );

    costcast(&dir)
        .args(["simulate", "--horizon", "12"])
        .arg("--baseline")
        .arg(&baseline)
        .arg("--params")
        .arg(&params)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("lag of 60 months"));
}

#[test]
fn validate_reports_clamps() {
    let dir = TempDir::new().unwrap();
    let params = write(&dir, "params.json", &json!({ "beta_multiplier": 2.0 }));

    let output = costcast(&dir)
        .args(["-o", "json", "validate", "--params"])
        .arg(&params)
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["status"], "clamped");
    assert_eq!(report["params"]["beta_multiplier"], 1.3);
    assert_eq!(report["result"]["clamps"][0]["field"], "beta_multiplier");
}

#[test]
fn validate_exits_2_when_rejected() {
    let dir = TempDir::new().unwrap();
    let params = write(&dir, "params.json", &json!({ "lag_months": 500 }));

    costcast(&dir)
        .args(["validate", "--params"])
        .arg(&params)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("rejected"));
}

#[test]
fn compile_keep_cost_flat() {
    let dir = TempDir::new().unwrap();
    let intent = write(
        &dir,
        "intent.json",
        &json!({
            "intent_type": "constraint",
            "constraints": ["keep_cost_flat"],
            "timing": { "start": "2025-07" }
        }),
    );

    let output = costcast(&dir)
        .args(["-o", "json", "compile", "--start", "2025-01", "--intent"])
        .arg(&intent)
        .output()
        .unwrap();
    assert!(output.status.success());

    let result: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(result["params"]["driver"], "cost_target");
    assert_eq!(result["params"]["cost_target_pct"], 0.0);
    assert_eq!(result["params"]["lag_months"], 6);
    assert_eq!(result["needs_clarification"], false);
}

#[test]
fn compile_rejects_bad_start() {
    let dir = TempDir::new().unwrap();
    let intent = write(&dir, "intent.json", &json!({ "intent_type": "shock" }));

    costcast(&dir)
        .args(["compile", "--start", "July", "--intent"])
        .arg(&intent)
        .assert()
        .failure()
        .stderr(predicate::str::contains("YYYY-MM"));
}

#[test]
fn config_prints_defaults() {
    let dir = TempDir::new().unwrap();
    costcast(&dir)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("horizon_months = 120"));
}
