//! End-to-end tests for the `ballast` binary

use std::fs;
use std::path::PathBuf;

use assert_cmd::cargo;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn ballast() -> Command {
    let mut cmd = Command::new(cargo::cargo_bin!("ballast"));
    cmd.env_remove("BALLAST_STRICT").env_remove("RUST_LOG");
    cmd
}

const VEHICLE: &str = r#"{ "id": 1, "vehicle_type": "Box truck", "max_load": 1000.0,
                           "length": 10.0, "width": 4.0, "height": 3.0 }"#;

/// Two 600 kg crates at either end: overloaded but balanced.
fn overloaded_manifest(extra_placement: &str) -> String {
    format!(
        r#"{{
            "vehicle": {VEHICLE},
            "cargo": [
                {{ "id": 1, "name": "A", "weight": 600.0, "length": 2.0, "width": 2.0, "height": 1.0 }},
                {{ "id": 2, "name": "B", "weight": 600.0, "length": 2.0, "width": 2.0, "height": 1.0 }}
            ],
            "placements": [
                {{ "cargo_id": 1, "position_x": 0.0, "position_y": 1.0, "position_z": 0.0 }},
                {{ "cargo_id": 2, "position_x": 8.0, "position_y": 1.0, "position_z": 0.0 }}
                {extra_placement}
            ]
        }}"#
    )
}

fn unplaced_manifest() -> String {
    format!(
        r#"{{
            "vehicle": {VEHICLE},
            "cargo": [
                {{ "id": 1, "weight": 100.0, "length": 2.0, "width": 2.0, "height": 3.0 }},
                {{ "id": 2, "weight": 300.0, "length": 3.0, "width": 2.0, "height": 3.0 }},
                {{ "id": 3, "weight": 200.0, "length": 4.0, "width": 2.0, "height": 3.0 }}
            ]
        }}"#
    )
}

fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn test_help_displays() {
    ballast()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("stability"));
}

#[test]
fn test_analyze_overload_json() {
    let tmp = TempDir::new().unwrap();
    let manifest = write(&tmp, "heavy.json", &overloaded_manifest(""));

    let output = ballast()
        .args(["analyze", "--json"])
        .arg(&manifest)
        .output()
        .unwrap();
    assert!(output.status.success());

    let result: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(result["total_weight"], 1200.0);
    assert_eq!(result["is_safe"], false);
    assert_eq!(
        result["warnings"][0],
        "CRITICAL: Total weight (1200.00 kg) exceeds vehicle capacity (1000.00 kg)"
    );
}

#[test]
fn test_analyze_text_output() {
    let tmp = TempDir::new().unwrap();
    let manifest = write(&tmp, "heavy.json", &overloaded_manifest(""));

    ballast()
        .arg("analyze")
        .arg(&manifest)
        .assert()
        .success()
        .stdout(predicate::str::contains("RESULT: UNSAFE"))
        .stdout(predicate::str::contains("Stability score: 86.67"));
}

#[test]
fn test_analyze_unknown_cargo_skipped_by_default() {
    let tmp = TempDir::new().unwrap();
    let extra = r#", { "cargo_id": 99, "position_x": 9.0, "position_y": 3.0, "position_z": 2.0 }"#;
    let manifest = write(&tmp, "unknown.json", &overloaded_manifest(extra));

    let output = ballast()
        .args(["analyze", "--json"])
        .arg(&manifest)
        .output()
        .unwrap();
    assert!(output.status.success());

    let result: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(result["center_of_gravity"]["x"], 5.0);
    assert_eq!(result["total_weight"], 1200.0);
}

#[test]
fn test_analyze_unknown_cargo_strict_fails() {
    let tmp = TempDir::new().unwrap();
    let extra = r#", { "cargo_id": 99, "position_x": 9.0, "position_y": 3.0, "position_z": 2.0 }"#;
    let manifest = write(&tmp, "unknown.json", &overloaded_manifest(extra));

    ballast()
        .args(["analyze", "--strict"])
        .arg(&manifest)
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown cargo id 99"))
        .stderr(predicate::str::contains("UnknownCargo"));
}

#[test]
fn test_optimize_single_row() {
    let tmp = TempDir::new().unwrap();
    let manifest = write(&tmp, "row.json", &unplaced_manifest());

    let output = ballast()
        .args(["optimize", "--json"])
        .arg(&manifest)
        .output()
        .unwrap();
    assert!(output.status.success());

    let placements: Vec<serde_json::Value> = serde_json::from_slice(&output.stdout).unwrap();
    let ids: Vec<u64> = placements.iter().map(|p| p["cargo_id"].as_u64().unwrap()).collect();
    assert_eq!(ids, vec![2, 3, 1]);
    assert!(placements.iter().all(|p| p["position_z"] == 0.0));
    assert!(placements.iter().all(|p| p["rotation"] == 0));
}

#[test]
fn test_invalid_manifest_rejected() {
    let tmp = TempDir::new().unwrap();
    let manifest = write(
        &tmp,
        "bad.json",
        &format!(
            r#"{{ "vehicle": {VEHICLE},
                  "cargo": [ {{ "id": 1, "weight": -3.0, "length": 1.0, "width": 1.0, "height": 1.0 }} ] }}"#
        ),
    );

    ballast()
        .arg("optimize")
        .arg(&manifest)
        .assert()
        .failure()
        .stderr(predicate::str::contains("INVALID_INPUT").or(predicate::str::contains("InvalidInput")));
}

#[test]
fn test_plan_then_show() {
    let tmp = TempDir::new().unwrap();
    let manifest = write(&tmp, "tuesday.json", &unplaced_manifest());
    let plan_path = tmp.path().join("tuesday.blp");

    ballast()
        .arg("plan")
        .arg(&manifest)
        .assert()
        .success()
        .stdout(predicate::str::contains("LOAD PLAN: tuesday"));

    assert!(plan_path.exists());
    assert!(!tmp.path().join("tuesday.blp.lock").exists());

    let output = ballast()
        .args(["show", "--json"])
        .arg(&plan_path)
        .output()
        .unwrap();
    assert!(output.status.success());

    let plan: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(plan["meta"]["label"], "tuesday");
    assert_eq!(plan["placements"].as_array().unwrap().len(), 3);
    assert_eq!(plan["analysis"]["total_weight"], 600.0);
}

#[test]
fn test_plan_custom_output_and_label() {
    let tmp = TempDir::new().unwrap();
    let manifest = write(&tmp, "m.json", &overloaded_manifest(""));
    let out = tmp.path().join("custom.blp");

    ballast()
        .args(["plan", "--label", "Heavy run", "-o"])
        .arg(&out)
        .arg(&manifest)
        .assert()
        .success()
        .stdout(predicate::str::contains("Status:   draft"));

    ballast()
        .arg("show")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("LOAD PLAN: Heavy run"));
}

#[test]
fn test_missing_manifest_fails() {
    ballast()
        .args(["analyze", "/no/such/manifest.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
}
