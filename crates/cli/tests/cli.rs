//! End-to-end checks of the command-line binaries.

use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn vectors_writes_csv_for_a_planet() {
    let mut cmd = Command::cargo_bin("vectors").unwrap();
    cmd.args([
        "--body",
        "earth",
        "--start",
        "2025-10-01T00:00:00Z",
        "--end",
        "2025-10-03T00:00:00Z",
        "--cadence-hours",
        "24",
    ]);
    cmd.assert()
        .success()
        .stdout(predicate::str::starts_with(
            "jd,date,x_au,y_au,z_au,vx_au_day,vy_au_day,vz_au_day",
        ))
        .stdout(predicate::str::contains("2025-10-02T00:00:00.000Z"));
}

#[test]
fn vectors_rejects_unknown_bodies() {
    let mut cmd = Command::cargo_bin("vectors").unwrap();
    cmd.args([
        "--body",
        "vulcan",
        "--start",
        "2025-10-01T00:00:00Z",
        "--end",
        "2025-10-03T00:00:00Z",
    ]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("unknown body"));
}

#[test]
fn trajectory_runs_a_short_scenario() {
    let mut elements = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
    elements
        .write_all(
            b"designation: 3I/ATLAS\nEC: 1.2\nQR: 1.5\nTP: 2460976.5\nOM: 280.0\nW: 45.0\nIN: 113.0\n",
        )
        .unwrap();

    let mut cmd = Command::cargo_bin("trajectory").unwrap();
    cmd.args([
        "--elements",
        elements.path().to_str().unwrap(),
        "--scenario",
        "mars-flyby",
        "--epoch",
        "2025-10-01T00:00:00Z",
        "--horizon-days",
        "5",
    ]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("closest approach"))
        .stdout(predicate::str::contains("health:"));
}

#[test]
fn trajectory_fails_cleanly_without_elements() {
    let mut cmd = Command::cargo_bin("trajectory").unwrap();
    cmd.args(["--elements", "no-such-file.yaml", "--horizon-days", "1"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("loading elements"));
}
