//! End-to-end tests running the `ride` binary against fixture directories.

use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

fn ride_binary() -> String {
    env!("CARGO_BIN_EXE_ride").to_string()
}

/// Write a fixture set with `available` idle drivers and one busy driver.
fn write_fixtures(dir: &Path, available: u32) {
    let mut drivers = String::from("{\"id\":1,\"name\":\"Bernardo Prosacco\",\"status\":\"UNAVAILABLE\"}\n");
    for id in 2..available + 2 {
        drivers.push_str(&format!(
            "{{\"id\":{id},\"name\":\"Driver {id}\",\"status\":\"AVAILABLE\"}}\n"
        ));
    }
    std::fs::write(dir.join("drivers.jsonl"), drivers).unwrap();
    std::fs::write(
        dir.join("passengers.jsonl"),
        "{\"id\":5,\"name\":\"Nina Hintz Sr.\",\"phone\":\"560.815.3059\"}\n",
    )
    .unwrap();
    std::fs::write(
        dir.join("trips.jsonl"),
        "{\"id\":1,\"driver_id\":1,\"passenger_id\":5,\"start_time\":\"2016-04-05T14:01:00Z\",\"end_time\":\"2016-04-05T14:30:00Z\",\"cost\":23.45,\"rating\":3}\n",
    )
    .unwrap();
}

/// Run `ride` with an isolated home directory and the given data dir.
fn run_ride(temp: &TempDir, args: &[&str]) -> Output {
    Command::new(ride_binary())
        .env("HOME", temp.path())
        .env_remove("XDG_CONFIG_HOME")
        .env_remove("RUST_LOG")
        .env("RIDE_DATA_DIR", temp.path())
        .args(args)
        .output()
        .expect("failed to run ride")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn test_status_reports_counts() {
    let temp = TempDir::new().unwrap();
    write_fixtures(temp.path(), 2);

    let output = run_ride(&temp, &["status"]);
    assert!(
        output.status.success(),
        "ride status should succeed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let out = stdout(&output);
    assert!(out.contains("Drivers: 3 (2 available, 1 unavailable)"));
    assert!(out.contains("Trips: 1 (0 open, 1 closed)"));
}

#[test]
fn test_request_exhausts_available_drivers() {
    let temp = TempDir::new().unwrap();
    write_fixtures(temp.path(), 3);

    let output = run_ride(
        &temp,
        &["request", "5", "--count", "4", "--at", "2016-07-01T08:00:00Z"],
    );
    assert!(output.status.success());

    let out = stdout(&output);
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 4);
    assert!(lines[0].starts_with("Trip #2: driver #2 "));
    assert!(lines[1].starts_with("Trip #3: driver #3 "));
    assert!(lines[2].starts_with("Trip #4: driver #4 "));
    assert_eq!(lines[3], "No driver available for passenger #5");
}

#[test]
fn test_request_rejects_unknown_passenger() {
    let temp = TempDir::new().unwrap();
    write_fixtures(temp.path(), 1);

    let output = run_ride(&temp, &["request", "330"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("no passenger with id 330"),
        "unexpected stderr: {stderr}"
    );
}

#[test]
fn test_config_file_sets_data_dir() {
    let temp = TempDir::new().unwrap();
    let data_dir = temp.path().join("fixtures");
    std::fs::create_dir_all(&data_dir).unwrap();
    write_fixtures(&data_dir, 1);
    let config_path = temp.path().join("ride.toml");
    std::fs::write(
        &config_path,
        format!("data_dir = {:?}\n", data_dir.display().to_string()),
    )
    .unwrap();

    let output = Command::new(ride_binary())
        .env("HOME", temp.path())
        .env_remove("XDG_CONFIG_HOME")
        .env_remove("RIDE_DATA_DIR")
        .arg("--config")
        .arg(&config_path)
        .args(["passenger", "5", "--json"])
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "ride passenger should succeed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed["name"], "Nina Hintz Sr.");
    assert_eq!(parsed["trip_count"], 1);
}

#[test]
fn test_missing_fixtures_fail_with_context() {
    let temp = TempDir::new().unwrap();

    let output = run_ride(&temp, &["drivers"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("drivers.jsonl"), "unexpected stderr: {stderr}");
}
