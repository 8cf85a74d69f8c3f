//! Integration tests for the `roombook` CLI binary.
//!
//! These use `assert_cmd` and `predicates` to exercise the rooms, quote, and
//! replay subcommands through the actual binary, including stdin/stdout
//! piping, file I/O, config files, and error handling.

// `Command::cargo_bin` was deprecated in assert_cmd 2.1.2 in favor of
// `cargo::cargo_bin_cmd!`. Allow it until we migrate.
#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;

fn fixture(name: &str) -> String {
    format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name)
}

/// Helper: run `replay` on the session fixture with a pinned clock and parse
/// the JSON results.
fn replay_session() -> Vec<Value> {
    let output = Command::cargo_bin("roombook")
        .unwrap()
        .args(["replay", "-i", &fixture("session.json"), "--now", "2026-03-01T00:00:00Z"])
        .output()
        .unwrap();
    assert!(output.status.success());
    serde_json::from_slice(&output.stdout).expect("replay output must be JSON")
}

// ─────────────────────────────────────────────────────────────────────────────
// rooms
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn rooms_prints_default_catalog() {
    Command::cargo_bin("roombook")
        .unwrap()
        .arg("rooms")
        .assert()
        .success()
        .stdout(predicate::str::contains("Conference Hall"))
        .stdout(predicate::str::contains("baseHourlyRate"));
}

#[test]
fn rooms_reads_custom_catalog() {
    Command::cargo_bin("roombook")
        .unwrap()
        .args(["--rooms", &fixture("rooms.json"), "rooms"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Atrium"))
        .stdout(predicate::str::contains("Cabin 1").not());
}

#[test]
fn missing_rooms_file_fails() {
    Command::cargo_bin("roombook")
        .unwrap()
        .args(["--rooms", "/nonexistent/rooms.json", "rooms"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read rooms file"));
}

// ─────────────────────────────────────────────────────────────────────────────
// quote
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn quote_prices_peak_straddle() {
    // Monday 09:30-10:30 IST in Cabin 1: 150 off-peak + 225 peak
    let output = Command::cargo_bin("roombook")
        .unwrap()
        .args([
            "quote",
            "--room",
            "101",
            "--start",
            "2026-03-16T04:00:00Z",
            "--end",
            "2026-03-16T05:00:00Z",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let quote: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(quote["total"], 375.0);
    assert_eq!(quote["slots"].as_array().unwrap().len(), 2);
    assert_eq!(quote["slots"][0]["peak"], false);
    assert_eq!(quote["slots"][1]["peak"], true);
}

#[test]
fn quote_with_custom_policy_and_rooms() {
    // UTC policy, peak 09-12 at ×2. Atrium at 100/h, 08:00-10:00 UTC Monday.
    let output = Command::cargo_bin("roombook")
        .unwrap()
        .args([
            "--policy",
            &fixture("policy.json"),
            "--rooms",
            &fixture("rooms.json"),
            "quote",
            "--room",
            "A1",
            "--start",
            "2026-03-16T08:00:00Z",
            "--end",
            "2026-03-16T10:00:00Z",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let quote: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(quote["total"], 300.0);
}

#[test]
fn quote_unknown_room_fails() {
    Command::cargo_bin("roombook")
        .unwrap()
        .args([
            "quote",
            "--room",
            "999",
            "--start",
            "2026-03-16T04:00:00Z",
            "--end",
            "2026-03-16T05:00:00Z",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Room not found: 999"));
}

#[test]
fn quote_inverted_interval_fails() {
    Command::cargo_bin("roombook")
        .unwrap()
        .args([
            "quote",
            "--room",
            "101",
            "--start",
            "2026-03-16T05:00:00Z",
            "--end",
            "2026-03-16T04:00:00Z",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Start time must be before end time"));
}

#[test]
fn quote_longer_than_max_duration_fails() {
    Command::cargo_bin("roombook")
        .unwrap()
        .args([
            "quote",
            "--room",
            "101",
            "--start",
            "1000-01-01T00:00:00Z",
            "--end",
            "9000-01-01T00:00:00Z",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Booking duration cannot exceed 12 hours"));
}

#[test]
fn quote_malformed_timestamp_fails() {
    Command::cargo_bin("roombook")
        .unwrap()
        .args(["quote", "--room", "101", "--start", "tomorrow", "--end", "2026-03-16T04:00:00Z"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid timestamp"));
}

// ─────────────────────────────────────────────────────────────────────────────
// replay
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn replay_creates_and_rejects_overlap() {
    let results = replay_session();
    assert_eq!(results.len(), 9);

    assert_eq!(results[0]["op"], "create");
    assert_eq!(results[0]["ok"]["totalPrice"], 750.0);
    assert_eq!(results[0]["ok"]["status"], "CONFIRMED");

    assert_eq!(results[1]["error"], "Room already booked from 09:00 am to 11:00 am");
    assert_eq!(results[1]["kind"], "businessRule");

    // Touching the first booking's end is fine; 11:00-12:00 IST is peak.
    assert_eq!(results[2]["ok"]["totalPrice"], 450.0);
    // Saturday is never peak.
    assert_eq!(results[3]["ok"]["totalPrice"], 1800.0);
}

#[test]
fn replay_cancel_is_one_way() {
    let results = replay_session();

    assert_eq!(results[4]["ok"]["message"], "Booking cancelled successfully");
    assert_eq!(results[5]["error"], "Booking already cancelled");
    assert_eq!(results[6]["ok"]["status"], "CONFIRMED");
}

#[test]
fn replay_analytics_excludes_cancelled() {
    let results = replay_session();
    let usage = results[7]["ok"].as_array().unwrap();

    assert_eq!(usage.len(), 2);
    assert_eq!(usage[0]["roomId"], "101");
    assert_eq!(usage[0]["totalHours"], 2.0);
    assert_eq!(usage[0]["totalRevenue"], 750.0);
    assert_eq!(usage[1]["roomId"], "103");
    assert_eq!(usage[1]["totalRevenue"], 1800.0);
}

#[test]
fn replay_list_keeps_cancelled_bookings() {
    let results = replay_session();
    let bookings = results[8]["ok"].as_array().unwrap();

    assert_eq!(bookings.len(), 3);
    assert_eq!(bookings[1]["status"], "CANCELLED");
}

#[test]
fn replay_from_stdin_with_clock_ops() {
    let script = r#"[
        {"op": "create", "roomId": "105", "userName": "Noor", "startTime": "2026-03-16T10:00:00Z", "endTime": "2026-03-16T11:00:00Z"},
        {"op": "setClock", "now": "2026-03-16T08:00:00Z"},
        {"op": "cancel", "ref": 0},
        {"op": "advanceClock", "minutes": -1},
        {"op": "cancel", "ref": 0}
    ]"#;

    let output = Command::cargo_bin("roombook")
        .unwrap()
        .args(["replay", "--now", "2026-03-01T00:00:00Z"])
        .write_stdin(script)
        .output()
        .unwrap();
    assert!(output.status.success());

    let results: Vec<Value> = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        results[2]["error"],
        "Cancellation must be at least 2 hours before start time"
    );
    assert_eq!(results[4]["ok"]["message"], "Booking cancelled successfully");
}

#[test]
fn replay_reports_out_of_range_clock_moves() {
    let script = r#"[
        {"op": "advanceClock", "minutes": 9223372036854775807},
        {"op": "advanceClock", "minutes": 210000000000},
        {"op": "advanceClock", "minutes": 30}
    ]"#;

    let output = Command::cargo_bin("roombook")
        .unwrap()
        .args(["replay", "--now", "2026-03-01T00:00:00Z"])
        .write_stdin(script)
        .output()
        .unwrap();
    assert!(output.status.success());

    let results: Vec<Value> = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(results[0]["kind"], "badInput");
    assert_eq!(
        results[0]["error"],
        "Cannot move clock by 9223372036854775807 minutes"
    );
    assert_eq!(results[1]["kind"], "badInput");
    // The clock was left where it was.
    assert_eq!(results[2]["ok"]["now"], "2026-03-01T00:30:00Z");
}

#[test]
fn replay_reports_missing_fields_and_bad_refs() {
    let script = r#"[
        {"op": "create", "roomId": "101", "startTime": "2026-03-16T10:00:00Z", "endTime": "2026-03-16T11:00:00Z"},
        {"op": "cancel", "ref": 0},
        {"op": "get"},
        {"op": "analytics", "from": "2026-03-01"}
    ]"#;

    let output = Command::cargo_bin("roombook")
        .unwrap()
        .args(["replay", "--now", "2026-03-01T00:00:00Z"])
        .write_stdin(script)
        .output()
        .unwrap();
    assert!(output.status.success());

    let results: Vec<Value> = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(results[0]["error"], "Missing required field: userName");
    assert_eq!(results[0]["kind"], "badInput");
    assert_eq!(results[1]["kind"], "notFound");
    assert_eq!(results[2]["error"], "Missing required field: bookingId");
    assert_eq!(results[3]["error"], "Missing from or to date parameters");
}

#[test]
fn replay_writes_output_file() {
    let output_path = std::env::temp_dir().join("roombook-test-replay-output.json");
    let _ = std::fs::remove_file(&output_path);

    Command::cargo_bin("roombook")
        .unwrap()
        .args([
            "replay",
            "-i",
            &fixture("session.json"),
            "-o",
            output_path.to_str().unwrap(),
            "--now",
            "2026-03-01T00:00:00Z",
        ])
        .assert()
        .success();

    let content = std::fs::read_to_string(&output_path).expect("output file must exist");
    let results: Vec<Value> = serde_json::from_str(&content).unwrap();
    assert_eq!(results.len(), 9);

    let _ = std::fs::remove_file(&output_path);
}

#[test]
fn replay_invalid_script_fails() {
    Command::cargo_bin("roombook")
        .unwrap()
        .arg("replay")
        .write_stdin("{ this is not a script")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse replay script"));
}

#[test]
fn replay_unknown_operation_fails() {
    Command::cargo_bin("roombook")
        .unwrap()
        .arg("replay")
        .write_stdin(r#"[{"op": "teleport"}]"#)
        .assert()
        .failure();
}
