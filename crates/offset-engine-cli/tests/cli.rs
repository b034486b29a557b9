#![allow(deprecated)]
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn engine() -> Command {
    let mut cmd = Command::cargo_bin("offset-engine").unwrap();
    cmd.env_remove("OFFSET_ENGINE_DATASET").env_remove("RUST_LOG");
    cmd
}

/// Daily dataset from 2026-01-01 UTC, evaluated at 2026-02-18T00:00Z.
fn daily(cmd: &mut Command) -> &mut Command {
    cmd.args([
        "--initial",
        "2026-01-01T00:00:00Z",
        "--frequency",
        "1d",
        "--nominal",
        "2026-02-18T00:00:00Z",
    ])
}

// ---------------------------------------------------------------------------
// echo
// ---------------------------------------------------------------------------

#[test]
fn echo_renders_placeholder() {
    engine()
        .args(["echo", "today(6, 0)"])
        .assert()
        .success()
        .stdout("elext:today(6, 0)\n");
}

#[test]
fn echo_now_has_no_space() {
    engine()
        .args(["echo", "now(1, -5)"])
        .assert()
        .success()
        .stdout("elext:now(1,-5)\n");
}

#[test]
fn echo_data_in_requires_registration() {
    engine()
        .args(["echo", "dataIn('logs', 'p')"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("data_in_name logs is not valid"));

    engine()
        .args(["echo", "dataIn('logs', 'p')", "--data-in", "logs"])
        .assert()
        .success()
        .stdout("elext:dataIn('logs', 'p')\n");
}

#[test]
fn echo_unknown_function_fails() {
    engine()
        .args(["echo", "tomorrow(0, 0)"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown function: tomorrow"));
}

// ---------------------------------------------------------------------------
// resolve
// ---------------------------------------------------------------------------

#[test]
fn resolve_yesterday_inline_dataset() {
    let mut cmd = engine();
    cmd.args(["resolve", "yesterday(0, 0)"]);
    daily(&mut cmd)
        .assert()
        .success()
        .stdout("2026-02-17T00:00Z\n");
}

#[test]
fn resolve_accepts_first_pass_placeholder() {
    let mut cmd = engine();
    cmd.args(["resolve", "elext:currentMonth(0, 0, 0)"]);
    daily(&mut cmd)
        .assert()
        .success()
        .stdout("2026-02-01T00:00Z\n");
}

#[test]
fn resolve_before_initial_instance_is_empty() {
    let mut cmd = engine();
    cmd.args(["resolve", "lastYear(0, 0, 0, 0)"]);
    daily(&mut cmd).assert().success().stdout("\n");
}

#[test]
fn resolve_without_nominal_is_empty() {
    engine()
        .args([
            "resolve",
            "today(0, 0)",
            "--initial",
            "2026-01-01T00:00:00Z",
            "--frequency",
            "1d",
        ])
        .assert()
        .success()
        .stdout("\n");
}

#[test]
fn resolve_hourly_today_with_hour_shift() {
    engine()
        .args([
            "resolve",
            "today(6, 0)",
            "--initial",
            "2026-01-01T00:00:00Z",
            "--frequency",
            "1h",
            "--nominal",
            "2026-02-18T13:45:00Z",
        ])
        .assert()
        .success()
        .stdout("2026-02-18T06:00Z\n");
}

#[test]
fn resolve_from_dataset_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("dataset.json");
    std::fs::write(
        &path,
        r#"{
            "initial_instance": "2026-01-01T00:00:00Z",
            "frequency": { "unit": "days", "value": 1 }
        }"#,
    )
    .unwrap();

    engine()
        .args(["resolve", "lastMonth(0, 0, 0)", "--dataset"])
        .arg(&path)
        .args(["--nominal", "2026-02-18T00:00:00Z"])
        .assert()
        .success()
        .stdout("2026-01-01T00:00Z\n");
}

#[test]
fn resolve_missing_dataset_file_fails() {
    let dir = TempDir::new().unwrap();
    engine()
        .args(["resolve", "today(0, 0)", "--dataset"])
        .arg(dir.path().join("missing.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("reading dataset definition"));
}

#[test]
fn resolve_timezone_conflicts_with_dataset_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("dataset.json");
    std::fs::write(
        &path,
        r#"{"initial_instance": "2026-01-01T00:00:00Z", "frequency": {"unit": "days", "value": 1}}"#,
    )
    .unwrap();

    engine()
        .args(["resolve", "today(0, 0)", "--dataset"])
        .arg(&path)
        .args(["--timezone", "Europe/Berlin"])
        .args(["--nominal", "2026-02-18T00:00:00Z"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}

#[test]
fn resolve_requires_a_dataset() {
    engine()
        .args(["resolve", "today(0, 0)", "--nominal", "2026-02-18T00:00:00Z"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("a dataset is required"));
}

#[test]
fn resolve_bad_timezone_fails() {
    let mut cmd = engine();
    cmd.args(["resolve", "today(0, 0)", "--timezone", "Mars/Olympus"]);
    daily(&mut cmd)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid timezone"));
}

#[test]
fn resolve_data_in_binding() {
    let mut cmd = engine();
    cmd.args([
        "resolve",
        "dataIn('logs', 'region=us')",
        "--bind",
        "logs=hdfs://nn/a,hdfs://nn/b",
    ]);
    daily(&mut cmd)
        .assert()
        .success()
        .stdout("hdfs://nn/a/region=us,hdfs://nn/b/region=us\n");
}

#[test]
fn resolve_data_in_unresolved_fails() {
    let mut cmd = engine();
    cmd.args([
        "resolve",
        "dataIn('logs', 'p')",
        "--bind",
        "logs=hdfs://nn/a",
        "--unresolved",
        "logs",
    ]);
    daily(&mut cmd)
        .assert()
        .failure()
        .stderr(predicate::str::contains("There are unresolved instances in"));
}

// ---------------------------------------------------------------------------
// offset
// ---------------------------------------------------------------------------

#[test]
fn offset_last_month() {
    let mut cmd = engine();
    cmd.args(["offset", "lastMonth(0, 0, 0)"]);
    daily(&mut cmd)
        .assert()
        .success()
        .stdout("coord:current(-48)\n");
}

#[test]
fn offset_with_minute_shift() {
    let mut cmd = engine();
    cmd.args(["offset", "todayWithOffset(0, 0, -1440)"]);
    daily(&mut cmd)
        .assert()
        .success()
        .stdout("coord:current(-1)\n");
}

#[test]
fn offset_rejects_data_in() {
    let mut cmd = engine();
    cmd.args(["offset", "dataIn('logs', 'p')"]);
    daily(&mut cmd).assert().failure();
}

// ---------------------------------------------------------------------------
// partition
// ---------------------------------------------------------------------------

#[test]
fn partition_appends_to_each_location() {
    engine()
        .args(["partition", "--uris", "a,b,,c", "--partition", "p"])
        .assert()
        .success()
        .stdout("a/p,b/p,c/p\n");
}
