//! Integration tests for the dulich binary using the local backend

#![allow(deprecated)]

use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

mod common;
use common::{add_destination, create_trip, dulich_cmd, local_config, run_ok};

#[test]
fn test_init_creates_config() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("dulich.toml");

    dulich_cmd()
        .arg("--config")
        .arg(&config)
        .args(["init", "--backend", "local"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Backend: local"));

    let content = fs::read_to_string(&config).unwrap();
    assert!(content.contains("backend = \"local\""));
    assert!(content.contains("data_file = \"dulich-data.json\""));
}

#[test]
fn test_init_twice_fails() {
    let temp = TempDir::new().unwrap();
    let config = local_config(temp.path());

    dulich_cmd()
        .arg("--config")
        .arg(&config)
        .arg("init")
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_init_invalid_backend() {
    let temp = TempDir::new().unwrap();

    dulich_cmd()
        .current_dir(temp.path())
        .args(["init", "--backend", "ftp"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Valid backends: rest, local"));
    assert!(!temp.path().join("dulich.toml").exists());
}

#[test]
fn test_config_get_set_list() {
    let temp = TempDir::new().unwrap();
    let config = local_config(temp.path());

    assert_eq!(run_ok(&config, &["config", "backend"]).trim(), "local");

    run_ok(&config, &["config", "timeout_secs", "5"]);
    assert_eq!(run_ok(&config, &["config", "timeout_secs"]).trim(), "5");

    let listing = run_ok(&config, &["config", "--list"]);
    assert!(listing.contains("backend = local"));
    assert!(listing.contains("timeout_secs = 5"));

    dulich_cmd()
        .arg("--config")
        .arg(&config)
        .args(["config", "colour", "blue"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Unknown config key"));
}

#[test]
fn test_config_from_environment() {
    let temp = TempDir::new().unwrap();
    let config = local_config(temp.path());

    dulich_cmd()
        .current_dir(temp.path())
        .env("DULICH_CONFIG", &config)
        .args(["trip", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No trips found"));
}

#[test]
fn test_destination_add_list_filter() {
    let temp = TempDir::new().unwrap();
    let config = local_config(temp.path());

    add_destination(&config, "Hồ Xuân Hương", "2", ["50000", "0", "20000"]);
    add_destination(&config, "Langbiang", "5", ["150000", "300000", "100000"]);
    assert!(temp.path().join("dulich-data.json").exists());

    let all = run_ok(&config, &["destination", "list", "--sort", "price-desc"]);
    let first = all.lines().next().unwrap();
    assert!(first.contains("Langbiang"));
    assert!(first.contains("550.000đ"));

    let cheap = run_ok(&config, &["destination", "list", "--max-price", "100000"]);
    assert!(cheap.contains("Hồ Xuân Hương"));
    assert!(!cheap.contains("Langbiang"));

    let beaches = run_ok(&config, &["destination", "list", "--type", "beach"]);
    assert_eq!(beaches.trim(), "No destinations found");
}

#[test]
fn test_destination_validation_and_not_found() {
    let temp = TempDir::new().unwrap();
    let config = local_config(temp.path());

    dulich_cmd()
        .arg("--config")
        .arg(&config)
        .args([
            "destination", "add", "--name", "Bà Nà", "--location", "Đà Nẵng", "--type",
            "mountain", "--hours", "4", "--rating", "7",
        ])
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("rating must be between 0 and 5"));

    dulich_cmd()
        .arg("--config")
        .arg(&config)
        .args(["destination", "show", "missing"])
        .assert()
        .failure()
        .code(4);
}

#[test]
fn test_destination_update_and_delete() {
    let temp = TempDir::new().unwrap();
    let config = local_config(temp.path());
    let id = add_destination(&config, "Thung lũng Tình Yêu", "3", ["10", "20", "30"]);

    run_ok(&config, &["destination", "update", &id, "--rating", "5", "--food", "1000"]);
    let shown = run_ok(&config, &["destination", "show", &id]);
    assert!(shown.contains("Đánh giá: 5.0/5"));
    assert!(shown.contains("Ăn uống: 1.000đ"));
    assert!(shown.contains("Lưu trú: 20đ"));

    run_ok(&config, &["destination", "delete", &id]);
    assert_eq!(
        run_ok(&config, &["destination", "list"]).trim(),
        "No destinations found"
    );
}

#[test]
fn test_trip_planning_flow() {
    let temp = TempDir::new().unwrap();
    let config = local_config(temp.path());
    let a = add_destination(&config, "A", "10", ["100", "200", "50"]);
    let b = add_destination(&config, "B", "8", ["100", "200", "50"]);
    let c = add_destination(&config, "C", "6", ["100", "200", "50"]);
    let trip = create_trip(&config, "Đà Lạt", "2025-04-10", "2025-04-11");

    run_ok(&config, &["trip", "add", &trip, &a, "--day", "1"]);
    let added = run_ok(&config, &["trip", "add", &trip, &b, "--day", "1"]);
    assert!(added.contains("Ngày 1 (19h / 24h)"));

    dulich_cmd()
        .arg("--config")
        .arg(&config)
        .args(["trip", "add", &trip, &c, "--day", "1"])
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("26 hours"));

    dulich_cmd()
        .arg("--config")
        .arg(&config)
        .args(["trip", "add", &trip, &c, "--day", "3"])
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("which has 2 day(s)"));

    let shown = run_ok(&config, &["trip", "show", &trip]);
    assert!(shown.contains("Đà Lạt  10/04/2025 - 11/04/2025"));
    assert!(shown.contains("  1. A"));
    assert!(shown.contains("  2. B"));
    assert!(!shown.contains("  3. C"));
    assert!(shown.contains("805đ"));

    let moved = run_ok(
        &config,
        &[
            "trip", "move", &trip, "--from-day", "1", "--from-order", "1", "--to-day", "2",
            "--to-index", "0",
        ],
    );
    assert!(moved.contains("Ngày 1 (8h / 24h)\n  1. B"));
    assert!(moved.contains("Ngày 2 (10h / 24h)\n  1. A"));

    let removed = run_ok(&config, &["trip", "remove", &trip, &b, "--day", "1"]);
    assert!(removed.contains("Ngày 1 (0h / 24h)\n  (trống)"));
}

#[test]
fn test_trip_budget_limit() {
    let temp = TempDir::new().unwrap();
    let config = local_config(temp.path());
    let a = add_destination(&config, "A", "4", ["200000", "300000", "100000"]);
    let trip = create_trip(&config, "Huế", "2025-08-01", "2025-08-01");
    run_ok(&config, &["trip", "add", &trip, &a, "--day", "1"]);

    let budget = run_ok(&config, &["trip", "budget", &trip, "--limit", "500000"]);
    assert!(budget.contains("690.000đ"));
    assert!(budget.contains("Vượt ngân sách 190.000đ"));
    assert!(budget.contains("Chi nhiều nhất: lưu trú (300.000đ)"));

    // The limit is stored with the budget record
    let shown = run_ok(&config, &["trip", "show", &trip]);
    assert!(shown.contains("500.000đ"));

    let data = fs::read_to_string(temp.path().join("dulich-data.json")).unwrap();
    assert!(data.contains("\"budgetLimit\": 500000.0"));
}

#[test]
fn test_trip_update_and_delete() {
    let temp = TempDir::new().unwrap();
    let config = local_config(temp.path());
    let trip = create_trip(&config, "Sa Pa", "2025-12-01", "2025-12-03");

    run_ok(&config, &["trip", "update", &trip, "--name", "Sa Pa mùa đông"]);
    let list = run_ok(&config, &["trip", "list"]);
    assert!(list.contains("Sa Pa mùa đông  01/12/2025 - 03/12/2025"));

    dulich_cmd()
        .arg("--config")
        .arg(&config)
        .args(["trip", "update", &trip, "--end", "2025-11-30"])
        .assert()
        .failure()
        .code(3);

    dulich_cmd()
        .arg("--config")
        .arg(&config)
        .args(["trip", "create", "--name", "x", "--start", "01/12/2025", "--end", "2025-12-02"])
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("Expected format: YYYY-MM-DD"));

    run_ok(&config, &["trip", "delete", &trip]);
    assert_eq!(run_ok(&config, &["trip", "list"]).trim(), "No trips found");
    let data = fs::read_to_string(temp.path().join("dulich-data.json")).unwrap();
    assert!(!data.contains(&trip));
}

#[test]
fn test_stats() {
    let temp = TempDir::new().unwrap();
    let config = local_config(temp.path());
    let a = add_destination(&config, "Langbiang", "4", ["100", "100", "0"]);
    let trip = create_trip(&config, "Đà Lạt", "2025-03-05", "2025-03-06");
    run_ok(&config, &["trip", "add", &trip, &a, "--day", "2"]);

    let stats = run_ok(&config, &["stats", "--year", "2025"]);
    assert!(stats.contains("Núi"));
    assert!(stats.contains("1. Langbiang ★4.5"));
    assert!(stats.contains("Tháng  3: 1 chuyến, 230đ"));
    assert!(stats.contains("Tổng: 1 chuyến, 230đ"));
}

#[test]
fn test_no_command_prints_hint() {
    dulich_cmd()
        .assert()
        .success()
        .stdout(predicate::str::contains("Use --help"));
}
