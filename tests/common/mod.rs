#![allow(dead_code)]

use assert_cmd::Command;
use std::path::{Path, PathBuf};

pub fn dulich_cmd() -> Command {
    let mut cmd = Command::cargo_bin("dulich").unwrap();
    cmd.env_remove("DULICH_CONFIG");
    cmd.env_remove("DULICH_BACKEND");
    cmd.env_remove("DULICH_DATA_FILE");
    cmd.env_remove("DULICH_LOG_FORMAT");
    cmd.env_remove("RUST_LOG");
    cmd
}

/// Write a local-backend config in `dir` and return its path
pub fn local_config(dir: &Path) -> PathBuf {
    let path = dir.join("dulich.toml");
    dulich_cmd()
        .arg("--config")
        .arg(&path)
        .args(["init", "--backend", "local"])
        .assert()
        .success();
    path
}

/// Run a command against `config` and return its stdout
pub fn run_ok(config: &Path, args: &[&str]) -> String {
    let output = dulich_cmd()
        .arg("--config")
        .arg(config)
        .args(args)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    String::from_utf8(output).unwrap()
}

/// Add a destination and return the identifier the store assigned
pub fn add_destination(config: &Path, name: &str, hours: &str, costs: [&str; 3]) -> String {
    let stdout = run_ok(
        config,
        &[
            "destination",
            "add",
            "--name",
            name,
            "--location",
            "Đà Lạt",
            "--type",
            "mountain",
            "--hours",
            hours,
            "--rating",
            "4.5",
            "--food",
            costs[0],
            "--stay",
            costs[1],
            "--transport",
            costs[2],
        ],
    );
    // "Created destination <id> (<name>)"
    stdout
        .split_whitespace()
        .nth(2)
        .unwrap()
        .to_string()
}

/// Create a trip and return its identifier
pub fn create_trip(config: &Path, name: &str, start: &str, end: &str) -> String {
    let stdout = run_ok(
        config,
        &["trip", "create", "--name", name, "--start", start, "--end", end],
    );
    // "Saved trip <id> (budget <id>)"
    stdout.split_whitespace().nth(2).unwrap().to_string()
}
