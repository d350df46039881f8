// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Integration tests for the mapcompare CLI commands

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// A mapcompare invocation isolated from the user's config and environment
fn mapcompare(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("mapcompare").expect("binary builds");
    cmd.env("MAPCOMPARE_CONFIG", dir.path().join("config.toml"))
        .env_remove("NO_COLOR")
        .arg("--no-color");
    cmd
}

/// Write a matrix document into the temp dir
fn write_doc(dir: &TempDir, name: &str, json: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, json).unwrap();
    path
}

/// Three small maps about the water cycle
fn water_maps(dir: &TempDir) -> Vec<PathBuf> {
    vec![
        write_doc(
            dir,
            "one.json",
            r#"{"edges":[{"from":"water","to":"cloud"},{"from":"cloud","to":"rain"}]}"#,
        ),
        write_doc(dir, "two.json", r#"{"edges":[{"from":"water","to":"cloud"}]}"#),
        write_doc(
            dir,
            "three.json",
            r#"{"keys":["sea","cloud"],"matrix":[[0,1],[0,0]]}"#,
        ),
    ]
}

#[test]
fn test_weight_tsv() {
    let dir = TempDir::new().unwrap();
    let files = water_maps(&dir);

    mapcompare(&dir)
        .arg("weight")
        .args(&files)
        .args(["--format", "tsv"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("\twater\tcloud\train\tsea\n"))
        .stdout(predicate::str::contains("water\t0\t2\t0\t0\n"))
        .stderr(predicate::str::contains("Summed 3 matrices over 4 keys"));
}

#[test]
fn test_weight_json_report() {
    let dir = TempDir::new().unwrap();
    let files = water_maps(&dir);

    let output = mapcompare(&dir)
        .arg("weight")
        .args(&files)
        .args(["-f", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["kind"], "WeightAggregate");
    assert_eq!(report["matrix_count"], 3);
    assert_eq!(report["node_counts"], serde_json::json!([2, 3, 1, 1]));
    assert_eq!(report["matrix"][3][1], 1);
}

#[test]
fn test_vote_dot_to_file() {
    let dir = TempDir::new().unwrap();
    let files = water_maps(&dir);
    let out = dir.path().join("vote.dot");

    mapcompare(&dir)
        .arg("vote")
        .args(&files)
        .args(["--format", "dot", "--output"])
        .arg(&out)
        .assert()
        .success()
        .stderr(predicate::str::contains("Exported to"));

    let dot = fs::read_to_string(&out).unwrap();
    assert!(dot.starts_with("digraph concept_map {"));
    assert!(dot.contains("\"water\" -> \"cloud\" [label=\"1\"]"));
    assert!(!dot.contains("\"rain\""));
}

#[test]
fn test_nodes_listing() {
    let dir = TempDir::new().unwrap();
    let files = water_maps(&dir);

    mapcompare(&dir)
        .arg("nodes")
        .args(&files)
        .assert()
        .success()
        .stdout("water\t2/3\tkept\ncloud\t3/3\tkept\nrain\t1/3\tdropped\nsea\t1/3\tdropped\n");
}

#[test]
fn test_config_file_sets_default_format() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("config.toml"), "default_format = \"dot\"\n").unwrap();
    let files = water_maps(&dir);

    mapcompare(&dir)
        .arg("weight")
        .args(&files)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("digraph concept_map {"));

    mapcompare(&dir)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("default_format = \"dot\""));
}

#[test]
fn test_invalid_document_fails() {
    let dir = TempDir::new().unwrap();
    let bad = write_doc(&dir, "bad.json", r#"{"keys":["a","a"],"matrix":[[0,0],[0,0]]}"#);

    mapcompare(&dir)
        .arg("weight")
        .arg(&bad)
        .assert()
        .failure()
        .stderr(predicate::str::contains("bad.json"))
        .stderr(predicate::str::contains("duplicate key"));
}

#[test]
fn test_unknown_format_fails() {
    let dir = TempDir::new().unwrap();
    let files = water_maps(&dir);

    mapcompare(&dir)
        .arg("vote")
        .args(&files)
        .args(["--format", "yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown export format"));
}

#[test]
fn test_completions() {
    let dir = TempDir::new().unwrap();
    mapcompare(&dir)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("mapcompare"));
}

#[test]
fn test_weight_overflow_fails() {
    let dir = TempDir::new().unwrap();
    let huge = r#"{"keys":["a","b"],"matrix":[[0,9223372036854775807],[0,0]]}"#;
    let first = write_doc(&dir, "huge1.json", huge);
    let second = write_doc(&dir, "huge2.json", huge);

    mapcompare(&dir)
        .arg("weight")
        .arg(&first)
        .arg(&second)
        .assert()
        .failure()
        .stderr(predicate::str::contains("weight overflow in cell (0, 1)"));
}

#[test]
fn test_invalid_log_level_fails() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("config.toml"), "log_level = \"chatty\"\n").unwrap();

    mapcompare(&dir)
        .arg("config")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid log_level: chatty"));
}
