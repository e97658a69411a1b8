// Dweve Wirebench - Wire-format Serialization Benchmark
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! CLI integration tests

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const ENV_VARS: [&str; 4] = [
    "WIREBENCH_ITERATIONS",
    "WIREBENCH_SIZES",
    "WIREBENCH_FORMATS",
    "WIREBENCH_TIMEOUT_SECS",
];

// Test helper to create a wirebench command isolated from the environment
fn wirebench_cmd() -> Command {
    let mut cmd = Command::cargo_bin("wirebench").expect("Failed to find wirebench binary");
    for var in ENV_VARS {
        cmd.env_remove(var);
    }
    cmd.env_remove("RUST_LOG");
    cmd
}

// Small loopback session arguments
fn small_run() -> Vec<&'static str> {
    vec![
        "run",
        "--sizes",
        "20",
        "--formats",
        "cbor,jsonstream",
        "--iterations",
        "2",
        "--no-gc",
    ]
}

// ===== Help and Version Tests =====

#[test]
fn test_help_output() {
    wirebench_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Wirebench - wire-format serialization benchmark"))
        .stdout(predicate::str::contains("Usage:"));
}

#[test]
fn test_version_output() {
    wirebench_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("wirebench"));
}

#[test]
fn test_no_subcommand_fails() {
    wirebench_cmd().assert().failure();
}

// ===== Codec Command Tests =====

#[test]
fn test_formats_lists_catalogue() {
    wirebench_cmd()
        .arg("formats")
        .assert()
        .success()
        .stdout(predicate::str::contains("jsondom"))
        .stdout(predicate::str::contains("application/cbor"))
        .stdout(predicate::str::contains("application/vnd.apache.arrow.stream"))
        .stdout(predicate::str::contains("(no codec)").not());
}

#[test]
fn test_verify_all_codecs() {
    wirebench_cmd()
        .args(["verify", "--records", "50"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Verifying 7 codecs on 51 records"))
        .stdout(predicate::str::contains("✓"))
        .stdout(predicate::str::contains("flatbuffers"))
        .stdout(predicate::str::contains("✗").not());
}

#[test]
fn test_verify_rejects_oversized_dataset() {
    wirebench_cmd()
        .args(["verify", "--records", "10000001"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"))
        .stderr(predicate::str::contains("exceeds maximum"));
}

// ===== Run Command Tests =====

#[test]
fn test_run_loopback_prints_report() {
    wirebench_cmd()
        .args(small_run())
        .assert()
        .success()
        .stdout(predicate::str::contains("WIREBENCH REPORT"))
        .stdout(predicate::str::contains("SIZE: 20 (20 records)"))
        .stdout(predicate::str::contains("RANKING:"))
        .stdout(predicate::str::contains("Overall winner:"));
}

#[test]
fn test_run_quiet_prints_summary() {
    wirebench_cmd()
        .args(small_run())
        .arg("--quiet")
        .assert()
        .success()
        .stdout(predicate::str::contains("SUMMARY:"))
        .stdout(predicate::str::contains("WIREBENCH REPORT").not());
}

#[test]
fn test_run_writes_exports() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let json = dir.path().join("report.json");
    let markdown = dir.path().join("report.md");
    let runs = dir.path().join("runs.json");

    wirebench_cmd()
        .args(small_run())
        .args(["--title", "Export check", "--quiet"])
        .arg("--output")
        .arg(&json)
        .arg("--markdown")
        .arg(&markdown)
        .arg("--raw-runs")
        .arg(&runs)
        .assert()
        .success()
        .stderr(predicate::str::contains("4 runs written"));

    let report: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&json).expect("report missing"))
            .expect("report is not JSON");
    assert_eq!(report["title"], "Export check");
    assert_eq!(report["config"]["transport"], "loopback");
    assert_eq!(report["config"]["iterations"], 2);
    assert!(report["scoring"]["ranking"].is_array());

    let md = fs::read_to_string(&markdown).expect("markdown missing");
    assert!(md.starts_with("# Export check"));

    let raw: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&runs).expect("runs missing"))
            .expect("runs are not JSON");
    let raw = raw.as_array().expect("runs are an array");
    assert_eq!(raw.len(), 4);
    assert_eq!(raw[0]["result"]["status"], "ok");
}

#[test]
fn test_run_rejects_unknown_format() {
    wirebench_cmd()
        .args(["run", "--formats", "cbor,protobuf"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"))
        .stderr(predicate::str::contains("protobuf"));
}

#[test]
fn test_run_rejects_zero_iterations() {
    wirebench_cmd()
        .args(["run", "--sizes", "10", "--iterations", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("must be at least 1"));
}

#[test]
fn test_run_rejects_bad_size() {
    wirebench_cmd()
        .args(["run", "--sizes", "huge"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid size 'huge'"));
}

#[test]
fn test_run_environment_defaults() {
    wirebench_cmd()
        .env("WIREBENCH_SIZES", "15")
        .env("WIREBENCH_FORMATS", "messagepack")
        .env("WIREBENCH_ITERATIONS", "1")
        .args(["run", "--no-gc"])
        .assert()
        .success()
        .stdout(predicate::str::contains("SIZE: 15 (15 records)"))
        .stdout(predicate::str::contains("MessagePack"))
        .stdout(predicate::str::contains("low_sample_size"));
}

#[test]
fn test_run_unreachable_server_reports_failed_runs() {
    wirebench_cmd()
        .args([
            "run",
            "--server",
            "http://127.0.0.1:9",
            "--sizes",
            "10",
            "--formats",
            "cbor",
            "--iterations",
            "1",
            "--no-gc",
        ])
        .assert()
        .success()
        .stderr(predicate::str::contains("1 of 1 runs failed"));
}

// ===== Score Command Tests =====

#[test]
fn test_score_exported_runs() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let runs = dir.path().join("runs.json");

    wirebench_cmd()
        .args(small_run())
        .arg("--quiet")
        .arg("--raw-runs")
        .arg(&runs)
        .assert()
        .success();

    wirebench_cmd()
        .arg("score")
        .arg(&runs)
        .args(["--title", "Rescored"])
        .assert()
        .success()
        .stdout(predicate::str::contains("WIREBENCH REPORT: Rescored"))
        .stdout(predicate::str::contains("Iterations: 2"))
        .stdout(predicate::str::contains("RANKING:"));
}

#[test]
fn test_score_missing_file() {
    wirebench_cmd()
        .args(["score", "/nonexistent/runs.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn test_score_empty_runs() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let runs = dir.path().join("runs.json");
    fs::write(&runs, "[]").expect("Failed to write runs");

    wirebench_cmd()
        .arg("score")
        .arg(&runs)
        .assert()
        .failure()
        .stderr(predicate::str::contains("contains no runs"));
}

#[test]
fn test_score_malformed_file() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let runs = dir.path().join("runs.json");
    fs::write(&runs, "{not json").expect("Failed to write runs");

    wirebench_cmd()
        .arg("score")
        .arg(&runs)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Serialization error"));
}
