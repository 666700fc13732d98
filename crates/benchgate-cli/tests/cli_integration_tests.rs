// Dweve Benchgate - Performance Regression Gate
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
use std::path::PathBuf;
use tempfile::TempDir;

const BASELINE: &str = r#"
linux:
  ipc_throughput:
    min_throughput_msgs_per_sec: 100000
    tolerance_percent: 10
  latency_stress:
    max_latency_p99_us: 50
    max_violation_percent: 1
macos:
  ipc_throughput:
    min_throughput_msgs_per_sec: 80000
"#;

// Test helper to create a benchgate command
fn benchgate_cmd() -> Command {
    let mut cmd = Command::cargo_bin("benchgate").expect("Failed to find benchgate binary");
    cmd.env_remove("RUST_LOG");
    cmd
}

// Test helper to write a file into a temporary directory
fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).expect("Failed to write temp file");
    path
}

fn workspace(results: &[(&str, &str)]) -> (TempDir, PathBuf) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let baseline = write(&dir, "baselines.yaml", BASELINE);
    fs::create_dir(dir.path().join("results")).expect("Failed to create results dir");
    for (name, content) in results {
        write(&dir, &format!("results/{}", name), content);
    }
    (dir, baseline)
}

// ===== Help and Version Tests =====

#[test]
fn test_help_output() {
    benchgate_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("check"))
        .stdout(predicate::str::contains("validate-baseline"))
        .stdout(predicate::str::contains("Usage:"));
}

#[test]
fn test_version_output() {
    benchgate_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("benchgate"));
}

#[test]
fn test_no_subcommand_fails() {
    benchgate_cmd().assert().failure();
}

// ===== Check Command Tests =====

#[test]
fn test_check_passing_run() {
    let (dir, baseline) = workspace(&[(
        "linux.json",
        r#"{"test_name": "ipc_throughput_benchmark", "throughput_msgs_per_sec": 120000}"#,
    )]);

    benchgate_cmd()
        .arg("check")
        .arg(&baseline)
        .arg(dir.path().join("results"))
        .arg("--enforce")
        .assert()
        .success()
        .stdout(predicate::str::contains("Overall: PASSED"))
        .stdout(predicate::str::contains("[PASSED] ipc_throughput_benchmark (linux)"))
        .stderr(predicate::str::contains("Performance gate passed"));
}

#[test]
fn test_check_regression_not_enforced_exits_zero() {
    let (dir, baseline) = workspace(&[(
        "linux.json",
        r#"{"test_name": "ipc_throughput_benchmark", "throughput_msgs_per_sec": 50000}"#,
    )]);

    benchgate_cmd()
        .arg("check")
        .arg(&baseline)
        .arg(dir.path().join("results/linux.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Overall: FAILED"))
        .stdout(predicate::str::contains("below minimum"))
        .stderr(predicate::str::contains("not enforced"));
}

#[test]
fn test_check_regression_enforced_exits_one() {
    let (dir, baseline) = workspace(&[(
        "linux.json",
        r#"{"test_name": "ipc_throughput_benchmark", "throughput_msgs_per_sec": 50000}"#,
    )]);

    benchgate_cmd()
        .arg("check")
        .arg(&baseline)
        .arg(dir.path().join("results/linux.json"))
        .arg("--enforce")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("blocking"));
}

#[test]
fn test_check_warning_never_blocks() {
    let (dir, baseline) = workspace(&[(
        "linux.json",
        r#"{"test_name": "latency_stress_test", "latency_p99_us": 20, "violation_rate_percent": 5}"#,
    )]);

    benchgate_cmd()
        .arg("check")
        .arg(&baseline)
        .arg(dir.path().join("results"))
        .arg("--enforce")
        .assert()
        .success()
        .stdout(predicate::str::contains("Overall: WARNING"))
        .stdout(predicate::str::contains("WARN: violation_rate_percent"));
}

#[test]
fn test_check_platform_from_file_name_and_flag() {
    let record = r#"{"test_name": "ipc_throughput_benchmark", "throughput_msgs_per_sec": 85000}"#;
    let (dir, baseline) = workspace(&[("bench_macos.json", record)]);
    let results = dir.path().join("results/bench_macos.json");

    // macOS baseline: 80000, passes.
    benchgate_cmd()
        .arg("check")
        .arg(&baseline)
        .arg(&results)
        .arg("--enforce")
        .assert()
        .success()
        .stdout(predicate::str::contains("(macos)"));

    // Flag overrides the file name: linux limit is 90000, fails.
    benchgate_cmd()
        .arg("check")
        .arg(&baseline)
        .arg(&results)
        .args(["--platform", "linux", "--enforce"])
        .assert()
        .code(1);
}

#[test]
fn test_check_json_format() {
    let (dir, baseline) = workspace(&[(
        "runs_linux.json",
        r#"[
            {"test_name": "ipc_throughput_a", "throughput_msgs_per_sec": 120000},
            {"test_name": "startup_time", "throughput_msgs_per_sec": 1}
        ]"#,
    )]);

    let output = benchgate_cmd()
        .arg("check")
        .arg(&baseline)
        .arg(dir.path().join("results"))
        .args(["--format", "json"])
        .output()
        .expect("Failed to run benchgate");
    assert!(output.status.success());

    let report: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout is a JSON report");
    assert_eq!(report["overall"], "passed");
    assert_eq!(report["counts"]["passed"], 1);
    assert_eq!(report["counts"]["unmatched"], 1);
    let source = report["sections"][1]["source"].as_str().unwrap();
    assert!(source.ends_with("runs_linux.json#1"));
}

#[test]
fn test_check_writes_markdown_and_json() {
    let (dir, baseline) = workspace(&[(
        "linux.json",
        r#"{"test_name": "ipc_throughput_benchmark", "throughput_msgs_per_sec": 95000}"#,
    )]);
    let markdown = dir.path().join("report.md");
    let json = dir.path().join("report.json");

    benchgate_cmd()
        .arg("check")
        .arg(&baseline)
        .arg(dir.path().join("results"))
        .arg("--markdown")
        .arg(&markdown)
        .arg("--json")
        .arg(&json)
        .assert()
        .success();

    let md = fs::read_to_string(&markdown).unwrap();
    assert!(md.contains("# Performance Regression Report"));
    assert!(md.contains("| Throughput | 95000 msg/s |"));
    assert!(fs::read_to_string(&json).unwrap().contains("\"overall\": \"passed\""));
}

#[test]
fn test_check_input_errors_reported_separately() {
    let (dir, baseline) = workspace(&[
        ("a_linux.json", r#"{"test_name": "latency_stress_run"}"#),
        ("b_linux.json", "not json"),
        (
            "c_linux.json",
            r#"{"test_name": "ipc_throughput_benchmark", "throughput_msgs_per_sec": 99000}"#,
        ),
    ]);

    benchgate_cmd()
        .arg("check")
        .arg(&baseline)
        .arg(dir.path().join("results"))
        .args(["--enforce", "--parallel"])
        .assert()
        .success()
        .stdout(predicate::str::contains("INPUT ERRORS"))
        .stdout(predicate::str::contains("latency_p99_us"))
        .stdout(predicate::str::contains("b_linux.json"))
        .stdout(predicate::str::contains("Passed: 1"));

    benchgate_cmd()
        .arg("check")
        .arg(&baseline)
        .arg(dir.path().join("results"))
        .arg("--fail-on-input-errors")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Input errors, blocking"));
}

#[test]
fn test_check_invalid_baseline_fails() {
    let (dir, _) = workspace(&[("linux.json", r#"{"test_name": "x"}"#)]);
    let bad = write(&dir, "bad.yaml", "solaris:\n  ipc:\n    max_memory_mb: 1\n");

    benchgate_cmd()
        .arg("check")
        .arg(&bad)
        .arg(dir.path().join("results"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"))
        .stderr(predicate::str::contains("solaris"));
}

#[test]
fn test_check_missing_results_fails() {
    let (dir, baseline) = workspace(&[]);

    benchgate_cmd()
        .arg("check")
        .arg(&baseline)
        .arg(dir.path().join("results"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("no result files found"));
}

#[test]
fn test_check_file_size_limit() {
    let (dir, baseline) = workspace(&[(
        "linux.json",
        r#"{"test_name": "ipc_throughput_benchmark", "throughput_msgs_per_sec": 120000}"#,
    )]);

    benchgate_cmd()
        .env("BENCHGATE_MAX_FILE_SIZE", "10")
        .arg("check")
        .arg(&baseline)
        .arg(dir.path().join("results"))
        .assert()
        .success()
        .stdout(predicate::str::contains("too large"));
}

// ===== Validate Baseline Tests =====

#[test]
fn test_validate_baseline() {
    let (_dir, baseline) = workspace(&[]);

    benchgate_cmd()
        .arg("validate-baseline")
        .arg(&baseline)
        .assert()
        .success()
        .stdout(predicate::str::contains("linux: 2 entries"))
        .stdout(predicate::str::contains("macos: 1 entries"));
}

#[test]
fn test_validate_baseline_negative_bound() {
    let dir = TempDir::new().unwrap();
    let bad = write(&dir, "bad.yaml", "linux:\n  ipc:\n    max_memory_mb: -5\n");

    benchgate_cmd()
        .arg("validate-baseline")
        .arg(&bad)
        .assert()
        .failure()
        .stderr(predicate::str::contains("max_memory_mb"));
}

// ===== Completion Tests =====

#[test]
fn test_completion_bash() {
    benchgate_cmd()
        .args(["completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("benchgate"));
}

#[test]
fn test_completion_install_instructions() {
    benchgate_cmd()
        .args(["completion", "fish", "--install"])
        .assert()
        .success()
        .stdout(predicate::str::contains("benchgate.fish"));
}

#[test]
fn test_completion_unsupported_shell() {
    benchgate_cmd()
        .args(["completion", "tcsh"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported shell"));
}
