//! End-to-end tests for the benchmark programs and the `baseline` driver
//!
//! These spawn the built binaries and check the stdout contract, the
//! stderr diagnostics and the exit status.

use baseline_harness::Report;
use std::io::Write;
use std::process::{Command, Output};

fn run(bin: &str, args: &[&str]) -> Output {
    Command::new(bin)
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .unwrap_or_else(|e| panic!("failed to spawn {}: {}", bin, e))
}

/// Assert the exact three-line shape and return the parsed report
fn assert_contract(stdout: &[u8]) -> Report {
    let stdout = String::from_utf8(stdout.to_vec()).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 3, "unexpected stdout:\n{}", stdout);
    assert!(stdout.ends_with('\n'));

    let labels = ["STARTUP_TIME_US: ", "COMPUTE_TIME_US: ", "RESULT: "];
    for (line, label) in lines.iter().zip(labels) {
        let value = line
            .strip_prefix(label)
            .unwrap_or_else(|| panic!("expected '{}' prefix, got '{}'", label, line));
        assert!(
            value.trim_start_matches('-').chars().all(|c| c.is_ascii_digit()),
            "non-integer value in '{}'",
            line
        );
    }
    Report::parse(&stdout).unwrap()
}

#[test]
fn test_fibonacci_program() {
    let output = run(env!("CARGO_BIN_EXE_fibonacci"), &[]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let report = assert_contract(&output.stdout);
    assert_eq!(report.result, 9227465);
    assert!(output.stderr.is_empty());
}

#[test]
fn test_primes_program() {
    let output = run(env!("CARGO_BIN_EXE_primes"), &[]);
    assert!(output.status.success());
    let report = assert_contract(&output.stdout);
    assert_eq!(report.result, 9592);
    assert!(output.stderr.is_empty());
}

#[test]
fn test_matrix_multiply_program_is_reproducible() {
    let first = run(env!("CARGO_BIN_EXE_matrix-multiply"), &[]);
    let second = run(env!("CARGO_BIN_EXE_matrix-multiply"), &[]);
    assert!(first.status.success());
    assert!(second.status.success());

    let first = assert_contract(&first.stdout);
    let second = assert_contract(&second.stdout);
    assert_eq!(first.result, 5_078_978_272);
    assert_eq!(first.result, second.result);
}

#[test]
fn test_driver_run_matches_program_output_shape() {
    let output = run(env!("CARGO_BIN_EXE_baseline"), &["run", "primes"]);
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(assert_contract(&output.stdout).result, 9592);
}

#[test]
fn test_driver_wrong_expectation_reports_then_fails() {
    let mut config = tempfile::NamedTempFile::new().unwrap();
    writeln!(config, "[fibonacci]\nn = 10\nexpected = 56").unwrap();
    let path = config.path().to_str().unwrap();

    let output = run(
        env!("CARGO_BIN_EXE_baseline"),
        &["run", "fibonacci", "--config", path],
    );

    assert_eq!(output.status.code(), Some(1));
    let report = assert_contract(&output.stdout);
    assert_eq!(report.result, 55);

    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(
        stderr.contains("ERROR: Expected fib(10) = 56, got 55"),
        "stderr: {}",
        stderr
    );
}

#[test]
fn test_driver_json_format() {
    let output = run(
        env!("CARGO_BIN_EXE_baseline"),
        &["run", "primes", "--format", "json"],
    );
    assert_eq!(output.status.code(), Some(0));
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["benchmark"], "primes");
    assert_eq!(json["result"], 9592);
    assert_eq!(json["verdict"]["status"], "passed");
}

#[test]
fn test_driver_unknown_benchmark() {
    let output = run(env!("CARGO_BIN_EXE_baseline"), &["run", "quicksort"]);
    assert!(!output.status.success());
}

#[test]
fn test_driver_bad_config_fails_before_report() {
    let mut config = tempfile::NamedTempFile::new().unwrap();
    writeln!(config, "[fibonacci]\nwarmup_iterations = 0").unwrap();
    let path = config.path().to_str().unwrap();

    let output = run(
        env!("CARGO_BIN_EXE_baseline"),
        &["run", "fibonacci", "--config", path],
    );
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("warmup_iterations"));
}

#[test]
fn test_driver_rejects_fibonacci_n_past_result_width() {
    let mut config = tempfile::NamedTempFile::new().unwrap();
    writeln!(config, "[fibonacci]\nn = 100").unwrap();
    let path = config.path().to_str().unwrap();

    let output = run(
        env!("CARGO_BIN_EXE_baseline"),
        &["run", "fibonacci", "--config", path],
    );
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("fibonacci.n must be at most 92"));
}

#[test]
fn test_driver_check_log_prefixed_report() {
    let mut report = tempfile::NamedTempFile::new().unwrap();
    write!(
        report,
        "[run] STARTUP_TIME_US: 10\n[run] COMPUTE_TIME_US: 20\n[run] RESULT: 9592\n"
    )
    .unwrap();
    let path = report.path().to_str().unwrap();

    let output = run(
        env!("CARGO_BIN_EXE_baseline"),
        &["check", path, "--benchmark", "primes"],
    );
    assert_eq!(output.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&output.stdout).contains("total 30 us"));
}

#[test]
fn test_driver_list() {
    let output = run(env!("CARGO_BIN_EXE_baseline"), &["list"]);
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout.lines().count(), 3);
    assert!(stdout.contains("expected fib(35) = 9227465"));
    assert!(stdout.contains("128x128"));
    assert!(stdout.contains("checksum"));
    assert!(stdout.contains("expected primes(100000) = 9592"));
}

#[test]
fn test_driver_check_report_file() {
    let mut report = tempfile::NamedTempFile::new().unwrap();
    write!(report, "STARTUP_TIME_US: 1500\nCOMPUTE_TIME_US: 2500\nRESULT: 9592\n").unwrap();
    let path = report.path().to_str().unwrap();

    let output = run(
        env!("CARGO_BIN_EXE_baseline"),
        &["check", path, "--benchmark", "primes"],
    );
    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("total 4000 us"), "stdout: {}", stdout);

    let output = run(
        env!("CARGO_BIN_EXE_baseline"),
        &["check", path, "--benchmark", "fibonacci"],
    );
    assert_eq!(output.status.code(), Some(1));
    assert!(
        String::from_utf8_lossy(&output.stderr).contains("Expected fib(35) = 9227465, got 9592")
    );
}

#[test]
fn test_driver_check_malformed_report() {
    let mut report = tempfile::NamedTempFile::new().unwrap();
    write!(report, "STARTUP_TIME_US: 1\nRESULT: 2\n").unwrap();
    let path = report.path().to_str().unwrap();

    let output = run(env!("CARGO_BIN_EXE_baseline"), &["check", path]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("COMPUTE_TIME_US"));
}
