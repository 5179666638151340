//! Integration tests for the eft-generator CLI.
//!
//! These tests run the actual binary against the CSV files in `tests/data`.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;

const RECORD_LENGTH: usize = 1464;

/// Get path to test data file
fn test_data_path(filename: &str) -> String {
    format!("tests/data/{}", filename)
}

/// Command with a complete originator configuration
fn generator_cmd() -> Command {
    let mut cmd = Command::cargo_bin("eft-generator").unwrap();
    cmd.args([
        "--originator-id",
        "0123456789",
        "--file-creation-number",
        "1",
        "--originator-long-name",
        "The City of Sault Ste. Marie",
        "--originator-short-name",
        "SSM",
        "--creation-date",
        "2024-02-29",
    ]);
    cmd
}

/// Run the binary with the given input file and return stdout
fn run_generator(input_file: &str) -> String {
    let assert = generator_cmd().arg(input_file).assert().success();
    String::from_utf8(assert.get_output().stdout.clone()).unwrap()
}

#[test]
fn test_generates_header_details_and_trailer() {
    let output = run_generator(&test_data_path("payments.csv"));
    let lines: Vec<&str> = output.split("\r\n").collect();

    // one grouped debit transaction, two single credits
    assert_eq!(lines.len(), 5);
    assert!(lines.iter().all(|l| l.len() == RECORD_LENGTH));
    assert!(lines[0].starts_with("A0000000010123456789"));
    assert_eq!(&lines[0][24..30], "024060");
    assert!(lines[1].starts_with("D000000002"));
    assert!(lines[2].starts_with("C000000003"));
    assert!(lines[3].starts_with("C000000004"));
    assert!(lines[4].starts_with("Z000000005"));
}

#[test]
fn test_trailer_totals() {
    let output = run_generator(&test_data_path("payments.csv"));
    let trailer = output.split("\r\n").last().unwrap();

    // 1234.56 + 2345.67
    assert_eq!(&trailer[24..38], "00000000358023");
    assert_eq!(&trailer[38..46], "00000001");
    // 1500.00 + 1500.00 (1499.995 rounds up)
    assert_eq!(&trailer[46..60], "00000000300000");
    assert_eq!(&trailer[60..68], "00000002");
}

#[test]
fn test_output_is_deterministic() {
    let first = run_generator(&test_data_path("payments.csv"));
    let second = run_generator(&test_data_path("payments.csv"));
    assert_eq!(first, second);
}

#[test]
fn test_output_file_option() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.cpa");

    generator_cmd()
        .arg(test_data_path("payments.csv"))
        .arg("--output")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let written = fs::read_to_string(&path).unwrap();
    assert_eq!(written, run_generator(&test_data_path("payments.csv")));
}

#[test]
fn test_warnings_go_to_stderr() {
    generator_cmd()
        .arg(test_data_path("warnings.csv"))
        .assert()
        .success()
        .stderr(predicate::str::contains("warning: transaction 0 segment 0: cpa_code"))
        .stderr(predicate::str::contains("payee_name"))
        .stderr(predicate::str::contains("cross_reference_number"));
}

#[test]
fn test_check_mode() {
    generator_cmd()
        .arg(test_data_path("payments.csv"))
        .arg("--check")
        .assert()
        .success()
        .stdout(predicate::str::diff("OK\n"));
}

#[test]
fn test_invalid_amount_fails() {
    generator_cmd()
        .arg(test_data_path("invalid_amount.csv"))
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Segment amount"));
}

#[test]
fn test_invalid_input_creates_no_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.cpa");

    generator_cmd()
        .arg(test_data_path("invalid_amount.csv"))
        .arg("--output")
        .arg(&path)
        .assert()
        .failure();

    assert!(!path.exists());
}

#[test]
fn test_invalid_direction_fails() {
    generator_cmd()
        .arg(test_data_path("invalid_direction.csv"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported transaction direction"));
}

#[test]
fn test_partial_return_account_fails() {
    generator_cmd()
        .arg(test_data_path("payments.csv"))
        .args(["--return-institution", "123"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("must be defined together"));
}

#[test]
fn test_unsupported_currency_rejected() {
    generator_cmd()
        .arg(test_data_path("payments.csv"))
        .args(["--currency", "EUR"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported destination currency"));
}

#[test]
fn test_missing_file_error() {
    generator_cmd()
        .arg("nonexistent.csv")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn test_missing_argument_error() {
    let mut cmd = Command::cargo_bin("eft-generator").unwrap();
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("--originator-id"));
}
