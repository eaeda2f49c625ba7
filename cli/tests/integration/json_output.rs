//! JSON output integration tests for lcp CLI.

#[path = "../common/mod.rs"]
mod common;

use assert_cmd::cargo::cargo_bin_cmd;
use common::TestFixture;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;

fn parse_stdout(stdout: &[u8]) -> Value {
    let text = String::from_utf8(stdout.to_vec()).expect("stdout is not UTF-8");
    let line = text.lines().next().expect("no JSON line on stdout");
    serde_json::from_str(line).expect("stdout is not valid JSON")
}

#[test]
fn test_json_success_output() {
    let fx = TestFixture::new();
    let src = fx.source_file("letters.txt", "ABCDEFGHIJ");
    let dst = fx.dest_path("letters.txt");

    let mut cmd = cargo_bin_cmd!("lcp");
    let output = cmd
        .arg("--output")
        .arg("json")
        .arg("--chunk-size")
        .arg("3")
        .arg(&src)
        .arg(&dst)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let value = parse_stdout(&output);
    assert_eq!(value["outcome"], "copied");
    assert_eq!(value["bytes_copied"], 10);
    assert_eq!(value["chunks"], 4);
    assert_eq!(value["chunk_size"], 3);
    assert_eq!(value["destination"], dst.display().to_string());
    assert_eq!(fs::read(&dst).unwrap(), b"ABCDEFGHIJ");
}

#[test]
fn test_json_skipped_output() {
    let fx = TestFixture::new();
    let src = fx.source_file("test.txt", "new");
    let dst = fx.dest_path("test.txt");
    fs::write(&dst, "old").unwrap();

    let mut cmd = cargo_bin_cmd!("lcp");
    let output = cmd
        .args(["--output", "json", "--on-conflict", "skip"])
        .arg(&src)
        .arg(&dst)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let value = parse_stdout(&output);
    assert_eq!(value["outcome"], "skipped");
    assert!(value.get("bytes_copied").is_none());
    assert_eq!(fs::read_to_string(&dst).unwrap(), "old");
}

#[test]
fn test_json_failure_output() {
    let fx = TestFixture::new();
    let src = fx.src.path().join("missing.txt");
    let dst = fx.dest_path("out.txt");

    let mut cmd = cargo_bin_cmd!("lcp");
    let output = cmd
        .args(["--output", "json"])
        .arg(&src)
        .arg(&dst)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("error[not_found]"))
        .get_output()
        .stdout
        .clone();

    let value = parse_stdout(&output);
    assert_eq!(value["outcome"], "failed");
    assert_eq!(value["error_code"], "not_found");
    assert!(
        value["error_message"]
            .as_str()
            .unwrap()
            .contains("missing.txt")
    );
}

#[test]
fn test_json_failure_reports_resolved_destination() {
    let fx = TestFixture::new();
    let src = fx.src.path().join("missing.txt");

    let mut cmd = cargo_bin_cmd!("lcp");
    let output = cmd
        .args(["--output", "json"])
        .arg(&src)
        .arg(fx.dst.path())
        .assert()
        .failure()
        .code(1)
        .get_output()
        .stdout
        .clone();

    let value = parse_stdout(&output);
    assert_eq!(value["outcome"], "failed");
    assert_eq!(
        value["destination"],
        fx.dest_path("missing.txt").display().to_string()
    );
}

#[test]
fn test_json_invalid_chunk_size() {
    let fx = TestFixture::new();
    let src = fx.source_file("test.txt", "content");
    let dst = fx.dest_path("test.txt");

    let mut cmd = cargo_bin_cmd!("lcp");
    let output = cmd
        .args(["--output", "json", "--chunk-size", "0"])
        .arg(&src)
        .arg(&dst)
        .assert()
        .failure()
        .code(2)
        .get_output()
        .stdout
        .clone();

    let value = parse_stdout(&output);
    assert_eq!(value["error_code"], "invalid_argument");
    assert!(!dst.exists());
}
