#![forbid(unsafe_code)]

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;
use tempfile::tempdir;

#[test]
fn write_template_creates_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("latency-report.toml");
    let mut cmd = Command::cargo_bin("latency-report").unwrap();
    cmd.arg("config").arg("write-template").arg("--path").arg(&path);
    cmd.assert().success();
    let contents = std::fs::read_to_string(path).unwrap();
    assert!(contents.contains("[report]"));
    assert!(contents.contains("column_width = 20"));
}

#[test]
fn write_template_refuses_overwrite() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("latency-report.toml");
    std::fs::write(&path, "keep me").unwrap();
    let mut cmd = Command::cargo_bin("latency-report").unwrap();
    cmd.arg("config").arg("write-template").arg("--path").arg(&path);
    cmd.assert().code(2).stderr(predicate::str::contains("refusing to overwrite"));
    assert_eq!(std::fs::read_to_string(path).unwrap(), "keep me");
}
