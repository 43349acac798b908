use assert_cmd::prelude::*;
use serde_json::Value;
use std::fs;
use std::process::Command;
use tempfile::tempdir;

const FIXTURE: &str = include_str!("../../extractor/tests/fixtures/RequestEventSource.cs");

fn inspect(path: &std::path::Path) -> Value {
    let output = Command::new(assert_cmd::cargo::cargo_bin!("eventdoc"))
        .arg("--quiet")
        .arg("inspect")
        .arg(path)
        .output()
        .expect("command run");
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("valid json")
}

#[test]
fn inspect_prints_document_as_json() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("RequestEventSource.cs");
    fs::write(&path, FIXTURE).unwrap();

    let body = inspect(&path);
    assert_eq!(body["name"], "Samples-Requests");
    assert_eq!(body["class_name"], "RequestEventSource");

    let records = body["records"].as_array().unwrap();
    assert_eq!(records.len(), 4);
    assert_eq!(records[1]["id"], "2");
    assert_eq!(records[1]["level"], "EventLevel.Verbose");
    assert_eq!(records[2]["tags"]["message"], "Request {0} failed");
    assert_eq!(records[3]["tags"]["task"], Value::Null);
}

#[test]
fn inspect_prints_null_for_other_files() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("Plain.cs");
    fs::write(&path, "namespace Samples { public class Plain { } }").unwrap();

    assert_eq!(inspect(&path), Value::Null);
}

#[test]
fn inspect_missing_file_fails() {
    let temp = tempdir().unwrap();

    Command::new(assert_cmd::cargo::cargo_bin!("eventdoc"))
        .arg("inspect")
        .arg(temp.path().join("Missing.cs"))
        .assert()
        .failure()
        .stderr(predicates::str::contains("Failed to extract events from"));
}
