//! Tests for the `xml-mapping` binary.

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;

fn fixture_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("catalog")
        .join(name)
}

#[allow(deprecated)] // cargo_bin is still the simplest way to locate the binary
fn xml_mapping() -> Command {
    Command::cargo_bin("xml-mapping").expect("binary is built")
}

#[test]
fn test_check_prints_summary() {
    xml_mapping()
        .arg("check")
        .arg("--config")
        .arg(fixture_path("mapping.yaml"))
        .assert()
        .success()
        .stdout(predicate::str::contains("2 model(s)"))
        .stdout(predicate::str::contains("Product: 11 field(s)"))
        .stdout(predicate::str::contains("Customer: 1 field(s)"));
}

#[test]
fn test_check_rejects_invalid_mapping() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.yaml");
    std::fs::write(&path, "mappings:\n  Product:\n    fields:\n      name:\n        nodes: [title]\n        processor: [shout]\n").unwrap();

    xml_mapping()
        .arg("check")
        .arg("--config")
        .arg(&path)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error:"))
        .stderr(predicate::str::contains("unknown processor 'shout'"));
}

#[test]
fn test_map_selected_products_as_json() {
    let output = xml_mapping()
        .arg("map")
        .arg("--config")
        .arg(fixture_path("mapping.yaml"))
        .arg("--model")
        .arg("Product")
        .arg("--select")
        .arg("product")
        .arg("--format")
        .arg("json")
        .arg(fixture_path("catalog.xml"))
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let records: serde_json::Value = serde_json::from_slice(&output).expect("valid JSON");
    let records = records.as_array().expect("array of records");
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["name"], "Stadsfiets Comfort");
    assert_eq!(records[1]["released"], "2024-11-15");
    assert_eq!(records[1]["address"]["city"], "APELDOORN");
}

#[test]
fn test_map_defaults_to_root_as_yaml() {
    xml_mapping()
        .arg("map")
        .arg("-c")
        .arg(fixture_path("mapping.yaml"))
        .arg("-m")
        .arg("Product")
        .arg(fixture_path("catalog.xml"))
        .assert()
        .success()
        .stdout(predicate::str::contains("origin: feed"))
        .stderr(predicate::str::contains("1 Product record(s)"));
}

#[test]
fn test_map_unknown_model_fails() {
    xml_mapping()
        .arg("map")
        .arg("--config")
        .arg(fixture_path("mapping.yaml"))
        .arg("--model")
        .arg("Order")
        .arg(fixture_path("catalog.xml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("No model mapping found for 'Order'"));
}
