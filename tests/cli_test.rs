//! End-to-end runs of the realitycheck binary.

use std::path::PathBuf;
use std::process::Command;
use tempfile::TempDir;

fn bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_realitycheck"))
}

fn fixture() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("testdata")
        .join("angular_app")
}

#[test]
fn test_missing_path_exits_one_without_output() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("report.md");

    for args in [
        vec!["extract", "/no/such/source", "-o"],
        vec!["reality", "report", "/no/such/source", "-o"],
        vec!["validate", "/no/such/source", "-o"],
        vec!["definitions", "/no/such/source", "-o"],
        vec!["discover", "/no/such/source", "-o"],
        vec!["baseline", "--original", "/no/such/source", "--refactored", "/no/such/refactored", "-o"],
    ] {
        let status = bin()
            .args(&args)
            .arg(&output)
            .arg("--quiet")
            .output()
            .unwrap();
        assert_eq!(status.status.code(), Some(1), "{:?}", args);
        assert!(String::from_utf8_lossy(&status.stderr).contains("Error: path does not exist"));
        assert!(!output.exists());
    }
}

#[test]
fn test_spec_check_missing_source_exits_one() {
    let design = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("testdata")
        .join("design.md");
    let output = bin()
        .arg("spec-check")
        .arg(&design)
        .arg("/no/such/source")
        .arg("--quiet")
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Error: path does not exist"));
    assert!(output.stdout.is_empty());
}

#[test]
fn test_extract_writes_markdown_and_json() {
    let dir = TempDir::new().unwrap();
    let md = dir.path().join("contracts.md");
    let json = dir.path().join("contracts.json");

    let status = bin()
        .arg("extract")
        .arg(fixture())
        .arg("-o")
        .arg(&md)
        .arg("--json")
        .arg(&json)
        .arg("--quiet")
        .status()
        .unwrap();
    assert_eq!(status.code(), Some(0));

    assert!(std::fs::read_to_string(&md).unwrap().contains("/api/users"));
    let data: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&json).unwrap()).unwrap();
    assert_eq!(data["metadata"]["total_files"], 4);
}

#[test]
fn test_reality_fail_on_error() {
    let scan = bin()
        .args(["reality", "scan"])
        .arg(fixture())
        .arg("--fail-on-error")
        .output()
        .unwrap();
    assert_eq!(scan.status.code(), Some(1));

    let without_flag = bin().args(["reality", "scan"]).arg(fixture()).output().unwrap();
    assert_eq!(without_flag.status.code(), Some(0));
}

#[test]
fn test_init_list_and_write() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("realitycheck.yaml");

    let list = bin().args(["init", "--list"]).output().unwrap();
    assert_eq!(list.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&list.stdout).contains("strict"));

    let status = bin()
        .args(["init", "-t", "strict", "-o"])
        .arg(&path)
        .status()
        .unwrap();
    assert_eq!(status.code(), Some(0));
    assert!(std::fs::read_to_string(&path).unwrap().contains("integration_threshold: 90"));

    let again = bin().args(["init", "-o"]).arg(&path).status().unwrap();
    assert_eq!(again.code(), Some(1));
}

#[test]
fn test_config_threshold_applies() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("lenient.yaml");
    std::fs::write(&config, "integration_threshold: 20\n").unwrap();

    let status = bin()
        .args(["reality", "integration"])
        .arg(fixture())
        .arg("--fail-on-error")
        .arg("--config")
        .arg(&config)
        .status()
        .unwrap();
    assert_eq!(status.code(), Some(0));
}
