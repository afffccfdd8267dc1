//! Reality scan and integration pass over fixtures and generated projects.

use std::path::{Path, PathBuf};
use tempfile::TempDir;

use realitycheck::config::{Config, FileSet};
use realitycheck::extract;
use realitycheck::reality::{scan_project, validate_integration};
use realitycheck::report;
use realitycheck::walker::Walker;
use realitycheck::{score, PatternLibrary, ViolationKind};

fn fixture() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("testdata")
        .join("angular_app")
}

fn reality_walker() -> Walker {
    Config::default().walker(FileSet::Reality).unwrap()
}

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, content).unwrap();
}

#[test]
fn test_scan_fixture() {
    let lib = PatternLibrary::builtin().unwrap();
    let scan = scan_project(&fixture(), &reality_walker(), &lib.reality).unwrap();

    assert_eq!(scan.total_files, 4);
    assert_eq!(scan.files_with_violations, 1);
    assert_eq!(scan.total_violations, 2);
    assert!(scan.violations.iter().all(|v| v.file_path.ends_with("mock-users.ts")));

    let kinds: Vec<_> = scan.violations.iter().map(|v| (v.violation_type, v.line_number)).collect();
    assert!(kinds.contains(&(ViolationKind::PlaceholderCode, 1)));
    assert!(kinds.contains(&(ViolationKind::MockData, 2)));
}

#[test]
fn test_integration_fixture() {
    let lib = PatternLibrary::builtin().unwrap();
    let stats = validate_integration(&fixture(), &reality_walker(), &lib.reality).unwrap();

    assert_eq!(stats.total_files, 4);
    assert_eq!(stats.files_with_real_api, 1);
    assert_eq!(stats.files_with_mock_data, 1);
    assert_eq!(stats.files_with_placeholders, 1);
    assert_eq!(stats.integration_score, 25);

    let verdict = score::calculate(&stats, 80);
    assert!(!verdict.passed);
    assert_eq!(verdict.grade, "F");
}

#[test]
fn test_mock_markers_report_their_lines() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "src/data.ts",
        "export const a = 1;\nconst users = mockData;\nconst b = 2;\nconst items = fakeData;\nconst c = dummyData;\n",
    );

    let lib = PatternLibrary::builtin().unwrap();
    let scan = scan_project(dir.path(), &reality_walker(), &lib.reality).unwrap();
    let lines: Vec<_> = scan.violations.iter().map(|v| v.line_number).collect();
    assert_eq!(lines, vec![2, 4, 5]);
}

#[test]
fn test_three_of_ten_files_score_thirty() {
    let dir = TempDir::new().unwrap();
    for i in 0..10 {
        let content = if i < 3 {
            "export async function load() { return await fetch('/api/items'); }\n"
        } else {
            "export const label = 'items';\n"
        };
        write(dir.path(), &format!("src/file{}.ts", i), content);
    }

    let lib = PatternLibrary::builtin().unwrap();
    let stats = validate_integration(dir.path(), &reality_walker(), &lib.reality).unwrap();
    assert_eq!(stats.total_files, 10);
    assert_eq!(stats.files_with_real_api, 3);
    assert_eq!(stats.integration_score, 30);
}

#[test]
fn test_mock_array_is_error_and_flagged() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "src/data.ts", "const mockData = [];\n");

    let lib = PatternLibrary::builtin().unwrap();
    let scan = scan_project(dir.path(), &reality_walker(), &lib.reality).unwrap();
    assert!(scan.error_count >= 1);
    assert!(scan.has_errors());

    let stats = validate_integration(dir.path(), &reality_walker(), &lib.reality).unwrap();
    assert_eq!(stats.files_with_mock_data, 1);
}

#[test]
fn test_empty_file_is_clean() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "src/empty.ts", "");

    let lib = PatternLibrary::builtin().unwrap();
    let scan = scan_project(dir.path(), &reality_walker(), &lib.reality).unwrap();
    assert_eq!(scan.total_files, 1);
    assert_eq!(scan.checks_passed, 1);
    assert_eq!(scan.total_violations, 0);

    let source_walker = Config::default().walker(FileSet::Source).unwrap();
    let data = extract::extract_contracts(dir.path(), &source_walker, &lib.contracts).unwrap();
    assert_eq!(data.metadata.total_files, 1);
    assert!(data.api_endpoints.is_empty());
    assert!(data.interfaces.is_empty());
}

#[test]
fn test_markdown_report_for_fixture() {
    let lib = PatternLibrary::builtin().unwrap();
    let walker = reality_walker();
    let scan = scan_project(&fixture(), &walker, &lib.reality).unwrap();
    let stats = validate_integration(&fixture(), &walker, &lib.reality).unwrap();
    let verdict = score::calculate(&stats, 80);

    let md = report::reality::render_markdown(&scan, &stats, &verdict);
    assert!(md.contains("- **Integration score**: 25%"));
    assert!(md.contains("### mock_data"));
    assert!(md.contains("### placeholder_code"));
    assert!(md.contains("### Mock data"));
    assert!(md.contains("### Placeholders"));
}
