//! Line-by-line scan for mock data and placeholder markers.

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::patterns::RealityPatterns;
use crate::types::{Severity, SourceFile};
use crate::walker::Walker;

use super::{RealityViolation, ScanSummary, ViolationKind};

/// Scan one file. Every match of every marker is its own violation.
pub fn scan_source(file: &SourceFile, patterns: &RealityPatterns) -> Vec<RealityViolation> {
    let file_path = file.display_path();
    let mut violations = Vec::new();

    for (idx, line) in file.content.lines().enumerate() {
        let line_number = idx + 1;

        let mock = patterns.mock.iter().map(|p| (&p.regex, p.kind));
        let placeholder = patterns
            .placeholder
            .iter()
            .map(|r| (r, ViolationKind::PlaceholderCode));

        for (regex, kind) in mock.chain(placeholder) {
            for m in regex.find_iter(line) {
                violations.push(RealityViolation {
                    file_path: file_path.clone(),
                    line_number,
                    violation_type: kind,
                    message: format!("detected {}: {}", kind, m.as_str()),
                    code_snippet: line.trim().to_string(),
                    severity: Severity::Error,
                });
            }
        }
    }

    violations
}

/// A file that could not be read counts as a failed check.
fn unreadable(path: &Path, err: &dyn std::fmt::Display) -> RealityViolation {
    RealityViolation {
        file_path: path.to_string_lossy().to_string(),
        line_number: 0,
        violation_type: ViolationKind::MissingIntegration,
        message: format!("file could not be read: {}", err),
        code_snippet: String::new(),
        severity: Severity::Error,
    }
}

/// Scan already-collected files.
pub fn scan_files(files: &[PathBuf], walker: &Walker, patterns: &RealityPatterns) -> ScanSummary {
    let mut summary = ScanSummary::new();
    for (path, result) in files.iter().zip(walker.read_all(files)) {
        let violations = match result {
            Ok(file) => scan_source(&file, patterns),
            Err(e) => {
                tracing::warn!("{}", e);
                vec![unreadable(path, &e)]
            }
        };
        tracing::debug!(file = %path.display(), violations = violations.len(), "scanned");
        summary.add_file(violations);
    }
    summary
}

/// Scan every reality-checked file under `root`.
pub fn scan_project(root: &Path, walker: &Walker, patterns: &RealityPatterns) -> Result<ScanSummary> {
    let files = walker.collect(root)?;
    let summary = scan_files(&files, walker, patterns);
    tracing::info!(
        files = summary.total_files,
        violations = summary.total_violations,
        "reality scan finished"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patterns::PatternLibrary;

    fn scan(content: &str) -> Vec<RealityViolation> {
        let lib = PatternLibrary::builtin().unwrap();
        scan_source(&SourceFile::new("src/app.ts", content), &lib.reality)
    }

    #[test]
    fn test_one_violation_per_match() {
        let content = "const a = 1;\nconst x = mockData;\nlet y = fakeData || dummyData;\n";
        let violations = scan(content);
        assert_eq!(violations.len(), 3);
        assert_eq!(violations[0].line_number, 2);
        assert_eq!(violations[1].line_number, 3);
        assert_eq!(violations[2].line_number, 3);
        assert!(violations.iter().all(|v| v.severity == Severity::Error));
        assert_eq!(violations[0].message, "detected mock_data: mockData");
        assert_eq!(violations[1].code_snippet, "let y = fakeData || dummyData;");
    }

    #[test]
    fn test_kinds() {
        let content = "jest.fn().mockResolvedValue(user);\n// hard-coded token\n// TODO wire up\n";
        let kinds: Vec<_> = scan(content).into_iter().map(|v| v.violation_type).collect();
        assert_eq!(
            kinds,
            vec![
                ViolationKind::FakeApi,
                ViolationKind::HardcodedValues,
                ViolationKind::PlaceholderCode
            ]
        );
    }

    #[test]
    fn test_case_insensitive() {
        let violations = scan("// Not Implemented yet\n");
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].violation_type, ViolationKind::PlaceholderCode);
    }

    #[test]
    fn test_mock_array_literal() {
        let violations = scan("const mockData = [];\n");
        assert!(!violations.is_empty());
        assert!(violations.iter().all(|v| v.violation_type == ViolationKind::MockData));
    }

    #[test]
    fn test_clean_file() {
        assert!(scan("export const total = (a: number) => a + 1;\n").is_empty());
        assert!(scan("").is_empty());
    }
}
