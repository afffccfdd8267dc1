//! Design document vs. source tree consistency.

use std::path::Path;

use crate::patterns::PatternLibrary;
use crate::walker::{read_source, Walker};

use super::ValidationResult;

const DATA_MODEL_MARKERS: &[&str] = &["Data Models", "数据模型"];
const SOURCE_MARKERS: &[&str] = &["Source:", "源代码路径"];

fn contains_any(text: &str, markers: &[&str]) -> bool {
    markers.iter().any(|m| text.contains(m))
}

/// Check a design document against the source tree it describes.
///
/// Every outcome, including an unwalkable source root, is a result.
pub fn validate_spec_against_source(
    spec: &Path,
    source_root: &Path,
    walker: &Walker,
    patterns: &PatternLibrary,
) -> ValidationResult {
    let spec_file = spec.to_string_lossy().to_string();
    if !spec.is_file() {
        return ValidationResult::error("design document does not exist").detail("spec_file", spec_file);
    }

    let content = match read_source(spec) {
        Ok(file) => file.content,
        Err(e) => {
            return ValidationResult::error(format!("design document could not be read: {}", e))
                .detail("spec_file", spec_file)
                .detail("error", e.to_string())
        }
    };

    if !contains_any(&content, DATA_MODEL_MARKERS) {
        return ValidationResult::error("design document has no data model section")
            .detail("spec_file", spec_file);
    }
    if !contains_any(&content, SOURCE_MARKERS) {
        return ValidationResult::warning(
            "data models do not cite their source paths; accuracy cannot be checked",
        )
        .detail("spec_file", spec_file);
    }

    if let Some(assumption) = patterns
        .validation
        .assumptions
        .iter()
        .find(|a| a.is_match(&content))
    {
        return ValidationResult::error(format!(
            "data models appear to be based on assumptions: {}",
            assumption.source
        ))
        .detail("spec_file", spec_file)
        .detail("pattern", assumption.source);
    }

    let source_project_path = source_root.to_string_lossy().to_string();
    let files = match walker.collect(source_root) {
        Ok(files) => files,
        Err(e) => {
            return ValidationResult::error(format!("source tree could not be scanned: {}", e))
                .detail("source_project_path", source_project_path)
                .detail("error", e.to_string())
        }
    };
    let ts_files_count = walker
        .read_readable(&files)
        .iter()
        .filter(|f| patterns.validation.interface_declaration.is_match(&f.content))
        .count();
    if ts_files_count == 0 {
        return ValidationResult::warning("no TypeScript files declaring an interface in the source tree")
            .detail("source_project_path", source_project_path);
    }

    ValidationResult::pass("design document data models check passed")
        .detail("spec_file", spec_file)
        .detail("ts_files_count", ts_files_count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Severity;
    use tempfile::TempDir;

    fn ts_walker() -> Walker {
        Walker::new(vec!["ts".to_string(), "tsx".to_string()])
    }

    fn check(doc: Option<&str>, source: &[(&str, &str)]) -> ValidationResult {
        let dir = TempDir::new().unwrap();
        let spec = dir.path().join("design.md");
        if let Some(doc) = doc {
            std::fs::write(&spec, doc).unwrap();
        }
        let src = dir.path().join("src");
        std::fs::create_dir_all(&src).unwrap();
        for (name, content) in source {
            std::fs::write(src.join(name), content).unwrap();
        }
        let lib = PatternLibrary::builtin().unwrap();
        validate_spec_against_source(&spec, &src, &ts_walker(), &lib)
    }

    const GOOD: &str = "## Data Models\n\n### User (Source: src/user.ts:1)\n";

    #[test]
    fn test_missing_document() {
        let r = check(None, &[]);
        assert!(r.is_error());
        assert_eq!(r.message, "design document does not exist");
    }

    #[test]
    fn test_no_data_models() {
        assert!(check(Some("# Overview\n"), &[]).is_error());
    }

    #[test]
    fn test_chinese_markers() {
        let r = check(Some("## 数据模型\n源代码路径: src/user.ts\n"), &[("user.ts", "interface User { id: number }")]);
        assert!(r.passed);
    }

    #[test]
    fn test_no_source_marker() {
        let r = check(Some("## Data Models\n"), &[]);
        assert_eq!(r.severity, Severity::Warning);
    }

    #[test]
    fn test_assumption_language() {
        let doc = format!("{}Fields are approximately as follows.\n", GOOD);
        let r = check(Some(&doc), &[("user.ts", "interface User { id: number }")]);
        assert!(r.is_error());
        assert!(r.message.contains("approximately"));

        let doc = format!("{}based on documentationsource\n", GOOD);
        assert!(check(Some(&doc), &[("user.ts", "interface User { id: number }")]).passed);
    }

    #[test]
    fn test_no_interface_files() {
        let r = check(Some(GOOD), &[("util.ts", "export const a = 1;")]);
        assert!(r.is_warning());
    }

    #[test]
    fn test_pass_counts_files() {
        let r = check(
            Some(GOOD),
            &[
                ("user.ts", "export interface User { id: number }"),
                ("order.ts", "interface Order { id: number }"),
                ("util.ts", "export const a = 1;"),
            ],
        );
        assert!(r.passed);
        assert_eq!(r.details["ts_files_count"], 2);
    }

    #[test]
    fn test_extending_and_generic_interfaces_count() {
        let r = check(
            Some(GOOD),
            &[
                ("admin.ts", "export interface Admin extends User { role: string }"),
                ("page.ts", "export interface Page<T> { items: T[] }"),
            ],
        );
        assert!(r.passed, "{}", r.message);
        assert_eq!(r.details["ts_files_count"], 2);
    }

    #[test]
    fn test_unscannable_source_root() {
        let dir = TempDir::new().unwrap();
        let spec = dir.path().join("design.md");
        std::fs::write(&spec, GOOD).unwrap();
        let lib = PatternLibrary::builtin().unwrap();

        let r = validate_spec_against_source(&spec, &dir.path().join("missing"), &ts_walker(), &lib);
        assert!(r.is_error());
        assert!(r.message.starts_with("source tree could not be scanned"));
        assert!(r.details.contains_key("error"));
        assert!(r.details.contains_key("source_project_path"));
    }
}
