//! Interface stability between an original and a refactored code base.
//!
//! Declarations are compared by their normalised signature text
//! (`interface User`, `const api =`), so a rename shows up as one missing
//! and one new signature.

use regex::Regex;
use std::collections::BTreeSet;
use std::path::Path;

use crate::error::Result;
use crate::patterns::ValidationPatterns;
use crate::walker::Walker;

use super::ValidationResult;

fn normalise(signature: &str) -> String {
    signature.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Declaration signatures found in `code`.
pub fn signatures(code: &str, declarations: &[Regex]) -> BTreeSet<String> {
    declarations
        .iter()
        .flat_map(|re| re.find_iter(code).map(|m| normalise(m.as_str())))
        .collect()
}

/// Compare two signature sets.
pub fn compare(original: &BTreeSet<String>, refactored: &BTreeSet<String>, label: &str) -> ValidationResult {
    let missing: Vec<String> = original.difference(refactored).cloned().collect();
    let added: Vec<String> = refactored.difference(original).cloned().collect();

    let result = if !missing.is_empty() {
        ValidationResult::error(format!("interfaces missing: {}", label))
    } else if !added.is_empty() {
        ValidationResult::warning(format!("new interfaces found: {}", label))
    } else {
        ValidationResult::pass(format!("interface stability check passed: {}", label))
    };

    result
        .detail("missing_interfaces", missing)
        .detail("new_interfaces", added)
        .detail("file", label)
}

/// Compare the declarations of two code bodies.
pub fn validate_interface_stability(
    original: &str,
    refactored: &str,
    label: &str,
    patterns: &ValidationPatterns,
) -> ValidationResult {
    compare(
        &signatures(original, &patterns.declarations),
        &signatures(refactored, &patterns.declarations),
        label,
    )
}

fn tree_signatures(root: &Path, walker: &Walker, patterns: &ValidationPatterns) -> Result<BTreeSet<String>> {
    let files = walker.collect(root)?;
    Ok(walker
        .read_readable(&files)
        .iter()
        .flat_map(|f| signatures(&f.content, &patterns.declarations))
        .collect())
}

/// Compare the declarations of two directory trees.
pub fn compare_trees(
    original: &Path,
    refactored: &Path,
    walker: &Walker,
    patterns: &ValidationPatterns,
) -> Result<ValidationResult> {
    let before = tree_signatures(original, walker, patterns)?;
    let after = tree_signatures(refactored, walker, patterns)?;
    tracing::info!(original = before.len(), refactored = after.len(), "compared declarations");

    let label = format!("{} -> {}", original.display(), refactored.display());
    Ok(compare(&before, &after, &label))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patterns::PatternLibrary;
    use tempfile::TempDir;

    fn patterns() -> ValidationPatterns {
        PatternLibrary::builtin().unwrap().validation
    }

    #[test]
    fn test_signatures_normalised() {
        let p = patterns();
        let found = signatures("export interface  User {}\nconst api=\n", &p.declarations);
        assert!(found.contains("interface User"));
        assert!(found.contains("const api="));
    }

    #[test]
    fn test_missing_is_error() {
        let p = patterns();
        let r = validate_interface_stability("interface A {}\nclass B {}", "interface A {}", "x.ts", &p);
        assert!(r.is_error());
        assert_eq!(r.details["missing_interfaces"], serde_json::json!(["class B"]));
    }

    #[test]
    fn test_new_is_warning() {
        let p = patterns();
        let r = validate_interface_stability("interface A {}", "interface A {}\ntype C = string;", "x.ts", &p);
        assert!(r.is_warning());
        assert_eq!(r.details["new_interfaces"], serde_json::json!(["type C"]));
    }

    #[test]
    fn test_identical_passes() {
        let p = patterns();
        assert!(validate_interface_stability("function f() {}", "function f() {}", "x.ts", &p).passed);
    }

    #[test]
    fn test_compare_trees() {
        let original = TempDir::new().unwrap();
        let refactored = TempDir::new().unwrap();
        std::fs::write(original.path().join("a.ts"), "interface User {}\nfunction load() {}").unwrap();
        std::fs::write(refactored.path().join("a.tsx"), "interface User {}\nfunction load() {}").unwrap();

        let walker = Walker::new(vec!["ts".to_string(), "tsx".to_string()]);
        let r = compare_trees(original.path(), refactored.path(), &walker, &patterns()).unwrap();
        assert!(r.passed);
    }
}
