//! Per-file reality and business-logic checks.

use regex::Regex;
use serde_json::Value;

use crate::patterns::ValidationPatterns;

use super::ValidationResult;

/// Every match of every pattern, in pattern order.
fn matches(patterns: &[Regex], code: &str) -> Vec<String> {
    patterns
        .iter()
        .flat_map(|p| p.find_iter(code).map(|m| m.as_str().to_string()))
        .collect()
}

fn list(items: Vec<String>) -> Value {
    Value::from(items)
}

/// Mock markers without real-data markers is an error; no real-data markers at all is a warning.
pub fn validate_data_reality(code: &str, file: &str, patterns: &ValidationPatterns) -> ValidationResult {
    let mock = matches(&patterns.mock, code);
    let real = matches(&patterns.real_data, code);

    let result = if !mock.is_empty() && real.is_empty() {
        ValidationResult::error(format!("mock data without a real API call: {}", file))
    } else if real.is_empty() {
        ValidationResult::warning(format!("no real data integration found: {}", file))
    } else {
        ValidationResult::pass(format!("data reality check passed: {}", file))
    };

    result
        .detail("mock_patterns", list(mock))
        .detail("real_patterns", list(real))
        .detail("file", file)
}

/// Placeholder markers are an error; no control flow or declarations at all is a warning.
pub fn validate_business_logic(code: &str, file: &str, patterns: &ValidationPatterns) -> ValidationResult {
    let placeholders = matches(&patterns.placeholder, code);
    let real_logic = matches(&patterns.real_logic, code);

    let result = if !placeholders.is_empty() {
        ValidationResult::error(format!("placeholder code found: {}", file))
    } else if real_logic.is_empty() {
        ValidationResult::warning(format!("no real business logic found: {}", file))
    } else {
        ValidationResult::pass(format!("business logic check passed: {}", file))
    };

    result
        .detail("placeholders", list(placeholders))
        .detail("real_logic", list(real_logic))
        .detail("file", file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patterns::PatternLibrary;
    use crate::types::Severity;

    fn patterns() -> ValidationPatterns {
        PatternLibrary::builtin().unwrap().validation
    }

    #[test]
    fn test_data_reality() {
        let p = patterns();
        let mock_only = validate_data_reality("const mockData = [];", "a.ts", &p);
        assert!(mock_only.is_error());
        assert_eq!(mock_only.details["mock_patterns"], serde_json::json!(["mockData"]));

        let nothing = validate_data_reality("export const x = 1;", "b.ts", &p);
        assert!(nothing.is_warning());

        let real = validate_data_reality("const mock = [];\nawait fetch('/api/users');", "c.ts", &p);
        assert!(real.passed);
        assert_eq!(real.severity, Severity::Info);
    }

    #[test]
    fn test_business_logic() {
        let p = patterns();
        assert!(validate_business_logic("// TODO: wire up", "a.ts", &p).is_error());
        assert!(validate_business_logic("export const x = 1;", "a.ts", &p).is_warning());
        assert!(validate_business_logic("if (user) { save(user); }", "a.ts", &p).passed);
        // try/catch are not counted as real logic by the validator
        assert!(validate_business_logic("try { a } catch (e) {}", "a.ts", &p).is_warning());
    }

    #[test]
    fn test_empty_file() {
        let p = patterns();
        assert!(validate_data_reality("", "e.ts", &p).is_warning());
        assert!(validate_business_logic("", "e.ts", &p).is_warning());
    }
}
