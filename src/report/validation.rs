//! Validation output: markdown report for `validate`, single-result
//! summaries for `spec-check` and `baseline`.

use colored::*;

use crate::types::Severity;
use crate::validate::{ProjectValidation, ValidationResult};

fn icon(result: &ValidationResult) -> &'static str {
    match result.severity {
        Severity::Error if !result.passed => "❌",
        Severity::Warning if !result.passed => "⚠️",
        _ => "✅",
    }
}

fn render_details(out: &mut String, result: &ValidationResult) {
    if result.details.is_empty() {
        return;
    }
    // BTreeMap<String, Value> always serialises
    let json = serde_json::to_string_pretty(&result.details).unwrap_or_default();
    out.push_str(&format!("   Details: {}\n", json));
}

pub fn render_markdown(project: &ProjectValidation) -> String {
    let results = &project.results;
    let passed = results.iter().filter(|r| r.passed).count();
    let errors = results.iter().filter(|r| r.is_error()).count();
    let warnings = results.iter().filter(|r| r.is_warning()).count();

    let mut out = String::from("# Refactoring Validation Report\n\n");
    out.push_str("## Summary\n");
    out.push_str(&format!("- Files: {}\n", project.stats.total_files));
    out.push_str(&format!("- Validations: {}\n", results.len()));
    out.push_str(&format!("- Passed: {}\n", passed));
    out.push_str(&format!("- Failed: {}\n", results.len() - passed));
    out.push_str(&format!("- Errors: {}\n", errors));
    out.push_str(&format!("- Warnings: {}\n\n", warnings));

    out.push_str("## Results\n");
    for result in results {
        if result.passed {
            out.push_str(&format!("{} {}\n", icon(result), result.message));
        } else {
            out.push_str(&format!("{} **{}**\n", icon(result), result.message));
        }
        render_details(&mut out, result);
    }
    out
}

/// Colored one-result summary for `spec-check` and `baseline`.
pub fn render_result_pretty(title: &str, result: &ValidationResult) -> String {
    let mut out = format!("\n  {} {}\n\n", "realitycheck".cyan().bold(), title);

    let status = match result.severity {
        Severity::Error if !result.passed => "✗ FAIL".red(),
        Severity::Warning if !result.passed => "! WARN".yellow(),
        _ => "✓ PASS".green(),
    };
    out.push_str(&format!("  {}  {}\n", status, result.message));

    for (key, value) in &result.details {
        let text = match value {
            serde_json::Value::String(s) => s.clone(),
            serde_json::Value::Array(items) if items.is_empty() => "-".to_string(),
            serde_json::Value::Array(items) => items
                .iter()
                .map(|v| v.as_str().map_or_else(|| v.to_string(), str::to_string))
                .collect::<Vec<_>>()
                .join(", "),
            other => other.to_string(),
        };
        out.push_str(&format!("    {:<20}{}\n", format!("{}:", key).dimmed(), text));
    }
    out
}
