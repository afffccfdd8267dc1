//! Reality-check output.
//!
//! - Markdown: the full report combining a scan with an integration pass
//! - Pretty: colored terminal summaries for `reality scan` and
//!   `reality integration`

use colored::*;

use crate::reality::{IntegrationStats, ScanSummary};
use crate::score::IntegrationVerdict;

/// Violations listed per kind in the markdown report.
const MAX_PER_KIND: usize = 10;
/// Violations listed in the terminal scan summary.
const MAX_PRETTY: usize = 5;

// =============================================================================
// Markdown Format
// =============================================================================

pub fn render_markdown(
    scan: &ScanSummary,
    stats: &IntegrationStats,
    verdict: &IntegrationVerdict,
) -> String {
    let mut out = String::from("# Reality Check Report\n\n");

    out.push_str("## Summary\n");
    out.push_str(&format!("- **Total files**: {}\n", scan.total_files));
    out.push_str(&format!("- **Checks passed**: {}\n", scan.checks_passed));
    out.push_str(&format!("- **Checks failed**: {}\n", scan.checks_failed));
    out.push_str(&format!("- **Total violations**: {}\n", scan.total_violations));
    out.push_str(&format!("- **Errors**: {}\n", scan.error_count));
    out.push_str(&format!("- **Warnings**: {}\n", scan.warning_count));
    out.push_str(&format!(
        "- **Integration score**: {}% (grade {}, threshold {}%)\n\n",
        verdict.score, verdict.grade, verdict.threshold
    ));

    out.push_str("## Integration\n");
    out.push_str(&format!("- **Files with real API calls**: {}\n", stats.files_with_real_api));
    out.push_str(&format!("- **Files with mock data**: {}\n", stats.files_with_mock_data));
    out.push_str(&format!(
        "- **Files with business logic**: {}\n",
        stats.files_with_business_logic
    ));
    out.push_str(&format!(
        "- **Files with placeholders**: {}\n\n",
        stats.files_with_placeholders
    ));

    if !scan.violations.is_empty() {
        out.push_str("## Violations\n");
        for (kind, list) in scan.by_kind() {
            out.push_str(&format!("### {}\n", kind));
            for v in list.iter().take(MAX_PER_KIND) {
                out.push_str(&format!("**{}:{}**\n", v.file_path, v.line_number));
                out.push_str(&format!("- Violation: {}\n", v.message));
                out.push_str(&format!("- Code: `{}`\n\n", v.code_snippet));
            }
            if list.len() > MAX_PER_KIND {
                out.push_str(&format!(
                    "... and {} more similar violations\n",
                    list.len() - MAX_PER_KIND
                ));
            }
            out.push('\n');
        }
    }

    render_recommendations(&mut out, stats, verdict);
    out
}

fn render_recommendations(out: &mut String, stats: &IntegrationStats, verdict: &IntegrationVerdict) {
    out.push_str("## Recommendations\n");

    if stats.files_with_mock_data > 0 {
        out.push_str("### Mock data\n");
        out.push_str("- Replace every mock data source with a real API call\n");
        out.push_str("- Point components at real endpoints and data sources\n");
        out.push_str("- Make tests and production read from the same data source\n\n");
    }

    if stats.files_with_placeholders > 0 {
        out.push_str("### Placeholders\n");
        out.push_str("- Implement everything marked TODO or FIXME\n");
        out.push_str("- Complete the business logic behind each placeholder\n");
        out.push_str("- Remove placeholder code\n\n");
    }

    if !verdict.passed {
        out.push_str("### Integration\n");
        out.push_str(&format!(
            "- Raise the share of files with real API integration to at least {}%\n",
            verdict.threshold
        ));
        out.push_str("- Give every component a real data source\n");
        out.push_str("- Implement the complete business logic\n\n");
    }
}

// =============================================================================
// Pretty Format
// =============================================================================

fn render_header(out: &mut String, path: &str) {
    out.push_str(&format!(
        "\n  {} v{}\n\n",
        "realitycheck".cyan().bold(),
        env!("CARGO_PKG_VERSION")
    ));
    out.push_str(&format!("  {}{}\n\n", "Scanning: ".dimmed(), path));
}

/// Terminal summary of a reality scan.
pub fn render_scan_pretty(path: &str, scan: &ScanSummary) -> String {
    let mut out = String::new();
    render_header(&mut out, path);

    out.push_str(&format!("  {:<18}{}\n", "Files:", scan.total_files));
    out.push_str(&format!("  {:<18}{}\n", "Checks passed:", scan.checks_passed.to_string().green()));
    out.push_str(&format!("  {:<18}{}\n", "Checks failed:", colored_count(scan.checks_failed)));
    out.push_str(&format!("  {:<18}{}\n\n", "Violations:", colored_count(scan.total_violations)));

    if scan.violations.is_empty() {
        out.push_str(&format!("  {}\n", "✓ PASS".green()));
        return out;
    }

    out.push_str(&format!("  {} ({}):\n\n", "Violations".bold(), scan.violations.len()));
    for v in scan.violations.iter().take(MAX_PRETTY) {
        out.push_str(&format!(
            "    {}    {:<20}{}{}\n",
            "ERROR".red(),
            v.violation_type.as_str().dimmed(),
            v.file_path.blue(),
            format!(":{}", v.line_number).dimmed()
        ));
        out.push_str(&format!("            {}\n\n", v.message));
    }
    if scan.violations.len() > MAX_PRETTY {
        out.push_str(&format!(
            "    {}\n\n",
            format!("... and {} more", scan.violations.len() - MAX_PRETTY).dimmed()
        ));
    }
    out.push_str(&format!("  {}\n", "✗ FAIL".red()));
    out
}

/// Terminal summary of an integration pass.
pub fn render_integration_pretty(
    path: &str,
    stats: &IntegrationStats,
    verdict: &IntegrationVerdict,
) -> String {
    let mut out = String::new();
    render_header(&mut out, path);

    out.push_str(&format!("  {:<28}{}\n", "Files with real API calls:", stats.files_with_real_api));
    out.push_str(&format!("  {:<28}{}\n", "Files with mock data:", colored_count(stats.files_with_mock_data)));
    out.push_str(&format!("  {:<28}{}\n", "Files with business logic:", stats.files_with_business_logic));
    out.push_str(&format!(
        "  {:<28}{}\n\n",
        "Files with placeholders:",
        colored_count(stats.files_with_placeholders)
    ));

    let status = if verdict.passed {
        "PASSED".green()
    } else {
        "FAILED".red()
    };
    out.push_str(&format!(
        "  {}  Integration: {}%  Grade: {}  {}\n",
        format!("Threshold: {}", verdict.threshold).dimmed(),
        colored_score(verdict.score),
        colored_grade(&verdict.grade),
        status
    ));
    out
}

fn colored_count(n: usize) -> ColoredString {
    if n == 0 {
        n.to_string().green()
    } else {
        n.to_string().red()
    }
}

fn colored_score(s: u32) -> ColoredString {
    match s {
        s if s >= 90 => s.to_string().green().bold(),
        s if s >= 75 => s.to_string().green(),
        s if s >= 50 => s.to_string().yellow(),
        s if s >= 25 => s.to_string().yellow().bold(),
        _ => s.to_string().red(),
    }
}

fn colored_grade(grade: &str) -> ColoredString {
    match grade {
        "A" => grade.green().bold(),
        "B" => grade.green(),
        "C" => grade.yellow(),
        "D" => grade.yellow().bold(),
        _ => grade.red(),
    }
}
