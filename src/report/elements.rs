//! Human-readable discovery report.

use crate::classify::Importance;
use crate::extract::ElementAnalysis;

pub fn render_discovery(analysis: &ElementAnalysis) -> String {
    let rule = "=".repeat(60);
    let mut out = String::new();

    out.push_str(&format!("\n{}\nInteractive Element Discovery Report\n{}\n", rule, rule));
    out.push_str(&format!("Analysis time: {}\n", analysis.analysis_timestamp));
    out.push_str(&format!("Source path: {}\n", analysis.source_path));
    out.push_str(&format!(
        "Total interactive elements: {}\n",
        analysis.total_interactive_elements
    ));

    out.push_str("\nKey findings:\n");
    for finding in &analysis.key_findings {
        out.push_str(&format!("  • {}\n", finding));
    }

    out.push_str("\nRecommendations:\n");
    for recommendation in &analysis.recommendations {
        out.push_str(&format!("  • {}\n", recommendation));
    }

    out.push_str("\nBy importance:\n");
    for tier in Importance::ALL {
        let count = analysis
            .elements_by_importance
            .get(tier.as_str())
            .map_or(0, Vec::len);
        out.push_str(&format!("  {}: {} elements\n", tier, count));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::elements::analyze;

    #[test]
    fn test_empty_discovery() {
        let analysis = analyze(&[], "src", "2024-01-01T00:00:00+00:00");
        let text = render_discovery(&analysis);
        assert!(text.contains("Total interactive elements: 0"));
        assert!(text.contains("  P0: 0 elements\n  P1: 0 elements\n  P2: 0 elements\n"));
        assert!(text.contains("found 0 critical (P0)"));
    }
}
