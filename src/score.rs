//! Integration score verdicts.
//!
//! The integration score itself is computed by the reality pass; this module
//! grades it and decides pass/fail against the configured threshold.

use serde::{Deserialize, Serialize};

use crate::reality::IntegrationStats;

/// Grade thresholds (minimum score for each grade).
pub mod grades {
    pub const A_MIN: u32 = 90;
    pub const B_MIN: u32 = 80;
    pub const C_MIN: u32 = 60;
    pub const D_MIN: u32 = 40;
}

/// The graded integration score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegrationVerdict {
    /// Score from 0-100, higher = more real integration
    pub score: u32,
    /// Letter grade: "A" (90+), "B" (80-89), "C" (60-79), "D" (40-59), "F" (<40)
    pub grade: String,
    /// Whether score >= threshold
    pub passed: bool,
    pub threshold: u32,
}

fn calculate_grade(score: u32) -> String {
    match score {
        s if s >= grades::A_MIN => "A".to_string(),
        s if s >= grades::B_MIN => "B".to_string(),
        s if s >= grades::C_MIN => "C".to_string(),
        s if s >= grades::D_MIN => "D".to_string(),
        _ => "F".to_string(),
    }
}

/// Grade the integration stats against `threshold`.
pub fn calculate(stats: &IntegrationStats, threshold: u32) -> IntegrationVerdict {
    IntegrationVerdict {
        score: stats.integration_score,
        grade: calculate_grade(stats.integration_score),
        passed: stats.integration_score >= threshold,
        threshold,
    }
}
