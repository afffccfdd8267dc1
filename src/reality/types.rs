//! Reality-check findings and scan summaries.

use serde::{Deserialize, Serialize};

use crate::types::Severity;

/// What a reality violation marks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    MockData,
    PlaceholderCode,
    FakeApi,
    MissingIntegration,
    HardcodedValues,
}

impl ViolationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViolationKind::MockData => "mock_data",
            ViolationKind::PlaceholderCode => "placeholder_code",
            ViolationKind::FakeApi => "fake_api",
            ViolationKind::MissingIntegration => "missing_integration",
            ViolationKind::HardcodedValues => "hardcoded_values",
        }
    }
}

impl std::fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One marker match on one line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RealityViolation {
    pub file_path: String,
    pub line_number: usize,
    pub violation_type: ViolationKind,
    pub message: String,
    pub code_snippet: String,
    pub severity: Severity,
}

/// Results of a reality scan over a project.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScanSummary {
    pub total_files: usize,
    pub files_with_violations: usize,
    pub total_violations: usize,
    pub error_count: usize,
    pub warning_count: usize,
    pub checks_passed: usize,
    pub checks_failed: usize,
    pub violations: Vec<RealityViolation>,
}

impl ScanSummary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Account for one scanned file and its violations.
    pub fn add_file(&mut self, violations: Vec<RealityViolation>) {
        self.total_files += 1;
        if violations.is_empty() {
            self.checks_passed += 1;
        } else {
            self.files_with_violations += 1;
            self.checks_failed += 1;
        }
        for v in &violations {
            match v.severity {
                Severity::Error => self.error_count += 1,
                Severity::Warning => self.warning_count += 1,
                Severity::Info => {}
            }
        }
        self.total_violations += violations.len();
        self.violations.extend(violations);
    }

    /// True when any violation is error-severity; gates `--fail-on-error`.
    pub fn has_errors(&self) -> bool {
        self.error_count > 0
    }

    /// Violations grouped by kind, in order of first appearance.
    pub fn by_kind(&self) -> Vec<(ViolationKind, Vec<&RealityViolation>)> {
        let mut groups: Vec<(ViolationKind, Vec<&RealityViolation>)> = Vec::new();
        for v in &self.violations {
            match groups.iter_mut().find(|(kind, _)| *kind == v.violation_type) {
                Some((_, list)) => list.push(v),
                None => groups.push((v.violation_type, vec![v])),
            }
        }
        groups
    }
}

/// Per-file integration markers across a project.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegrationStats {
    pub total_files: usize,
    pub files_with_real_api: usize,
    pub files_with_mock_data: usize,
    pub files_with_business_logic: usize,
    pub files_with_placeholders: usize,
    pub integration_score: u32,
}

/// Which markers a single file carries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FileFlags {
    pub real_api: bool,
    pub mock_data: bool,
    pub business_logic: bool,
    pub placeholders: bool,
}

impl IntegrationStats {
    pub fn add(&mut self, flags: FileFlags) {
        self.total_files += 1;
        self.files_with_real_api += flags.real_api as usize;
        self.files_with_mock_data += flags.mock_data as usize;
        self.files_with_business_logic += flags.business_logic as usize;
        self.files_with_placeholders += flags.placeholders as usize;
    }
}
