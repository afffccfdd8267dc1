//! Validation results and project statistics.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::types::Severity;

/// The outcome of one validation check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub passed: bool,
    pub severity: Severity,
    pub message: String,
    #[serde(default)]
    pub details: BTreeMap<String, Value>,
}

impl ValidationResult {
    pub fn pass(message: impl Into<String>) -> Self {
        Self {
            passed: true,
            severity: Severity::Info,
            message: message.into(),
            details: BTreeMap::new(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            passed: false,
            severity: Severity::Warning,
            message: message.into(),
            details: BTreeMap::new(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            passed: false,
            severity: Severity::Error,
            message: message.into(),
            details: BTreeMap::new(),
        }
    }

    pub fn detail(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.details.insert(key.to_string(), value.into());
        self
    }

    pub fn is_error(&self) -> bool {
        !self.passed && self.severity == Severity::Error
    }

    pub fn is_warning(&self) -> bool {
        !self.passed && self.severity == Severity::Warning
    }
}

/// Counters accumulated over a project validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationStats {
    pub total_files: usize,
    pub passed_validations: usize,
    pub failed_validations: usize,
    pub warnings: usize,
    /// Messages of error-severity results
    pub errors: Vec<String>,
}

impl ValidationStats {
    pub fn record(&mut self, result: &ValidationResult) {
        if result.passed {
            self.passed_validations += 1;
            return;
        }
        self.failed_validations += 1;
        if result.severity == Severity::Error {
            self.errors.push(result.message.clone());
        } else {
            self.warnings += 1;
        }
    }
}

/// Every result of a project validation plus its counters.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProjectValidation {
    pub stats: ValidationStats,
    pub results: Vec<ValidationResult>,
}

impl ProjectValidation {
    pub fn push(&mut self, result: ValidationResult) {
        self.stats.record(&result);
        self.results.push(result);
    }

    pub fn has_errors(&self) -> bool {
        self.results.iter().any(ValidationResult::is_error)
    }
}
