//! Project-wide validation.

use std::path::Path;

use crate::error::Result;
use crate::patterns::ValidationPatterns;
use crate::walker::Walker;

use super::checks::{validate_business_logic, validate_data_reality};
use super::{ProjectValidation, ValidationResult};

/// Runs the per-file checks over every file of a project.
pub struct ProjectValidator<'a> {
    patterns: &'a ValidationPatterns,
}

impl<'a> ProjectValidator<'a> {
    pub fn new(patterns: &'a ValidationPatterns) -> Self {
        Self { patterns }
    }

    /// Validate every file under `root`.
    ///
    /// A file that cannot be read becomes an error result; only a bad root
    /// fails the whole run.
    pub fn validate_project(&self, root: &Path, walker: &Walker) -> Result<ProjectValidation> {
        let files = walker.collect(root)?;
        let mut project = ProjectValidation::default();
        project.stats.total_files = files.len();

        for (path, read) in files.iter().zip(walker.read_all(&files)) {
            let display = path.to_string_lossy().to_string();
            match read {
                Ok(file) => {
                    project.push(validate_data_reality(&file.content, &display, self.patterns));
                    project.push(validate_business_logic(&file.content, &display, self.patterns));
                }
                Err(e) => {
                    tracing::warn!("{}", e);
                    project.push(
                        ValidationResult::error(format!("validation failed: {} - {}", display, e))
                            .detail("file", display.as_str())
                            .detail("error", e.to_string()),
                    );
                }
            }
        }

        tracing::info!(
            files = project.stats.total_files,
            passed = project.stats.passed_validations,
            failed = project.stats.failed_validations,
            "project validation finished"
        );
        Ok(project)
    }
}
