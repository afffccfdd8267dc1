//! Reality checks: mock data, placeholder code and real-API integration.
//!
//! The scanner reports every marker match as an error-severity violation.
//! The integration pass reduces each file to four booleans and derives the
//! integration score from them.

mod integration;
mod scanner;
mod types;

pub use integration::{file_flags, integration_score, validate_integration};
pub use scanner::{scan_files, scan_project, scan_source};
pub use types::{FileFlags, IntegrationStats, RealityViolation, ScanSummary, ViolationKind};
