//! Refactoring validation: per-file reality checks, design document checks,
//! and interface stability between two code bases.

pub mod checks;
pub mod spec;
pub mod stability;
mod system;
mod types;

pub use checks::{validate_business_logic, validate_data_reality};
pub use spec::validate_spec_against_source;
pub use stability::{compare_trees, validate_interface_stability};
pub use system::ProjectValidator;
pub use types::{ProjectValidation, ValidationResult, ValidationStats};
