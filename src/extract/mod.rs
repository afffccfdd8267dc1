//! Pattern-based extractors over frontend source files.

pub mod components;
pub mod definitions;
pub mod elements;
pub mod endpoints;
pub mod interfaces;
mod runner;
mod types;

pub use runner::{discover_elements, extract_contracts, extract_definitions};
pub use types::*;
