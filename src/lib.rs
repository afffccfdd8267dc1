//! Realitycheck - refactoring reality checks for frontend code bases.
//!
//! Realitycheck extracts what a refactoring must preserve (API contracts,
//! data models, component props, interactive elements) and flags code that
//! only looks finished: mock data, placeholder implementations and missing
//! real-API integration.
//!
//! # Architecture
//!
//! Everything is regex-based and line-oriented:
//!
//! - `patterns`: the compiled pattern library, built-ins plus config extras
//! - `walker`: file discovery, exclusion and parallel reading
//! - `extract`: contract, element and definition extractors
//! - `classify`: element and endpoint classification tables
//! - `reality`: mock/placeholder scanner and integration pass
//! - `validate`: per-file, design document and baseline validation
//! - `report`: markdown, JSON and terminal output
//! - `score`: integration verdicts
//! - `config`: YAML config schema and discovery

pub mod classify;
pub mod cli;
pub mod config;
pub mod error;
pub mod extract;
pub mod patterns;
pub mod reality;
pub mod report;
pub mod score;
pub mod types;
pub mod validate;
pub mod walker;

pub use config::Config;
pub use error::{Error, Result};
pub use patterns::PatternLibrary;
pub use reality::{RealityViolation, ScanSummary, ViolationKind};
pub use score::IntegrationVerdict;
pub use validate::ValidationResult;
