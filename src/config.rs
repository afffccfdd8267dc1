//! Configuration schema for realitycheck.
//!
//! A config file tunes which files are scanned and adds project-specific
//! patterns on top of the built-in pattern library. Every field is optional;
//! a missing file means built-in defaults.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::reality::ViolationKind;
use crate::walker::Walker;

/// Config file names searched for, in order.
pub const DEFAULT_CONFIG_NAMES: &[&str] = &["realitycheck.yaml", ".realitycheck.yaml"];

/// Frontend source files read by the extractors.
pub const DEFAULT_SOURCE_EXTENSIONS: &[&str] = &["ts", "tsx", "js", "jsx"];

/// Files read by the reality scanner and integration pass.
pub const DEFAULT_REALITY_EXTENSIONS: &[&str] = &["tsx", "ts", "jsx", "js", "py"];

/// Files read by the project-wide validator.
pub const DEFAULT_VALIDATION_EXTENSIONS: &[&str] =
    &["tsx", "ts", "jsx", "js", "py", "java", "cs", "cpp", "c"];

/// Directory names never descended into.
pub const DEFAULT_EXCLUDED_DIRS: &[&str] = &["node_modules"];

/// Integration score below which reality reports fail.
pub const DEFAULT_INTEGRATION_THRESHOLD: u32 = 80;

/// Which extension set a walk uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileSet {
    Source,
    Reality,
    Validation,
}

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub source_extensions: Option<Vec<String>>,
    #[serde(default)]
    pub reality_extensions: Option<Vec<String>>,
    #[serde(default)]
    pub validation_extensions: Option<Vec<String>>,
    /// Directory names to skip (hidden directories are always skipped)
    #[serde(default)]
    pub excluded_dirs: Option<Vec<String>>,
    /// Glob patterns for paths to exclude (e.g., "**/*.spec.ts")
    #[serde(default)]
    pub excluded_paths: Vec<String>,
    #[serde(default)]
    pub integration_threshold: Option<u32>,
    #[serde(default)]
    pub patterns: PatternConfig,
}

/// Extra patterns appended to the built-in library.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct PatternConfig {
    #[serde(default)]
    pub mock: Vec<MockPattern>,
    #[serde(default)]
    pub placeholder: Vec<ExtraPattern>,
    #[serde(default)]
    pub real_data: Vec<ExtraPattern>,
}

/// A mock-data marker and the violation kind it reports.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MockPattern {
    pub pattern: String,
    #[serde(default)]
    pub kind: Option<ViolationKind>,
    #[serde(default)]
    pub description: Option<String>,
}

/// A plain extra pattern.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ExtraPattern {
    pub pattern: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl Config {
    /// Parse a config from a YAML file.
    pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_yaml::from_str(&content).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load the explicit config, or discover one, or fall back to defaults.
    ///
    /// Returns the config together with the file it came from.
    pub fn load(explicit: Option<&Path>, root: &Path) -> Result<(Self, Option<PathBuf>)> {
        let path = match explicit {
            Some(p) => Some(p.to_path_buf()),
            None => discover(root),
        };
        let config = match &path {
            Some(p) => Self::parse_file(p)?,
            None => Self::default(),
        };
        validate(&config)?;
        Ok((config, path))
    }

    /// Extensions for the given file set.
    pub fn extensions(&self, set: FileSet) -> Vec<String> {
        let (configured, defaults) = match set {
            FileSet::Source => (&self.source_extensions, DEFAULT_SOURCE_EXTENSIONS),
            FileSet::Reality => (&self.reality_extensions, DEFAULT_REALITY_EXTENSIONS),
            FileSet::Validation => (&self.validation_extensions, DEFAULT_VALIDATION_EXTENSIONS),
        };
        match configured {
            Some(exts) => exts
                .iter()
                .map(|e| e.trim_start_matches('.').to_string())
                .collect(),
            None => defaults.iter().map(|e| e.to_string()).collect(),
        }
    }

    pub fn excluded_dirs(&self) -> Vec<String> {
        match &self.excluded_dirs {
            Some(dirs) => dirs.clone(),
            None => DEFAULT_EXCLUDED_DIRS.iter().map(|d| d.to_string()).collect(),
        }
    }

    /// Returns the integration threshold (defaults to 80).
    pub fn integration_threshold(&self) -> u32 {
        self.integration_threshold
            .unwrap_or(DEFAULT_INTEGRATION_THRESHOLD)
    }

    /// Build a walker for one of the configured file sets.
    pub fn walker(&self, set: FileSet) -> Result<Walker> {
        Walker::new(self.extensions(set))
            .excluded_dirs(self.excluded_dirs())
            .excluded_paths(&self.excluded_paths)
    }
}

/// Look for a config file in `root`, the current directory, then the user
/// config directory.
pub fn discover(root: &Path) -> Option<PathBuf> {
    let mut dirs = vec![root.to_path_buf(), PathBuf::from(".")];
    if let Some(project) = directories::ProjectDirs::from("", "", "realitycheck") {
        dirs.push(project.config_dir().to_path_buf());
    }

    dirs.iter()
        .flat_map(|dir| DEFAULT_CONFIG_NAMES.iter().map(move |name| dir.join(name)))
        .find(|candidate| candidate.is_file())
}

/// Validate a config for correctness.
pub fn validate(config: &Config) -> Result<()> {
    for set in [FileSet::Source, FileSet::Reality, FileSet::Validation] {
        if config.extensions(set).is_empty() {
            return Err(Error::InvalidConfig(format!(
                "{:?} extension list must not be empty",
                set
            )));
        }
    }

    if config.integration_threshold() > 100 {
        return Err(Error::InvalidConfig(format!(
            "integration_threshold {} must be between 0 and 100",
            config.integration_threshold()
        )));
    }

    let extra = config
        .patterns
        .mock
        .iter()
        .map(|p| &p.pattern)
        .chain(config.patterns.placeholder.iter().map(|p| &p.pattern))
        .chain(config.patterns.real_data.iter().map(|p| &p.pattern));
    for pattern in extra {
        regex::Regex::new(pattern).map_err(|source| Error::InvalidPattern {
            pattern: pattern.clone(),
            source,
        })?;
    }

    for pattern in &config.excluded_paths {
        globset::Glob::new(pattern).map_err(|e| {
            Error::InvalidConfig(format!("invalid excluded_paths pattern {:?}: {}", pattern, e))
        })?;
    }

    Ok(())
}
