//! Output formatting.
//!
//! Every renderer returns a `String`; the CLI decides whether it goes to a
//! file or stdout.
//!
//! - Markdown: contract, definition, reality and validation reports
//! - JSON: the raw extraction and scan structures
//! - Pretty: colored terminal summaries

pub mod contracts;
pub mod definitions;
pub mod elements;
pub mod reality;
pub mod validation;

use serde::Serialize;
use std::path::Path;

pub use contracts::ReportMode;

/// Serialize any report structure as indented JSON.
pub fn to_json<T: Serialize>(value: &T) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Write `content` to `path`, creating parent directories, or print it.
pub fn write_output(path: Option<&Path>, content: &str) -> anyhow::Result<()> {
    match path {
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            std::fs::write(path, content)
                .map_err(|e| anyhow::anyhow!("failed to write {}: {}", path.display(), e))?;
            tracing::info!(path = %path.display(), "report written");
            Ok(())
        }
        None => {
            print!("{}", content);
            if !content.ends_with('\n') {
                println!();
            }
            Ok(())
        }
    }
}
