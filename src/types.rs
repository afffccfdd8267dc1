//! Types shared by every scanner: severities and in-memory source files.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Severity levels for findings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A source file read into memory for one scan.
///
/// Keeps the byte offset of every line start so match offsets can be turned
/// into 1-based line numbers without rescanning the text.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub path: PathBuf,
    pub content: String,
    line_starts: Vec<usize>,
}

impl SourceFile {
    pub fn new<P: Into<PathBuf>>(path: P, content: impl Into<String>) -> Self {
        let content = content.into();
        let line_starts = std::iter::once(0)
            .chain(content.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        Self {
            path: path.into(),
            content,
            line_starts,
        }
    }

    /// Path as it appears in records and reports.
    pub fn display_path(&self) -> String {
        self.path.to_string_lossy().to_string()
    }

    /// 1-based line number of a byte offset.
    pub fn line_of(&self, offset: usize) -> usize {
        match self.line_starts.binary_search(&offset) {
            Ok(i) => i + 1,
            Err(i) => i,
        }
    }

    /// Text of the line containing `offset`, without the trailing newline.
    pub fn line_containing(&self, offset: usize) -> &str {
        let idx = self.line_of(offset) - 1;
        let start = self.line_starts[idx];
        let end = self
            .line_starts
            .get(idx + 1)
            .map(|next| next - 1)
            .unwrap_or(self.content.len());
        self.content[start..end].trim_end_matches('\r')
    }

    /// File name without directories.
    pub fn file_name(&self) -> String {
        file_name(&self.path)
    }
}

/// File name component of a path, or the whole path when it has none.
pub fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string_lossy().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_of() {
        let file = SourceFile::new("a.ts", "first\nsecond\n\nfourth");
        assert_eq!(file.line_of(0), 1);
        assert_eq!(file.line_of(3), 1);
        assert_eq!(file.line_of(6), 2);
        assert_eq!(file.line_of(13), 3);
        assert_eq!(file.line_of(14), 4);
        assert_eq!(file.line_of(file.content.len()), 4);
    }

    #[test]
    fn test_line_containing() {
        let file = SourceFile::new("a.ts", "const a = 1;\r\nfetch('/api/x');\nend");
        let offset = file.content.find("fetch").unwrap();
        assert_eq!(file.line_containing(offset), "fetch('/api/x');");
        assert_eq!(file.line_containing(0), "const a = 1;");
        assert_eq!(file.line_containing(file.content.len() - 1), "end");
    }

    #[test]
    fn test_severity_display() {
        assert_eq!(Severity::Info.to_string(), "info");
        assert_eq!(serde_json::to_string(&Severity::Warning).unwrap(), "\"warning\"");
    }
}
