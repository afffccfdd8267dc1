//! Source file discovery and loading.

use globset::{Glob, GlobSet, GlobSetBuilder};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use rayon::prelude::*;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::error::{ensure_dir, Error, Result};
use crate::types::SourceFile;

/// Finds candidate files under a root by extension.
#[derive(Clone)]
pub struct Walker {
    extensions: Vec<String>,
    excluded_dirs: Vec<String>,
    excluded_paths: Option<GlobSet>,
    progress: Option<ProgressBar>,
}

impl Walker {
    pub fn new(extensions: Vec<String>) -> Self {
        Self {
            extensions,
            excluded_dirs: Vec::new(),
            excluded_paths: None,
            progress: None,
        }
    }

    /// Directory names never descended into. Hidden directories are always skipped.
    pub fn excluded_dirs(mut self, dirs: Vec<String>) -> Self {
        self.excluded_dirs = dirs;
        self
    }

    /// Glob patterns matched against paths relative to the root.
    pub fn excluded_paths(mut self, patterns: &[String]) -> Result<Self> {
        if patterns.is_empty() {
            return Ok(self);
        }
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            let glob = Glob::new(pattern).map_err(|e| {
                Error::InvalidConfig(format!("invalid excluded_paths pattern {:?}: {}", pattern, e))
            })?;
            builder.add(glob);
        }
        let set = builder
            .build()
            .map_err(|e| Error::InvalidConfig(format!("building exclusion set: {}", e)))?;
        self.excluded_paths = Some(set);
        Ok(self)
    }

    /// Show a progress bar on stderr while reading files.
    pub fn with_progress(mut self, bar: ProgressBar) -> Self {
        self.progress = Some(bar);
        self
    }

    fn has_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|ext| self.extensions.iter().any(|allowed| allowed == ext))
            .unwrap_or(false)
    }

    fn is_excluded(&self, root: &Path, path: &Path) -> bool {
        match &self.excluded_paths {
            Some(set) => {
                let relative = path.strip_prefix(root).unwrap_or(path);
                set.is_match(relative)
            }
            None => false,
        }
    }

    /// Collect matching files under `root`, sorted lexicographically.
    ///
    /// Walk errors are logged and skipped.
    pub fn collect(&self, root: &Path) -> Result<Vec<PathBuf>> {
        ensure_dir(root)?;

        let mut files = Vec::new();
        let walk = WalkDir::new(root).follow_links(true).into_iter();
        for entry in walk.filter_entry(|e| {
            if e.depth() == 0 || !e.file_type().is_dir() {
                return true;
            }
            let name = e.file_name().to_string_lossy();
            !name.starts_with('.') && !self.excluded_dirs.iter().any(|d| d.as_str() == name)
        }) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!("skipping unreadable entry: {}", e);
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.path();
            if self.has_extension(path) && !self.is_excluded(root, path) {
                files.push(path.to_path_buf());
            }
        }

        files.sort();
        tracing::debug!(root = %root.display(), count = files.len(), "collected files");
        Ok(files)
    }

    /// Read files in parallel. The result keeps the input order.
    pub fn read_all(&self, files: &[PathBuf]) -> Vec<Result<SourceFile>> {
        if let Some(bar) = &self.progress {
            bar.set_length(files.len() as u64);
            bar.set_position(0);
        }

        let results = files
            .par_iter()
            .map(|path| {
                let result = read_source(path);
                if let Some(bar) = &self.progress {
                    bar.inc(1);
                }
                result
            })
            .collect();

        if let Some(bar) = &self.progress {
            bar.finish_and_clear();
        }
        results
    }

    /// Read files, logging and dropping the ones that fail.
    pub fn read_readable(&self, files: &[PathBuf]) -> Vec<SourceFile> {
        self.read_all(files)
            .into_iter()
            .filter_map(|result| match result {
                Ok(file) => Some(file),
                Err(e) => {
                    tracing::warn!("skipping file: {}", e);
                    None
                }
            })
            .collect()
    }
}

/// Read one file as UTF-8.
pub fn read_source(path: &Path) -> Result<SourceFile> {
    std::fs::read_to_string(path)
        .map(|content| SourceFile::new(path, content))
        .map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })
}

/// A file-count progress bar, hidden when stderr is not a terminal or `quiet` is set.
pub fn progress_bar(message: &str, quiet: bool) -> ProgressBar {
    if quiet || !std::io::stderr().is_terminal() {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::with_draw_target(Some(0), ProgressDrawTarget::stderr());
    if let Ok(style) =
        ProgressStyle::with_template("{spinner:.cyan} {msg} [{bar:30.cyan/blue}] {pos}/{len}")
    {
        bar.set_style(style.progress_chars("=> "));
    }
    bar.set_message(message.to_string());
    bar
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    fn exts(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_collect_sorted_and_filtered() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "src/b.ts", "");
        write(temp.path(), "src/a.tsx", "");
        write(temp.path(), "src/readme.md", "");
        write(temp.path(), "node_modules/lib/index.ts", "");
        write(temp.path(), ".cache/x.ts", "");

        let walker = Walker::new(exts(&["ts", "tsx"])).excluded_dirs(exts(&["node_modules"]));
        let files = walker.collect(temp.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.strip_prefix(temp.path()).unwrap().to_path_buf())
            .collect();
        assert_eq!(
            names,
            vec![PathBuf::from("src/a.tsx"), PathBuf::from("src/b.ts")]
        );
    }

    #[test]
    fn test_collect_glob_exclusion() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "src/user.service.ts", "");
        write(temp.path(), "src/user.service.spec.ts", "");

        let walker = Walker::new(exts(&["ts"]))
            .excluded_paths(&["**/*.spec.ts".to_string()])
            .unwrap();
        let files = walker.collect(temp.path()).unwrap();
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("src/user.service.ts"));
    }

    #[test]
    fn test_collect_missing_root() {
        let temp = TempDir::new().unwrap();
        let walker = Walker::new(exts(&["ts"]));
        let err = walker.collect(&temp.path().join("nope")).unwrap_err();
        assert!(matches!(err, Error::PathNotFound(_)));
    }

    #[test]
    fn test_read_skips_invalid_utf8() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "ok.ts", "const a = 1;");
        std::fs::write(temp.path().join("bad.ts"), [0xff, 0xfe, 0x00]).unwrap();

        let walker = Walker::new(exts(&["ts"]));
        let files = walker.collect(temp.path()).unwrap();
        assert_eq!(files.len(), 2);
        let read = walker.read_readable(&files);
        assert_eq!(read.len(), 1);
        assert!(read[0].path.ends_with("ok.ts"));
    }
}
