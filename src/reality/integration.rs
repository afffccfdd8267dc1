//! Project-wide integration pass: which files talk to a real data source.

use regex::Regex;
use std::path::Path;

use crate::error::Result;
use crate::patterns::RealityPatterns;
use crate::walker::Walker;

use super::{FileFlags, IntegrationStats};

fn any_match(list: &[Regex], content: &str) -> bool {
    list.iter().any(|r| r.is_match(content))
}

/// Markers present anywhere in `content`.
pub fn file_flags(content: &str, patterns: &RealityPatterns) -> FileFlags {
    FileFlags {
        real_api: any_match(&patterns.real_data, content),
        mock_data: patterns.mock.iter().any(|p| p.regex.is_match(content)),
        business_logic: any_match(&patterns.business_logic, content),
        placeholders: any_match(&patterns.placeholder, content),
    }
}

/// Percentage of files with a real-API marker, rounded; 0 for an empty project.
pub fn integration_score(files_with_real_api: usize, total_files: usize) -> u32 {
    if total_files == 0 {
        return 0;
    }
    (files_with_real_api as f64 * 100.0 / total_files as f64).round() as u32
}

/// Compute integration statistics for every reality-checked file under `root`.
///
/// Unreadable files count towards the total but carry no markers.
pub fn validate_integration(
    root: &Path,
    walker: &Walker,
    patterns: &RealityPatterns,
) -> Result<IntegrationStats> {
    let files = walker.collect(root)?;
    let mut stats = IntegrationStats::default();

    for result in walker.read_all(&files) {
        let flags = match result {
            Ok(file) => file_flags(&file.content, patterns),
            Err(e) => {
                tracing::warn!("{}", e);
                FileFlags::default()
            }
        };
        stats.add(flags);
    }

    stats.integration_score = integration_score(stats.files_with_real_api, stats.total_files);
    tracing::info!(
        files = stats.total_files,
        score = stats.integration_score,
        "integration pass finished"
    );
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patterns::PatternLibrary;

    #[test]
    fn test_integration_score() {
        assert_eq!(integration_score(3, 10), 30);
        assert_eq!(integration_score(0, 0), 0);
        assert_eq!(integration_score(2, 3), 67);
        assert_eq!(integration_score(1, 3), 33);
        assert_eq!(integration_score(4, 4), 100);
    }

    #[test]
    fn test_file_flags() {
        let lib = PatternLibrary::builtin().unwrap();
        let flags = file_flags(
            "const users = await fetch('/api/users');\nif (users) { render(users); }\n",
            &lib.reality,
        );
        assert_eq!(
            flags,
            FileFlags {
                real_api: true,
                mock_data: false,
                business_logic: true,
                placeholders: false,
            }
        );

        let flags = file_flags("const mockData = [];\n", &lib.reality);
        assert!(flags.mock_data);
        assert!(!flags.real_api);
    }
}
