//! Discovery of metadata files under the metadata directory

use crate::error::{Error, Result};
use glob::{MatchOptions, Pattern};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// Include/exclude filter over paths relative to the metadata directory
#[derive(Debug, Clone)]
pub struct MetadataFilter {
    includes: Vec<Pattern>,
    excludes: Vec<Pattern>,
}

impl MetadataFilter {
    /// Patterns are comma-separated, e.g. `**/*.jdo, **/*.class`
    pub fn new(includes: &str, excludes: Option<&str>) -> Result<Self> {
        Ok(Self {
            includes: parse_patterns(includes)?,
            excludes: excludes.map(parse_patterns).transpose()?.unwrap_or_default(),
        })
    }

    pub fn matches(&self, relative: &Path) -> bool {
        let candidate = relative.to_string_lossy().replace('\\', "/");
        let included = self
            .includes
            .iter()
            .any(|p| p.matches_with(&candidate, MATCH_OPTIONS));
        included
            && !self
                .excludes
                .iter()
                .any(|p| p.matches_with(&candidate, MATCH_OPTIONS))
    }
}

fn parse_patterns(list: &str) -> Result<Vec<Pattern>> {
    list.split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(|p| {
            Pattern::new(p).map_err(|e| Error::PatternError {
                pattern: p.to_string(),
                message: e.to_string(),
            })
        })
        .collect()
}

/// Collect all files under `dir` accepted by the include/exclude patterns.
/// Results are absolute and sorted.
pub fn find_metadata_files(dir: &Path, includes: &str, excludes: Option<&str>) -> Result<Vec<PathBuf>> {
    let filter = MetadataFilter::new(includes, excludes)?;
    let root = std::path::absolute(dir)?;
    let mut files = Vec::new();

    for entry in WalkDir::new(&root).follow_links(true) {
        let entry = entry.map_err(|source| Error::ScanError {
            path: root.clone(),
            source,
        })?;
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let relative = path.strip_prefix(&root).unwrap_or(path);
        if filter.matches(relative) {
            files.push(path.to_path_buf());
        }
    }

    files.sort();
    tracing::debug!("Found {} metadata files under {}", files.len(), root.display());
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_METADATA_INCLUDES;
    use std::fs;
    use tempfile::TempDir;

    fn layout() -> TempDir {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::create_dir_all(root.join("org/acme/model")).unwrap();
        fs::create_dir_all(root.join("org/acme/util")).unwrap();
        for file in [
            "package.jdo",
            "org/acme/model/Customer.class",
            "org/acme/model/Order.class",
            "org/acme/model/package.jdo",
            "org/acme/util/Strings.class",
            "org/acme/model/notes.txt",
        ] {
            fs::write(root.join(file), b"").unwrap();
        }
        temp_dir
    }

    fn relative(root: &Path, files: &[PathBuf]) -> Vec<String> {
        files
            .iter()
            .map(|f| f.strip_prefix(root).unwrap().to_string_lossy().replace('\\', "/"))
            .collect()
    }

    #[test]
    fn test_default_includes() {
        let temp_dir = layout();
        let root = std::path::absolute(temp_dir.path()).unwrap();
        let files = find_metadata_files(&root, DEFAULT_METADATA_INCLUDES, None).unwrap();

        assert_eq!(
            relative(&root, &files),
            vec![
                "org/acme/model/Customer.class",
                "org/acme/model/Order.class",
                "org/acme/model/package.jdo",
                "org/acme/util/Strings.class",
                "package.jdo",
            ]
        );
    }

    #[test]
    fn test_excludes_win() {
        let temp_dir = layout();
        let root = std::path::absolute(temp_dir.path()).unwrap();
        let files =
            find_metadata_files(&root, "**/*.class", Some("org/acme/util/**, **/Order.class"))
                .unwrap();

        assert_eq!(relative(&root, &files), vec!["org/acme/model/Customer.class"]);
    }

    #[test]
    fn test_invalid_pattern() {
        let err = MetadataFilter::new("**/[.class", None).unwrap_err();
        assert!(matches!(err, Error::PatternError { .. }));
    }

    #[test]
    fn test_empty_directory_yields_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let files = find_metadata_files(temp_dir.path(), DEFAULT_METADATA_INCLUDES, None).unwrap();
        assert!(files.is_empty());
    }
}
