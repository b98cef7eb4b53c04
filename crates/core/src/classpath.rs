//! Classpath assembly for the invoked tool

use crate::error::{Error, Result};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Ordered, duplicate-free list of absolute classpath entries.
/// The metadata directory is always the first entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classpath {
    entries: Vec<PathBuf>,
}

impl Classpath {
    /// Build the classpath from the metadata directory, the tool's own
    /// artifacts and the project classpath, in that order.
    ///
    /// Artifacts must exist: a failure to canonicalize one aborts with
    /// [`Error::ResolutionError`]. Project elements that do not exist yet
    /// (an output directory before the first build, say) are kept as
    /// absolute paths.
    pub fn build<A, B>(metadata_dir: &Path, artifacts: A, project_elements: B) -> Result<Self>
    where
        A: IntoIterator,
        A::Item: AsRef<Path>,
        B: IntoIterator,
        B::Item: AsRef<Path>,
    {
        let mut classpath = Classpath {
            entries: vec![normalize(metadata_dir)?],
        };

        for artifact in artifacts {
            let artifact = artifact.as_ref();
            let canonical = artifact
                .canonicalize()
                .map_err(|source| Error::ResolutionError {
                    path: artifact.to_path_buf(),
                    source,
                })?;
            classpath.push_unique(canonical);
        }

        for element in project_elements {
            classpath.push_unique(normalize(element.as_ref())?);
        }

        tracing::debug!("Classpath has {} entries", classpath.entries.len());
        Ok(classpath)
    }

    fn push_unique(&mut self, entry: PathBuf) {
        if !self.entries.contains(&entry) {
            self.entries.push(entry);
        }
    }

    pub fn entries(&self) -> &[PathBuf] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Join the entries with the platform path separator for `-cp`
    pub fn to_os_string(&self) -> Result<OsString> {
        std::env::join_paths(&self.entries)
            .map_err(|e| Error::Other(format!("Cannot join classpath entries: {e}")))
    }
}

/// Canonical path when the entry exists, otherwise an absolute one
fn normalize(path: &Path) -> Result<PathBuf> {
    match path.canonicalize() {
        Ok(canonical) => Ok(canonical),
        Err(_) => std::path::absolute(path).map_err(|source| Error::ResolutionError {
            path: path.to_path_buf(),
            source,
        }),
    }
}
