//! File-list side files (`-flf`)
//!
//! One absolute path per line, UTF-8, LF-terminated. The enhancer deletes the
//! file once it has read it.

use crate::error::{Error, Result};
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

const PREFIX: &str = "enhancer-";
const SUFFIX: &str = ".flf";

/// A side file listing the tool's input files
#[derive(Debug)]
pub struct FileListFile {
    path: PathBuf,
}

impl FileListFile {
    /// Write `files` to a new side file in the system temp directory
    pub fn write<P: AsRef<Path>>(files: &[P]) -> Result<Self> {
        Self::write_in(&std::env::temp_dir(), files)
    }

    pub fn write_in<P: AsRef<Path>>(dir: &Path, files: &[P]) -> Result<Self> {
        let temp = tempfile::Builder::new()
            .prefix(PREFIX)
            .suffix(SUFFIX)
            .tempfile_in(dir)?;

        {
            let mut writer = BufWriter::new(temp.as_file());
            for file in files {
                let absolute = std::path::absolute(file.as_ref())?;
                let line = absolute.to_str().ok_or_else(|| {
                    Error::Other(format!(
                        "Path is not valid UTF-8: {}",
                        absolute.display()
                    ))
                })?;
                writer.write_all(line.as_bytes())?;
                writer.write_all(b"\n")?;
            }
            writer.flush()?;
        }

        // The consumer owns deletion from here on
        let (_, path) = temp.keep().map_err(|e| e.error)?;
        tracing::info!("Writing fileListFile: {}", path.display());
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Remove the side file if the tool did not consume it
    pub fn discard(self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                tracing::debug!("Removed unconsumed file list {}", self.path.display());
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Read a file list back. Accepts LF, CRLF and CR line endings; blank lines
/// are skipped.
pub fn read_file_list(path: &Path) -> Result<Vec<PathBuf>> {
    let contents = fs::read_to_string(path)?;
    Ok(contents
        .split(['\r', '\n'])
        .filter(|line| !line.is_empty())
        .map(PathBuf::from)
        .collect())
}
