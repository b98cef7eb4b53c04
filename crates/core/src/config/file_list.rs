//! Policy for passing input files through a file-list side file

use serde::{Deserialize, Deserializer, Serialize};
use std::path::Path;

/// Default byte budget for inline file arguments under [`FileListPolicy::Auto`].
/// Sized below the 8191 character limit of the Windows command interpreter.
pub const DEFAULT_FILE_LIST_THRESHOLD: usize = 8000;

/// Whether input files go on the command line or into a side file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileListPolicy {
    Always,
    Never,
    #[default]
    Auto,
}

impl FileListPolicy {
    /// Parse a policy name. `true`/`false` are accepted as aliases and matching
    /// ignores case; unknown values fall back to `auto` with a warning.
    pub fn parse_lenient(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "always" | "true" => FileListPolicy::Always,
            "never" | "false" => FileListPolicy::Never,
            "auto" => FileListPolicy::Auto,
            other => {
                tracing::warn!(
                    "use_file_list_file has unknown value '{}', falling back to 'auto'",
                    other
                );
                FileListPolicy::Auto
            }
        }
    }

    /// Decide whether `files` should be written to a side file
    pub fn use_file_list<P: AsRef<Path>>(&self, files: &[P], threshold: usize) -> bool {
        match self {
            FileListPolicy::Always => true,
            FileListPolicy::Never => false,
            FileListPolicy::Auto => inline_length(files) > threshold,
        }
    }
}

/// Bytes the files would occupy as separate command-line arguments
fn inline_length<P: AsRef<Path>>(files: &[P]) -> usize {
    files
        .iter()
        .map(|f| f.as_ref().as_os_str().len() + 1)
        .sum()
}

impl<'de> Deserialize<'de> for FileListPolicy {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        match value {
            serde_json::Value::Bool(true) => Ok(FileListPolicy::Always),
            serde_json::Value::Bool(false) => Ok(FileListPolicy::Never),
            serde_json::Value::String(s) => Ok(FileListPolicy::parse_lenient(&s)),
            serde_json::Value::Null => Ok(FileListPolicy::Auto),
            other => Err(serde::de::Error::custom(format!(
                "expected one of: always, never, auto (got {other})"
            ))),
        }
    }
}
