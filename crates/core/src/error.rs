use std::io;
use std::path::PathBuf;

/// Errors that can occur while preparing or running a tool invocation
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Error while creating the canonical path for '{}': {source}", path.display())]
    ResolutionError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Error while scanning for metadata files in '{}': {source}", path.display())]
    ScanError {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("Invalid metadata pattern '{pattern}': {message}")]
    PatternError { pattern: String, message: String },

    #[error("Error while executing the tool '{tool}': {source}")]
    LaunchError {
        tool: String,
        #[source]
        source: io::Error,
    },

    #[error("The tool {tool} exited with a non-zero exit code ({code})")]
    ToolFailed {
        tool: String,
        code: i32,
        stderr: String,
    },

    #[error("Error executing tool {tool}: {message}")]
    EntryPointFailed { tool: String, message: String },

    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for nucleus-runner operations
pub type Result<T> = std::result::Result<T, Error>;
