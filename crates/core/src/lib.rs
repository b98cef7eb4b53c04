//! nucleus-runner - Runs the DataNucleus enhancer and SchemaTool against a project
//!
//! This crate provides functionality to:
//! - Discover metadata files (`.jdo`, `.class`, ...) under a metadata directory
//! - Build the classpath the tools need, metadata directory first
//! - Translate configuration into the tools' command-line arguments
//! - Run the tools as child processes and evaluate their results
pub mod classpath;
pub mod command;
pub mod config;
pub mod error;
pub mod metadata;
pub mod runners;
pub mod system_properties;
pub mod types;
pub mod utils;

// Re-export commonly used types and traits
pub use error::{Error, Result};
pub use types::*;

// Re-export main API components
pub use classpath::Classpath;
pub use command::{InvocationResult, ToolArguments, ToolCommand, ToolInvocation};
pub use config::Config;
pub use metadata::find_metadata_files;
pub use runners::{
    ForkedStrategy, InProcessStrategy, InvocationStrategy, Plan, PlannedInvocation, RunOutcome,
    SkipReason, ToolRunner,
};
