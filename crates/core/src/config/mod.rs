//! Configuration management for nucleus-runner

mod file_list;
mod logging;
mod settings;
pub mod validation;

// Re-export main types
pub use file_list::{DEFAULT_FILE_LIST_THRESHOLD, FileListPolicy};
pub use logging::{
    JDK_LOG_PROPERTY, LOG4J_PROPERTY, LOG4J2_PROPERTY, LoggingConfig, LoggingProperty,
};
pub use settings::{
    CONFIG_FILE_NAMES, Config, DEFAULT_API, DEFAULT_METADATA_DIRECTORY,
    DEFAULT_METADATA_INCLUDES, EnhancerConfig, SchemaToolConfig,
};
pub use validation::validate_for;
