//! Tool argument translation and child-process command lines

pub mod arguments;
pub mod file_list;
pub mod tool_command;

// Re-export commonly used types
pub use arguments::{FileArguments, PreparedArguments, ToolArguments, ToolInvocation};
pub use file_list::{FileListFile, read_file_list};
pub use tool_command::{InvocationResult, ToolCommand, resolve_java};
