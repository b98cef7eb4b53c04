//! Core traits for the invocation strategies

use crate::{
    classpath::Classpath,
    command::InvocationResult,
    config::LoggingProperty,
    error::Result,
    types::Tool,
};

/// Everything a strategy needs to run one tool call
#[derive(Debug, Clone)]
pub struct InvocationRequest {
    pub tool: Tool,
    pub classpath: Classpath,
    /// `-D` properties, in emission order
    pub jvm_properties: Vec<(String, String)>,
    pub logging: Option<LoggingProperty>,
    /// Translated tool arguments
    pub args: Vec<String>,
}

/// A way of executing a tool: as a child process or through an entry point
/// living in this process
pub trait InvocationStrategy {
    /// Run the tool to completion. A non-zero exit code is returned in the
    /// result, not as an error; launch failures are errors.
    fn invoke(&self, request: &InvocationRequest) -> Result<InvocationResult>;

    /// Get the name of this strategy
    fn name(&self) -> &'static str;
}
