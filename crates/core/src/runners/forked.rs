//! Child-process strategy

use super::traits::{InvocationRequest, InvocationStrategy};
use crate::{
    command::{InvocationResult, ToolCommand, resolve_java},
    config::Config,
    error::{Error, Result},
};
use std::path::PathBuf;

/// Runs the tool as `java -cp <classpath> [-D...] <entry point> <args>`
#[derive(Debug, Clone)]
pub struct ForkedStrategy {
    java: PathBuf,
    working_dir: Option<PathBuf>,
}

impl ForkedStrategy {
    pub fn new(java: impl Into<PathBuf>) -> Self {
        Self {
            java: java.into(),
            working_dir: None,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        let explicit = config
            .java_executable
            .as_deref()
            .map(|java| config.resolve_path(java));
        Self {
            java: resolve_java(explicit.as_deref()),
            working_dir: config.base_dir.clone(),
        }
    }

    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    pub fn java(&self) -> &std::path::Path {
        &self.java
    }

    /// Assemble the child-process command line for `request`
    pub fn command(&self, request: &InvocationRequest) -> Result<ToolCommand> {
        let classpath = request.classpath.to_os_string()?.into_string().map_err(|cp| {
            Error::Other(format!("Classpath is not valid UTF-8: {}", cp.to_string_lossy()))
        })?;

        let mut args = vec!["-cp".to_string(), classpath];
        args.extend(
            request
                .jvm_properties
                .iter()
                .map(|(key, value)| format!("-D{key}={value}")),
        );
        if let Some(logging) = &request.logging {
            args.push(logging.to_jvm_arg());
        }
        args.push(request.tool.entry_point().to_string());
        args.extend(request.args.iter().cloned());

        let mut command = ToolCommand::new(request.tool, &self.java, args);
        if let Some(dir) = &self.working_dir {
            command = command.with_working_dir(dir);
        }
        Ok(command)
    }
}

impl InvocationStrategy for ForkedStrategy {
    fn invoke(&self, request: &InvocationRequest) -> Result<InvocationResult> {
        self.command(request)?.execute()
    }

    fn name(&self) -> &'static str {
        "forked"
    }
}
