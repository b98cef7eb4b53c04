//! Main runner that coordinates discovery, classpath, arguments and invocation

use super::{
    forked::ForkedStrategy,
    invocation::Invocation,
    traits::{InvocationRequest, InvocationStrategy},
};
use crate::{
    classpath::Classpath,
    command::{InvocationResult, ToolArguments, ToolCommand, ToolInvocation},
    config::{Config, LoggingProperty, validate_for},
    error::Result,
    metadata::find_metadata_files,
    system_properties,
    types::{Operation, Tool},
};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Why an operation finished without running the tool
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    MissingMetadataDirectory(PathBuf),
    UnreadableMetadataDirectory(PathBuf),
    NoMetadataFiles(PathBuf),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::MissingMetadataDirectory(dir) => write!(
                f,
                "metadata directory '{}' is not available",
                dir.display()
            ),
            SkipReason::UnreadableMetadataDirectory(dir) => write!(
                f,
                "metadata directory '{}' cannot be read",
                dir.display()
            ),
            SkipReason::NoMetadataFiles(dir) => {
                write!(f, "no metadata files found in '{}'", dir.display())
            }
        }
    }
}

#[derive(Debug)]
pub enum RunOutcome {
    Skipped(SkipReason),
    Completed(InvocationResult),
}

/// An operation resolved down to its classpath and arguments
#[derive(Debug, Clone)]
pub struct PlannedInvocation {
    pub operation: Operation,
    pub metadata_files: Vec<PathBuf>,
    pub classpath: Classpath,
    pub jvm_properties: Vec<(String, String)>,
    pub logging: Option<LoggingProperty>,
    pub arguments: ToolArguments,
}

impl PlannedInvocation {
    pub fn tool(&self) -> Tool {
        self.operation.tool()
    }

    pub fn request(&self, args: Vec<String>) -> InvocationRequest {
        InvocationRequest {
            tool: self.tool(),
            classpath: self.classpath.clone(),
            jvm_properties: self.jvm_properties.clone(),
            logging: self.logging.clone(),
            args,
        }
    }

    /// Request for display; no side file is written
    pub fn preview_request(&self) -> InvocationRequest {
        self.request(self.arguments.preview())
    }
}

#[derive(Debug)]
pub enum Plan {
    Skipped(SkipReason),
    Ready(PlannedInvocation),
}

pub struct ToolRunner<S: InvocationStrategy = ForkedStrategy> {
    config: Config,
    strategy: S,
}

impl ToolRunner<ForkedStrategy> {
    pub fn new(config: Config) -> Self {
        if !config.fork {
            warn!("In-process execution is not available for the DataNucleus tools; forking instead");
        }
        let strategy = ForkedStrategy::from_config(&config);
        Self { config, strategy }
    }

    /// Runner for the nearest config file above `start_path`
    pub fn discover(start_path: &Path) -> Result<Self> {
        Ok(Self::new(Config::discover(start_path)?))
    }

    /// The command line `plan` would run, for display
    pub fn preview_command(&self, plan: &PlannedInvocation) -> Result<ToolCommand> {
        self.strategy.command(&plan.preview_request())
    }
}

impl<S: InvocationStrategy> ToolRunner<S> {
    pub fn with_strategy(config: Config, strategy: S) -> Self {
        Self { config, strategy }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn strategy(&self) -> &S {
        &self.strategy
    }

    /// Resolve `operation` to its input files, classpath and arguments without
    /// running the tool. Nothing is written to disk.
    pub fn plan(&self, operation: Operation) -> Result<Plan> {
        validate_for(&self.config, operation)?;
        let tool = operation.tool();
        let metadata_dir = self.config.metadata_dir();

        if !metadata_dir.exists() {
            warn!(
                "No files to run DataNucleus tool '{}' since specified metadata directory '{}' is not available.",
                tool,
                metadata_dir.display()
            );
            return Ok(Plan::Skipped(SkipReason::MissingMetadataDirectory(
                metadata_dir,
            )));
        }

        // Only the root is checked here; errors deeper in the tree stay fatal
        if let Err(e) = std::fs::read_dir(&metadata_dir) {
            warn!(
                "No files to run DataNucleus tool '{}' since specified metadata directory '{}' cannot be read: {}",
                tool,
                metadata_dir.display(),
                e
            );
            return Ok(Plan::Skipped(SkipReason::UnreadableMetadataDirectory(
                metadata_dir,
            )));
        }

        let files = find_metadata_files(
            &metadata_dir,
            &self.config.metadata_includes,
            self.config.metadata_excludes.as_deref(),
        )?;
        if files.is_empty() {
            warn!("No files to run DataNucleus tool '{}'", tool);
            return Ok(Plan::Skipped(SkipReason::NoMetadataFiles(metadata_dir)));
        }
        debug!("Metadata Directory is : {}", metadata_dir.display());

        let classpath = Classpath::build(
            &metadata_dir,
            self.config.resolved_artifacts(),
            self.config.resolved_classpath_elements(),
        )?;
        if self.config.verbose && !self.config.quiet {
            for entry in classpath.entries() {
                info!("  CP: {}", entry.display());
            }
        }

        let invocation = ToolInvocation::from_config(&self.config, operation, files.clone());
        let arguments = invocation.translate();
        debug!("Passing {} input files to {}", arguments.file_count(), tool);

        Ok(Plan::Ready(PlannedInvocation {
            operation,
            metadata_files: files,
            classpath,
            jvm_properties: self.jvm_properties(tool),
            logging: self.config.logging.resolve(self.config.base_dir.as_deref()),
            arguments,
        }))
    }

    pub fn run(&self, operation: Operation) -> Result<RunOutcome> {
        match self.plan(operation)? {
            Plan::Skipped(reason) => Ok(RunOutcome::Skipped(reason)),
            Plan::Ready(plan) => self.execute(&plan),
        }
    }

    /// Run a planned invocation. A side file the tool did not consume is
    /// removed when the run fails.
    pub fn execute(&self, plan: &PlannedInvocation) -> Result<RunOutcome> {
        let prepared = plan.arguments.prepare()?;
        let mut invocation = Invocation::new(&self.strategy, plan.request(prepared.args));
        let result = invocation.run();

        if result.is_err() {
            if let Some(file_list) = prepared.file_list {
                if let Err(e) = file_list.discard() {
                    warn!("Could not remove file list: {}", e);
                }
            }
        }

        result.map(RunOutcome::Completed)
    }

    /// Configured SchemaTool properties; a system property of the same name
    /// takes precedence.
    fn jvm_properties(&self, tool: Tool) -> Vec<(String, String)> {
        if tool != Tool::SchemaTool {
            return Vec::new();
        }

        self.config
            .schema
            .tool_properties
            .iter()
            .map(|(key, value)| match system_properties::get(key) {
                Some(overridden) => {
                    warn!(
                        "Property '{}' value specified in configuration will be overridden.",
                        key
                    );
                    (key.clone(), overridden)
                }
                None => (key.clone(), value.clone()),
            })
            .collect()
    }
}
