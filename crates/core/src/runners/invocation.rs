//! Lifecycle of a single tool invocation

use super::traits::{InvocationRequest, InvocationStrategy};
use crate::{
    command::InvocationResult,
    error::{Error, Result},
    types::Tool,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvocationState {
    NotStarted,
    Running,
    Succeeded,
    Failed,
}

/// One run of one tool through one strategy. Runs at most once.
pub struct Invocation<'a, S: InvocationStrategy + ?Sized> {
    strategy: &'a S,
    request: InvocationRequest,
    state: InvocationState,
}

impl<'a, S: InvocationStrategy + ?Sized> Invocation<'a, S> {
    pub fn new(strategy: &'a S, request: InvocationRequest) -> Self {
        Self {
            strategy,
            request,
            state: InvocationState::NotStarted,
        }
    }

    pub fn state(&self) -> InvocationState {
        self.state
    }

    pub fn request(&self) -> &InvocationRequest {
        &self.request
    }

    /// Run the tool and evaluate its result. A non-zero exit code becomes
    /// [`Error::ToolFailed`].
    pub fn run(&mut self) -> Result<InvocationResult> {
        if self.state != InvocationState::NotStarted {
            return Err(Error::Other(format!(
                "Invocation of {} has already been started",
                self.request.tool
            )));
        }

        self.state = InvocationState::Running;
        tracing::debug!(
            "Invoking {} ({} strategy)",
            self.request.tool,
            self.strategy.name()
        );

        let result = match self.strategy.invoke(&self.request) {
            Ok(result) => result,
            Err(e) => {
                self.state = InvocationState::Failed;
                return Err(e);
            }
        };

        relay_output(self.request.tool, &result);

        if result.success() {
            self.state = InvocationState::Succeeded;
            Ok(result)
        } else {
            self.state = InvocationState::Failed;
            Err(Error::ToolFailed {
                tool: self.request.tool.to_string(),
                code: result.exit_code,
                stderr: result.stderr,
            })
        }
    }
}

fn relay_output(tool: Tool, result: &InvocationResult) {
    tracing::debug!("--------------------");
    tracing::debug!(" Standard output from the tool {} :", tool);
    tracing::debug!("--------------------");
    if !result.stdout.trim().is_empty() {
        tracing::info!("{}", result.stdout.trim_end());
    }
    tracing::debug!("--------------------");

    if !result.stderr.trim().is_empty() {
        tracing::error!("--------------------");
        tracing::error!(" Standard error from the tool {} :", tool);
        tracing::error!("--------------------");
        tracing::error!("{}", result.stderr.trim_end());
        tracing::error!("--------------------");
    }
}
