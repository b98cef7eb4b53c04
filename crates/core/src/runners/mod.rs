//! Invocation strategies and the runner that drives them

pub mod forked;
pub mod in_process;
pub mod invocation;
pub mod tool_runner;
pub mod traits;


// Re-export main types
pub use forked::ForkedStrategy;
pub use in_process::{EntryPoint, EntryPointError, InProcessStrategy, active_classpath};
pub use invocation::{Invocation, InvocationState};
pub use tool_runner::{Plan, PlannedInvocation, RunOutcome, SkipReason, ToolRunner};
pub use traits::{InvocationRequest, InvocationStrategy};
