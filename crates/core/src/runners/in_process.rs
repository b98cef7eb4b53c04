//! In-process strategy
//!
//! Calls a registered Rust entry point on the current thread. While the call
//! runs, the request's properties (logging configuration included) are
//! overridden in [`crate::system_properties`] and the request's classpath is
//! published as the thread's active classpath context. Both are restored when
//! the call returns, fails or panics.
//!
//! The external JVM tools are never run this way; they always fork.

use super::traits::{InvocationRequest, InvocationStrategy};
use crate::{
    classpath::Classpath,
    command::InvocationResult,
    error::{Error, Result},
    system_properties::PropertyOverrides,
    types::Tool,
};
use std::cell::RefCell;
use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};

pub type EntryPointError = Box<dyn std::error::Error + Send + Sync>;

/// A tool `main` callable inside this process
pub trait EntryPoint: Send + Sync {
    fn run(&self, args: &[String]) -> std::result::Result<(), EntryPointError>;
}

impl<F> EntryPoint for F
where
    F: Fn(&[String]) -> std::result::Result<(), EntryPointError> + Send + Sync,
{
    fn run(&self, args: &[String]) -> std::result::Result<(), EntryPointError> {
        self(args)
    }
}

thread_local! {
    static ACTIVE_CLASSPATH: RefCell<Option<Classpath>> = const { RefCell::new(None) };
}

/// Classpath of the in-process call running on this thread, if any
pub fn active_classpath() -> Option<Classpath> {
    ACTIVE_CLASSPATH.with(|cp| cp.borrow().clone())
}

/// Swaps the thread's classpath context in, and the previous one back on drop
struct ClasspathContext {
    previous: Option<Classpath>,
}

impl ClasspathContext {
    fn enter(classpath: Classpath) -> Self {
        let previous = ACTIVE_CLASSPATH.with(|cp| cp.replace(Some(classpath)));
        Self { previous }
    }
}

impl Drop for ClasspathContext {
    fn drop(&mut self) {
        let previous = self.previous.take();
        ACTIVE_CLASSPATH.with(|cp| *cp.borrow_mut() = previous);
    }
}

#[derive(Default)]
pub struct InProcessStrategy {
    entry_points: HashMap<Tool, Box<dyn EntryPoint>>,
}

impl InProcessStrategy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(mut self, tool: Tool, entry_point: impl EntryPoint + 'static) -> Self {
        self.entry_points.insert(tool, Box::new(entry_point));
        self
    }
}

impl InvocationStrategy for InProcessStrategy {
    fn invoke(&self, request: &InvocationRequest) -> Result<InvocationResult> {
        let tool = request.tool;
        let entry_point = self
            .entry_points
            .get(&tool)
            .ok_or_else(|| Error::EntryPointFailed {
                tool: tool.to_string(),
                message: "no entry point registered".to_string(),
            })?;

        for entry in request.classpath.entries() {
            tracing::trace!("  CP: {}", entry.display());
        }

        let outcome = {
            let _context = ClasspathContext::enter(request.classpath.clone());
            let mut properties = PropertyOverrides::new();
            for (key, value) in &request.jvm_properties {
                properties.push(key.as_str(), value.as_str());
            }
            if let Some(logging) = &request.logging {
                properties.push(logging.key, logging.value.as_str());
            }

            panic::catch_unwind(AssertUnwindSafe(|| entry_point.run(&request.args)))
        };

        match outcome {
            Ok(Ok(())) => Ok(InvocationResult::default()),
            Ok(Err(e)) => Err(Error::EntryPointFailed {
                tool: tool.to_string(),
                message: e.to_string(),
            }),
            Err(payload) => Err(Error::EntryPointFailed {
                tool: tool.to_string(),
                message: panic_message(payload.as_ref()),
            }),
        }
    }

    fn name(&self) -> &'static str {
        "in-process"
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "entry point panicked".to_string()
    }
}
