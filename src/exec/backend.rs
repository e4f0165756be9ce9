// src/exec/backend.rs

//! Pluggable executor abstraction.
//!
//! Orchestrators that sequence many scripts talk to a `ScriptExecutor`
//! instead of [`ProcessExecutor`] directly, so tests can swap in a fake that
//! records invocations and returns canned results without spawning anything.

use std::future::Future;
use std::pin::Pin;

use crate::exec::invocation::{ExecutionResult, Invocation};
use crate::exec::runner::ProcessExecutor;

/// Trait abstracting how a single script invocation is run.
pub trait ScriptExecutor: Send + Sync {
    fn execute<'a>(
        &'a self,
        invocation: &'a Invocation,
    ) -> Pin<Box<dyn Future<Output = ExecutionResult> + Send + 'a>>;
}

impl ScriptExecutor for ProcessExecutor {
    fn execute<'a>(
        &'a self,
        invocation: &'a Invocation,
    ) -> Pin<Box<dyn Future<Output = ExecutionResult> + Send + 'a>> {
        Box::pin(ProcessExecutor::execute(self, invocation))
    }
}
