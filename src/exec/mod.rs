// src/exec/mod.rs

//! Process execution layer.
//!
//! - [`invocation`] holds the input (`Invocation`) and output
//!   (`ExecutionResult`) shapes.
//! - [`platform`] builds the interpreter-specific child command.
//! - [`runner`] spawns the child, drains both pipes and reports the outcome.
//! - [`backend`] provides the `ScriptExecutor` trait so callers can replace
//!   the real runner in tests.

pub mod backend;
pub mod invocation;
pub mod platform;
pub mod runner;

pub use backend::ScriptExecutor;
pub use invocation::{parse_env_pair, ExecutionResult, Invocation};
pub use platform::build_command;
pub use runner::{execute, execute_blocking, ProcessExecutor};
