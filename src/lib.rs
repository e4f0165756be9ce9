// src/lib.rs

//! Script execution primitive.
//!
//! Given a script path, arguments and extra environment variables, pick an
//! interpreter from the file extension, run the script as a child process
//! and return its captured stdout, stderr and exit outcome.
//!
//! ```no_run
//! use runbook::{execute, Invocation};
//!
//! # async fn demo() {
//! let inv = Invocation::new("/opt/jobs/rotate.sh").env("TARGET", "eu-west");
//! let result = execute(&inv).await;
//! match result.error {
//!     None => print!("{}", result.stdout),
//!     Some(err) => eprintln!("{err}: {}", result.stderr),
//! }
//! # }
//! ```

pub mod config;
pub mod errors;
pub mod exec;
pub mod interpreter;
pub mod logging;

pub use errors::{ExecError, Result, StreamKind};
pub use exec::{
    execute, execute_blocking, parse_env_pair, ExecutionResult, Invocation, ProcessExecutor,
    ScriptExecutor,
};
pub use interpreter::{resolve, Interpreter};
