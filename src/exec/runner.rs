// src/exec/runner.rs

//! Single-script process runner.
//!
//! Each call spawns one child, drains stdout and stderr on two independent
//! Tokio tasks while waiting for the child, and only then builds the result.
//! Nothing is shared between calls, so concurrent invocations are independent.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::process::{ExitStatus, Stdio};

use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::runtime::{Handle, RuntimeFlavor};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::config::ConfigFile;
use crate::errors::{ExecError, Result, StreamKind};
use crate::exec::invocation::{ExecutionResult, Invocation};
use crate::exec::platform::{build_command, program_name};
use crate::interpreter::Interpreter;

/// Runs invocations as OS processes.
///
/// The default instance inherits the parent's working directory and adds no
/// environment beyond each invocation's own overrides.
#[derive(Debug, Clone, Default)]
pub struct ProcessExecutor {
    working_dir: Option<PathBuf>,
    default_env: BTreeMap<String, String>,
}

impl ProcessExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(cfg: &ConfigFile) -> Self {
        Self {
            working_dir: cfg.executor.working_dir.clone(),
            default_env: cfg.executor.env.clone(),
        }
    }

    pub fn working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    pub fn default_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_env.insert(key.into(), value.into());
        self
    }

    /// Run the invocation to completion and capture both streams.
    pub async fn execute(&self, invocation: &Invocation) -> ExecutionResult {
        let path = invocation.path();
        let interpreter = Interpreter::for_path(path);
        let program = program_name(interpreter, path);

        if let Err(err) = invocation.validate() {
            error!(script = %path.display(), error = %err, "rejecting invocation");
            return ExecutionResult::failed(err);
        }

        info!(
            script = %path.display(),
            interpreter = %program,
            args = invocation.arguments.len(),
            env_overrides = invocation.env_overrides.len(),
            "starting script process"
        );

        let mut cmd = build_command(interpreter, path, &invocation.arguments);

        // Configured defaults first so per-call overrides win.
        cmd.envs(&self.default_env)
            .envs(&invocation.env_overrides)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        if let Some(dir) = &self.working_dir {
            cmd.current_dir(dir);
        }

        let mut child = match cmd.spawn() {
            Ok(child) => child,
            Err(source) => {
                error!(
                    script = %path.display(),
                    program = %program,
                    error = %source,
                    "failed to launch script process"
                );
                return ExecutionResult::failed(ExecError::Launch { program, source });
            }
        };

        let stdout = spawn_drain(child.stdout.take(), StreamKind::Stdout);
        let stderr = spawn_drain(child.stderr.take(), StreamKind::Stderr);

        let status = child.wait().await;

        // Join both readers even if waiting failed, so no task outlives the call.
        let stdout = join_drain(stdout, StreamKind::Stdout).await;
        let stderr = join_drain(stderr, StreamKind::Stderr).await;

        let (stdout, stderr) = match (stdout, stderr) {
            (Ok(out), Ok(err)) => (out, err),
            (Err(e), _) | (_, Err(e)) => {
                error!(script = %path.display(), error = %e, "stream capture failed");
                return ExecutionResult::failed(e);
            }
        };

        let status = match status {
            Ok(status) => status,
            Err(e) => {
                error!(script = %path.display(), error = %e, "waiting for script process failed");
                return ExecutionResult::failed(ExecError::Io(e));
            }
        };

        let error = status_error(status);
        match &error {
            None => info!(
                script = %path.display(),
                stdout_bytes = stdout.len(),
                stderr_bytes = stderr.len(),
                "script process exited successfully"
            ),
            Some(err) => warn!(
                script = %path.display(),
                stdout_bytes = stdout.len(),
                stderr_bytes = stderr.len(),
                error = %err,
                "script process failed"
            ),
        }

        ExecutionResult {
            stdout: String::from_utf8_lossy(&stdout).into_owned(),
            stderr: String::from_utf8_lossy(&stderr).into_owned(),
            error,
        }
    }

    /// Synchronous wrapper around [`execute`](Self::execute).
    ///
    /// Outside a Tokio runtime a private current-thread runtime drives the
    /// call. On a multi-thread runtime worker the call runs under
    /// `block_in_place`; on a current-thread runtime it is moved to a scoped
    /// helper thread with its own runtime, since that runtime cannot be
    /// re-entered.
    pub fn execute_blocking(&self, invocation: &Invocation) -> ExecutionResult {
        let Ok(handle) = Handle::try_current() else {
            return self.execute_on_new_runtime(invocation);
        };

        if handle.runtime_flavor() == RuntimeFlavor::MultiThread {
            debug!(script = %invocation.path().display(), "blocking in place on runtime worker");
            return tokio::task::block_in_place(|| handle.block_on(self.execute(invocation)));
        }

        debug!(script = %invocation.path().display(), "blocking on helper thread");
        std::thread::scope(|scope| {
            scope
                .spawn(|| self.execute_on_new_runtime(invocation))
                .join()
                .unwrap_or_else(|_| {
                    ExecutionResult::failed(launch_error(
                        invocation,
                        std::io::Error::other("blocking execution thread panicked"),
                    ))
                })
        })
    }

    fn execute_on_new_runtime(&self, invocation: &Invocation) -> ExecutionResult {
        match tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime.block_on(self.execute(invocation)),
            Err(source) => ExecutionResult::failed(launch_error(invocation, source)),
        }
    }
}

fn launch_error(invocation: &Invocation, source: std::io::Error) -> ExecError {
    ExecError::Launch {
        program: program_name(Interpreter::for_path(invocation.path()), invocation.path()),
        source,
    }
}

/// Run `invocation` with a default [`ProcessExecutor`].
pub async fn execute(invocation: &Invocation) -> ExecutionResult {
    ProcessExecutor::default().execute(invocation).await
}

/// Blocking variant of [`execute`].
pub fn execute_blocking(invocation: &Invocation) -> ExecutionResult {
    ProcessExecutor::default().execute_blocking(invocation)
}

fn spawn_drain<R>(pipe: Option<R>, stream: StreamKind) -> JoinHandle<Result<Vec<u8>>>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut buf = Vec::new();
        if let Some(mut pipe) = pipe {
            pipe.read_to_end(&mut buf)
                .await
                .map_err(|source| ExecError::StreamCapture { stream, source })?;
        }
        debug!(%stream, bytes = buf.len(), "stream drained");
        Ok(buf)
    })
}

async fn join_drain(handle: JoinHandle<Result<Vec<u8>>>, stream: StreamKind) -> Result<Vec<u8>> {
    handle.await.map_err(|e| ExecError::StreamCapture {
        stream,
        source: std::io::Error::other(e),
    })?
}

/// `None` for a zero exit, otherwise the error describing how the process ended.
fn status_error(status: ExitStatus) -> Option<ExecError> {
    if status.success() {
        return None;
    }
    match status.code() {
        Some(code) => Some(ExecError::NonZeroExit { code }),
        None => Some(ExecError::Signal {
            signal: terminating_signal(status),
        }),
    }
}

#[cfg(unix)]
fn terminating_signal(status: ExitStatus) -> i32 {
    use std::os::unix::process::ExitStatusExt;
    status.signal().unwrap_or(-1)
}

#[cfg(not(unix))]
fn terminating_signal(_status: ExitStatus) -> i32 {
    -1
}
