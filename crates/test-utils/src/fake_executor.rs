use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use runbook::{ExecError, ExecutionResult, Invocation, ScriptExecutor};

/// Canned outcome for one fake execution.
#[derive(Debug, Clone)]
pub struct FakeOutcome {
    pub stdout: String,
    pub stderr: String,
    /// `None` for success, `Some(code)` for a non-zero exit.
    pub exit_code: Option<i32>,
}

impl FakeOutcome {
    pub fn success(stdout: &str) -> Self {
        Self {
            stdout: stdout.to_string(),
            stderr: String::new(),
            exit_code: None,
        }
    }

    pub fn failure(code: i32, stderr: &str) -> Self {
        Self {
            stdout: String::new(),
            stderr: stderr.to_string(),
            exit_code: Some(code),
        }
    }
}

/// A fake executor that:
/// - records every invocation it was asked to run
/// - returns queued outcomes in order, then empty successes.
#[derive(Default)]
pub struct FakeExecutor {
    executed: Arc<Mutex<Vec<Invocation>>>,
    outcomes: Mutex<VecDeque<FakeOutcome>>,
}

impl FakeExecutor {
    pub fn new(executed: Arc<Mutex<Vec<Invocation>>>) -> Self {
        Self {
            executed,
            outcomes: Mutex::new(VecDeque::new()),
        }
    }

    pub fn with_outcome(self, outcome: FakeOutcome) -> Self {
        self.outcomes.lock().unwrap().push_back(outcome);
        self
    }
}

impl ScriptExecutor for FakeExecutor {
    fn execute<'a>(
        &'a self,
        invocation: &'a Invocation,
    ) -> Pin<Box<dyn Future<Output = ExecutionResult> + Send + 'a>> {
        self.executed.lock().unwrap().push(invocation.clone());
        let outcome = self
            .outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| FakeOutcome::success(""));

        Box::pin(async move {
            ExecutionResult {
                stdout: outcome.stdout,
                stderr: outcome.stderr,
                error: outcome.exit_code.map(|code| ExecError::NonZeroExit { code }),
            }
        })
    }
}
