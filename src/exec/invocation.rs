// src/exec/invocation.rs

//! Input and output shapes of a single script execution.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::errors::{ExecError, Result};

/// A script to run, its arguments, and extra environment variables.
///
/// The script file must exist when the invocation is executed; it is never
/// created or inspected here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub script_path: PathBuf,
    pub arguments: Vec<String>,
    /// Set on top of the inherited parent environment; these win on conflict.
    pub env_overrides: BTreeMap<String, String>,
}

impl Invocation {
    pub fn new(script_path: impl Into<PathBuf>) -> Self {
        Self {
            script_path: script_path.into(),
            arguments: Vec::new(),
            env_overrides: BTreeMap::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.arguments.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.arguments.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env_overrides.insert(key.into(), value.into());
        self
    }

    pub fn envs<I, K, V>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.env_overrides
            .extend(vars.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Add overrides given as `KEY=VALUE` strings.
    ///
    /// Later pairs win over earlier ones with the same key.
    pub fn env_pairs<I, S>(mut self, pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for pair in pairs {
            let (key, value) = parse_env_pair(pair.as_ref())?;
            self.env_overrides.insert(key.to_string(), value.to_string());
        }
        Ok(self)
    }

    pub fn path(&self) -> &Path {
        &self.script_path
    }

    /// Reject override names the OS would misinterpret.
    ///
    /// `env`/`envs` accept any key so the builder stays chainable; the runner
    /// calls this before spawning and reports a bad key instead of exporting
    /// a mangled variable.
    pub fn validate(&self) -> Result<()> {
        match self.env_overrides.keys().find(|key| !is_valid_env_key(key)) {
            Some(key) => Err(ExecError::InvalidEnvKey(key.clone())),
            None => Ok(()),
        }
    }
}

/// Non-empty, and free of `=` and NUL.
pub fn is_valid_env_key(key: &str) -> bool {
    !key.is_empty() && !key.contains(['=', '\0'])
}

/// Split `KEY=VALUE` on the first `=`. The key must be a valid variable name.
pub fn parse_env_pair(pair: &str) -> Result<(&str, &str)> {
    match pair.split_once('=') {
        Some((key, value)) if is_valid_env_key(key) => Ok((key, value)),
        _ => Err(ExecError::InvalidEnvPair(pair.to_string())),
    }
}

/// Captured output of one execution.
///
/// Produced exactly once per call. On launch failure both streams are empty;
/// on a non-zero exit both streams still hold everything the process wrote.
#[derive(Debug)]
pub struct ExecutionResult {
    pub stdout: String,
    pub stderr: String,
    pub error: Option<ExecError>,
}

impl ExecutionResult {
    pub(crate) fn failed(error: ExecError) -> Self {
        Self {
            stdout: String::new(),
            stderr: String::new(),
            error: Some(error),
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }

    /// `Some(0)` on success, the process exit code on a non-zero exit, and
    /// `None` when no exit code is known.
    pub fn exit_code(&self) -> Option<i32> {
        match &self.error {
            None => Some(0),
            Some(err) => err.exit_code(),
        }
    }

    /// Collapse into `(stdout, stderr)`, dropping the streams on error.
    pub fn into_result(self) -> Result<(String, String)> {
        match self.error {
            None => Ok((self.stdout, self.stderr)),
            Some(err) => Err(err),
        }
    }

    /// Destructure into the `(stdout, stderr, error)` triple.
    pub fn into_parts(self) -> (String, String, Option<ExecError>) {
        (self.stdout, self.stderr, self.error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_pair_splits_on_first_equals() {
        assert_eq!(parse_env_pair("A=b=c").unwrap(), ("A", "b=c"));
        assert_eq!(parse_env_pair("EMPTY=").unwrap(), ("EMPTY", ""));
    }

    #[test]
    fn env_pair_without_key_or_equals_is_rejected() {
        assert!(matches!(
            parse_env_pair("NOVALUE"),
            Err(ExecError::InvalidEnvPair(p)) if p == "NOVALUE"
        ));
        assert!(parse_env_pair("=value").is_err());
    }

    #[test]
    fn builder_collects_args_and_env() {
        let inv = Invocation::new("/tmp/x.sh")
            .arg("one")
            .args(["two", "three"])
            .env("A", "1")
            .envs([("B", "2")])
            .env_pairs(["TESTENVVAR=test env var", "A=overridden"])
            .unwrap();

        assert_eq!(inv.arguments, ["one", "two", "three"]);
        assert_eq!(inv.env_overrides.get("A").map(String::as_str), Some("overridden"));
        assert_eq!(inv.env_overrides.get("B").map(String::as_str), Some("2"));
        assert_eq!(
            inv.env_overrides.get("TESTENVVAR").map(String::as_str),
            Some("test env var")
        );
    }

    #[test]
    fn validate_rejects_keys_the_builder_let_through() {
        assert!(Invocation::new("x.sh").env("GOOD", "1").validate().is_ok());

        let err = Invocation::new("x.sh").env("A=B", "x").validate().unwrap_err();
        assert!(matches!(err, ExecError::InvalidEnvKey(ref k) if k == "A=B"));

        assert!(Invocation::new("x.sh").envs([("", "v")]).validate().is_err());
        assert!(Invocation::new("x.sh").env("NUL\0KEY", "v").validate().is_err());
    }

    #[test]
    fn result_exit_code_and_conversion() {
        let ok = ExecutionResult {
            stdout: "out".into(),
            stderr: "warn".into(),
            error: None,
        };
        assert!(ok.is_success());
        assert_eq!(ok.exit_code(), Some(0));
        assert_eq!(ok.into_result().unwrap(), ("out".to_string(), "warn".to_string()));

        let failed = ExecutionResult {
            stdout: String::new(),
            stderr: String::new(),
            error: Some(ExecError::NonZeroExit { code: 2 }),
        };
        assert_eq!(failed.exit_code(), Some(2));
        let (out, err, error) = failed.into_parts();
        assert!(out.is_empty() && err.is_empty());
        assert_eq!(error.unwrap().to_string(), "exit status 2");
    }
}
