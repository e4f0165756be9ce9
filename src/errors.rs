// src/errors.rs

//! Crate-wide error type and aliases.
//!
//! The `Display` text of [`ExecError::NonZeroExit`] is part of the public
//! contract: callers match on `exit status <N>`.

use std::fmt;

use thiserror::Error;

/// Which captured stream an I/O failure happened on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamKind {
    Stdout,
    Stderr,
}

impl fmt::Display for StreamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamKind::Stdout => f.write_str("stdout"),
            StreamKind::Stderr => f.write_str("stderr"),
        }
    }
}

#[derive(Error, Debug)]
pub enum ExecError {
    /// The interpreter or the script itself could not be started.
    #[error("launching {program}: {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The process ran to completion with a non-zero exit code.
    #[error("exit status {code}")]
    NonZeroExit { code: i32 },

    /// The process was terminated by a signal and has no exit code.
    #[error("signal: {signal}")]
    Signal { signal: i32 },

    #[error("capturing {stream}: {source}")]
    StreamCapture {
        stream: StreamKind,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid environment pair {0:?} (expected KEY=VALUE)")]
    InvalidEnvPair(String),

    #[error("invalid environment variable name {0:?}")]
    InvalidEnvKey(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl ExecError {
    /// Exit code carried by the error, if the process got far enough to have one.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            ExecError::NonZeroExit { code } => Some(*code),
            _ => None,
        }
    }

    pub fn is_launch_failure(&self) -> bool {
        matches!(self, ExecError::Launch { .. })
    }
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, ExecError>;
