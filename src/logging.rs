// src/logging.rs

//! Logging setup using `tracing` + `tracing-subscriber`.
//!
//! Priority for determining the log level:
//! 1. the level passed by the caller (if any)
//! 2. `RUNBOOK_LOG` environment variable (e.g. "info", "debug")
//! 3. default to `info`
//!
//! Logs go to STDERR; captured script output is never logged.

use std::str::FromStr;

use anyhow::{anyhow, Result};
use tracing_subscriber::fmt;

/// Log level accepted by [`init_logging`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "error" => Ok(LogLevel::Error),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            "trace" => Ok(LogLevel::Trace),
            other => Err(format!("invalid log level: {other}")),
        }
    }
}

impl From<LogLevel> for tracing::Level {
    fn from(lvl: LogLevel) -> Self {
        match lvl {
            LogLevel::Error => tracing::Level::ERROR,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Trace => tracing::Level::TRACE,
        }
    }
}

/// Initialise the global logging subscriber.
///
/// Fails if a global subscriber is already installed.
pub fn init_logging(level: Option<LogLevel>) -> Result<()> {
    let level = level
        .or_else(|| std::env::var("RUNBOOK_LOG").ok().and_then(|s| s.parse().ok()))
        .unwrap_or(LogLevel::Info);

    fmt()
        .with_max_level(tracing::Level::from(level))
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow!("installing tracing subscriber: {e}"))
}
