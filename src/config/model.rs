// src/config/model.rs

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Deserialize;

/// Configuration as deserialized, before validation.
///
/// All sections are optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawConfigFile {
    #[serde(default)]
    pub executor: ExecutorSection,
}

/// `[executor]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExecutorSection {
    /// Directory child processes start in. Inherited from the parent when unset.
    #[serde(default)]
    pub working_dir: Option<PathBuf>,

    /// Default variables applied before each invocation's own overrides.
    #[serde(default)]
    pub env: BTreeMap<String, String>,
}

/// Validated configuration. Only constructed through `TryFrom<RawConfigFile>`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigFile {
    pub executor: ExecutorSection,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(executor: ExecutorSection) -> Self {
        Self { executor }
    }
}
