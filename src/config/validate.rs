// src/config/validate.rs

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{ExecError, Result};
use crate::exec::invocation::is_valid_env_key;

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = ExecError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        Ok(ConfigFile::new_unchecked(raw.executor))
    }
}

fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    validate_working_dir(cfg)?;
    validate_env_keys(cfg)?;
    Ok(())
}

fn validate_working_dir(cfg: &RawConfigFile) -> Result<()> {
    if let Some(dir) = &cfg.executor.working_dir {
        if !dir.is_dir() {
            return Err(ExecError::Config(format!(
                "executor.working_dir {} is not an existing directory",
                dir.display()
            )));
        }
    }
    Ok(())
}

fn validate_env_keys(cfg: &RawConfigFile) -> Result<()> {
    for key in cfg.executor.env.keys() {
        if !is_valid_env_key(key) {
            return Err(ExecError::Config(format!(
                "invalid environment variable name {key:?} in [executor.env]"
            )));
        }
    }
    Ok(())
}
