// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::Result;

/// Read and deserialize a config file without semantic checks.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawConfigFile> {
    let contents = fs::read_to_string(path.as_ref())?;
    let config: RawConfigFile = toml::from_str(&contents)?;
    Ok(config)
}

/// Load a config file and validate it.
///
/// Relative `working_dir` values are resolved against the directory holding
/// the config file, so the same file works from any current directory.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<ConfigFile> {
    let path = path.as_ref();
    let mut raw = load_from_path(path)?;

    if let Some(dir) = raw.executor.working_dir.take() {
        raw.executor.working_dir = Some(match path.parent() {
            Some(parent) if dir.is_relative() && !parent.as_os_str().is_empty() => {
                parent.join(dir)
            }
            _ => dir,
        });
    }

    ConfigFile::try_from(raw)
}

/// `Runbook.toml` in the current working directory.
pub fn default_config_path() -> PathBuf {
    PathBuf::from("Runbook.toml")
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;
    use crate::errors::ExecError;

    #[test]
    fn parses_executor_section() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
[executor.env]
DEPLOY_ENV = "staging"
"#
        )
        .unwrap();

        let cfg = load_and_validate(file.path()).unwrap();
        assert_eq!(cfg.executor.working_dir, None);
        assert_eq!(
            cfg.executor.env.get("DEPLOY_ENV").map(String::as_str),
            Some("staging")
        );
    }

    #[test]
    fn relative_working_dir_is_resolved_next_to_config() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("scripts")).unwrap();
        let cfg_path = dir.path().join("Runbook.toml");
        fs::write(&cfg_path, "[executor]\nworking_dir = \"scripts\"\n").unwrap();

        let cfg = load_and_validate(&cfg_path).unwrap();
        assert_eq!(cfg.executor.working_dir, Some(dir.path().join("scripts")));
    }

    #[test]
    fn unknown_keys_are_a_toml_error() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "[executor]\nshell = \"bash\"\n").unwrap();

        assert!(matches!(load_and_validate(file.path()), Err(ExecError::Toml(_))));
    }

    #[test]
    fn missing_file_is_io_error() {
        assert!(matches!(
            load_from_path("/nonexistent/Runbook.toml"),
            Err(ExecError::Io(_))
        ));
    }
}
