//! Temporary script files for process tests.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use tempfile::{Builder, TempPath};

/// A script written to a temp file that is removed on drop.
///
/// The write handle is closed before the fixture is returned, so the file can
/// be executed directly without tripping over "text file busy".
pub struct ScriptFixture {
    path: TempPath,
}

impl ScriptFixture {
    /// Write `contents` to a new temp file ending in `ext` (e.g. `".sh"`).
    ///
    /// On Unix the file is made executable so it can also be run directly.
    pub fn new(contents: impl AsRef<[u8]>, ext: &str) -> Result<Self> {
        let mut file = Builder::new()
            .prefix("runbook-")
            .suffix(ext)
            .tempfile()
            .context("creating temp script")?;
        file.write_all(contents.as_ref())
            .context("writing temp script")?;
        file.as_file().sync_all().context("syncing temp script")?;
        let path = file.into_temp_path();
        make_executable(&path)?;
        Ok(Self { path })
    }

    /// `.sh` on Unix, `.bat` on Windows.
    pub fn shell(unix: &str, windows: &str) -> Result<Self> {
        if cfg!(windows) {
            Self::new(windows, ".bat")
        } else {
            Self::new(unix, ".sh")
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(unix)]
fn make_executable(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let mut perms = std::fs::metadata(path)?.permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(path, perms).context("marking temp script executable")?;
    Ok(())
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> Result<()> {
    Ok(())
}
