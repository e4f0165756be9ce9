// src/interpreter.rs

//! Extension → interpreter lookup.
//!
//! The table is fixed and process-wide. Anything not in it (including files
//! without an extension) resolves to `""`, which means "run the file itself".

use std::collections::HashMap;
use std::path::Path;
use std::sync::LazyLock;

/// Static extension table. Keys are lowercase and include the leading dot.
pub static INTERPRETERS: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    HashMap::from([
        (".bat", "cmd"),
        (".cmd", "cmd"),
        (".ps1", "powershell"),
        (".sh", "sh"),
    ])
});

/// Interpreters known to the platform layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interpreter {
    Cmd,
    PowerShell,
    Sh,
}

impl Interpreter {
    /// Map a command name from [`INTERPRETERS`] back to the enum.
    pub fn from_command(command: &str) -> Option<Self> {
        match command {
            "cmd" => Some(Interpreter::Cmd),
            "powershell" => Some(Interpreter::PowerShell),
            "sh" => Some(Interpreter::Sh),
            _ => None,
        }
    }

    pub fn command(self) -> &'static str {
        match self {
            Interpreter::Cmd => "cmd",
            Interpreter::PowerShell => "powershell",
            Interpreter::Sh => "sh",
        }
    }

    /// Typed variant of [`resolve`]; `None` means direct execution.
    pub fn for_path(path: impl AsRef<Path>) -> Option<Self> {
        Self::from_command(resolve(path))
    }
}

/// Lowercase extension of the last path component, including the dot.
///
/// Only the final component is inspected, so dots in directory names are
/// ignored. A bare `.sh` file name counts as the extension `.sh`.
pub fn extension_of(path: impl AsRef<Path>) -> Option<String> {
    let name = path.as_ref().file_name()?.to_string_lossy();
    let dot = name.rfind('.')?;
    Some(name[dot..].to_lowercase())
}

/// Interpreter command for `path`, or `""` when the file should be executed
/// directly.
pub fn resolve(path: impl AsRef<Path>) -> &'static str {
    extension_of(path)
        .and_then(|ext| INTERPRETERS.get(ext.as_str()).copied())
        .unwrap_or("")
}
