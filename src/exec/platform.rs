// src/exec/platform.rs

//! Per-platform construction of the child command.
//!
//! This is the only place that knows how each interpreter wants a script file
//! passed to it. The runner never branches on the OS itself.
//!
//! On Windows `cmd` does not follow the argv quoting rules the standard
//! library applies, so its command line is assembled by hand and passed raw.

use std::ffi::{OsStr, OsString};
use std::path::Path;

use tokio::process::Command;

use crate::interpreter::Interpreter;

/// Build the command that runs `path` with `interpreter` (or directly when
/// `None`), followed by `args`.
pub fn build_command<I, S>(interpreter: Option<Interpreter>, path: &Path, args: I) -> Command
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let mut cmd = match interpreter {
        #[cfg(windows)]
        Some(Interpreter::Cmd) => return cmd_command(path, args),
        Some(interp) => {
            let mut c = Command::new(interp.command());
            c.args(interpreter_flags(interp)).arg(path);
            c
        }
        None => Command::new(path),
    };
    cmd.args(args);
    cmd
}

#[cfg(windows)]
fn cmd_command<I, S>(path: &Path, args: I) -> Command
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    use std::os::windows::process::CommandExt;

    let mut c = Command::new(Interpreter::Cmd.command());
    c.as_std_mut().raw_arg(cmd_script_line(path, args));
    c
}

/// The `/S /C ""<script>" <args>"` tail for `cmd`.
///
/// With `/S`, cmd always strips exactly the outermost pair of quotes, so the
/// quoting of the script path and each argument survives untouched.
pub fn cmd_script_line<I, S>(path: &Path, args: I) -> OsString
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let mut line = OsString::from("/S /C \"");
    line.push(quote_cmd_arg(path.as_os_str(), true));
    for arg in args {
        line.push(" ");
        line.push(quote_cmd_arg(arg.as_ref(), false));
    }
    line.push("\"");
    line
}

/// Quote one word for a batch command line; embedded quotes are doubled.
fn quote_cmd_arg(arg: &OsStr, always: bool) -> OsString {
    let Some(text) = arg.to_str() else {
        let mut quoted = OsString::from("\"");
        quoted.push(arg);
        quoted.push("\"");
        return quoted;
    };

    let needs_quotes = always
        || text.is_empty()
        || text.contains([' ', '\t', '"', '&', '|', '<', '>', '^', '(', ')', ',', ';']);
    if !needs_quotes {
        return arg.to_os_string();
    }
    OsString::from(format!("\"{}\"", text.replace('"', "\"\"")))
}

/// Flags that go between the interpreter and the script path.
pub fn interpreter_flags(interpreter: Interpreter) -> &'static [&'static str] {
    match interpreter {
        // Without /C, cmd starts an interactive session instead of running the file.
        Interpreter::Cmd => &["/C"],
        Interpreter::PowerShell => &[
            "-NoProfile",
            "-NonInteractive",
            "-ExecutionPolicy",
            "Bypass",
            "-File",
        ],
        Interpreter::Sh => &[],
    }
}

/// Human-readable program name for logs and launch errors.
pub fn program_name(interpreter: Option<Interpreter>, path: &Path) -> String {
    match interpreter {
        Some(interp) => interp.command().to_string(),
        None => path.display().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(cmd: &Command) -> Vec<String> {
        let std_cmd = cmd.as_std();
        std::iter::once(std_cmd.get_program())
            .chain(std_cmd.get_args())
            .map(|s| s.to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn sh_gets_path_then_args() {
        let cmd = build_command(Some(Interpreter::Sh), Path::new("/tmp/a.sh"), ["x", "y"]);
        assert_eq!(argv(&cmd), ["sh", "/tmp/a.sh", "x", "y"]);
    }

    #[test]
    fn cmd_line_wraps_spaced_path_and_quoted_args_once() {
        let args = ["a b", "plain", "", "say \"hi\""];
        let line = cmd_script_line(Path::new("C:\\a b\\x.bat"), args);
        assert_eq!(
            line,
            OsString::from("/S /C \"\"C:\\a b\\x.bat\" \"a b\" plain \"\" \"say \"\"hi\"\"\"\"")
        );
    }

    #[test]
    fn cmd_line_quotes_plain_path_and_shell_metacharacters() {
        let line = cmd_script_line(Path::new("x.cmd"), ["a&b"]);
        assert_eq!(line, OsString::from("/S /C \"\"x.cmd\" \"a&b\"\""));
    }

    #[cfg(windows)]
    #[test]
    fn windows_cmd_passes_one_raw_tail() {
        let cmd = build_command(Some(Interpreter::Cmd), Path::new("C:\\a b\\x.bat"), ["a b"]);
        assert_eq!(argv(&cmd), ["cmd", "/S /C \"\"C:\\a b\\x.bat\" \"a b\"\""]);
    }

    #[cfg(not(windows))]
    #[test]
    fn cmd_runs_file_with_c_flag() {
        let cmd = build_command(Some(Interpreter::Cmd), Path::new("C:\\t\\a.bat"), ["1"]);
        assert_eq!(argv(&cmd), ["cmd", "/C", "C:\\t\\a.bat", "1"]);
    }

    #[test]
    fn powershell_uses_file_flag_last() {
        let no_args: Vec<&str> = Vec::new();
        let cmd = build_command(Some(Interpreter::PowerShell), Path::new("a.ps1"), no_args);
        let args = argv(&cmd);
        assert_eq!(args.first().map(String::as_str), Some("powershell"));
        assert_eq!(&args[args.len() - 2..], ["-File", "a.ps1"]);
    }

    #[test]
    fn direct_execution_uses_path_as_program() {
        let cmd = build_command(None, Path::new("/usr/local/bin/tool"), ["--flag"]);
        assert_eq!(argv(&cmd), ["/usr/local/bin/tool", "--flag"]);
    }

    #[test]
    fn program_name_prefers_interpreter() {
        assert_eq!(program_name(Some(Interpreter::Sh), Path::new("a.sh")), "sh");
        assert_eq!(program_name(None, Path::new("tool")), "tool");
    }
}
