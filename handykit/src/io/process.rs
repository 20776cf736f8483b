//! Launch configuration for external processes.
//!
//! [`ProcessLaunch`] describes how to invoke an executable: the program, one
//! pre-joined argument string, an optional working directory, and a fixed set
//! of flags (no shell, captured stdout/stderr, no console window). It never
//! starts the process; [`ProcessLaunch::to_command`] only produces a
//! configured [`Command`] for the caller to spawn.
//!
//! The argument string is a command line, not a single argument. On Windows
//! it is handed to the child untouched; elsewhere it is split with
//! [`split_arguments`], which follows the same quoting rules, so a launch
//! receives the same argv on every platform.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{debug, instrument};

/// Flags applied to every launch. They cannot be overridden.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LaunchFlags {
    pub use_shell: bool,
    pub capture_stdout: bool,
    pub capture_stderr: bool,
    pub create_no_window: bool,
}

impl LaunchFlags {
    pub const FIXED: Self = Self {
        use_shell: false,
        capture_stdout: true,
        capture_stderr: true,
        create_no_window: true,
    };
}

#[cfg(windows)]
const CREATE_NO_WINDOW: u32 = 0x0800_0000;

/// Immutable description of a process launch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessLaunch {
    name: String,
    args: Option<String>,
    working_directory: Option<PathBuf>,
    flags: LaunchFlags,
}

impl ProcessLaunch {
    /// Describe a launch of `name` (an executable path or a name resolved via
    /// `PATH`).
    ///
    /// `name` is not validated here; an empty or unknown executable is
    /// reported by the OS when the command is spawned.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: None,
            working_directory: None,
            flags: LaunchFlags::FIXED,
        }
    }

    /// Set the pre-joined argument string.
    ///
    /// The string is stored as given and returned unchanged by
    /// [`ProcessLaunch::args`]. It is only split into argv when the command
    /// is built.
    pub fn with_args(self, args: impl Into<String>) -> Self {
        Self {
            args: Some(args.into()),
            ..self
        }
    }

    /// Run the process in `dir`.
    ///
    /// The directory only applies to the launched process; it is not used to
    /// find the executable.
    pub fn in_directory(self, dir: impl Into<PathBuf>) -> Self {
        Self {
            working_directory: Some(dir.into()),
            ..self
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn args(&self) -> Option<&str> {
        self.args.as_deref()
    }

    pub fn working_directory(&self) -> Option<&Path> {
        self.working_directory.as_deref()
    }

    pub fn flags(&self) -> LaunchFlags {
        self.flags
    }

    pub fn use_shell(&self) -> bool {
        self.flags.use_shell
    }

    pub fn capture_stdout(&self) -> bool {
        self.flags.capture_stdout
    }

    pub fn capture_stderr(&self) -> bool {
        self.flags.capture_stderr
    }

    pub fn create_no_window(&self) -> bool {
        self.flags.create_no_window
    }

    /// Build a configured, not yet spawned, [`Command`].
    ///
    /// Relative executable paths (those containing a separator) are resolved
    /// against the caller's current directory when a working directory is
    /// set, so the working directory never changes which executable runs.
    #[instrument(skip_all, fields(name = %self.name))]
    pub fn to_command(&self) -> Result<Command> {
        let program = self.resolve_program()?;
        let mut cmd = Command::new(&program);

        if let Some(args) = &self.args {
            push_literal_args(&mut cmd, args);
        }
        if let Some(dir) = &self.working_directory {
            cmd.current_dir(dir);
        }
        cmd.stdout(Stdio::piped()).stderr(Stdio::piped());
        hide_window(&mut cmd);

        debug!(
            program = %program.display(),
            has_args = self.args.is_some(),
            working_directory = ?self.working_directory,
            "configured command"
        );
        Ok(cmd)
    }

    fn resolve_program(&self) -> Result<PathBuf> {
        let program = PathBuf::from(&self.name);
        if self.working_directory.is_none() || program.is_absolute() || !has_separator(&self.name)
        {
            return Ok(program);
        }
        let cwd = std::env::current_dir().context("read current directory")?;
        Ok(cwd.join(program))
    }
}

fn has_separator(name: &str) -> bool {
    name.chars().any(std::path::is_separator)
}

#[cfg(windows)]
fn push_literal_args(cmd: &mut Command, args: &str) {
    use std::os::windows::process::CommandExt;
    cmd.raw_arg(args);
}

#[cfg(not(windows))]
fn push_literal_args(cmd: &mut Command, args: &str) {
    cmd.args(split_arguments(args));
}

/// Split a command-line string into arguments using the Windows C runtime
/// rules.
///
/// - Spaces and tabs separate arguments outside double quotes.
/// - `"` toggles quoting; `""` inside quotes is a literal quote.
/// - `2n` backslashes before a quote become `n` backslashes and the quote
///   keeps its meaning; `2n + 1` become `n` backslashes and a literal quote.
/// - Backslashes not followed by a quote are literal.
///
/// No globbing, variable expansion or other shell processing happens.
pub fn split_arguments(args: &str) -> Vec<String> {
    let chars: Vec<char> = args.chars().collect();
    let mut out = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        while i < chars.len() && is_arg_separator(chars[i]) {
            i += 1;
        }
        if i == chars.len() {
            break;
        }

        let mut current = String::new();
        let mut in_quotes = false;
        while i < chars.len() && (in_quotes || !is_arg_separator(chars[i])) {
            match chars[i] {
                '\\' => {
                    let start = i;
                    while i < chars.len() && chars[i] == '\\' {
                        i += 1;
                    }
                    let count = i - start;
                    if chars.get(i) == Some(&'"') {
                        current.extend(std::iter::repeat_n('\\', count / 2));
                        if count % 2 == 1 {
                            current.push('"');
                            i += 1;
                        }
                    } else {
                        current.extend(std::iter::repeat_n('\\', count));
                    }
                }
                '"' if in_quotes && chars.get(i + 1) == Some(&'"') => {
                    current.push('"');
                    i += 2;
                }
                '"' => {
                    in_quotes = !in_quotes;
                    i += 1;
                }
                c => {
                    current.push(c);
                    i += 1;
                }
            }
        }
        out.push(current);
    }

    out
}

fn is_arg_separator(c: char) -> bool {
    c == ' ' || c == '\t'
}

#[cfg(windows)]
fn hide_window(cmd: &mut Command) {
    use std::os::windows::process::CommandExt;
    cmd.creation_flags(CREATE_NO_WINDOW);
}

#[cfg(not(windows))]
fn hide_window(_cmd: &mut Command) {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsStr;

    #[test]
    fn new_sets_fixed_flags_and_nothing_else() {
        let launch = ProcessLaunch::new("foo");
        assert_eq!(launch.name(), "foo");
        assert!(!launch.use_shell());
        assert!(launch.capture_stdout());
        assert!(launch.capture_stderr());
        assert!(launch.create_no_window());
        assert_eq!(launch.args(), None);
        assert_eq!(launch.working_directory(), None);
    }

    #[test]
    fn args_are_kept_as_one_literal_string() {
        let launch = ProcessLaunch::new("foo").with_args("bar baz");
        assert_eq!(launch.args(), Some("bar baz"));
        assert_eq!(launch.flags(), LaunchFlags::FIXED);
    }

    #[cfg(unix)]
    #[test]
    fn command_splits_argument_string_into_argv() {
        let launch = ProcessLaunch::new("foo").with_args("bar baz");
        let cmd = launch.to_command().expect("command");
        assert_eq!(cmd.get_program(), OsStr::new("foo"));
        let args: Vec<&OsStr> = cmd.get_args().collect();
        assert_eq!(args, vec![OsStr::new("bar"), OsStr::new("baz")]);
        assert_eq!(launch.args(), Some("bar baz"));
    }

    #[cfg(unix)]
    #[test]
    fn spawned_child_receives_separate_arguments() {
        let launch = ProcessLaunch::new("printf").with_args(r#"%s| "two words" -l"#);
        let output = launch
            .to_command()
            .expect("command")
            .output()
            .expect("spawn printf");
        assert!(output.status.success());
        assert_eq!(String::from_utf8_lossy(&output.stdout), "two words|-l|");
    }

    #[test]
    fn split_arguments_on_whitespace() {
        assert_eq!(split_arguments("build --release"), vec!["build", "--release"]);
        assert_eq!(split_arguments("  a\tb   c  "), vec!["a", "b", "c"]);
        assert!(split_arguments("").is_empty());
        assert!(split_arguments("   ").is_empty());
    }

    #[test]
    fn split_arguments_honors_quotes() {
        assert_eq!(split_arguments(r#""hello world" x"#), vec!["hello world", "x"]);
        assert_eq!(split_arguments(r#"a"b c"d"#), vec!["ab cd"]);
        assert_eq!(split_arguments(r#""" x"#), vec!["", "x"]);
        assert_eq!(split_arguments(r#""say ""hi""""#), vec![r#"say "hi""#]);
    }

    #[test]
    fn split_arguments_handles_backslashes() {
        assert_eq!(split_arguments(r"C:\dir\file"), vec![r"C:\dir\file"]);
        assert_eq!(split_arguments(r#"a\"b"#), vec![r#"a"b"#]);
        assert_eq!(split_arguments(r#"a\\"b c""#), vec![r"a\b c"]);
        assert_eq!(split_arguments(r#"a\\\"b"#), vec![r#"a\"b"#]);
    }

    #[test]
    fn command_applies_working_directory() {
        let temp = tempfile::tempdir().expect("tempdir");
        let cmd = ProcessLaunch::new("foo")
            .in_directory(temp.path())
            .to_command()
            .expect("command");
        assert_eq!(cmd.get_current_dir(), Some(temp.path()));
        assert_eq!(cmd.get_program(), OsStr::new("foo"));
        assert_eq!(cmd.get_args().count(), 0);
    }

    #[cfg(unix)]
    #[test]
    fn relative_program_ignores_working_directory() {
        let temp = tempfile::tempdir().expect("tempdir");
        let cmd = ProcessLaunch::new("./bin/tool")
            .in_directory(temp.path())
            .to_command()
            .expect("command");
        let expected = std::env::current_dir().expect("cwd").join("./bin/tool");
        assert_eq!(cmd.get_program(), expected.as_os_str());
    }

    #[test]
    fn serializes_with_fixed_flags() {
        let launch = ProcessLaunch::new("foo").with_args("-v");
        let json = serde_json::to_value(&launch).expect("json");
        assert_eq!(json["name"], "foo");
        assert_eq!(json["args"], "-v");
        assert_eq!(json["working_directory"], serde_json::Value::Null);
        assert_eq!(json["flags"]["use_shell"], false);
        assert_eq!(json["flags"]["capture_stdout"], true);
        assert_eq!(json["flags"]["capture_stderr"], true);
        assert_eq!(json["flags"]["create_no_window"], true);
    }
}
