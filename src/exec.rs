//! Synchronous external tool invocation.
//!
//! Every child process spawned by the harness goes through [`Tool`]. The
//! rendered command line is echoed to stderr before the process starts, the
//! process is waited on to completion, and the exit status comes back as a
//! structured value so the caller decides whether a failure is fatal.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::Command;
use thiserror::Error;

use crate::status;
use crate::ui::Style;

/// A child process exited with a non-zero status.
///
/// Carried up to `main` so the whole invocation can exit with the child's
/// own exit code.
#[derive(Debug, Error)]
#[error("`{command}` exited with status {code}")]
pub struct ToolFailure {
    /// The rendered command line.
    pub command: String,
    /// The child's exit code.
    pub code: i32,
}

/// Builder for a single synchronous external command.
#[derive(Debug, Clone)]
pub struct Tool {
    program: String,
    args: Vec<String>,
    envs: Vec<(String, String)>,
    cwd: Option<PathBuf>,
}

impl Tool {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            envs: Vec::new(),
            cwd: None,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.envs.push((key.into(), value.into()));
        self
    }

    pub fn current_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.cwd = Some(dir.as_ref().to_path_buf());
        self
    }

    /// The command line as it will be echoed, including env var prefixes.
    pub fn command_line(&self) -> String {
        let mut parts: Vec<String> = self
            .envs
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect();
        parts.push(self.program.clone());
        parts.extend(self.args.iter().cloned());
        parts.join(" ")
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        for (key, value) in &self.envs {
            cmd.env(key, value);
        }
        if let Some(dir) = &self.cwd {
            cmd.current_dir(dir);
        }
        cmd
    }

    /// Runs the command with inherited stdio and returns its exit code.
    ///
    /// Only spawn failures (missing binary, bad working directory) are
    /// errors; a non-zero exit is a normal return value here.
    pub fn run(&self) -> Result<i32> {
        let line = self.command_line();
        status!("{}", Style::command(&line));

        let status = self
            .command()
            .status()
            .with_context(|| format!("failed to run `{line}`"))?;
        Ok(status.code().unwrap_or(1))
    }

    /// Runs the command and converts a non-zero exit into a [`ToolFailure`].
    pub fn run_checked(&self) -> Result<()> {
        match self.run()? {
            0 => Ok(()),
            code => Err(ToolFailure {
                command: self.command_line(),
                code,
            }
            .into()),
        }
    }

    /// Runs the command and returns its trimmed stdout.
    ///
    /// Used for tools whose output is consumed (git). A non-zero exit is a
    /// [`ToolFailure`]; stderr is inherited so diagnostics stay visible.
    pub fn capture(&self) -> Result<String> {
        let line = self.command_line();
        status!("{}", Style::command(&line));

        let output = self
            .command()
            .stderr(std::process::Stdio::inherit())
            .output()
            .with_context(|| format!("failed to run `{line}`"))?;

        if !output.status.success() {
            return Err(ToolFailure {
                command: line,
                code: output.status.code().unwrap_or(1),
            }
            .into());
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_command_line_rendering() {
        let tool = Tool::new("go")
            .arg("build")
            .args(["-o", "dist/out"])
            .env("GOOS", "linux");
        assert_eq!(tool.command_line(), "GOOS=linux go build -o dist/out");
    }

    #[test]
    fn test_run_reports_exit_code() {
        let code = Tool::new("false").run().unwrap();
        assert_ne!(code, 0);

        let code = Tool::new("true").run().unwrap();
        assert_eq!(code, 0);
    }

    #[test]
    fn test_run_checked_surfaces_tool_failure() {
        let err = Tool::new("false").run_checked().unwrap_err();
        let failure = err.downcast_ref::<ToolFailure>().unwrap();
        assert_eq!(failure.code, 1);
        assert_eq!(failure.command, "false");
    }

    #[test]
    fn test_run_missing_program_is_spawn_error() {
        let err = Tool::new("mk-no-such-program-xyz").run().unwrap_err();
        assert!(err.downcast_ref::<ToolFailure>().is_none());
    }

    #[test]
    fn test_capture_trims_stdout() {
        let out = Tool::new("echo").arg("hello").capture().unwrap();
        assert_eq!(out, "hello");
    }
}
