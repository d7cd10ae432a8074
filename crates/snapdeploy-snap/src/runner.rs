//! Build tool invocation
//!
//! Every interaction with `snapcraft` goes through [`CommandRunner`], so the
//! deployment steps can be exercised without the real tool installed.

use std::fmt;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

use tracing::{debug, instrument};

use snapdeploy_core::error::CommandError;

/// A tool invocation: program plus arguments, never passed through a shell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCommand {
    program: String,
    args: Vec<String>,
}

impl ToolCommand {
    /// Create a command with no arguments
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Append an argument
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// The executable
    pub fn program(&self) -> &str {
        &self.program
    }

    /// The arguments
    pub fn args(&self) -> &[String] {
        &self.args
    }
}

impl fmt::Display for ToolCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Output captured from a finished command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedOutput {
    /// Whether the process reported success
    pub success: bool,
    /// Exit code, if the process exited normally
    pub code: Option<i32>,
    /// Standard output
    pub stdout: String,
    /// Standard error
    pub stderr: String,
}

/// Runs build tool commands
pub trait CommandRunner: Send + Sync {
    /// Run a command in `cwd` with inherited stdio; fails unless it exits successfully
    fn run(&self, command: &ToolCommand, cwd: &Path) -> Result<(), CommandError>;

    /// Run a command with piped stdio, writing `stdin` to it, and capture the result.
    ///
    /// Only failing to launch the process is an error; a non-zero exit is
    /// reported through [`CapturedOutput::success`].
    fn capture(
        &self,
        command: &ToolCommand,
        cwd: Option<&Path>,
        stdin: Option<&str>,
    ) -> Result<CapturedOutput, CommandError>;
}

/// Runs commands as real child processes
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl SystemRunner {
    /// Create a new system runner
    pub fn new() -> Self {
        Self
    }

    fn command(command: &ToolCommand) -> Command {
        let mut cmd = Command::new(command.program());
        cmd.args(command.args());
        cmd
    }
}

impl CommandRunner for SystemRunner {
    #[instrument(skip(self, command), fields(command = %command))]
    fn run(&self, command: &ToolCommand, cwd: &Path) -> Result<(), CommandError> {
        let status = Self::command(command)
            .current_dir(cwd)
            .status()
            .map_err(|e| CommandError::new(command.to_string(), e.to_string()))?;

        debug!(%status, "command finished");
        if !status.success() {
            return Err(CommandError::new(command.to_string(), status.to_string()));
        }

        Ok(())
    }

    #[instrument(skip(self, command, stdin), fields(command = %command))]
    fn capture(
        &self,
        command: &ToolCommand,
        cwd: Option<&Path>,
        stdin: Option<&str>,
    ) -> Result<CapturedOutput, CommandError> {
        let mut cmd = Self::command(command);
        if let Some(dir) = cwd {
            cmd.current_dir(dir);
        }
        cmd.stdin(if stdin.is_some() {
            Stdio::piped()
        } else {
            Stdio::null()
        });
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());

        let mut child = cmd
            .spawn()
            .map_err(|e| CommandError::new(command.to_string(), e.to_string()))?;

        if let (Some(input), Some(mut pipe)) = (stdin, child.stdin.take()) {
            // The child may exit without reading; its exit status decides the outcome.
            if let Err(e) = pipe.write_all(input.as_bytes()) {
                debug!(error = %e, "failed to write to command stdin");
            }
        }

        let output = child
            .wait_with_output()
            .map_err(|e| CommandError::new(command.to_string(), e.to_string()))?;

        debug!(status = %output.status, "command finished");
        Ok(CapturedOutput {
            success: output.status.success(),
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }
}
