//! Shell command execution.

use crate::error::{InstallError, Result};
use std::process::{Command, Stdio};

/// Result of executing a shell command.
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// Exit code (None if killed by signal).
    pub exit_code: Option<i32>,

    /// Standard output.
    pub stdout: String,

    /// Standard error.
    pub stderr: String,

    /// Whether command succeeded (exit code 0).
    pub success: bool,
}

impl CommandResult {
    /// Create a success result.
    pub fn success(stdout: String, stderr: String) -> Self {
        Self {
            exit_code: Some(0),
            stdout,
            stderr,
            success: true,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: Option<i32>, stdout: String, stderr: String) -> Self {
        Self {
            exit_code,
            stdout,
            stderr,
            success: false,
        }
    }

    /// The text worth showing when the command went wrong.
    ///
    /// Trimmed stderr, falling back to trimmed stdout. `None` when both
    /// streams are blank.
    pub fn diagnostic(&self) -> Option<String> {
        [&self.stderr, &self.stdout]
            .into_iter()
            .map(|s| s.trim())
            .find(|s| !s.is_empty())
            .map(str::to_string)
    }

    /// Exit code formatted for messages (`signal` when killed).
    pub fn code_label(&self) -> String {
        self.exit_code
            .map(|c| c.to_string())
            .unwrap_or_else(|| "signal".to_string())
    }
}

/// Options for command execution.
#[derive(Debug, Clone, Default)]
pub struct CommandOptions {
    /// Shell program (defaults to `sh`).
    pub shell: Option<String>,

    /// Arguments placed before the command string (defaults to `-c`).
    pub shell_args: Vec<String>,
}

/// Execute a shell command, capturing both output streams.
pub fn execute(command: &str, options: &CommandOptions) -> Result<CommandResult> {
    let shell = options.shell.as_deref().unwrap_or("sh");
    let mut cmd = Command::new(shell);
    if options.shell_args.is_empty() {
        cmd.arg("-c");
    } else {
        cmd.args(&options.shell_args);
    }
    cmd.arg(command);

    // Nothing we run is interactive
    cmd.stdin(Stdio::null());
    cmd.stdout(Stdio::piped());
    cmd.stderr(Stdio::piped());

    tracing::debug!("Executing via {}: {}", shell, command);

    let output = cmd.output().map_err(|source| InstallError::CommandFailed {
        command: command.to_string(),
        source,
    })?;

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();

    if output.status.success() {
        Ok(CommandResult::success(stdout, stderr))
    } else {
        Ok(CommandResult::failure(output.status.code(), stdout, stderr))
    }
}
