//! Command execution utilities
//!
//! Provides consistent command execution with proper error handling and logging.
//! Input is fed through stdin so secrets never show up in the process table.

use anyhow::{anyhow, Context, Result};
use std::io::Write;
use std::process::{Command, Stdio};
use tracing::{debug, instrument};

/// Result of a command execution.
#[derive(Debug)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    pub success: bool,
    pub code: Option<i32>,
}

impl CommandOutput {
    /// Diagnostic text for a failed command: both streams, since tools like
    /// mongosh print the failure reason to stdout and warnings to stderr.
    pub fn diagnostic(&self) -> String {
        match (self.stderr.is_empty(), self.stdout.is_empty()) {
            (true, _) => self.stdout.clone(),
            (false, true) => self.stderr.clone(),
            (false, false) => format!("{}\n{}", self.stderr, self.stdout),
        }
    }
}

/// Run a command, write `input` to its stdin, and return its output.
///
/// This is a low-level function that returns both stdout and stderr.
/// Use `run_checked` if you want to treat non-zero exit as an error.
#[instrument(skip_all, fields(cmd = %cmd))]
pub fn run(cmd: &str, args: &[&str], input: &str) -> Result<CommandOutput> {
    debug!(args = ?args, "Running command");

    let mut child = Command::new(cmd)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .context(format!("Failed to execute {}", cmd))?;

    if let Some(mut stdin) = child.stdin.take() {
        // A child that exits without reading still has an exit status worth reporting
        match stdin.write_all(input.as_bytes()) {
            Err(e) if e.kind() != std::io::ErrorKind::BrokenPipe => {
                return Err(e).context(format!("Failed to write stdin of {}", cmd));
            }
            _ => {}
        }
    }

    let output = child
        .wait_with_output()
        .context(format!("Failed to wait for {}", cmd))?;

    Ok(CommandOutput {
        stdout: String::from_utf8_lossy(&output.stdout).trim().to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        success: output.status.success(),
        code: output.status.code(),
    })
}

/// Run a command and return stdout if successful, error otherwise.
///
/// # Example
/// ```ignore
/// let out = run_checked("mongosh", &["--quiet", uri], script)?;
/// ```
pub fn run_checked(cmd: &str, args: &[&str], input: &str) -> Result<String> {
    let output = run(cmd, args, input)?;
    if output.success {
        Ok(output.stdout)
    } else {
        let code = output
            .code
            .map(|c| c.to_string())
            .unwrap_or_else(|| "signal".to_string());
        Err(anyhow!(
            "{} failed (exit {}): {}",
            cmd,
            code,
            output.diagnostic()
        ))
    }
}
