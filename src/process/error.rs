//! process::error
//!
//! Errors raised by subprocess execution.

use thiserror::Error;

/// A subprocess exited non-zero or could not be run.
///
/// `stderr` holds at most [`super::MAX_STDERR_LEN`] bytes of the most
/// recent diagnostic output.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct CommandInvocationError {
    /// The program that was run
    pub command: String,
    /// Arguments passed to it
    pub args: Vec<String>,
    /// Exit code; `None` if the process never started or was killed by a signal
    pub exit_code: Option<i32>,
    /// Tail of the standard error stream
    pub stderr: String,
    /// Standard output collected before failure
    pub stdout: String,
    message: String,
}

impl CommandInvocationError {
    /// Build an error and its operator-facing message.
    pub fn new(
        command: impl Into<String>,
        args: Vec<String>,
        exit_code: Option<i32>,
        stderr: impl Into<String>,
        stdout: impl Into<String>,
    ) -> Self {
        let command = command.into();
        let stderr = stderr.into();
        let code = exit_code.map_or_else(|| "unknown".to_string(), |c| c.to_string());
        let message = format!(
            "Failed to run \"{}\". Exit code was {} and last log line was: {} See the logs for more details.",
            pretty_print_invocation(&command, &args),
            code,
            ensure_ends_in_period(last_log_line(&stderr)),
        );
        Self {
            command,
            args,
            exit_code,
            stderr,
            stdout: stdout.into(),
            message,
        }
    }
}

/// Errors from running an external tool.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProcessError {
    /// The executable is not on `PATH`. Not retryable.
    #[error("The `{tool}` program is required, but does not appear to be installed. Please install it.")]
    MissingTool { tool: String },

    /// The process ran and failed, or could not be started.
    #[error(transparent)]
    Invocation(#[from] CommandInvocationError),
}

impl ProcessError {
    /// Captured standard error, for invocation failures.
    pub fn stderr(&self) -> Option<&str> {
        match self {
            ProcessError::Invocation(e) => Some(&e.stderr),
            ProcessError::MissingTool { .. } => None,
        }
    }
}

/// Render a command line, quoting arguments that contain whitespace.
pub fn pretty_print_invocation(command: &str, args: &[String]) -> String {
    std::iter::once(command)
        .chain(args.iter().map(String::as_str))
        .map(|part| {
            if part.chars().any(char::is_whitespace) {
                format!("'{part}'")
            } else {
                part.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// The last non-empty line of `stderr`, trimmed, or `n/a`.
fn last_log_line(stderr: &str) -> &str {
    stderr
        .lines()
        .rev()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or("n/a")
}

fn ensure_ends_in_period(text: &str) -> String {
    if text.ends_with('.') {
        text.to_string()
    } else {
        format!("{text}.")
    }
}
