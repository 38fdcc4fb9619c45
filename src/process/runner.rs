//! process::runner
//!
//! Run one external command to completion.
//!
//! # Streams
//!
//! - stdout is collected in full and, unless suppressed, streamed to the
//!   output channel as it arrives
//! - stderr is mirrored to the same channel and collected into a
//!   [`TailBuffer`] capped at [`MAX_STDERR_LEN`]
//! - stdin receives the optional payload and is then closed
//!
//! All three are driven concurrently so a chatty child cannot deadlock on a
//! full pipe.

use std::io;
use std::path::{Path, PathBuf};
use std::process::Stdio;

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWriteExt};
use tokio::process::Command;

use super::error::CommandInvocationError;
use super::tail::TailBuffer;
use super::MAX_STDERR_LEN;
use crate::ui::output::OutputChannel;

const READ_CHUNK: usize = 8192;

/// One command to run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandInvocation {
    /// Program path or name
    pub program: PathBuf,
    /// Ordered arguments
    pub args: Vec<String>,
    /// Working directory; inherits the current one when absent
    pub cwd: Option<PathBuf>,
    /// Payload written to the child's stdin
    pub stdin: Option<Vec<u8>>,
    /// Do not stream stdout to the output channel
    pub suppress_stdout: bool,
}

impl CommandInvocation {
    /// Create an invocation of `program` with `args`.
    pub fn new<I, S>(program: impl Into<PathBuf>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(|a| a.as_ref().to_string()).collect(),
            ..Self::default()
        }
    }

    /// Run in `dir`.
    #[must_use]
    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    /// Run in `dir` if given.
    #[must_use]
    pub fn maybe_current_dir(mut self, dir: Option<&Path>) -> Self {
        self.cwd = dir.map(Path::to_path_buf);
        self
    }

    /// Feed `payload` to the child's stdin.
    #[must_use]
    pub fn stdin(mut self, payload: impl Into<Vec<u8>>) -> Self {
        self.stdin = Some(payload.into());
        self
    }

    /// Collect stdout without streaming it.
    #[must_use]
    pub fn quiet_stdout(mut self) -> Self {
        self.suppress_stdout = true;
        self
    }

    fn command_name(&self) -> String {
        self.program.display().to_string()
    }
}

/// Executes commands and streams their output to an [`OutputChannel`].
#[derive(Debug, Clone, Default)]
pub struct ProcessRunner {
    output: OutputChannel,
}

impl ProcessRunner {
    /// Create a runner that streams to `output`.
    pub fn new(output: OutputChannel) -> Self {
        Self { output }
    }

    /// The channel output is streamed to.
    pub fn output(&self) -> &OutputChannel {
        &self.output
    }

    /// Run `invocation` and return its stdout.
    ///
    /// # Errors
    ///
    /// Returns `CommandInvocationError` if the process cannot be started,
    /// its streams fail, or it exits with anything but success. The error
    /// message is also written to the output channel.
    pub async fn run(&self, invocation: &CommandInvocation) -> Result<String, CommandInvocationError> {
        self.output
            .line(format!(
                "[command]{} {}",
                invocation.command_name(),
                invocation.args.join(" ")
            ))
            .await;

        let result = self.execute(invocation).await;
        if let Err(e) = &result {
            self.output.line(e).await;
        }
        result
    }

    async fn execute(&self, invocation: &CommandInvocation) -> Result<String, CommandInvocationError> {
        let fail = |exit_code: Option<i32>, stderr: String, stdout: String| {
            CommandInvocationError::new(
                invocation.command_name(),
                invocation.args.clone(),
                exit_code,
                stderr,
                stdout,
            )
        };

        let mut cmd = Command::new(&invocation.program);
        cmd.args(&invocation.args)
            .stdin(if invocation.stdin.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        if let Some(dir) = &invocation.cwd {
            cmd.current_dir(dir);
        }

        let mut child = cmd
            .spawn()
            .map_err(|e| fail(None, e.to_string(), String::new()))?;

        let stdin = child.stdin.take();
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| fail(None, "failed to capture stdout".into(), String::new()))?;
        let stderr = child
            .stderr
            .take()
            .ok_or_else(|| fail(None, "failed to capture stderr".into(), String::new()))?;

        let write_stdin = async {
            if let (Some(mut pipe), Some(payload)) = (stdin, invocation.stdin.as_deref()) {
                // A child that exits without reading its input is not an error.
                if let Err(e) = pipe.write_all(payload).await {
                    tracing::debug!("Writing stdin of {} failed: {}", invocation.command_name(), e);
                }
            }
        };
        let (_, stdout, stderr) = tokio::join!(
            write_stdin,
            pump_stdout(stdout, &self.output, !invocation.suppress_stdout),
            pump_stderr(stderr, &self.output),
        );

        if stderr.truncated() {
            tracing::debug!(
                "stderr of {} exceeded {} bytes; keeping the last {}",
                invocation.command_name(),
                MAX_STDERR_LEN,
                stderr.len()
            );
        }
        let stderr = stderr.into_string();
        let stdout = match stdout {
            Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
            Err(e) => return Err(fail(None, format!("{stderr}\n{e}"), String::new())),
        };

        let status = child
            .wait()
            .await
            .map_err(|e| fail(None, format!("{stderr}\n{e}"), stdout.clone()))?;

        if !status.success() {
            return Err(fail(status.code(), stderr, stdout));
        }
        Ok(stdout)
    }
}

async fn pump_stdout<R: AsyncRead + Unpin>(
    mut reader: R,
    output: &OutputChannel,
    stream: bool,
) -> io::Result<Vec<u8>> {
    let mut collected = Vec::new();
    let mut chunk = [0u8; READ_CHUNK];
    loop {
        let n = reader.read(&mut chunk).await?;
        if n == 0 {
            break;
        }
        collected.extend_from_slice(&chunk[..n]);
        if stream {
            output.write(&chunk[..n]).await;
        }
    }
    Ok(collected)
}

/// Read errors end the capture early; what was read so far is kept.
async fn pump_stderr<R: AsyncRead + Unpin>(mut reader: R, output: &OutputChannel) -> TailBuffer {
    let mut tail = TailBuffer::new(MAX_STDERR_LEN);
    let mut chunk = [0u8; READ_CHUNK];
    loop {
        let n = match reader.read(&mut chunk).await {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) => {
                tracing::debug!("Reading stderr failed: {}", e);
                break;
            }
        };
        tail.push(&chunk[..n]);
        output.write(&chunk[..n]).await;
    }
    tail
}
