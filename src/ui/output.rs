//! ui::output
//!
//! Where operator-visible output goes.
//!
//! # Design
//!
//! Results go to stdout with [`print`] so callers can capture them.
//! Subprocess output is streamed to an [`OutputChannel`] as it arrives,
//! which writes to stderr so operators see progress and diagnostics inline
//! in the CI log without corrupting results. Quiet mode discards the
//! stream; tests capture it in memory.

use std::fmt::Display;
use std::sync::{Arc, Mutex};

use tokio::io::AsyncWriteExt;

/// Output verbosity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    /// Quiet mode - results only, no streamed subprocess output
    Quiet,
    /// Normal mode - standard output
    Normal,
    /// Debug mode - verbose output
    Debug,
}

impl Verbosity {
    /// Create verbosity from flags.
    pub fn from_flags(quiet: bool, debug: bool) -> Self {
        if quiet {
            Verbosity::Quiet
        } else if debug {
            Verbosity::Debug
        } else {
            Verbosity::Normal
        }
    }

    /// The channel subprocess output should be streamed to.
    pub fn channel(self) -> OutputChannel {
        match self {
            Verbosity::Quiet => OutputChannel::Discard,
            Verbosity::Normal | Verbosity::Debug => OutputChannel::Stderr,
        }
    }
}

/// Destination for streamed subprocess output.
#[derive(Debug, Clone, Default)]
pub enum OutputChannel {
    /// The process's standard error
    #[default]
    Stderr,
    /// Drop everything
    Discard,
    /// Keep everything in memory
    Capture(Arc<Mutex<Vec<u8>>>),
}

impl OutputChannel {
    /// A channel that records what is written to it.
    pub fn capture() -> Self {
        OutputChannel::Capture(Arc::new(Mutex::new(Vec::new())))
    }

    /// Write raw bytes.
    ///
    /// Failures to write operator output never fail the operation that
    /// produced it.
    pub async fn write(&self, bytes: &[u8]) {
        match self {
            OutputChannel::Stderr => {
                let mut stderr = tokio::io::stderr();
                if let Err(e) = stderr.write_all(bytes).await {
                    tracing::debug!("Failed to write to stderr: {}", e);
                }
                let _ = stderr.flush().await;
            }
            OutputChannel::Discard => {}
            OutputChannel::Capture(buf) => {
                if let Ok(mut buf) = buf.lock() {
                    buf.extend_from_slice(bytes);
                }
            }
        }
    }

    /// Write one line of text.
    pub async fn line(&self, message: impl Display) {
        self.write(format!("{message}\n").as_bytes()).await;
    }

    /// Everything captured so far; empty for other channels.
    pub fn captured(&self) -> String {
        match self {
            OutputChannel::Capture(buf) => buf
                .lock()
                .map(|b| String::from_utf8_lossy(&b).into_owned())
                .unwrap_or_default(),
            _ => String::new(),
        }
    }
}

/// Print a result line (always shown, even in quiet mode).
pub fn print(message: impl Display) {
    println!("{}", message);
}
