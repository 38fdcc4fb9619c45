//! process
//!
//! Execution of external programs.
//!
//! # Responsibilities
//!
//! - Run one command to completion, streaming its output to the operator
//! - Keep a bounded tail of stderr for diagnostics
//! - Translate failures into [`CommandInvocationError`]
//! - Probe file types with `file -L`
//!
//! # Invariants
//!
//! - Captured stderr never exceeds [`MAX_STDERR_LEN`] bytes; the newest
//!   output is kept
//! - Every failure is written to the output channel before it is returned
//!
//! # Example
//!
//! ```no_run
//! use ci_refs::process::{CommandInvocation, ProcessRunner};
//! use ci_refs::ui::output::OutputChannel;
//!
//! # tokio_test::block_on(async {
//! let runner = ProcessRunner::new(OutputChannel::Stderr);
//! let out = runner
//!     .run(&CommandInvocation::new("git", ["--version"]).quiet_stdout())
//!     .await?;
//! println!("{}", out.trim());
//! # Ok::<(), ci_refs::process::CommandInvocationError>(())
//! # });
//! ```

mod error;
pub mod probe;
mod runner;
mod tail;

pub use error::{pretty_print_invocation, CommandInvocationError, ProcessError};
pub use runner::{CommandInvocation, ProcessRunner};
pub use tail::TailBuffer;

/// Maximum number of stderr bytes retained for an invocation error.
pub const MAX_STDERR_LEN: usize = 20_000;
