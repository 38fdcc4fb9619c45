//! ui
//!
//! Operator-facing output.
//!
//! # Modules
//!
//! - [`output`] - Verbosity, the streamed-output channel, result printing
//!
//! # Design
//!
//! Results go to stdout and are always shown. Streamed subprocess output
//! goes to stderr through an [`output::OutputChannel`] so quiet mode and tests can
//! redirect it. Log messages go through `tracing` to stderr.

pub mod output;
