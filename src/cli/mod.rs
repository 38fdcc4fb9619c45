//! cli
//!
//! Command-line interface layer for ci-refs.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and global flags
//! - Install the log subscriber
//! - Resolve the [`Context`] and delegate to command handlers
//!
//! # Architecture
//!
//! The CLI layer is thin. Handlers call into [`crate::refs`],
//! [`crate::git`] and [`crate::process`] and print results; they contain
//! no resolution logic of their own.

pub mod args;
pub mod commands;
mod context;

pub use args::{Cli, Shell};
pub use context::Context;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use crate::core::env::Env;

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run() -> Result<()> {
    let cli = Cli::parse_args();
    init_logging(cli.debug);

    let ctx = Context::load(&cli, Env::from_process())?;
    commands::dispatch(cli.command, &ctx)
}

/// Log to stderr. `RUST_LOG` wins; otherwise `info`, or `debug` with
/// `--debug`.
fn init_logging(debug: bool) {
    let default = if debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    // A subscriber may already be installed when embedded.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
