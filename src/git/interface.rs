//! git::interface
//!
//! The [`GitRunner`] seam and its subprocess-backed implementation.
//!
//! # Architecture
//!
//! Everything that needs git goes through a `GitRunner`. Production code
//! uses [`GitClient`], which shells out via the
//! [`ProcessRunner`](crate::process::ProcessRunner); tests use
//! [`MockGit`](super::mock::MockGit).
//!
//! # Error Handling
//!
//! Failures, including a missing `git` executable, are returned unchanged.
//! Before returning, the client logs the caller's failure context and the
//! reason, replacing git's terse "not a git repository" diagnostic with a
//! sentence that points at the checkout path.

use std::path::Path;

use async_trait::async_trait;

use crate::process::{CommandInvocation, ProcessError, ProcessRunner};

/// Reason logged when git reports the directory is not a repository.
pub const NOT_A_REPO_REASON: &str =
    "The checkout path provided to the action does not appear to be a git repository.";

/// Runs git subcommands.
#[async_trait]
pub trait GitRunner: Send + Sync {
    /// Run `git <args>` in `working_dir` (or the current directory) and
    /// return trimmed stdout.
    ///
    /// `failure_context` is a sentence describing what the caller does if
    /// this fails; it is logged alongside the failure.
    async fn run(
        &self,
        working_dir: Option<&Path>,
        args: &[&str],
        failure_context: &str,
    ) -> Result<String, ProcessError>;
}

/// Git via the `git` executable on `PATH`.
#[derive(Debug, Clone, Default)]
pub struct GitClient {
    runner: ProcessRunner,
}

impl GitClient {
    /// Create a client that runs git through `runner`.
    pub fn new(runner: ProcessRunner) -> Self {
        Self { runner }
    }
}

#[async_trait]
impl GitRunner for GitClient {
    async fn run(
        &self,
        working_dir: Option<&Path>,
        args: &[&str],
        failure_context: &str,
    ) -> Result<String, ProcessError> {
        // Resolved per call so a git installed mid-job is picked up.
        let git = match which::which("git") {
            Ok(git) => git,
            Err(_) => {
                let e = ProcessError::MissingTool {
                    tool: "git".to_string(),
                };
                tracing::info!("git call failed. {} Error: {}", failure_context, e);
                return Err(e);
            }
        };

        tracing::debug!("Running git command: git {}", args.join(" "));
        let invocation = CommandInvocation::new(git, args)
            .maybe_current_dir(working_dir)
            .quiet_stdout();

        match self.runner.run(&invocation).await {
            Ok(stdout) => Ok(stdout.trim().to_string()),
            Err(e) => {
                tracing::info!(
                    "git call failed. {} Error: {}",
                    failure_context,
                    failure_reason(&e.stderr)
                );
                Err(e.into())
            }
        }
    }
}

/// The reason to log for a failed git call.
pub fn failure_reason(stderr: &str) -> &str {
    if stderr.contains("not a git repository") {
        NOT_A_REPO_REASON
    } else {
        stderr
    }
}
