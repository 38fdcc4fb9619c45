//! git::mock
//!
//! Scripted git runner for deterministic testing.
//!
//! # Design
//!
//! Responses are keyed by the exact argument list. Calls that were not
//! scripted fail like a real git error would, so a test that forgets to
//! script a call sees the soft-failure path rather than a panic. Every call
//! is recorded for verification.
//!
//! # Example
//!
//! ```
//! use ci_refs::git::mock::MockGit;
//! use ci_refs::git::GitRunner;
//!
//! # tokio_test::block_on(async {
//! let git = MockGit::new()
//!     .respond(&["rev-parse", "HEAD"], "abc\n")
//!     .fail(&["merge-base", "--all", "a", "b"], "fatal: no merge base");
//!
//! assert_eq!(git.run(None, &["rev-parse", "HEAD"], "").await.unwrap(), "abc");
//! assert!(git.run(None, &["merge-base", "--all", "a", "b"], "").await.is_err());
//! assert_eq!(git.calls().len(), 2);
//! # });
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::interface::GitRunner;
use crate::process::{CommandInvocationError, ProcessError};

/// Mock git runner.
///
/// Thread-safe via internal `Arc<Mutex<...>>` wrapping; clones share state.
#[derive(Debug, Clone, Default)]
pub struct MockGit {
    inner: Arc<Mutex<MockGitInner>>,
}

#[derive(Debug, Default)]
struct MockGitInner {
    responses: HashMap<Vec<String>, Result<String, ProcessError>>,
    calls: Vec<GitCall>,
}

/// A recorded call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitCall {
    pub working_dir: Option<PathBuf>,
    pub args: Vec<String>,
}

fn key(args: &[&str]) -> Vec<String> {
    args.iter().map(|a| a.to_string()).collect()
}

impl MockGit {
    /// Create a mock with nothing scripted.
    pub fn new() -> Self {
        Self::default()
    }

    /// Script a successful call.
    pub fn respond(self, args: &[&str], stdout: &str) -> Self {
        self.script(args, Ok(stdout.to_string()))
    }

    /// Script a call that exits with status 128.
    pub fn fail(self, args: &[&str], stderr: &str) -> Self {
        let err = CommandInvocationError::new("git", key(args), Some(128), stderr, "");
        self.script(args, Err(err.into()))
    }

    /// Script an arbitrary result.
    pub fn script(self, args: &[&str], result: Result<String, ProcessError>) -> Self {
        {
            let mut inner = self.inner.lock().unwrap();
            inner.responses.insert(key(args), result);
        }
        self
    }

    /// All recorded calls, in order.
    pub fn calls(&self) -> Vec<GitCall> {
        let inner = self.inner.lock().unwrap();
        inner.calls.clone()
    }

    /// Number of recorded calls.
    pub fn call_count(&self) -> usize {
        let inner = self.inner.lock().unwrap();
        inner.calls.len()
    }
}

#[async_trait]
impl GitRunner for MockGit {
    async fn run(
        &self,
        working_dir: Option<&Path>,
        args: &[&str],
        _failure_context: &str,
    ) -> Result<String, ProcessError> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(GitCall {
            working_dir: working_dir.map(Path::to_path_buf),
            args: key(args),
        });
        match inner.responses.get(&key(args)) {
            Some(Ok(stdout)) => Ok(stdout.trim().to_string()),
            Some(Err(e)) => Err(e.clone()),
            None => Err(CommandInvocationError::new(
                "git",
                key(args),
                Some(1),
                format!("mock: unexpected git call: {}", args.join(" ")),
                "",
            )
            .into()),
        }
    }
}
