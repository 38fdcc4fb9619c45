//! git::history
//!
//! History queries used by incremental analysis.
//!
//! Every operation here is best-effort: a failure is logged by the
//! [`GitRunner`] and mapped to an empty result, so callers fall back to a
//! full analysis instead of aborting.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::interface::GitRunner;

/// Merge-base, diff, and fetch operations on the checkout.
#[derive(Clone)]
pub struct HistoryService {
    git: Arc<dyn GitRunner>,
    working_dir: Option<PathBuf>,
}

impl std::fmt::Debug for HistoryService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HistoryService")
            .field("working_dir", &self.working_dir)
            .finish_non_exhaustive()
    }
}

impl HistoryService {
    /// Operate in `working_dir` (the `checkout_path` input), or the
    /// current directory when `None`.
    pub fn new(git: Arc<dyn GitRunner>, working_dir: Option<PathBuf>) -> Self {
        Self { git, working_dir }
    }

    fn dir(&self) -> Option<&Path> {
        self.working_dir.as_deref()
    }

    /// All best common ancestors of `refs`.
    ///
    /// Returns an empty list if git fails, including when the histories are
    /// unrelated.
    pub async fn all_merge_bases(&self, refs: &[&str]) -> Vec<String> {
        let mut args = vec!["merge-base", "--all"];
        args.extend_from_slice(refs);

        match self
            .git
            .run(
                self.dir(),
                &args,
                "Cannot get merge base. Continuing with full analysis.",
            )
            .await
        {
            Ok(stdout) => stdout
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(str::to_string)
                .collect(),
            Err(e) => {
                tracing::debug!("merge-base failed: {}", e);
                Vec::new()
            }
        }
    }

    /// The `--- `, `+++ ` and `@@ ` lines of the zero-context diff between
    /// `from` and `to`, in order.
    ///
    /// Returns `None` if the diff could not be computed.
    pub async fn diff_hunk_headers(&self, from: &str, to: &str) -> Option<Vec<String>> {
        let args = [
            "-c",
            "core.quotePath=false",
            "diff",
            "--no-renames",
            "--irreversible-delete",
            "-U0",
            from,
            to,
        ];
        let stdout = self
            .git
            .run(
                self.dir(),
                &args,
                "Cannot get diff hunk headers. Continuing with full analysis.",
            )
            .await
            .ok()?;

        Some(
            stdout
                .lines()
                .filter(|line| is_hunk_header(line))
                .map(str::to_string)
                .collect(),
        )
    }

    /// Fetch one more commit of history for `HEAD`.
    pub async fn deepen_history(&self) {
        let args = [
            "fetch",
            "origin",
            "HEAD",
            "--no-tags",
            "--no-recurse-submodules",
            "--deepen=1",
        ];
        if self
            .git
            .run(self.dir(), &args, "Cannot deepen the shallow repository.")
            .await
            .is_err()
        {
            tracing::debug!("Continuing with the current history depth");
        }
    }

    /// Fetch `branch` from `origin` into the local branch of the same name.
    ///
    /// `extra_flags` are passed to `git fetch` before the remote.
    pub async fn fetch_branch(&self, branch: &str, extra_flags: &[&str]) {
        let refspec = format!("{branch}:{branch}");
        let mut args = vec!["fetch", "--no-tags"];
        args.extend_from_slice(extra_flags);
        args.extend_from_slice(&["origin", refspec.as_str()]);

        if self
            .git
            .run(self.dir(), &args, &format!("Cannot fetch {branch}."))
            .await
            .is_err()
        {
            tracing::debug!("Continuing without fetching {}", branch);
        }
    }
}

fn is_hunk_header(line: &str) -> bool {
    line.starts_with("--- ") || line.starts_with("+++ ") || line.starts_with("@@ ")
}
