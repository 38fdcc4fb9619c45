//! refs::resolver
//!
//! Which commit and ref a run's results belong to.
//!
//! # Pull request merge refs
//!
//! For `pull_request` events the CI system checks out a synthetic merge
//! commit (`refs/pull/<n>/merge`). If a workflow step later checks out
//! something else, results must be attributed to the pull request's head
//! (`refs/pull/<n>/head`) instead. The checkout is still considered to be
//! on the merge commit when `HEAD` matches either the triggering sha or the
//! remote-tracking merge ref that `actions/checkout` creates.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::core::config::{ConfigError, Inputs};
use crate::core::env::{vars, Env};
use crate::core::types::{Oid, Ref};
use crate::git::GitRunner;

/// Message for a `ref` input without a `sha` input, or vice versa.
pub const REF_AND_SHA_REQUIRED: &str =
    "Both 'ref' and 'sha' are required if one of them is provided.";

/// Resolves commit ids and refs from git, inputs, and the environment.
#[derive(Clone)]
pub struct RefResolver {
    git: Arc<dyn GitRunner>,
    env: Env,
    inputs: Inputs,
}

impl std::fmt::Debug for RefResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RefResolver")
            .field("env", &self.env)
            .field("inputs", &self.inputs)
            .finish_non_exhaustive()
    }
}

impl RefResolver {
    pub fn new(git: Arc<dyn GitRunner>, env: Env, inputs: Inputs) -> Self {
        Self { git, env, inputs }
    }

    pub fn env(&self) -> &Env {
        &self.env
    }

    pub fn inputs(&self) -> &Inputs {
        &self.inputs
    }

    /// The repository checkout directory.
    ///
    /// The `checkout_path` input, else the `source-root` input, else
    /// `GITHUB_WORKSPACE`.
    pub fn checkout_path(&self) -> Result<PathBuf, ConfigError> {
        if let Some(path) = &self.inputs.checkout_path {
            return Ok(path.clone());
        }
        if let Some(path) = &self.inputs.source_root {
            return Ok(path.clone());
        }
        self.env.workspace()
    }

    /// The commit `git_ref` points at in `working_dir`.
    ///
    /// If git cannot resolve it, falls back to the `sha` input and then to
    /// `GITHUB_SHA`.
    ///
    /// # Errors
    ///
    /// Only if git fails and neither fallback is available.
    pub async fn commit_oid(&self, working_dir: &Path, git_ref: &str) -> Result<String, ConfigError> {
        match self
            .git
            .run(
                Some(working_dir),
                &["rev-parse", git_ref],
                "Continuing with commit SHA from user input or environment.",
            )
            .await
        {
            Ok(oid) => Ok(oid),
            Err(_) => match &self.inputs.sha {
                Some(sha) => Ok(sha.clone()),
                None => self.env.sha().map(str::to_string),
            },
        }
    }

    /// The ref results should be attributed to.
    ///
    /// A `ref` input is trusted verbatim. Otherwise the environment ref is
    /// used, rewritten to the pull request head when the checkout has moved
    /// off the merge commit.
    ///
    /// # Errors
    ///
    /// - `ConfigError::ConflictingInputs` if only one of `ref` and `sha` is given
    /// - `ConfigError::MissingEnv` if the environment ref, sha, or (when
    ///   needed) workspace is missing
    pub async fn current_ref(&self) -> Result<Ref, ConfigError> {
        let (git_ref, sha) = match (&self.inputs.git_ref, &self.inputs.sha) {
            (Some(git_ref), Some(_)) => return Ok(Ref::parse(git_ref)),
            (None, None) => (self.env.ref_name()?, self.env.sha()?),
            _ => {
                return Err(ConfigError::ConflictingInputs(
                    REF_AND_SHA_REQUIRED.to_string(),
                ))
            }
        };

        let current = Ref::parse(git_ref);
        let (Some(head_ref), Some(remote_merge)) = (current.to_head(), current.remote_tracking())
        else {
            return Ok(current);
        };

        let checkout = self.checkout_path()?;
        let head = self.commit_oid(&checkout, "HEAD").await?;
        let moved = head != sha && self.commit_oid(&checkout, &remote_merge).await? != head;

        if moved {
            tracing::debug!(
                "No longer on merge commit, rewriting ref from {} to {}.",
                current,
                head_ref
            );
            Ok(head_ref)
        } else {
            Ok(current)
        }
    }

    /// The head of the base branch for a pull request run.
    ///
    /// Reads the parents of the merge commit `GITHUB_SHA`: its first parent
    /// is the base branch head. Returns `None` for non-`pull_request`
    /// events and whenever the lookup fails or the commit is not the
    /// expected two-parent merge.
    ///
    /// # Errors
    ///
    /// `ConfigError::MissingEnv` if a `pull_request` run has no `GITHUB_SHA`.
    pub async fn base_branch_head_commit_oid(
        &self,
        working_dir: Option<&Path>,
    ) -> Result<Option<Oid>, ConfigError> {
        if self.env.optional(vars::GITHUB_EVENT_NAME) != Some("pull_request") {
            return Ok(None);
        }
        let merge_sha = self.env.sha()?;
        let dir = working_dir
            .map(Path::to_path_buf)
            .or_else(|| self.inputs.checkout_path.clone());

        let raw = self
            .git
            .run(
                dir.as_deref(),
                &["show", "-s", "--format=raw", merge_sha],
                "Will calculate the base branch SHA on the server.",
            )
            .await;
        Ok(raw.ok().and_then(|raw| base_from_raw_commit(&raw, merge_sha)))
    }
}

/// First parent of a raw-format commit, if the commit is `merge_sha` and
/// has two well-formed parents.
fn base_from_raw_commit(raw: &str, merge_sha: &str) -> Option<Oid> {
    let mut commit = None;
    let mut parents = Vec::with_capacity(2);
    for line in raw.lines() {
        if let Some(oid) = line.strip_prefix("commit ") {
            commit.get_or_insert(oid);
        } else if let Some(oid) = line.strip_prefix("parent ") {
            if parents.len() < 2 {
                parents.push(oid);
            }
        }
    }

    if commit != Some(merge_sha) {
        return None;
    }
    match parents.as_slice() {
        [base, head] if Oid::is_well_formed(head) => Oid::new(*base).ok(),
        _ => None,
    }
}
