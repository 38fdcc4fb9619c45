//! ref, commit-oid, base-head, is-default-branch commands

use std::path::Path;

use anyhow::{Context as _, Result};

use super::runtime;
use crate::cli::Context;
use crate::refs::DefaultBranchClassifier;
use crate::ui::output::print;

/// Print the ref results are attributed to.
pub fn current_ref(ctx: &Context) -> Result<()> {
    let resolver = ctx.resolver();
    let current = runtime()?
        .block_on(resolver.current_ref())
        .context("Failed to determine the current ref")?;
    print(current);
    Ok(())
}

/// Print the commit `git_ref` points at in the checkout.
pub fn commit_oid(ctx: &Context, git_ref: &str) -> Result<()> {
    let resolver = ctx.resolver();
    let checkout = resolver.checkout_path()?;
    let oid = runtime()?
        .block_on(resolver.commit_oid(&checkout, git_ref))
        .with_context(|| format!("Failed to resolve '{}'", git_ref))?;
    print(oid);
    Ok(())
}

/// Print the base branch head of the pull request merge commit, if known.
pub fn base_head(ctx: &Context, path: Option<&Path>) -> Result<()> {
    let resolver = ctx.resolver();
    let base = runtime()?
        .block_on(resolver.base_branch_head_commit_oid(path))
        .context("Failed to determine the base branch head")?;
    match base {
        Some(oid) => print(oid),
        None => tracing::info!("Base branch head is not available for this run"),
    }
    Ok(())
}

/// Print `true` or `false`.
pub fn is_default_branch(ctx: &Context) -> Result<()> {
    let resolver = ctx.resolver();
    let classifier = DefaultBranchClassifier::new(&resolver);
    let result = runtime()?
        .block_on(classifier.is_analyzing_default_branch())
        .context("Failed to determine whether this is the default branch")?;
    print(result);
    Ok(())
}
