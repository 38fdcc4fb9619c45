//! merge-bases, diff-hunks, deepen, fetch commands

use anyhow::{bail, Result};

use super::runtime;
use crate::cli::Context;
use crate::ui::output::print;

/// Print one merge base per line.
pub fn merge_bases(ctx: &Context, refs: &[String]) -> Result<()> {
    let refs: Vec<&str> = refs.iter().map(String::as_str).collect();
    let history = ctx.history();
    for base in runtime()?.block_on(history.all_merge_bases(&refs)) {
        print(base);
    }
    Ok(())
}

/// Print the hunk headers between two commits.
pub fn diff_hunks(ctx: &Context, from: &str, to: &str) -> Result<()> {
    let history = ctx.history();
    let Some(headers) = runtime()?.block_on(history.diff_hunk_headers(from, to)) else {
        bail!("Could not compute the diff between '{}' and '{}'", from, to);
    };
    for header in headers {
        print(header);
    }
    Ok(())
}

/// Deepen a shallow checkout by one commit.
pub fn deepen(ctx: &Context) -> Result<()> {
    let history = ctx.history();
    runtime()?.block_on(history.deepen_history());
    Ok(())
}

/// Fetch `branch` from origin.
pub fn fetch(ctx: &Context, branch: &str, flags: &[String]) -> Result<()> {
    let flags: Vec<&str> = flags.iter().map(String::as_str).collect();
    let history = ctx.history();
    runtime()?.block_on(history.fetch_branch(branch, &flags));
    Ok(())
}
