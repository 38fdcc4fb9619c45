//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Builds the service it needs from the [`Context`]
//! 2. Runs it
//! 3. Prints the result with [`crate::ui::output::print`]
//!
//! # Async Commands
//!
//! Anything that runs a subprocess is async. Handlers stay synchronous and
//! drive the async part on a tokio runtime with `block_on`.

mod completion;
mod env_cmd;
mod history;
mod inspect;
mod refs;

pub use completion::completion;
pub use env_cmd::{env, snapshot};
pub use history::{deepen, diff_hunks, fetch, merge_bases};
pub use inspect::{decode_path, file_type, list_files};
pub use refs::{base_head, commit_oid, is_default_branch, current_ref};

use crate::cli::args::Command;
use crate::cli::Context;
use anyhow::Result;

/// Dispatch a command to its handler.
pub fn dispatch(command: Command, ctx: &Context) -> Result<()> {
    match command {
        Command::Ref => current_ref(ctx),
        Command::CommitOid { git_ref } => commit_oid(ctx, &git_ref),
        Command::BaseHead { path } => base_head(ctx, path.as_deref()),
        Command::IsDefaultBranch => is_default_branch(ctx),

        Command::MergeBases { refs } => merge_bases(ctx, &refs),
        Command::DiffHunks { from, to } => diff_hunks(ctx, &from, &to),
        Command::Deepen => deepen(ctx),
        Command::Fetch { branch, flags } => fetch(ctx, &branch, &flags),

        Command::DecodePath { text } => decode_path(&text),
        Command::FileType { path } => file_type(ctx, &path),
        Command::ListFiles { dir } => list_files(&dir),

        Command::Snapshot => snapshot(ctx),
        Command::Env => env(ctx),
        Command::Completion { shell } => completion(shell),
    }
}

/// Build the runtime async handlers run on.
fn runtime() -> Result<tokio::runtime::Runtime> {
    Ok(tokio::runtime::Runtime::new()?)
}
