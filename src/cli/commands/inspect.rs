//! decode-path, file-type, list-files commands

use std::path::Path;

use anyhow::{Context as _, Result};

use super::runtime;
use crate::cli::Context;
use crate::core::files::{collect_files, FsLister};
use crate::git::quote;
use crate::process::probe;
use crate::ui::output::print;

/// Print the decoded form of a git-quoted path.
pub fn decode_path(text: &str) -> Result<()> {
    print(quote::decode(text));
    Ok(())
}

/// Print the `file -L` description of `path`.
pub fn file_type(ctx: &Context, path: &Path) -> Result<()> {
    let runner = ctx.runner();
    let description = runtime()?.block_on(probe::file_type(&runner, path))?;
    print(description);
    Ok(())
}

/// Print every file below `dir`, sorted.
pub fn list_files(dir: &Path) -> Result<()> {
    let files = collect_files(dir, &FsLister)
        .with_context(|| format!("Failed to list files in {}", dir.display()))?;
    for file in files {
        print(file.display());
    }
    Ok(())
}
