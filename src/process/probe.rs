//! process::probe
//!
//! File-type detection via the `file` utility.

use std::path::Path;

use super::error::ProcessError;
use super::runner::{CommandInvocation, ProcessRunner};

/// Describe the type of the file at `path`, following symlinks.
///
/// Returns the trimmed output of `file -L <path>`.
///
/// # Errors
///
/// - `ProcessError::MissingTool` if `file` is not installed
/// - `ProcessError::Invocation` if `file` fails
pub async fn file_type(runner: &ProcessRunner, path: &Path) -> Result<String, ProcessError> {
    let program = which::which("file").map_err(|_| ProcessError::MissingTool {
        tool: "file".to_string(),
    })?;

    let invocation = CommandInvocation::new(program, ["-L".to_string(), path.display().to_string()])
        .quiet_stdout();
    match runner.run(&invocation).await {
        Ok(stdout) => Ok(stdout.trim().to_string()),
        Err(e) => {
            tracing::info!(
                "Could not determine type of {} from {}. {}",
                path.display(),
                e.stdout,
                e.stderr
            );
            Err(e.into())
        }
    }
}
