//! snapshot and env commands

use std::fmt::Display;

use anyhow::Result;

use crate::cli::Context;
use crate::core::config::{ConfigError, InputSnapshot};
use crate::ui::output::print;

/// Print the resolved inputs as JSON.
pub fn snapshot(ctx: &Context) -> Result<()> {
    print(InputSnapshot::capture(&ctx.inputs).to_json()?);
    Ok(())
}

/// Print runner settings. Settings that cannot be read show why.
pub fn env(ctx: &Context) -> Result<()> {
    let env = &ctx.env;
    print(format!(
        "temporary_directory: {}",
        show(env.temporary_directory().map(|p| p.display().to_string()))
    ));
    print(format!("workflow_run_id: {}", show(env.workflow_run_id())));
    print(format!("workflow_run_attempt: {}", show(env.workflow_run_attempt())));
    print(format!("self_hosted_runner: {}", env.is_self_hosted_runner()));
    print(format!("upload: {}", ctx.inputs.upload_mode()));
    Ok(())
}

fn show<T: Display>(value: Result<T, ConfigError>) -> String {
    match value {
        Ok(v) => v.to_string(),
        Err(e) => format!("<{e}>"),
    }
}
