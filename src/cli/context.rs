//! cli::context
//!
//! Everything a command handler needs, resolved once from flags, config
//! file, and environment.

use std::sync::Arc;

use anyhow::{Context as _, Result};

use super::args::Cli;
use crate::core::config::{Config, InputSnapshot, Inputs};
use crate::core::env::Env;
use crate::git::{GitClient, GitRunner, HistoryService};
use crate::process::ProcessRunner;
use crate::refs::RefResolver;
use crate::ui::output::Verbosity;

/// Execution context for command handlers.
#[derive(Debug, Clone)]
pub struct Context {
    /// Environment snapshot taken at startup
    pub env: Env,
    /// Inputs after layering file, environment, snapshot, and flags
    pub inputs: Inputs,
    /// Output verbosity
    pub verbosity: Verbosity,
}

impl Context {
    /// Resolve the context for `cli` against `env`.
    pub fn load(cli: &Cli, env: Env) -> Result<Self> {
        let config =
            Config::load(cli.config.as_deref(), &env).context("Failed to load configuration")?;

        let mut inputs = config.resolve_inputs(&env, Inputs::default());
        if let Some(snapshot) = InputSnapshot::from_env(&env)? {
            tracing::debug!("Applying input snapshot");
            snapshot.apply_to(&mut inputs);
        }
        let inputs = inputs.overlay(cli.input_overrides());

        Ok(Self {
            env,
            inputs,
            verbosity: Verbosity::from_flags(cli.quiet, cli.debug),
        })
    }

    /// Runner for non-git subprocesses.
    pub fn runner(&self) -> ProcessRunner {
        ProcessRunner::new(self.verbosity.channel())
    }

    /// The git runner.
    pub fn git(&self) -> Arc<dyn GitRunner> {
        Arc::new(GitClient::new(self.runner()))
    }

    /// Ref resolution over this context.
    pub fn resolver(&self) -> RefResolver {
        RefResolver::new(self.git(), self.env.clone(), self.inputs.clone())
    }

    /// History queries in the checkout path.
    pub fn history(&self) -> HistoryService {
        HistoryService::new(self.git(), self.inputs.checkout_path.clone())
    }
}
