//! core::env
//!
//! Immutable snapshot of the process environment.
//!
//! Every component that needs an environment variable or an action input
//! reads it from an [`Env`] passed in by the caller. Nothing in this crate
//! reads or mutates the live process environment after the snapshot is
//! taken, so tests construct an `Env` from explicit pairs.
//!
//! # Example
//!
//! ```
//! use ci_refs::core::env::{vars, Env};
//!
//! let env = Env::from_pairs([(vars::GITHUB_SHA, "abc"), ("INPUT_CHECKOUT_PATH", " repo ")]);
//! assert_eq!(env.required(vars::GITHUB_SHA).unwrap(), "abc");
//! assert_eq!(env.input("checkout_path").as_deref(), Some("repo"));
//! ```

use std::collections::HashMap;
use std::path::PathBuf;

use super::config::ConfigError;

/// Names of the environment variables this crate consumes.
pub mod vars {
    pub const GITHUB_SHA: &str = "GITHUB_SHA";
    pub const GITHUB_REF: &str = "GITHUB_REF";
    /// Fallback ref for runs where `GITHUB_REF` is unavailable.
    pub const CODE_SCANNING_REF: &str = "CODE_SCANNING_REF";
    pub const GITHUB_EVENT_NAME: &str = "GITHUB_EVENT_NAME";
    pub const GITHUB_EVENT_PATH: &str = "GITHUB_EVENT_PATH";
    pub const GITHUB_WORKSPACE: &str = "GITHUB_WORKSPACE";
    pub const GITHUB_RUN_ID: &str = "GITHUB_RUN_ID";
    pub const GITHUB_RUN_ATTEMPT: &str = "GITHUB_RUN_ATTEMPT";
    pub const RUNNER_TEMP: &str = "RUNNER_TEMP";
    pub const RUNNER_ENVIRONMENT: &str = "RUNNER_ENVIRONMENT";
    /// Overrides `RUNNER_TEMP` when set and non-empty.
    pub const CODE_SCANNING_TEMP: &str = "CODE_SCANNING_TEMP";
    /// When `"true"`, the run is treated as analyzing the default branch.
    pub const CODE_SCANNING_IS_ANALYZING_DEFAULT_BRANCH: &str =
        "CODE_SCANNING_IS_ANALYZING_DEFAULT_BRANCH";
    /// Path to the TOML config file.
    pub const CI_REFS_CONFIG: &str = "CI_REFS_CONFIG";
    /// JSON input snapshot captured by an earlier phase.
    pub const CI_REFS_SNAPSHOT: &str = "CI_REFS_SNAPSHOT";
    pub const XDG_CONFIG_HOME: &str = "XDG_CONFIG_HOME";
}

/// A snapshot of environment variables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Env {
    vars: HashMap<String, String>,
}

impl Env {
    /// Snapshot the current process environment.
    pub fn from_process() -> Self {
        Self {
            vars: std::env::vars().collect(),
        }
    }

    /// Build an environment from explicit name/value pairs.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Return a copy with one more variable set.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }

    /// Read a variable; empty values count as absent.
    pub fn optional(&self, name: &str) -> Option<&str> {
        self.vars
            .get(name)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    /// Read a variable that must be set and non-empty.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingEnv` if the variable is unset or empty.
    pub fn required(&self, name: &str) -> Result<&str, ConfigError> {
        self.optional(name)
            .ok_or_else(|| ConfigError::MissingEnv(name.to_string()))
    }

    /// Read an action input using the `INPUT_<NAME>` convention.
    ///
    /// The name is upper-cased with spaces replaced by underscores; the value
    /// is trimmed and an empty result counts as absent.
    pub fn input(&self, name: &str) -> Option<String> {
        let key = format!("INPUT_{}", name.replace(' ', "_").to_uppercase());
        self.vars
            .get(&key)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    }

    /// The commit the workflow was triggered for.
    pub fn sha(&self) -> Result<&str, ConfigError> {
        self.required(vars::GITHUB_SHA)
    }

    /// The ref the workflow was triggered for.
    ///
    /// Prefers `GITHUB_REF`, falling back to `CODE_SCANNING_REF`. When both
    /// are missing the error names `GITHUB_REF`.
    pub fn ref_name(&self) -> Result<&str, ConfigError> {
        match self.required(vars::GITHUB_REF) {
            Ok(r) => Ok(r),
            Err(e) => self.optional(vars::CODE_SCANNING_REF).ok_or(e),
        }
    }

    /// Name of the event that triggered the workflow.
    pub fn event_name(&self) -> Result<&str, ConfigError> {
        self.required(vars::GITHUB_EVENT_NAME)
    }

    /// Path to the JSON payload of the triggering event.
    pub fn event_path(&self) -> Result<PathBuf, ConfigError> {
        self.required(vars::GITHUB_EVENT_PATH).map(PathBuf::from)
    }

    /// Default working directory of the workflow.
    pub fn workspace(&self) -> Result<PathBuf, ConfigError> {
        self.required(vars::GITHUB_WORKSPACE).map(PathBuf::from)
    }

    /// Directory for temporary files.
    pub fn temporary_directory(&self) -> Result<PathBuf, ConfigError> {
        match self.optional(vars::CODE_SCANNING_TEMP) {
            Some(dir) => Ok(PathBuf::from(dir)),
            None => self.required(vars::RUNNER_TEMP).map(PathBuf::from),
        }
    }

    /// The workflow run id.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnv` unless the value is a non-negative
    /// integer.
    pub fn workflow_run_id(&self) -> Result<u64, ConfigError> {
        let value = self.required(vars::GITHUB_RUN_ID)?;
        value.parse::<u64>().map_err(|_| ConfigError::InvalidEnv {
            name: vars::GITHUB_RUN_ID.to_string(),
            message: format!("must be a non-negative integer, but is {value}"),
        })
    }

    /// The attempt number of the workflow run.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnv` unless the value is a positive
    /// integer.
    pub fn workflow_run_attempt(&self) -> Result<u64, ConfigError> {
        let value = self.required(vars::GITHUB_RUN_ATTEMPT)?;
        match value.parse::<u64>() {
            Ok(n) if n > 0 => Ok(n),
            _ => Err(ConfigError::InvalidEnv {
                name: vars::GITHUB_RUN_ATTEMPT.to_string(),
                message: format!("must be a positive integer, but is {value}"),
            }),
        }
    }

    /// Whether the job runs on a self-hosted runner.
    pub fn is_self_hosted_runner(&self) -> bool {
        self.optional(vars::RUNNER_ENVIRONMENT) == Some("self-hosted")
    }

    /// Whether the default-branch override flag is set.
    pub fn default_branch_override(&self) -> bool {
        self.optional(vars::CODE_SCANNING_IS_ANALYZING_DEFAULT_BRANCH) == Some("true")
    }
}
