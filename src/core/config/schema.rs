//! core::config::schema
//!
//! Configuration file schema.
//!
//! # Example
//!
//! ```toml
//! [inputs]
//! checkout_path = "/work/repo"
//! upload = "failure-only"
//! ```
//!
//! # Validation
//!
//! Values are validated after parsing; an `upload` value in the file must be
//! one of the recognized modes. The environment and CLI are more lenient
//! because the CI system, not the operator, controls them.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::{ConfigError, UploadMode};

/// Top-level config file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    /// Defaults for action inputs
    pub inputs: Option<InputsSection>,
}

/// The `[inputs]` table.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct InputsSection {
    /// Ref to attribute results to (requires `sha`)
    #[serde(rename = "ref")]
    pub git_ref: Option<String>,

    /// Commit to attribute results to (requires `ref`)
    pub sha: Option<String>,

    /// Repository checkout directory
    pub checkout_path: Option<PathBuf>,

    /// Alternate source root
    pub source_root: Option<PathBuf>,

    /// Upload mode
    pub upload: Option<String>,
}

impl FileConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let Some(inputs) = &self.inputs else {
            return Ok(());
        };
        if let Some(upload) = &inputs.upload {
            if UploadMode::recognize(upload).is_none() {
                return Err(ConfigError::InvalidValue(format!(
                    "invalid upload mode '{}', must be one of: {}",
                    upload,
                    UploadMode::RECOGNIZED.join(", ")
                )));
            }
        }
        if let Some(git_ref) = &inputs.git_ref {
            if git_ref.trim().is_empty() {
                return Err(ConfigError::InvalidValue("ref cannot be empty".into()));
            }
        }
        if let Some(sha) = &inputs.sha {
            if sha.trim().is_empty() {
                return Err(ConfigError::InvalidValue("sha cannot be empty".into()));
            }
        }
        Ok(())
    }
}
