//! core::event
//!
//! The workflow-trigger event payload.
//!
//! Only the fields this crate needs are read; everything else in the
//! payload is ignored.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use super::config::ConfigError;

/// The parts of the event payload used for ref classification.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct WorkflowEvent {
    #[serde(default)]
    repository: Option<RepositoryPayload>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
struct RepositoryPayload {
    #[serde(default)]
    default_branch: Option<String>,
}

impl WorkflowEvent {
    /// Read and parse the payload file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::EventPayload` if the file cannot be read or is
    /// not a JSON object of the expected shape.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::EventPayload {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_json(&contents).map_err(|e| match e {
            ConfigError::EventPayload { message, .. } => ConfigError::EventPayload {
                path: path.to_path_buf(),
                message,
            },
            other => other,
        })
    }

    /// Parse a payload from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::EventPayload {
            path: Default::default(),
            message: e.to_string(),
        })
    }

    /// `repository.default_branch`
    pub fn default_branch(&self) -> Option<&str> {
        self.repository.as_ref()?.default_branch.as_deref()
    }
}
