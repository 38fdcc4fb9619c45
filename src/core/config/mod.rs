//! core::config
//!
//! Caller inputs, their sources, and how they are carried between phases.
//!
//! # Precedence
//!
//! Input values are resolved in this order (later overrides earlier):
//! 1. Default values (all absent)
//! 2. Config file `[inputs]` table
//! 3. `INPUT_*` environment variables set by the CI system
//! 4. CLI flags
//!
//! # Config File Locations
//!
//! Searched in order:
//! 1. The path given explicitly (`--config`)
//! 2. `$CI_REFS_CONFIG` if set
//! 3. `$XDG_CONFIG_HOME/ci-refs/config.toml`
//! 4. `~/.ci-refs/config.toml`
//!
//! # Snapshots
//!
//! A pipeline runs this tool in several phases. Inputs seen in the first
//! phase are captured into an [`InputSnapshot`] which the caller persists
//! and later applies; the process environment is never mutated.
//!
//! # Example
//!
//! ```
//! use ci_refs::core::config::{InputSnapshot, Inputs, UploadMode};
//!
//! let inputs = Inputs {
//!     upload: Some("never".into()),
//!     ..Inputs::default()
//! };
//! assert_eq!(inputs.upload_mode(), UploadMode::Never);
//!
//! let snapshot = InputSnapshot::capture(&inputs);
//! let mut later = Inputs::default();
//! snapshot.apply_to(&mut later);
//! assert_eq!(later, inputs);
//! ```

pub mod schema;

pub use schema::{FileConfig, InputsSection};

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::env::{vars, Env};

/// Errors from configuration and environment handling.
///
/// These are operator errors: they are not retried and are surfaced
/// directly.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} environment variable must be set")]
    MissingEnv(String),

    #[error("{name} {message}")]
    InvalidEnv { name: String, message: String },

    #[error("{0}")]
    ConflictingInputs(String),

    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("failed to read event payload '{path}': {message}")]
    EventPayload { path: PathBuf, message: String },

    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

/// Input names, as the CI system passes them.
pub mod names {
    pub const REF: &str = "ref";
    pub const SHA: &str = "sha";
    pub const CHECKOUT_PATH: &str = "checkout_path";
    pub const SOURCE_ROOT: &str = "source-root";
    pub const UPLOAD: &str = "upload";
}

/// Inputs supplied by the caller of the action.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inputs {
    /// Ref override; trusted verbatim
    pub git_ref: Option<String>,
    /// Commit override; must accompany `git_ref`
    pub sha: Option<String>,
    /// Repository checkout directory
    pub checkout_path: Option<PathBuf>,
    /// Alternate source root, used when no checkout path is given
    pub source_root: Option<PathBuf>,
    /// Raw upload mode selector
    pub upload: Option<String>,
}

impl Inputs {
    /// Read inputs from `INPUT_*` variables.
    pub fn from_env(env: &Env) -> Self {
        Self {
            git_ref: env.input(names::REF),
            sha: env.input(names::SHA),
            checkout_path: env.input(names::CHECKOUT_PATH).map(PathBuf::from),
            source_root: env.input(names::SOURCE_ROOT).map(PathBuf::from),
            upload: env.input(names::UPLOAD),
        }
    }

    /// Layer `other` on top of `self`; values present in `other` win.
    #[must_use]
    pub fn overlay(self, other: Inputs) -> Inputs {
        Inputs {
            git_ref: other.git_ref.or(self.git_ref),
            sha: other.sha.or(self.sha),
            checkout_path: other.checkout_path.or(self.checkout_path),
            source_root: other.source_root.or(self.source_root),
            upload: other.upload.or(self.upload),
        }
    }

    /// The parsed upload mode.
    pub fn upload_mode(&self) -> UploadMode {
        UploadMode::parse(self.upload.as_deref())
    }
}

impl From<InputsSection> for Inputs {
    fn from(section: InputsSection) -> Self {
        Self {
            git_ref: section.git_ref,
            sha: section.sha,
            checkout_path: section.checkout_path,
            source_root: section.source_root,
            upload: section.upload,
        }
    }
}

/// When analysis results are uploaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadMode {
    Always,
    FailureOnly,
    Never,
}

impl UploadMode {
    /// Values accepted for the `upload` input.
    pub const RECOGNIZED: [&'static str; 5] = ["true", "always", "false", "failure-only", "never"];

    /// Map a recognized selector to its mode.
    pub fn recognize(value: &str) -> Option<Self> {
        match value {
            "true" | "always" => Some(UploadMode::Always),
            "false" | "failure-only" => Some(UploadMode::FailureOnly),
            "never" => Some(UploadMode::Never),
            _ => None,
        }
    }

    /// Parse the `upload` input, defaulting to `Always`.
    pub fn parse(value: Option<&str>) -> Self {
        let Some(value) = value else {
            return UploadMode::Always;
        };
        UploadMode::recognize(value).unwrap_or_else(|| {
            tracing::warn!(
                "Unrecognized 'upload' input: {}. Defaulting to 'always'.",
                value
            );
            UploadMode::Always
        })
    }
}

impl std::fmt::Display for UploadMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UploadMode::Always => write!(f, "always"),
            UploadMode::FailureOnly => write!(f, "failure-only"),
            UploadMode::Never => write!(f, "never"),
        }
    }
}

/// Inputs captured in one pipeline phase for use in a later one.
///
/// Maps input names to values. Serialized as a flat JSON object so an
/// external state store can persist it as a single string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InputSnapshot(BTreeMap<String, String>);

impl InputSnapshot {
    /// Capture every present input.
    pub fn capture(inputs: &Inputs) -> Self {
        let mut map = BTreeMap::new();
        let mut put = |name: &str, value: Option<String>| {
            if let Some(v) = value {
                map.insert(name.to_string(), v);
            }
        };
        put(names::REF, inputs.git_ref.clone());
        put(names::SHA, inputs.sha.clone());
        put(
            names::CHECKOUT_PATH,
            inputs.checkout_path.as_ref().map(|p| p.display().to_string()),
        );
        put(
            names::SOURCE_ROOT,
            inputs.source_root.as_ref().map(|p| p.display().to_string()),
        );
        put(names::UPLOAD, inputs.upload.clone());
        Self(map)
    }

    /// Overwrite the fields of `inputs` that this snapshot holds.
    ///
    /// Unknown names are ignored.
    pub fn apply_to(&self, inputs: &mut Inputs) {
        for (name, value) in &self.0 {
            let value = value.clone();
            match name.as_str() {
                names::REF => inputs.git_ref = Some(value),
                names::SHA => inputs.sha = Some(value),
                names::CHECKOUT_PATH => inputs.checkout_path = Some(PathBuf::from(value)),
                names::SOURCE_ROOT => inputs.source_root = Some(PathBuf::from(value)),
                names::UPLOAD => inputs.upload = Some(value),
                other => tracing::debug!("Ignoring unknown input '{}' in snapshot", other),
            }
        }
    }

    /// Look up one captured value.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Whether nothing was captured.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Serialize to JSON.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        serde_json::to_string(self).map_err(|e| ConfigError::InvalidValue(e.to_string()))
    }

    /// Deserialize from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::InvalidValue(e.to_string()))
    }

    /// The snapshot passed in `$CI_REFS_SNAPSHOT`, if any.
    pub fn from_env(env: &Env) -> Result<Option<Self>, ConfigError> {
        env.optional(vars::CI_REFS_SNAPSHOT)
            .map(|json| {
                Self::from_json(json).map_err(|e| ConfigError::InvalidEnv {
                    name: vars::CI_REFS_SNAPSHOT.to_string(),
                    message: format!("is not a valid input snapshot: {e}"),
                })
            })
            .transpose()
    }
}

/// Loaded configuration file.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Parsed file contents (defaults when no file was found)
    pub file: FileConfig,
    /// Where the file was loaded from
    path: Option<PathBuf>,
}

impl Config {
    /// Load the config file.
    ///
    /// An explicit path must exist. Otherwise the standard locations are
    /// searched and a missing file means defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if a file exists but cannot be read, parsed, or
    /// validated.
    pub fn load(explicit: Option<&Path>, env: &Env) -> Result<Config, ConfigError> {
        let path = match explicit {
            Some(p) => Some(p.to_path_buf()),
            None => Self::locate(env),
        };
        let Some(path) = path else {
            return Ok(Config::default());
        };

        let contents = fs::read_to_string(&path).map_err(|source| ConfigError::ReadError {
            path: path.clone(),
            source,
        })?;
        let file: FileConfig = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: path.clone(),
            message: e.to_string(),
        })?;
        file.validate()?;

        tracing::debug!("Loaded config from {}", path.display());
        Ok(Config {
            file,
            path: Some(path),
        })
    }

    /// Search the standard locations for an existing config file.
    fn locate(env: &Env) -> Option<PathBuf> {
        let mut candidates = Vec::new();
        if let Some(p) = env.optional(vars::CI_REFS_CONFIG) {
            candidates.push(PathBuf::from(p));
        }
        if let Some(xdg) = env.optional(vars::XDG_CONFIG_HOME) {
            candidates.push(PathBuf::from(xdg).join("ci-refs/config.toml"));
        }
        if let Some(home) = dirs::home_dir() {
            candidates.push(home.join(".ci-refs/config.toml"));
        }
        candidates.into_iter().find(|p| p.is_file())
    }

    /// Path of the loaded file, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Resolve inputs: file, then environment, then `overrides`.
    pub fn resolve_inputs(&self, env: &Env, overrides: Inputs) -> Inputs {
        let from_file = self
            .file
            .inputs
            .clone()
            .map(Inputs::from)
            .unwrap_or_default();
        from_file.overlay(Inputs::from_env(env)).overlay(overrides)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn upload_mode_parsing() {
        assert_eq!(UploadMode::parse(None), UploadMode::Always);
        assert_eq!(UploadMode::parse(Some("true")), UploadMode::Always);
        assert_eq!(UploadMode::parse(Some("always")), UploadMode::Always);
        assert_eq!(UploadMode::parse(Some("false")), UploadMode::FailureOnly);
        assert_eq!(UploadMode::parse(Some("failure-only")), UploadMode::FailureOnly);
        assert_eq!(UploadMode::parse(Some("never")), UploadMode::Never);
        assert_eq!(UploadMode::parse(Some("sometimes")), UploadMode::Always);
    }

    #[test]
    fn overlay_prefers_later_values() {
        let base = Inputs {
            git_ref: Some("refs/heads/a".into()),
            upload: Some("never".into()),
            ..Inputs::default()
        };
        let top = Inputs {
            git_ref: Some("refs/heads/b".into()),
            ..Inputs::default()
        };
        let merged = base.overlay(top);
        assert_eq!(merged.git_ref.as_deref(), Some("refs/heads/b"));
        assert_eq!(merged.upload.as_deref(), Some("never"));
    }

    #[test]
    fn snapshot_json_round_trip() {
        let inputs = Inputs {
            git_ref: Some("refs/heads/main".into()),
            sha: Some("a".repeat(40)),
            checkout_path: Some(PathBuf::from("/repo")),
            source_root: None,
            upload: None,
        };
        let snapshot = InputSnapshot::capture(&inputs);
        assert_eq!(snapshot.get(names::CHECKOUT_PATH), Some("/repo"));

        let json = snapshot.to_json().unwrap();
        let restored = InputSnapshot::from_json(&json).unwrap();
        let mut later = Inputs::default();
        restored.apply_to(&mut later);
        assert_eq!(later, inputs);
    }

    #[test]
    fn snapshot_overwrites_present_fields_only() {
        let snapshot = InputSnapshot::from_json(r#"{"upload":"never","unknown":"x"}"#).unwrap();
        let mut inputs = Inputs {
            upload: Some("always".into()),
            sha: Some("keep".into()),
            ..Inputs::default()
        };
        snapshot.apply_to(&mut inputs);
        assert_eq!(inputs.upload.as_deref(), Some("never"));
        assert_eq!(inputs.sha.as_deref(), Some("keep"));
    }

    #[test]
    fn snapshot_from_environment() {
        assert_eq!(InputSnapshot::from_env(&Env::default()).unwrap(), None);

        let env = Env::from_pairs([(vars::CI_REFS_SNAPSHOT, r#"{"sha":"abc"}"#)]);
        let snapshot = InputSnapshot::from_env(&env).unwrap().unwrap();
        assert_eq!(snapshot.get(names::SHA), Some("abc"));

        let env = Env::from_pairs([(vars::CI_REFS_SNAPSHOT, "[1, 2]")]);
        assert!(matches!(
            InputSnapshot::from_env(&env),
            Err(ConfigError::InvalidEnv { .. })
        ));
    }

    #[test]
    fn load_explicit_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[inputs]\ncheckout_path = \"/from/file\"\nupload = \"never\"\n").unwrap();

        let config = Config::load(Some(&path), &Env::default()).unwrap();
        assert_eq!(config.path(), Some(path.as_path()));

        let env = Env::from_pairs([("INPUT_UPLOAD", "failure-only")]);
        let inputs = config.resolve_inputs(&env, Inputs::default());
        assert_eq!(inputs.checkout_path, Some(PathBuf::from("/from/file")));
        assert_eq!(inputs.upload_mode(), UploadMode::FailureOnly);

        let overrides = Inputs {
            checkout_path: Some(PathBuf::from("/from/cli")),
            ..Inputs::default()
        };
        let inputs = config.resolve_inputs(&env, overrides);
        assert_eq!(inputs.checkout_path, Some(PathBuf::from("/from/cli")));
    }

    #[test]
    fn load_from_env_location() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("custom.toml");
        fs::write(&path, "[inputs]\nsource_root = \"src\"\n").unwrap();

        let env = Env::from_pairs([(vars::CI_REFS_CONFIG, path.display().to_string())]);
        let config = Config::load(None, &env).unwrap();
        assert_eq!(config.path(), Some(path.as_path()));
    }

    #[test]
    fn missing_explicit_file_is_error() {
        let dir = TempDir::new().unwrap();
        let result = Config::load(Some(&dir.path().join("nope.toml")), &Env::default());
        assert!(matches!(result, Err(ConfigError::ReadError { .. })));
    }

    #[test]
    fn malformed_file_is_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.toml");
        fs::write(&path, "[inputs\n").unwrap();
        let result = Config::load(Some(&path), &Env::default());
        assert!(matches!(result, Err(ConfigError::ParseError { .. })));
    }
}
