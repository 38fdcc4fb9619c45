//! core::types
//!
//! Strong types for the identities a CI run is attributed to.
//!
//! # Types
//!
//! - [`Oid`] - Git commit identifier (exactly 40 hex characters)
//! - [`Ref`] - A ref in one of the recognized namespaces, or an opaque value
//!
//! # Validation
//!
//! `Oid` enforces validity at construction time. `Ref` never rejects input:
//! anything outside the recognized shapes is carried as [`Ref::Opaque`] and
//! formats back to exactly the text it was parsed from.
//!
//! # Examples
//!
//! ```
//! use ci_refs::core::types::{Oid, Ref};
//!
//! let oid = Oid::new("ABC123DEF4567890ABC123DEF4567890ABC12345").unwrap();
//! assert_eq!(oid.as_str(), "abc123def4567890abc123def4567890abc12345");
//!
//! let r = Ref::parse("refs/pull/42/merge");
//! assert_eq!(r, Ref::PullMerge(42));
//! assert_eq!(r.to_string(), "refs/pull/42/merge");
//!
//! assert!(Oid::new("not-a-sha").is_err());
//! ```

use std::convert::Infallible;
use std::str::FromStr;

use thiserror::Error;

/// Errors from type validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid object id: {0}")]
    InvalidOid(String),
}

/// A Git commit identifier.
///
/// OIDs are normalized to lowercase for consistency.
///
/// # Example
///
/// ```
/// use ci_refs::core::types::Oid;
///
/// let oid = Oid::new("ABC123DEF4567890ABC123DEF4567890ABC12345").unwrap();
/// assert_eq!(oid.as_str(), "abc123def4567890abc123def4567890abc12345");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Oid(String);

impl Oid {
    /// Length of a SHA-1 object id in hex characters.
    pub const HEX_LEN: usize = 40;

    /// Create a new validated object id.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidOid` unless the string is exactly 40 hex
    /// characters.
    pub fn new(oid: impl Into<String>) -> Result<Self, TypeError> {
        let oid = oid.into().to_ascii_lowercase();
        Self::validate(&oid)?;
        Ok(Self(oid))
    }

    /// Check whether `s` would be accepted by [`Oid::new`].
    pub fn is_well_formed(s: &str) -> bool {
        Self::validate(s).is_ok()
    }

    fn validate(oid: &str) -> Result<(), TypeError> {
        if oid.len() != Self::HEX_LEN {
            return Err(TypeError::InvalidOid(format!(
                "expected {} hex characters, got {}",
                Self::HEX_LEN,
                oid.len()
            )));
        }
        if !oid.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(TypeError::InvalidOid(
                "object id must be hexadecimal".into(),
            ));
        }
        Ok(())
    }

    /// Get the object id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Oid {
    type Error = TypeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<Oid> for String {
    fn from(oid: Oid) -> Self {
        oid.0
    }
}

impl AsRef<str> for Oid {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Oid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

const HEADS_PREFIX: &str = "refs/heads/";
const TAGS_PREFIX: &str = "refs/tags/";
const PULL_PREFIX: &str = "refs/pull/";
const REMOTE_PULL_PREFIX: &str = "refs/remotes/pull/";

/// A Git ref as seen by a CI run.
///
/// Parsing is total: every string maps to some variant, and formatting the
/// result reproduces the original text exactly.
///
/// # Example
///
/// ```
/// use ci_refs::core::types::Ref;
///
/// assert_eq!(Ref::parse("refs/heads/main"), Ref::Branch("main".into()));
/// assert_eq!(Ref::parse("refs/pull/7/head"), Ref::PullHead(7));
/// assert_eq!(Ref::parse("HEAD"), Ref::Opaque("HEAD".into()));
///
/// let merge = Ref::PullMerge(7);
/// assert_eq!(merge.to_head(), Some(Ref::PullHead(7)));
/// assert_eq!(merge.remote_tracking().as_deref(), Some("refs/remotes/pull/7/merge"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Ref {
    /// `refs/heads/<name>`
    Branch(String),
    /// `refs/tags/<name>`
    Tag(String),
    /// `refs/pull/<n>/merge`, the synthetic merge of a pull request into its base
    PullMerge(u64),
    /// `refs/pull/<n>/head`, the tip of the pull request's source branch
    PullHead(u64),
    /// Anything else, carried verbatim
    Opaque(String),
}

impl Ref {
    /// Classify a ref string.
    pub fn parse(s: &str) -> Self {
        if let Some(name) = s.strip_prefix(HEADS_PREFIX).filter(|n| !n.is_empty()) {
            return Ref::Branch(name.to_string());
        }
        if let Some(name) = s.strip_prefix(TAGS_PREFIX).filter(|n| !n.is_empty()) {
            return Ref::Tag(name.to_string());
        }
        if let Some(rest) = s.strip_prefix(PULL_PREFIX) {
            if let Some((number, kind)) = rest.split_once('/') {
                if let Some(n) = parse_pull_number(number) {
                    match kind {
                        "merge" => return Ref::PullMerge(n),
                        "head" => return Ref::PullHead(n),
                        _ => {}
                    }
                }
            }
        }
        Ref::Opaque(s.to_string())
    }

    /// The head ref of the same pull request, for merge refs.
    pub fn to_head(&self) -> Option<Ref> {
        match self {
            Ref::PullMerge(n) => Some(Ref::PullHead(*n)),
            _ => None,
        }
    }

    /// The same pull ref under the remote-tracking namespace
    /// (`refs/remotes/pull/...`), as created by `actions/checkout`.
    pub fn remote_tracking(&self) -> Option<String> {
        match self {
            Ref::PullMerge(n) => Some(format!("{REMOTE_PULL_PREFIX}{n}/merge")),
            Ref::PullHead(n) => Some(format!("{REMOTE_PULL_PREFIX}{n}/head")),
            _ => None,
        }
    }

    /// The ref with a leading `refs/heads/` removed.
    pub fn without_heads_prefix(&self) -> String {
        match self {
            Ref::Branch(name) => name.clone(),
            other => other.to_string(),
        }
    }
}

/// Accept only canonical decimal numbers so that formatting round-trips.
fn parse_pull_number(digits: &str) -> Option<u64> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    // GitHub never zero-pads pull numbers, so `refs/pull/05/merge` stays opaque.
    if digits.len() > 1 && digits.starts_with('0') {
        return None;
    }
    digits.parse().ok()
}

impl FromStr for Ref {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Ref::parse(s))
    }
}

impl std::fmt::Display for Ref {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Ref::Branch(name) => write!(f, "{HEADS_PREFIX}{name}"),
            Ref::Tag(name) => write!(f, "{TAGS_PREFIX}{name}"),
            Ref::PullMerge(n) => write!(f, "{PULL_PREFIX}{n}/merge"),
            Ref::PullHead(n) => write!(f, "{PULL_PREFIX}{n}/head"),
            Ref::Opaque(s) => write!(f, "{s}"),
        }
    }
}

/// Strip a literal `refs/heads/` prefix from a ref string, if present.
pub fn strip_heads_prefix(r: &str) -> &str {
    r.strip_prefix(HEADS_PREFIX).unwrap_or(r)
}
