//! git
//!
//! Every git invocation in the crate.
//!
//! # Architecture
//!
//! Git is driven through its command line, never by reading `.git`
//! directly. Callers depend on the [`GitRunner`] trait so tests can swap
//! in [`MockGit`](mock::MockGit).
//!
//! # Responsibilities
//!
//! - Running git with failure logging ([`GitClient`])
//! - Merge bases, diff hunk headers, shallow deepening and branch fetches
//!   ([`HistoryService`])
//! - Decoding git's quoted path syntax ([`quote::decode`])
//!
//! # Invariants
//!
//! - Git stdout is never streamed to the operator; stderr always is
//! - History queries never fail; they degrade to empty results
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use ci_refs::git::{GitClient, HistoryService};
//!
//! # tokio_test::block_on(async {
//! let history = HistoryService::new(Arc::new(GitClient::default()), None);
//! let bases = history.all_merge_bases(&["origin/main", "HEAD"]).await;
//! println!("{bases:?}");
//! # });
//! ```

mod history;
mod interface;
pub mod mock;
pub mod quote;

pub use history::HistoryService;
pub use interface::{failure_reason, GitClient, GitRunner, NOT_A_REPO_REASON};
