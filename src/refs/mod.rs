//! refs
//!
//! Attribution of a CI run to a commit and a ref.
//!
//! # Modules
//!
//! - [`resolver`] - Commit ids, the current ref, the base branch head
//! - [`default_branch`] - Whether the current ref is the default branch
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use ci_refs::core::config::Inputs;
//! use ci_refs::core::env::Env;
//! use ci_refs::git::GitClient;
//! use ci_refs::refs::{DefaultBranchClassifier, RefResolver};
//!
//! # tokio_test::block_on(async {
//! let env = Env::from_process();
//! let inputs = Inputs::from_env(&env);
//! let resolver = RefResolver::new(Arc::new(GitClient::default()), env, inputs);
//!
//! println!("{}", resolver.current_ref().await?);
//! let on_default = DefaultBranchClassifier::new(&resolver)
//!     .is_analyzing_default_branch()
//!     .await?;
//! println!("{on_default}");
//! # Ok::<(), ci_refs::core::config::ConfigError>(())
//! # });
//! ```

pub mod default_branch;
pub mod resolver;

pub use default_branch::DefaultBranchClassifier;
pub use resolver::{RefResolver, REF_AND_SHA_REQUIRED};
