//! core
//!
//! Domain types and the inputs a CI run is configured with.
//!
//! # Modules
//!
//! - [`types`] - Strong types: Oid, Ref
//! - [`env`] - Immutable snapshot of the process environment
//! - [`config`] - Caller inputs, config file layering, input snapshots
//! - [`event`] - Workflow-trigger event payload
//! - [`files`] - Iterative collection of files below a directory
//!
//! # Design Principles
//!
//! - Strong typing for identities that must be well-formed
//! - Environment access goes through an explicit snapshot, never ambient reads

pub mod config;
pub mod env;
pub mod event;
pub mod files;
pub mod types;
