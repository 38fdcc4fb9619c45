//! ci-refs - Resolve the commit and ref a CI run should attribute results to
//!
//! A code-analysis step in CI has to decide which commit and which ref its
//! results belong to, whether it is looking at the default branch, and
//! what changed relative to the base branch. ci-refs answers those
//! questions from the git checkout, the caller's inputs, and the CI
//! environment.
//!
//! # Architecture
//!
//! - [`cli`] - Command-line interface layer (parses args, prints results)
//! - [`refs`] - Ref and commit attribution, default-branch detection
//! - [`git`] - Every git invocation: runner seam, history queries, path decoding
//! - [`process`] - Subprocess execution with bounded diagnostics
//! - [`core`] - Domain types, environment snapshot, inputs and config
//! - [`ui`] - Operator-visible output
//!
//! # Correctness Invariants
//!
//! 1. Caller-supplied `ref`/`sha` inputs come as a pair and are trusted verbatim
//! 2. History queries degrade to empty results instead of failing the run
//! 3. Diagnostic output retained from a subprocess is bounded
//! 4. The process environment is read once, at startup

pub mod cli;
pub mod core;
pub mod git;
pub mod process;
pub mod refs;
pub mod ui;
