//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--debug`: Enable debug logging
//! - `--quiet` / `-q`: Results only, no streamed git output
//! - `--config <path>`: Read inputs from this TOML file
//! - `--ref`, `--sha`, `--checkout-path`, `--source-root`: Override inputs

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::core::config::Inputs;

/// ci-refs - Resolve the commit and ref a CI run should attribute results to
#[derive(Parser, Debug)]
#[command(name = "ci-refs")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Results only; do not stream git output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Config file to read inputs from
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Ref to attribute results to; requires --sha
    #[arg(long = "ref", global = true, value_name = "REF")]
    pub git_ref: Option<String>,

    /// Commit to attribute results to; requires --ref
    #[arg(long, global = true)]
    pub sha: Option<String>,

    /// Repository checkout directory
    #[arg(long, global = true, value_name = "PATH")]
    pub checkout_path: Option<PathBuf>,

    /// Source root, used when no checkout path is given
    #[arg(long, global = true, value_name = "PATH")]
    pub source_root: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }

    /// Inputs given as flags. These override every other source.
    pub fn input_overrides(&self) -> Inputs {
        Inputs {
            git_ref: self.git_ref.clone(),
            sha: self.sha.clone(),
            checkout_path: self.checkout_path.clone(),
            source_root: self.source_root.clone(),
            upload: None,
        }
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    // ========== Ref resolution ==========
    /// Print the ref results should be attributed to
    #[command(
        name = "ref",
        long_about = "Print the ref results should be attributed to.\n\n\
            A ref given with --ref (or the `ref` input) is printed verbatim and must be \
            accompanied by a sha. Otherwise GITHUB_REF is used, falling back to \
            CODE_SCANNING_REF. For a pull request merge ref, if the checkout has moved \
            off the merge commit, the pull request head ref is printed instead.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Inside a workflow step
    ci-refs ref

    # Explicit override
    ci-refs ref --ref refs/heads/main --sha $(git rev-parse HEAD)"
    )]
    Ref,

    /// Print the commit a ref points at
    #[command(
        name = "commit-oid",
        long_about = "Print the commit a ref points at in the checkout.\n\n\
            Falls back to the sha input, then GITHUB_SHA, if git cannot resolve the ref."
    )]
    CommitOid {
        /// Ref to resolve
        #[arg(default_value = "HEAD")]
        git_ref: String,
    },

    /// Print the base branch head of a pull request merge commit
    #[command(
        name = "base-head",
        long_about = "Print the base branch head of a pull request merge commit.\n\n\
            Only applies to pull_request events. Prints nothing if the merge commit \
            cannot be inspected."
    )]
    BaseHead {
        /// Directory to inspect instead of the checkout path
        #[arg(long)]
        path: Option<PathBuf>,
    },

    /// Print whether the current ref is the default branch
    #[command(name = "is-default-branch")]
    IsDefaultBranch,

    // ========== History ==========
    /// Print all merge bases of the given refs
    #[command(
        name = "merge-bases",
        after_help = "\
WORKFLOW EXAMPLES:
    ci-refs merge-bases origin/main HEAD"
    )]
    MergeBases {
        /// Refs to compute merge bases for
        #[arg(required = true, num_args = 2..)]
        refs: Vec<String>,
    },

    /// Print the hunk headers of the diff between two commits
    #[command(
        name = "diff-hunks",
        long_about = "Print the `---`, `+++` and `@@` lines of a zero-context diff.\n\n\
            Renames are not detected and deleted files show no content."
    )]
    DiffHunks {
        /// Old side of the diff
        from: String,
        /// New side of the diff
        to: String,
    },

    /// Fetch one more commit of history
    #[command(name = "deepen")]
    Deepen,

    /// Fetch a branch from origin into the local branch of the same name
    #[command(
        name = "fetch",
        after_help = "\
WORKFLOW EXAMPLES:
    # Shallow fetch of the base branch
    ci-refs fetch main -- --depth=1"
    )]
    Fetch {
        /// Branch name
        branch: String,

        /// Extra flags passed to `git fetch`
        #[arg(last = true)]
        flags: Vec<String>,
    },

    // ========== Inspection ==========
    /// Decode a path printed by git in quoted form
    #[command(name = "decode-path")]
    DecodePath {
        /// Path text, with surrounding quotes
        text: String,
    },

    /// Describe a file with `file -L`
    #[command(name = "file-type")]
    FileType {
        /// File to describe
        path: PathBuf,
    },

    /// List every file below a directory
    #[command(name = "list-files")]
    ListFiles {
        /// Directory to walk
        dir: PathBuf,
    },

    // ========== Environment ==========
    /// Print the resolved inputs as a JSON snapshot
    #[command(
        name = "snapshot",
        long_about = "Print the resolved inputs as a JSON object.\n\n\
            Persist the output between pipeline phases and pass it back with \
            `CI_REFS_SNAPSHOT` so later phases see the same inputs."
    )]
    Snapshot,

    /// Print runner settings derived from the environment
    #[command(name = "env")]
    Env,

    /// Generate shell completion scripts
    #[command(
        name = "completion",
        after_help = "\
INSTALLATION:
    # Bash
    ci-refs completion bash > ~/.local/share/bash-completion/completions/ci-refs

    # Zsh
    ci-refs completion zsh > ~/.zfunc/_ci-refs

    # Fish
    ci-refs completion fish > ~/.config/fish/completions/ci-refs.fish"
    )]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Supported shells for completion
#[derive(clap::ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}
