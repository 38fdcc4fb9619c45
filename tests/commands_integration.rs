//! Integration tests for the `ci-refs` binary.
//!
//! Each test runs the binary with a cleared environment so the CI
//! variables of whatever machine runs the suite cannot leak in.

use std::path::Path;
use std::process::Command as StdCommand;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

// =============================================================================
// Test Fixtures
// =============================================================================

/// Run a git command in the specified directory.
fn run_git(dir: &Path, args: &[&str]) {
    let status = StdCommand::new("git")
        .args(args)
        .current_dir(dir)
        .status()
        .expect("failed to run git");
    assert!(status.success(), "git {:?} failed", args);
}

/// A repository with one commit on main.
fn test_repo() -> TempDir {
    let dir = TempDir::new().expect("failed to create temp dir");
    run_git(dir.path(), &["init", "--quiet", "-b", "main"]);
    run_git(dir.path(), &["config", "user.email", "test@example.com"]);
    run_git(dir.path(), &["config", "user.name", "Test User"]);
    run_git(dir.path(), &["config", "commit.gpgsign", "false"]);
    std::fs::write(dir.path().join("README.md"), "# Test Repo\n").unwrap();
    run_git(dir.path(), &["add", "README.md"]);
    run_git(dir.path(), &["commit", "--quiet", "-m", "Initial commit"]);
    dir
}

fn head_of(dir: &Path) -> String {
    let output = StdCommand::new("git")
        .args(["rev-parse", "HEAD"])
        .current_dir(dir)
        .output()
        .expect("git rev-parse failed");
    String::from_utf8(output.stdout).unwrap().trim().to_string()
}

/// The binary with only `PATH` and a scratch `HOME` set.
fn ci_refs(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("ci-refs").unwrap();
    cmd.env_clear()
        .env("PATH", std::env::var_os("PATH").unwrap_or_default())
        .env("HOME", home.path());
    cmd
}

// =============================================================================
// Ref resolution
// =============================================================================

#[test]
fn ref_input_is_printed_verbatim() {
    let home = TempDir::new().unwrap();
    ci_refs(&home)
        .args(["ref", "--ref", "refs/heads/main", "--sha", "abc"])
        .assert()
        .success()
        .stdout("refs/heads/main\n");
}

#[test]
fn ref_without_sha_fails() {
    let home = TempDir::new().unwrap();
    ci_refs(&home)
        .args(["ref", "--ref", "refs/heads/main"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Both 'ref' and 'sha' are required if one of them is provided.",
        ));
}

#[test]
fn ref_inputs_from_environment() {
    let home = TempDir::new().unwrap();
    ci_refs(&home)
        .env("INPUT_REF", "refs/heads/release")
        .env("INPUT_SHA", "abc")
        .arg("ref")
        .assert()
        .success()
        .stdout("refs/heads/release\n");
}

#[test]
fn branch_ref_from_environment() {
    let home = TempDir::new().unwrap();
    ci_refs(&home)
        .env("GITHUB_REF", "refs/heads/feature")
        .env("GITHUB_SHA", "abc")
        .arg("ref")
        .assert()
        .success()
        .stdout("refs/heads/feature\n");
}

#[test]
fn missing_environment_ref_fails() {
    let home = TempDir::new().unwrap();
    ci_refs(&home)
        .arg("ref")
        .assert()
        .failure()
        .stderr(predicate::str::contains("GITHUB_REF environment variable must be set"));
}

#[test]
fn commit_oid_in_checkout() {
    let home = TempDir::new().unwrap();
    let repo = test_repo();
    ci_refs(&home)
        .args(["--quiet", "commit-oid", "--checkout-path"])
        .arg(repo.path())
        .assert()
        .success()
        .stdout(format!("{}\n", head_of(repo.path())));
}

#[test]
fn is_default_branch_override() {
    let home = TempDir::new().unwrap();
    ci_refs(&home)
        .env("CODE_SCANNING_IS_ANALYZING_DEFAULT_BRANCH", "true")
        .arg("is-default-branch")
        .assert()
        .success()
        .stdout("true\n");
}

#[test]
fn is_default_branch_from_event_payload() {
    let home = TempDir::new().unwrap();
    let event = home.path().join("event.json");
    std::fs::write(&event, r#"{"repository": {"default_branch": "main"}}"#).unwrap();

    ci_refs(&home)
        .env("GITHUB_EVENT_NAME", "push")
        .env("GITHUB_EVENT_PATH", &event)
        .env("GITHUB_REF", "refs/heads/topic")
        .env("GITHUB_SHA", "abc")
        .arg("is-default-branch")
        .assert()
        .success()
        .stdout("false\n");
}

#[test]
fn base_head_outside_pull_request_prints_nothing() {
    let home = TempDir::new().unwrap();
    ci_refs(&home)
        .env("GITHUB_EVENT_NAME", "push")
        .arg("base-head")
        .assert()
        .success()
        .stdout("");
}

#[test]
fn base_head_on_pull_request_requires_sha() {
    let home = TempDir::new().unwrap();
    ci_refs(&home)
        .env("GITHUB_EVENT_NAME", "pull_request")
        .env("GITHUB_REF", "refs/pull/5/merge")
        .arg("base-head")
        .assert()
        .failure()
        .stderr(predicate::str::contains("GITHUB_SHA environment variable must be set"));
}

// =============================================================================
// Output streams
// =============================================================================

#[test]
fn streamed_git_output_goes_to_stderr() {
    let home = TempDir::new().unwrap();
    let repo = test_repo();
    ci_refs(&home)
        .arg("commit-oid")
        .arg("--checkout-path")
        .arg(repo.path())
        .assert()
        .success()
        .stdout(format!("{}\n", head_of(repo.path())))
        .stderr(predicate::str::contains("[command]"));
}

#[test]
fn merge_bases_stdout_is_only_the_result() {
    let home = TempDir::new().unwrap();
    let repo = test_repo();
    let fork = head_of(repo.path());
    run_git(repo.path(), &["branch", "feature"]);

    ci_refs(&home)
        .args(["merge-bases", "main", "feature", "--checkout-path"])
        .arg(repo.path())
        .assert()
        .success()
        .stdout(format!("{fork}\n"));
}

#[test]
fn git_failure_diagnostics_stay_off_stdout() {
    let home = TempDir::new().unwrap();
    let repo = test_repo();
    ci_refs(&home)
        .env("GITHUB_SHA", "envsha")
        .args(["commit-oid", "no-such-ref", "--checkout-path"])
        .arg(repo.path())
        .assert()
        .success()
        .stdout("envsha\n")
        .stderr(predicate::str::contains("fatal:"))
        .stderr(predicate::str::contains("Failed to run"));
}

// =============================================================================
// Missing tools
// =============================================================================

#[test]
fn file_type_without_file_program_fails() {
    let home = TempDir::new().unwrap();
    let empty_path = TempDir::new().unwrap();
    let target = home.path().join("notes.txt");
    std::fs::write(&target, "plain text\n").unwrap();

    ci_refs(&home)
        .env("PATH", empty_path.path())
        .arg("file-type")
        .arg(&target)
        .assert()
        .failure()
        .stderr(predicate::str::contains("The `file` program is required"));
}

#[test]
fn missing_git_is_logged_before_falling_back() {
    let home = TempDir::new().unwrap();
    let empty_path = TempDir::new().unwrap();
    ci_refs(&home)
        .env("PATH", empty_path.path())
        .env("GITHUB_SHA", "envsha")
        .args(["commit-oid", "--checkout-path"])
        .arg(home.path())
        .assert()
        .success()
        .stdout("envsha\n")
        .stderr(predicate::str::contains("The `git` program is required"));
}

#[test]
fn diff_hunks_without_git_fails() {
    let home = TempDir::new().unwrap();
    let empty_path = TempDir::new().unwrap();
    ci_refs(&home)
        .env("PATH", empty_path.path())
        .args(["diff-hunks", "HEAD~1", "HEAD", "--checkout-path"])
        .arg(home.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("The `git` program is required"))
        .stderr(predicate::str::contains("Could not compute the diff"));
}

// =============================================================================
// History
// =============================================================================

#[test]
fn merge_bases_of_branch_and_main() {
    let home = TempDir::new().unwrap();
    let repo = test_repo();
    let fork = head_of(repo.path());
    run_git(repo.path(), &["branch", "feature"]);

    ci_refs(&home)
        .args(["--quiet", "merge-bases", "main", "feature", "--checkout-path"])
        .arg(repo.path())
        .assert()
        .success()
        .stdout(format!("{fork}\n"));
}

#[test]
fn diff_hunks_failure_exits_non_zero() {
    let home = TempDir::new().unwrap();
    let repo = test_repo();
    ci_refs(&home)
        .args(["--quiet", "diff-hunks", "no-such-ref", "HEAD", "--checkout-path"])
        .arg(repo.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Could not compute the diff"));
}

#[test]
fn deepen_failure_is_not_fatal() {
    let home = TempDir::new().unwrap();
    let repo = test_repo();
    ci_refs(&home)
        .args(["--quiet", "deepen", "--checkout-path"])
        .arg(repo.path())
        .assert()
        .success();
}

// =============================================================================
// Inspection
// =============================================================================

#[test]
fn decode_path_unescapes() {
    let home = TempDir::new().unwrap();
    ci_refs(&home)
        .args(["decode-path", r#""a\tb\101""#])
        .assert()
        .success()
        .stdout("a\tbA\n");
}

#[test]
fn list_files_is_sorted_and_recursive() {
    let home = TempDir::new().unwrap();
    let root = TempDir::new().unwrap();
    std::fs::create_dir_all(root.path().join("nested/deeper")).unwrap();
    std::fs::write(root.path().join("b.txt"), "").unwrap();
    std::fs::write(root.path().join("nested/deeper/a.txt"), "").unwrap();

    let expected = format!(
        "{}\n{}\n",
        root.path().join("b.txt").display(),
        root.path().join("nested/deeper/a.txt").display()
    );
    ci_refs(&home)
        .arg("list-files")
        .arg(root.path())
        .assert()
        .success()
        .stdout(expected);
}

// =============================================================================
// Environment
// =============================================================================

#[test]
fn snapshot_prints_resolved_inputs() {
    let home = TempDir::new().unwrap();
    ci_refs(&home)
        .env("INPUT_UPLOAD", "never")
        .args(["snapshot", "--checkout-path", "/repo"])
        .assert()
        .success()
        .stdout("{\"checkout_path\":\"/repo\",\"upload\":\"never\"}\n");
}

#[test]
fn snapshot_is_applied_in_later_phase() {
    let home = TempDir::new().unwrap();
    ci_refs(&home)
        .env("CI_REFS_SNAPSHOT", r#"{"ref":"refs/heads/saved","sha":"abc"}"#)
        .arg("ref")
        .assert()
        .success()
        .stdout("refs/heads/saved\n");
}

#[test]
fn env_reports_runner_settings() {
    let home = TempDir::new().unwrap();
    ci_refs(&home)
        .env("RUNNER_TEMP", "/tmp/runner")
        .env("GITHUB_RUN_ID", "42")
        .env("GITHUB_RUN_ATTEMPT", "0")
        .env("RUNNER_ENVIRONMENT", "self-hosted")
        .env("INPUT_UPLOAD", "false")
        .arg("env")
        .assert()
        .success()
        .stdout(predicate::str::contains("temporary_directory: /tmp/runner"))
        .stdout(predicate::str::contains("workflow_run_id: 42"))
        .stdout(predicate::str::contains("GITHUB_RUN_ATTEMPT must be a positive integer"))
        .stdout(predicate::str::contains("self_hosted_runner: true"))
        .stdout(predicate::str::contains("upload: failure-only"));
}

#[test]
fn config_file_supplies_inputs() {
    let home = TempDir::new().unwrap();
    let config = home.path().join("ci-refs.toml");
    std::fs::write(&config, "[inputs]\nref = \"refs/heads/from-file\"\nsha = \"abc\"\n").unwrap();

    ci_refs(&home)
        .arg("--config")
        .arg(&config)
        .arg("ref")
        .assert()
        .success()
        .stdout("refs/heads/from-file\n");
}

#[test]
fn invalid_config_file_fails() {
    let home = TempDir::new().unwrap();
    let config = home.path().join("ci-refs.toml");
    std::fs::write(&config, "[inputs]\nupload = \"sometimes\"\n").unwrap();

    ci_refs(&home)
        .arg("--config")
        .arg(&config)
        .arg("env")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load configuration"));
}

#[test]
fn completion_generates_script() {
    let home = TempDir::new().unwrap();
    ci_refs(&home)
        .args(["completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ci-refs"));
}
