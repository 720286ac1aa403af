//! Command-line tests for the `git2md` binary

use crate::integration::common::{two_file_project, write_file, ARTIFACTS};
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn git2md() -> Command {
    let mut command = Command::cargo_bin("git2md").unwrap();
    command.env_remove("GITHUB_TOKEN").env_remove("GIT_SSH_COMMAND");
    command
}

#[test]
fn test_success_prints_statistics() {
    let source = TempDir::new().unwrap();
    two_file_project(source.path());
    let output = TempDir::new().unwrap();

    git2md()
        .arg(source.path())
        .arg("--output-dir")
        .arg(output.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Total files: 2"))
        .stdout(predicate::str::contains("Total lines: 15"))
        .stdout(predicate::str::contains("llms.txt"));

    for name in ARTIFACTS {
        assert!(output.path().join(name).is_file(), "{} missing", name);
    }
}

#[test]
fn test_default_output_dir_uses_project_name() {
    let work = TempDir::new().unwrap();
    let source = work.path().join("My_Project");
    two_file_project(&source);

    git2md()
        .current_dir(work.path())
        .arg("My_Project")
        .assert()
        .success();

    let output = work.path().join("my-project");
    let readme = fs::read_to_string(output.join("README.md")).unwrap();
    assert!(readme.starts_with("# my-project\n"));
}

#[test]
fn test_missing_source_fails_in_resolve_stage() {
    let work = TempDir::new().unwrap();

    git2md()
        .current_dir(work.path())
        .arg("no-such-folder")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("resolve source failed"));

    assert_eq!(fs::read_dir(work.path()).unwrap().count(), 0);
}

#[test]
fn test_invalid_remote_fails_without_output() {
    let work = TempDir::new().unwrap();
    let output = work.path().join("out");

    git2md()
        .arg("file:///this/repository/does/not/exist.git")
        .arg("-o")
        .arg(&output)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("resolve source"));

    assert!(!output.exists());
}

#[test]
fn test_invalid_ignore_pattern_is_a_configuration_error() {
    let source = TempDir::new().unwrap();
    write_file(source.path(), "a.txt", "a\n");

    git2md()
        .arg(source.path())
        .args(["--ignore", "(unclosed"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("configuration failed"))
        .stderr(predicate::str::contains("(unclosed"));
}

#[test]
fn test_unwritable_output_fails_in_write_stage() {
    let source = TempDir::new().unwrap();
    two_file_project(source.path());
    let parent = TempDir::new().unwrap();
    let blocker = parent.path().join("taken");
    fs::write(&blocker, "a file, not a directory").unwrap();

    git2md()
        .arg(source.path())
        .arg("-o")
        .arg(&blocker)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("write outputs failed"));

    assert_eq!(fs::read_to_string(&blocker).unwrap(), "a file, not a directory");
}

#[test]
fn test_max_file_size_flag() {
    let source = TempDir::new().unwrap();
    write_file(source.path(), "big.txt", "LARGE_CONTENT\n".repeat(20));
    let output = TempDir::new().unwrap();

    git2md()
        .arg(source.path())
        .args(["--max-file-size", "16"])
        .arg("-o")
        .arg(output.path())
        .assert()
        .success();

    let readme = fs::read_to_string(output.path().join("README.md")).unwrap();
    assert!(!readme.contains("LARGE_CONTENT"));
    assert!(readme.contains("File too large to embed"));
}

#[cfg(unix)]
#[test]
fn test_rejected_token_fails_without_output() {
    use std::os::unix::fs::PermissionsExt;

    // A `git` that always rejects credentials the way a real HTTPS remote does.
    let bin = TempDir::new().unwrap();
    let fake_git = bin.path().join("git");
    fs::write(
        &fake_git,
        "#!/bin/sh\necho 'fatal: Authentication failed for https://github.com/org/private.git/' >&2\nexit 128\n",
    )
    .unwrap();
    fs::set_permissions(&fake_git, fs::Permissions::from_mode(0o755)).unwrap();

    let scratch_root = TempDir::new().unwrap();
    let work = TempDir::new().unwrap();
    let output = work.path().join("out");

    git2md()
        .env("PATH", bin.path())
        .env("TMPDIR", scratch_root.path())
        .arg("https://github.com/org/private.git")
        .args(["--token", "bad-token"])
        .arg("-o")
        .arg(&output)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("resolve source failed"))
        .stderr(predicate::str::contains("authentication failed"))
        .stderr(predicate::str::contains("bad-token").not());

    assert!(!output.exists());
    assert_eq!(
        fs::read_dir(scratch_root.path()).unwrap().count(),
        0,
        "clone directory was left behind"
    );
}
