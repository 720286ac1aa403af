//! Remote source integration tests
//!
//! Clones go through `file://` URLs so no network is needed. Tests that need a `git`
//! executable are skipped when it is missing.

use crate::integration::common::{commit_all, git_available, read_artifact, two_file_project};
use anyhow::Result;
use git2md::config::{Config, Credentials, Location, ScanOptions, SourceReference};
use git2md::{DocProcessor, Error, Notifier, RemoteSource, ScratchDirs};
use tempfile::TempDir;

fn remote_config(url: String, output: &std::path::Path) -> Config {
    Config::new(
        SourceReference::new(Location::Remote(url), Credentials::default()),
        Some(output.to_path_buf()),
        ScanOptions::default(),
        0,
    )
}

#[test]
fn test_invalid_remote_writes_nothing() -> Result<()> {
    let parent = TempDir::new()?;
    let output = parent.path().join("docs");
    let scratch = ScratchDirs::new();
    let processor = DocProcessor::new(RemoteSource::new(scratch.clone()), Notifier::silent());

    let config = remote_config(
        "file:///this/repository/does/not/exist.git".to_string(),
        &output,
    );
    let err = processor.convert(&config).expect_err("clone must fail");

    assert!(matches!(
        err,
        Error::SourceUnavailable(_) | Error::AuthenticationFailed(_)
    ));
    assert_eq!(err.stage(), "resolve source");
    assert!(!output.exists(), "no output directory on failure");
    for dir in scratch.tracked() {
        assert!(!dir.exists(), "clone scratch {} was left behind", dir.display());
    }
    Ok(())
}

#[test]
fn test_clone_of_local_repository() -> Result<()> {
    if !git_available() {
        eprintln!("Skipping test: git executable not found");
        return Ok(());
    }

    let upstream = TempDir::new()?;
    two_file_project(upstream.path());
    let repo = commit_all(upstream.path());
    let head = repo.head()?.peel_to_commit()?.id().to_string();
    let url = format!("file://{}", upstream.path().display());

    let output = TempDir::new()?;
    let scratch = ScratchDirs::new();
    let processor = DocProcessor::new(RemoteSource::new(scratch.clone()), Notifier::silent());
    let report = processor.convert(&remote_config(url, output.path()))?;

    assert_eq!(report.files.stats().headline(), "2 files, 15 lines");
    let revision = report.project.revision.expect("clone has a HEAD");
    assert_eq!(revision.commit, head[..12]);

    let readme = read_artifact(output.path(), "README.md");
    assert!(readme.contains("### `a.py`"));
    assert!(!readme.contains(".git/"));

    assert_eq!(scratch.tracked().len(), 1);
    for dir in scratch.tracked() {
        assert!(!dir.exists(), "clone {} should be removed", dir.display());
    }
    Ok(())
}
