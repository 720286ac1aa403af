//! Common fixtures for integration tests

use git2::{IndexAddOption, Repository, Signature};
use git2md::config::{Config, ScanOptions, SourceReference};
use git2md::{DocProcessor, LocalSource, Notifier, Report};
use std::fs;
use std::path::Path;
use std::process::Command;

pub const ARTIFACTS: [&str; 3] = ["README.md", "structure.mmd", "llms.txt"];

/// Writes `contents` at `relative` under `root`, creating parent directories.
pub fn write_file(root: &Path, relative: &str, contents: impl AsRef<[u8]>) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, contents).unwrap();
}

/// The two-file folder used by several scenarios: `a.py` (10 lines), `b.txt` (5 lines).
pub fn two_file_project(root: &Path) {
    write_file(root, "a.py", "print('hello')\n".repeat(10));
    write_file(root, "b.txt", "line\n".repeat(5));
}

/// Runs the pipeline on a local folder with the given scan options.
pub fn document(source: &Path, output: &Path, scan: ScanOptions) -> git2md::Result<Report> {
    let config = Config::new(
        SourceReference::local(source),
        Some(output.to_path_buf()),
        scan,
        0,
    );
    DocProcessor::new(LocalSource::new(), Notifier::silent()).convert(&config)
}

pub fn read_artifact(output: &Path, name: &str) -> String {
    fs::read_to_string(output.join(name)).unwrap()
}

/// Initializes a repository in `root` and commits everything in it.
pub fn commit_all(root: &Path) -> Repository {
    let repo = Repository::init(root).unwrap();
    {
        let mut index = repo.index().unwrap();
        index
            .add_all(["*"].iter(), IndexAddOption::DEFAULT, None)
            .unwrap();
        index.write().unwrap();
        let tree_id = index.write_tree().unwrap();
        let tree = repo.find_tree(tree_id).unwrap();
        let signature = Signature::now("Test", "test@example.com").unwrap();
        repo.commit(Some("HEAD"), &signature, &signature, "initial", &tree, &[])
            .unwrap();
    }
    repo
}

/// Whether a `git` executable is available for clone tests.
pub fn git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}
