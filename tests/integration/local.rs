//! Local folder integration tests
//!
//! Covers the documented scenarios end to end: ordering, statistics, exclusion rules,
//! binary placeholders and byte-identical reruns.

use crate::integration::common::{
    commit_all, document, read_artifact, two_file_project, write_file, ARTIFACTS,
};
use anyhow::Result;
use git2md::config::{ScanOptions, DEFAULT_MAX_FILE_SIZE};
use git2md::FileKind;
use tempfile::TempDir;

#[test]
fn test_two_file_scenario() -> Result<()> {
    let source = TempDir::new()?;
    two_file_project(source.path());
    let output = TempDir::new()?;

    let report = document(source.path(), output.path(), ScanOptions::default())?;
    assert_eq!(report.files.len(), 2);

    let readme = read_artifact(output.path(), "README.md");
    let a = readme.find("### `a.py`").expect("a.py heading");
    let b = readme.find("### `b.txt`").expect("b.txt heading");
    assert!(a < b, "a.py should be documented before b.txt");
    assert!(readme.contains("2 files, 15 lines"));

    let diagram = read_artifact(output.path(), "structure.mmd");
    let leaves: Vec<&str> = diagram
        .lines()
        .filter(|line| line.trim_start().starts_with("root --> "))
        .collect();
    assert_eq!(
        leaves,
        vec!["    root --> N1(\"a.py\")", "    root --> N2(\"b.txt\")"]
    );

    let index = read_artifact(output.path(), "llms.txt");
    assert_eq!(index.matches("\n## ").count(), 1, "one section expected");
    assert!(index.contains("- [a.py](a.py)"));
    assert!(index.contains("- [b.txt](b.txt)"));

    Ok(())
}

#[test]
fn test_reruns_are_byte_identical() -> Result<()> {
    let source = TempDir::new()?;
    two_file_project(source.path());
    write_file(source.path(), "src/lib.rs", "pub fn f() {}\n");
    write_file(source.path(), "assets/logo.png", [0x89, b'P', b'N', b'G', 0, 0]);

    let first = TempDir::new()?;
    let second = TempDir::new()?;
    document(source.path(), first.path(), ScanOptions::default())?;
    document(source.path(), second.path(), ScanOptions::default())?;
    // Overwriting an existing set must not change it either.
    document(source.path(), second.path(), ScanOptions::default())?;

    for name in ARTIFACTS {
        assert_eq!(
            read_artifact(first.path(), name),
            read_artifact(second.path(), name),
            "{} differs between runs",
            name
        );
    }
    Ok(())
}

#[test]
fn test_every_file_documented_exactly_once() -> Result<()> {
    let source = TempDir::new()?;
    write_file(source.path(), "README.md", "# Demo\n\nA demo project.\n");
    write_file(source.path(), "src/main.rs", "fn main() {}\n");
    write_file(source.path(), "src/util/mod.rs", "pub mod io;\n");
    write_file(source.path(), "docs/guide.md", "Guide\n");
    write_file(source.path(), "__pycache__/mod.cpython-312.pyc", [0u8, 1, 2]);
    write_file(source.path(), "tool.pyc", [0u8, 1, 2]);
    write_file(source.path(), ".DS_Store", [0u8]);
    write_file(source.path(), ".git/HEAD", "ref: refs/heads/main\n");
    let output = TempDir::new()?;

    let report = document(source.path(), output.path(), ScanOptions::default())?;
    let paths: Vec<&str> = report
        .files
        .files()
        .iter()
        .map(|f| f.path.as_str())
        .collect();
    assert_eq!(
        paths,
        vec!["README.md", "docs/guide.md", "src/main.rs", "src/util/mod.rs"]
    );

    let readme = read_artifact(output.path(), "README.md");
    for path in &paths {
        assert_eq!(
            readme.matches(&format!("### `{}`\n", path)).count(),
            1,
            "{} should have exactly one heading",
            path
        );
    }

    let stats = report.files.stats();
    let summed: usize = report.files.files().iter().map(|f| f.lines).sum();
    assert_eq!(stats.total_lines, summed);
    assert!(readme.contains(&stats.headline()));

    let index = read_artifact(output.path(), "llms.txt");
    assert!(index.starts_with(&format!("# {}\n\n> A demo project.\n", report.project.name)));
    Ok(())
}

#[test]
fn test_oversized_file_is_listed_but_not_embedded() -> Result<()> {
    let source = TempDir::new()?;
    write_file(source.path(), "small.txt", "tiny\n");
    write_file(source.path(), "big.log", "OVERSIZED_MARKER\n".repeat(100));
    let output = TempDir::new()?;

    let none: &[&str] = &[];
    let scan = ScanOptions::with_patterns(64, none)?;
    let report = document(source.path(), output.path(), scan)?;

    let big = report.files.get("big.log").expect("big.log is listed");
    assert_eq!(big.kind, FileKind::SkippedLarge);
    assert!(big.content.is_none());
    assert_eq!(report.files.stats().skipped_files, 1);

    let readme = read_artifact(output.path(), "README.md");
    assert!(readme.contains("### `big.log`"));
    assert!(readme.contains("File too large to embed"));
    assert!(!readme.contains("OVERSIZED_MARKER"));
    assert!(readme.contains("tiny"));

    let diagram = read_artifact(output.path(), "structure.mmd");
    assert!(diagram.contains("big.log (too large)"));
    Ok(())
}

#[test]
fn test_binary_content_gets_placeholder() -> Result<()> {
    let source = TempDir::new()?;
    write_file(source.path(), "payload.xyz", b"head\0tail BINARY_MARKER");
    write_file(source.path(), "notes.txt", "plain\n");
    let output = TempDir::new()?;

    let report = document(source.path(), output.path(), ScanOptions::default())?;
    let payload = report.files.get("payload.xyz").expect("payload is listed");
    assert_eq!(payload.kind, FileKind::Binary);
    assert_eq!(payload.lines, 0);

    for name in ARTIFACTS {
        let artifact = read_artifact(output.path(), name);
        assert!(!artifact.contains('\0'), "{} embeds raw bytes", name);
        assert!(!artifact.contains("BINARY_MARKER"));
    }
    let readme = read_artifact(output.path(), "README.md");
    assert!(readme.contains("> Binary file (23.00 B), content not shown."));
    Ok(())
}

#[test]
fn test_custom_ignore_patterns() -> Result<()> {
    let source = TempDir::new()?;
    write_file(source.path(), "keep.rs", "fn keep() {}\n");
    write_file(source.path(), "debug.log", "noise\n");
    write_file(source.path(), "target/release/app", "bin\n");
    let output = TempDir::new()?;

    let scan = ScanOptions::with_patterns(DEFAULT_MAX_FILE_SIZE, &["target", r".*\.log"])?;
    let report = document(source.path(), output.path(), scan)?;

    let paths: Vec<&str> = report
        .files
        .files()
        .iter()
        .map(|f| f.path.as_str())
        .collect();
    assert_eq!(paths, vec!["keep.rs"]);
    Ok(())
}

#[test]
fn test_git_checkout_reports_revision() -> Result<()> {
    let source = TempDir::new()?;
    two_file_project(source.path());
    let repo = commit_all(source.path());
    let head = repo.head()?.peel_to_commit()?.id().to_string();
    let output = TempDir::new()?;

    let report = document(source.path(), output.path(), ScanOptions::default())?;
    assert!(
        report.files.files().iter().all(|f| !f.path.starts_with(".git/")),
        "VCS metadata must not be documented"
    );
    let revision = report.project.revision.expect("revision is read from HEAD");
    assert_eq!(revision.commit, head[..12]);

    let readme = read_artifact(output.path(), "README.md");
    assert!(readme.contains(&format!("- Revision: {}", &head[..12])));
    Ok(())
}

#[test]
fn test_output_directory_inside_source_is_skipped() -> Result<()> {
    let source = TempDir::new()?;
    two_file_project(source.path());
    let output = source.path().join("docs");

    document(source.path(), &output, ScanOptions::default())?;
    let first = read_artifact(&output, "README.md");
    let report = document(source.path(), &output, ScanOptions::default())?;

    assert_eq!(report.files.len(), 2);
    assert_eq!(first, read_artifact(&output, "README.md"));
    Ok(())
}
