//! Walks a source snapshot and classifies every surviving file.
//!
//! Traversal is depth-first with siblings sorted by file name, so the resulting
//! [`FileSet`] order is reproducible across runs and platforms. Problems reading single
//! entries become warnings; enumeration itself never fails.

use std::fs;
use std::path::{Component, Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

use crate::config::ScanOptions;
use crate::error::FileReadWarning;
use crate::file_set::{FileDescriptor, FileSet};
use crate::filetype;
use crate::notifier::Notifier;

const SYMLINK_NOT_FOLLOWED: &str = "symbolic link not followed";

pub fn enumerate(root: &Path, options: &ScanOptions, notifier: &Notifier) -> FileSet {
    let mut warnings = Vec::new();
    let candidates = collect_candidates(root, options, &mut warnings, notifier);
    notifier.debug(&format!(
        "Found {} candidate files under {}",
        candidates.len(),
        root.display()
    ));

    let total = candidates.len() as u64;
    let progress_bar = notifier.create_progress_bar(total, "Reading files");
    let mut files = Vec::with_capacity(candidates.len());

    for (index, candidate) in candidates.into_iter().enumerate() {
        notifier.trace(&format!("Reading {}", candidate.relative));
        let descriptor = if candidate.is_symlink {
            symlink_placeholder(candidate.relative, &candidate.absolute)
        } else {
            inspect(candidate.relative, &candidate.absolute, options)
        };
        if let Some(warning) = &descriptor.warning {
            notifier.warn(&warning.to_string());
        }
        files.push(descriptor);

        match &progress_bar {
            Some(pb) => pb.inc(1),
            None => notifier.progress(index as u64 + 1, total, "Reading files"),
        }
    }

    if let Some(pb) = progress_bar {
        pb.finish_and_clear();
    }

    FileSet::new(files, warnings)
}

struct Candidate {
    relative: String,
    absolute: PathBuf,
    is_symlink: bool,
}

/// Lists files to inspect in traversal order.
fn collect_candidates(
    root: &Path,
    options: &ScanOptions,
    warnings: &mut Vec<FileReadWarning>,
    notifier: &Notifier,
) -> Vec<Candidate> {
    let mut candidates = Vec::new();
    let walker = WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_excluded(entry, root, options));

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                let path = err
                    .path()
                    .map(|p| relative_path(root, p))
                    .unwrap_or_else(|| ".".to_string());
                let warning = FileReadWarning::new(path, &err);
                notifier.warn(&warning.to_string());
                warnings.push(warning);
                continue;
            }
        };

        let file_type = entry.file_type();
        if file_type.is_dir() {
            continue;
        }
        // Symlinks to directories are not descended into.
        if file_type.is_symlink() && entry.path().is_dir() {
            notifier.debug(&format!(
                "Skipping directory symlink {}",
                entry.path().display()
            ));
            continue;
        }

        candidates.push(Candidate {
            relative: relative_path(root, entry.path()),
            is_symlink: file_type.is_symlink(),
            absolute: entry.into_path(),
        });
    }

    candidates
}

fn is_excluded(entry: &DirEntry, root: &Path, options: &ScanOptions) -> bool {
    if let Some(name) = entry.file_name().to_str() {
        if options.is_ignored_name(name) {
            return true;
        }
    }
    match entry.path().strip_prefix(root) {
        Ok(relative) => options.excluded_paths.iter().any(|p| p == relative),
        Err(_) => false,
    }
}

/// File symlinks are listed but never read through, so a link cannot pull content from
/// outside the source root.
fn symlink_placeholder(relative: String, absolute: &Path) -> FileDescriptor {
    let size = fs::symlink_metadata(absolute).map(|m| m.len()).unwrap_or(0);
    let warning = FileReadWarning::new(relative.clone(), SYMLINK_NOT_FOLLOWED);
    FileDescriptor::unreadable(relative, size, warning)
}

/// Classifies one file and loads its content when it is text.
fn inspect(relative: String, absolute: &Path, options: &ScanOptions) -> FileDescriptor {
    let metadata = match fs::metadata(absolute) {
        Ok(metadata) => metadata,
        Err(e) => {
            let warning = FileReadWarning::new(relative.clone(), e);
            return FileDescriptor::unreadable(relative, 0, warning);
        }
    };
    let size = metadata.len();

    if size > options.max_file_size {
        return FileDescriptor::skipped_large(relative, size);
    }

    if filetype::has_binary_extension(&relative) {
        return FileDescriptor::binary(relative, size);
    }

    let bytes = match fs::read(absolute) {
        Ok(bytes) => bytes,
        Err(e) => {
            let warning = FileReadWarning::new(relative.clone(), e);
            return FileDescriptor::unreadable(relative, size, warning);
        }
    };

    if filetype::looks_binary(&bytes) {
        return FileDescriptor::binary(relative, size);
    }

    let content = match String::from_utf8(bytes) {
        Ok(content) => content,
        Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
    };
    FileDescriptor::text(relative, size, content)
}

/// `/`-separated path of `path` relative to `root`.
fn relative_path(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    let parts: Vec<String> = relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();
    if parts.is_empty() {
        ".".to_string()
    } else {
        parts.join("/")
    }
}
