//! The enumerated view of a source tree.
//!
//! A [`FileSet`] is built once from its descriptors. Its [`Stats`] are derived from
//! those descriptors during construction, so totals always agree with the file list.

use std::collections::BTreeMap;

use crate::error::FileReadWarning;

/// Key used in per-extension counts for files without an extension.
pub const NO_EXTENSION: &str = "(none)";

/// Classification shared by every renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FileKind {
    Text,
    Binary,
    Unreadable,
    SkippedLarge,
}

impl FileKind {
    pub fn label(self) -> &'static str {
        match self {
            FileKind::Text => "text",
            FileKind::Binary => "binary",
            FileKind::Unreadable => "unreadable",
            FileKind::SkippedLarge => "skipped-large",
        }
    }

    /// Why a non-text file's content is absent.
    pub fn omission_reason(self) -> Option<&'static str> {
        match self {
            FileKind::Text => None,
            FileKind::Binary => Some("binary content"),
            FileKind::Unreadable => Some("could not be read"),
            FileKind::SkippedLarge => Some("exceeds the size limit"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDescriptor {
    /// Path relative to the source root, `/`-separated.
    pub path: String,
    pub size: u64,
    pub lines: usize,
    pub kind: FileKind,
    /// Decoded content, present only for [`FileKind::Text`].
    pub content: Option<String>,
    pub warning: Option<FileReadWarning>,
}

impl FileDescriptor {
    pub fn text(path: impl Into<String>, size: u64, content: String) -> Self {
        Self {
            path: path.into(),
            size,
            lines: content.lines().count(),
            kind: FileKind::Text,
            content: Some(content),
            warning: None,
        }
    }

    pub fn binary(path: impl Into<String>, size: u64) -> Self {
        Self::without_content(path.into(), size, FileKind::Binary)
    }

    pub fn skipped_large(path: impl Into<String>, size: u64) -> Self {
        Self::without_content(path.into(), size, FileKind::SkippedLarge)
    }

    pub fn unreadable(path: impl Into<String>, size: u64, warning: FileReadWarning) -> Self {
        Self {
            warning: Some(warning),
            ..Self::without_content(path.into(), size, FileKind::Unreadable)
        }
    }

    fn without_content(path: String, size: u64, kind: FileKind) -> Self {
        Self {
            path,
            size,
            lines: 0,
            kind,
            content: None,
            warning: None,
        }
    }

    pub fn extension_key(&self) -> String {
        crate::filetype::extension(&self.path).unwrap_or_else(|| NO_EXTENSION.to_string())
    }
}

/// Aggregates over a [`FileSet`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stats {
    pub total_files: usize,
    pub total_lines: usize,
    pub total_size: u64,
    pub text_files: usize,
    pub binary_files: usize,
    pub unreadable_files: usize,
    pub skipped_files: usize,
    pub by_extension: BTreeMap<String, usize>,
}

impl Stats {
    fn from_files(files: &[FileDescriptor]) -> Self {
        let mut stats = Stats::default();
        for file in files {
            stats.total_files += 1;
            stats.total_lines += file.lines;
            stats.total_size += file.size;
            match file.kind {
                FileKind::Text => stats.text_files += 1,
                FileKind::Binary => stats.binary_files += 1,
                FileKind::Unreadable => stats.unreadable_files += 1,
                FileKind::SkippedLarge => stats.skipped_files += 1,
            }
            *stats.by_extension.entry(file.extension_key()).or_insert(0) += 1;
        }
        stats
    }

    /// `"2 files, 15 lines"`, with singular forms for counts of one.
    pub fn headline(&self) -> String {
        format!(
            "{} {}, {} {}",
            self.total_files,
            plural(self.total_files, "file", "files"),
            self.total_lines,
            plural(self.total_lines, "line", "lines")
        )
    }
}

fn plural<'a>(count: usize, one: &'a str, many: &'a str) -> &'a str {
    if count == 1 {
        one
    } else {
        many
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileSet {
    files: Vec<FileDescriptor>,
    stats: Stats,
    warnings: Vec<FileReadWarning>,
}

impl FileSet {
    /// `files` must already be in traversal order.
    pub fn new(files: Vec<FileDescriptor>, warnings: Vec<FileReadWarning>) -> Self {
        let stats = Stats::from_files(&files);
        Self {
            files,
            stats,
            warnings,
        }
    }

    pub fn files(&self) -> &[FileDescriptor] {
        &self.files
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    /// Warnings not attached to a descriptor (unreadable directories and the like).
    pub fn warnings(&self) -> &[FileReadWarning] {
        &self.warnings
    }

    /// Every warning, including the ones attached to unreadable files.
    pub fn all_warnings(&self) -> impl Iterator<Item = &FileReadWarning> {
        self.files
            .iter()
            .filter_map(|f| f.warning.as_ref())
            .chain(self.warnings.iter())
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn get(&self, path: &str) -> Option<&FileDescriptor> {
        self.files.iter().find(|f| f.path == path)
    }
}

/// Formats a byte count as `B/KB/MB/GB/TB` with two decimals.
pub fn format_size(size: u64) -> String {
    let mut value = size as f64;
    for unit in ["B", "KB", "MB", "GB"] {
        if value < 1024.0 {
            return format!("{:.2} {}", value, unit);
        }
        value /= 1024.0;
    }
    format!("{:.2} TB", value)
}
