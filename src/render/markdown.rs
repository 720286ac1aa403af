use std::fmt::Write;

use super::Project;
use crate::file_set::{format_size, FileDescriptor, FileKind, FileSet};
use crate::filetype;

pub fn render(project: &Project, files: &FileSet) -> String {
    let mut out = String::new();
    let stats = files.stats();

    let _ = writeln!(out, "# {}\n", project.name);
    out.push_str("## Summary\n\n");
    let _ = writeln!(out, "**{}**\n", stats.headline());
    let _ = writeln!(out, "- Total size: {}", format_size(stats.total_size));
    let _ = writeln!(out, "- Text files: {}", stats.text_files);
    let _ = writeln!(out, "- Binary files: {}", stats.binary_files);
    let _ = writeln!(out, "- Skipped (too large): {}", stats.skipped_files);
    let _ = writeln!(out, "- Unreadable: {}", stats.unreadable_files);
    if let Some(revision) = &project.revision {
        let _ = writeln!(out, "- Revision: {}", revision);
    }
    out.push('\n');

    if !stats.by_extension.is_empty() {
        out.push_str("### File types\n\n| Extension | Files |\n|-----------|------:|\n");
        for (extension, count) in &stats.by_extension {
            let _ = writeln!(out, "| {} | {} |", extension, count);
        }
        out.push('\n');
    }

    let omitted: Vec<&FileDescriptor> = files
        .files()
        .iter()
        .filter(|f| f.kind != FileKind::Text)
        .collect();
    if !omitted.is_empty() {
        out.push_str("### Skipped files\n\n");
        for file in omitted {
            let reason = file.kind.omission_reason().unwrap_or_default();
            let _ = writeln!(
                out,
                "- {} ({}): {} ({})",
                code_span(&file.path),
                file.kind.label(),
                reason,
                format_size(file.size)
            );
        }
        out.push('\n');
    }

    if !files.warnings().is_empty() {
        out.push_str("### Warnings\n\n");
        for warning in files.warnings() {
            let _ = writeln!(out, "- {}: {}", code_span(&warning.path), warning.message);
        }
        out.push('\n');
    }

    out.push_str("## Files\n");
    for file in files.files() {
        let _ = write!(out, "\n### {}\n\n", code_span(&file.path));
        match (&file.content, file.kind) {
            (Some(content), FileKind::Text) => push_fenced(&mut out, &file.path, content),
            _ => {
                let _ = writeln!(out, "> {}", placeholder(file));
            }
        }
    }

    out
}

/// Notice used instead of content for non-text files.
pub fn placeholder(file: &FileDescriptor) -> String {
    match file.kind {
        FileKind::Text => String::new(),
        FileKind::Binary => format!(
            "Binary file ({}), content not shown.",
            format_size(file.size)
        ),
        FileKind::SkippedLarge => format!(
            "File too large to embed ({}), content not shown.",
            format_size(file.size)
        ),
        FileKind::Unreadable => match &file.warning {
            Some(warning) => format!("File could not be read: {}.", warning.message),
            None => "File could not be read.".to_string(),
        },
    }
}

fn push_fenced(out: &mut String, path: &str, content: &str) {
    let fence = "`".repeat(longest_backtick_run(content).max(2) + 1);
    let _ = writeln!(out, "{}{}", fence, filetype::fence_hint(path));
    out.push_str(content);
    if !content.is_empty() && !content.ends_with('\n') {
        out.push('\n');
    }
    let _ = writeln!(out, "{}", fence);
}

fn longest_backtick_run(text: &str) -> usize {
    let mut longest = 0;
    let mut current = 0;
    for c in text.chars() {
        if c == '`' {
            current += 1;
            longest = longest.max(current);
        } else {
            current = 0;
        }
    }
    longest
}

fn code_span(text: &str) -> String {
    if text.contains('`') {
        format!("`` {} ``", text)
    } else {
        format!("`{}`", text)
    }
}
