//! `llms.txt` index in the llmstxt.org layout: an H1 title, a blockquote summary,
//! free-form detail lines and H2 sections of `- [name](url): notes` entries.

use std::collections::BTreeSet;
use std::fmt::Write;

use super::markdown;
use super::Project;
use crate::file_set::{format_size, FileDescriptor, FileKind, FileSet};
use crate::filetype;

const ROOT_SECTION: &str = "Root files";

pub fn render(project: &Project, files: &FileSet) -> String {
    let mut out = String::new();
    let stats = files.stats();

    let _ = writeln!(out, "# {}\n", project.name);
    let _ = writeln!(out, "> {}\n", summary(project, files));

    let stack = technical_stack(files);
    if !stack.is_empty() {
        let _ = writeln!(out, "Technical stack: {}", stack.join(", "));
    }
    let _ = writeln!(
        out,
        "Statistics: {} ({})",
        stats.headline(),
        format_size(stats.total_size)
    );
    let entry_points: Vec<&str> = files
        .files()
        .iter()
        .filter(|f| filetype::is_entry_point(&f.path))
        .map(|f| f.path.as_str())
        .collect();
    if !entry_points.is_empty() {
        let _ = writeln!(out, "Entry points: {}", entry_points.join(", "));
    }
    if let Some(revision) = &project.revision {
        let _ = writeln!(out, "Revision: {}", revision);
    }

    for (section, entries) in sections(files) {
        let _ = writeln!(out, "\n## {}\n", section);
        for file in entries {
            let _ = writeln!(
                out,
                "- [{}]({}): {}",
                file.path,
                link_target(&file.path),
                entry_note(file)
            );
        }
    }

    out
}

/// Groups files by top-level directory, root files first, preserving traversal order.
fn sections(files: &FileSet) -> Vec<(String, Vec<&FileDescriptor>)> {
    let mut root = Vec::new();
    let mut grouped: Vec<(String, Vec<&FileDescriptor>)> = Vec::new();

    for file in files.files() {
        match file.path.split_once('/') {
            None => root.push(file),
            Some((top, _)) => {
                let title = format!("{}/", top);
                match grouped.last_mut() {
                    Some((last, entries)) if *last == title => entries.push(file),
                    _ => grouped.push((title, vec![file])),
                }
            }
        }
    }

    let mut out = Vec::with_capacity(grouped.len() + 1);
    if !root.is_empty() {
        out.push((ROOT_SECTION.to_string(), root));
    }
    out.extend(grouped);
    out
}

fn entry_note(file: &FileDescriptor) -> String {
    let description = filetype::describe(&file.path);
    match file.kind {
        FileKind::Text => description,
        _ => format!("{} ({})", description, markdown::placeholder(file)),
    }
}

fn link_target(path: &str) -> String {
    path.replace(' ', "%20")
        .replace('(', "%28")
        .replace(')', "%29")
}

/// First prose paragraph of the root README, or a generated sentence.
fn summary(project: &Project, files: &FileSet) -> String {
    files
        .files()
        .iter()
        .filter(|f| !f.path.contains('/') && filetype::is_readme(&f.path))
        .find_map(|f| f.content.as_deref().and_then(first_paragraph))
        .unwrap_or_else(|| {
            format!(
                "Documentation snapshot of {}: {}.",
                project.name,
                files.stats().headline()
            )
        })
}

fn first_paragraph(text: &str) -> Option<String> {
    let mut paragraph: Vec<&str> = Vec::new();
    let mut in_fence = false;

    for line in text.lines() {
        let trimmed = line.trim();
        if trimmed.starts_with("```") || trimmed.starts_with("~~~") {
            in_fence = !in_fence;
            if !paragraph.is_empty() {
                break;
            }
            continue;
        }
        if in_fence {
            continue;
        }
        let is_decoration = trimmed.starts_with('#')
            || trimmed.starts_with("![")
            || trimmed.starts_with("[![")
            || trimmed.starts_with('<')
            || trimmed.starts_with("---")
            || trimmed.starts_with("===");
        if trimmed.is_empty() || is_decoration {
            if !paragraph.is_empty() {
                break;
            }
            continue;
        }
        paragraph.push(trimmed);
    }

    if paragraph.is_empty() {
        None
    } else {
        Some(paragraph.join(" "))
    }
}

fn technical_stack(files: &FileSet) -> Vec<&'static str> {
    files
        .files()
        .iter()
        .filter_map(|f| filetype::language(&f.path))
        .filter(|lang| filetype::is_programming_language(lang))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
