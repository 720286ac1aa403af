use std::collections::BTreeMap;
use std::fmt::Write;

use super::Project;
use crate::file_set::{FileKind, FileSet};

const ROOT_NODE: &str = "root";

/// Renders the directory tree as a Mermaid `graph TD`.
///
/// Directory nodes are created the first time a file below them is seen, so edges follow
/// the FileSet's traversal order.
pub fn render(project: &Project, files: &FileSet) -> String {
    let mut lines = vec![
        "graph TD".to_string(),
        format!("    {}[\"{}\"]", ROOT_NODE, escape_label(&project.name)),
    ];
    let mut dir_nodes: BTreeMap<String, String> = BTreeMap::new();
    let mut classes: BTreeMap<&'static str, Vec<String>> = BTreeMap::new();
    let mut counter = 0usize;
    let mut next_id = || {
        counter += 1;
        format!("N{}", counter)
    };

    for file in files.files() {
        let parts: Vec<&str> = file.path.split('/').collect();
        let (name, dirs) = match parts.split_last() {
            Some(split) => split,
            None => continue,
        };

        let mut parent = ROOT_NODE.to_string();
        let mut prefix = String::new();
        for dir in dirs {
            if !prefix.is_empty() {
                prefix.push('/');
            }
            prefix.push_str(dir);
            parent = match dir_nodes.get(&prefix) {
                Some(id) => id.clone(),
                None => {
                    let id = next_id();
                    lines.push(format!(
                        "    {} --> {}[\"{}/\"]",
                        parent,
                        id,
                        escape_label(dir)
                    ));
                    dir_nodes.insert(prefix.clone(), id.clone());
                    id
                }
            };
        }

        let id = next_id();
        let label = match annotation(file.kind) {
            Some(note) => format!("{} ({})", name, note),
            None => name.to_string(),
        };
        lines.push(format!(
            "    {} --> {}(\"{}\")",
            parent,
            id,
            escape_label(&label)
        ));
        if let Some(class) = class_name(file.kind) {
            classes.entry(class).or_default().push(id);
        }
    }

    for (class, ids) in &classes {
        lines.push(format!("    classDef {} {}", class, class_style(class)));
        lines.push(format!("    class {} {}", ids.join(","), class));
    }

    let mut out = lines.join("\n");
    let _ = writeln!(out);
    out
}

fn annotation(kind: FileKind) -> Option<&'static str> {
    match kind {
        FileKind::Text => None,
        FileKind::Binary => Some("binary"),
        FileKind::SkippedLarge => Some("too large"),
        FileKind::Unreadable => Some("unreadable"),
    }
}

fn class_name(kind: FileKind) -> Option<&'static str> {
    match kind {
        FileKind::Text => None,
        FileKind::Binary => Some("binary"),
        FileKind::SkippedLarge => Some("skipped"),
        FileKind::Unreadable => Some("unreadable"),
    }
}

fn class_style(class: &str) -> &'static str {
    match class {
        "binary" => "fill:#eeeeee,stroke:#999999",
        "skipped" => "fill:#fff3cd,stroke:#d4a017",
        _ => "fill:#f8d7da,stroke:#cc0000",
    }
}

fn escape_label(label: &str) -> String {
    label.replace('"', "#quot;")
}
