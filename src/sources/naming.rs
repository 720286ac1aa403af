use std::path::Path;

use crate::config::Location;

/// Derives the project name used for headings and the default output directory.
///
/// Local folders use their absolute basename. Remote URLs use `org-repo` from the first
/// two path segments, without a trailing `.git`. The result is lowercased and `/`, `_`
/// become `-`.
pub fn project_name(location: &Location) -> String {
    let raw = match location {
        Location::Local(path) => local_name(path),
        Location::Remote(url) => remote_name(url),
    };
    sanitize_name(&raw)
}

fn local_name(path: &Path) -> String {
    let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    absolute
        .file_name()
        .and_then(|name| name.to_str())
        .map(str::to_string)
        .unwrap_or_else(|| "project".to_string())
}

fn remote_name(url: &str) -> String {
    let path = repository_path(url);
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    let name = match segments.as_slice() {
        [] => "repository".to_string(),
        [single] => single.to_string(),
        [org, repo, ..] => format!("{}-{}", org, repo),
    };
    name.strip_suffix(".git").unwrap_or(&name).to_string()
}

/// Path component of a URL or scp-like reference, without query or fragment.
fn repository_path(url: &str) -> &str {
    let path = match url.split_once("://") {
        Some((_, rest)) => rest.split_once('/').map(|(_, p)| p).unwrap_or(""),
        None => url.split_once(':').map(|(_, p)| p).unwrap_or(url),
    };
    path.split(['?', '#']).next().unwrap_or(path)
}

pub fn sanitize_name(name: &str) -> String {
    let cleaned = name.replace(['/', '_'], "-").to_lowercase();
    if cleaned.is_empty() {
        "project".to_string()
    } else {
        cleaned
    }
}

/// Replaces the credential part of a URL so it can be logged.
pub fn redact_url(url: &str) -> String {
    if let Some((scheme, rest)) = url.split_once("://") {
        let authority_end = rest.find('/').unwrap_or(rest.len());
        if let Some(at) = rest[..authority_end].rfind('@') {
            return format!("{}://***@{}", scheme, &rest[at + 1..]);
        }
    }
    url.to_string()
}
