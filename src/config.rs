//! Immutable run configuration.
//!
//! The CLI builds one [`Config`] at startup and hands references to it to every pipeline
//! stage. Nothing downstream reads environment variables or global state.

use regex::Regex;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::sources::naming;

/// Files above this size are listed but not embedded.
pub const DEFAULT_MAX_FILE_SIZE: u64 = 1024 * 1024;

/// File and directory names skipped by default, in addition to VCS metadata.
pub const DEFAULT_IGNORE_PATTERNS: &[&str] = &[r"__pycache__", r".*\.pyc", r"\.DS_Store"];

/// Directories that are never walked.
pub const VCS_DIRS: &[&str] = &[".git", ".hg", ".svn"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    Local(PathBuf),
    Remote(String),
}

impl Location {
    /// Classifies a user supplied reference.
    ///
    /// Anything that exists on disk is local. Otherwise URL-like strings (`scheme://` or
    /// scp-style `user@host:path`) are remote.
    pub fn parse(reference: &str) -> Result<Self> {
        if Path::new(reference).exists() {
            return Ok(Location::Local(PathBuf::from(reference)));
        }
        if looks_like_remote(reference) {
            return Ok(Location::Remote(reference.to_string()));
        }
        Err(Error::SourceUnavailable(format!(
            "path does not exist: {}",
            reference
        )))
    }
}

fn looks_like_remote(reference: &str) -> bool {
    if reference.contains("://") {
        return true;
    }
    // scp-like: git@github.com:org/repo.git
    match (reference.find('@'), reference.find(':')) {
        (Some(at), Some(colon)) => at > 0 && colon > at + 1 && !reference[..colon].contains('/'),
        _ => false,
    }
}

/// Credentials for remote fetches. `Debug` never prints the token.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub token: Option<String>,
    pub ssh_key: Option<PathBuf>,
    /// Base SSH command override, typically taken from `GIT_SSH_COMMAND`.
    pub ssh_command: Option<String>,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("ssh_key", &self.ssh_key)
            .field("ssh_command", &self.ssh_command)
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceReference {
    pub location: Location,
    pub credentials: Credentials,
}

impl SourceReference {
    pub fn new(location: Location, credentials: Credentials) -> Self {
        Self {
            location,
            credentials,
        }
    }

    pub fn local(path: impl Into<PathBuf>) -> Self {
        Self::new(Location::Local(path.into()), Credentials::default())
    }

    /// Project name derived from the reference, see [`naming::project_name`].
    pub fn project_name(&self) -> String {
        naming::project_name(&self.location)
    }
}

/// Enumeration rules.
#[derive(Debug, Clone)]
pub struct ScanOptions {
    pub max_file_size: u64,
    pub ignore_patterns: Vec<Regex>,
    /// Paths relative to the source root that are skipped entirely.
    pub excluded_paths: Vec<PathBuf>,
}

impl ScanOptions {
    /// Default patterns plus `extra`, each anchored to match a whole file name.
    pub fn with_patterns<S: AsRef<str>>(max_file_size: u64, extra: &[S]) -> Result<Self> {
        let ignore_patterns = DEFAULT_IGNORE_PATTERNS
            .iter()
            .copied()
            .chain(extra.iter().map(AsRef::as_ref))
            .map(|pattern| {
                Regex::new(&format!("^(?:{})$", pattern)).map_err(|e| {
                    Error::Config(format!("invalid ignore pattern '{}': {}", pattern, e))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            max_file_size,
            ignore_patterns,
            excluded_paths: Vec::new(),
        })
    }

    pub fn is_ignored_name(&self, name: &str) -> bool {
        VCS_DIRS.contains(&name) || self.ignore_patterns.iter().any(|re| re.is_match(name))
    }
}

impl Default for ScanOptions {
    fn default() -> Self {
        let none: &[&str] = &[];
        // The default patterns are constants and always compile.
        Self::with_patterns(DEFAULT_MAX_FILE_SIZE, none).unwrap_or(Self {
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            ignore_patterns: Vec::new(),
            excluded_paths: Vec::new(),
        })
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub source: SourceReference,
    pub output_dir: PathBuf,
    pub scan: ScanOptions,
    pub verbosity: u8,
}

impl Config {
    /// Builds a config, defaulting the output directory to `<cwd>/<project-name>`.
    pub fn new(
        source: SourceReference,
        output_dir: Option<PathBuf>,
        scan: ScanOptions,
        verbosity: u8,
    ) -> Self {
        let output_dir = output_dir.unwrap_or_else(|| PathBuf::from(source.project_name()));
        Self {
            source,
            output_dir,
            scan,
            verbosity,
        }
    }
}
