//! Error taxonomy for the conversion pipeline.
//!
//! Fatal failures are variants of [`Error`] and abort the run. Per-file read problems are
//! [`FileReadWarning`]s: they are recorded in the [`crate::FileSet`] and never abort.

use std::fmt;
use std::io;
use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("source unavailable: {0}")]
    SourceUnavailable(String),

    #[error("authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl Error {
    /// Pipeline stage the error belongs to, used in the CLI failure message.
    pub fn stage(&self) -> &'static str {
        match self {
            Error::SourceUnavailable(_) | Error::AuthenticationFailed(_) => "resolve source",
            Error::Write { .. } => "write outputs",
            Error::Config(_) => "configuration",
        }
    }

    pub(crate) fn write(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Write {
            path: path.into(),
            source,
        }
    }
}

/// Non-fatal problem reading a single entry of the source tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReadWarning {
    pub path: String,
    pub message: String,
}

impl FileReadWarning {
    pub fn new(path: impl Into<String>, message: impl fmt::Display) -> Self {
        Self {
            path: path.into(),
            message: message.to_string(),
        }
    }
}

impl fmt::Display for FileReadWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}
