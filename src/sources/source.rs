use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::config::SourceReference;
use crate::error::Result;
use crate::notifier::Notifier;

/// A local directory snapshot ready to be enumerated.
///
/// When the snapshot was cloned, the owning [`TempDir`] lives here and the directory is
/// removed when this value drops, on success and on failure alike.
#[derive(Debug)]
pub struct ResolvedSource {
    root: PathBuf,
    scratch: Option<TempDir>,
}

impl ResolvedSource {
    pub fn borrowed(root: PathBuf) -> Self {
        Self {
            root,
            scratch: None,
        }
    }

    pub fn owned(root: PathBuf, scratch: TempDir) -> Self {
        Self {
            root,
            scratch: Some(scratch),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn is_temporary(&self) -> bool {
        self.scratch.is_some()
    }
}

/// Source trait for turning a repository reference into a local directory
pub trait Source {
    /// Returns the name of the source for identification purposes
    fn name(&self) -> &str;

    /// Produces a local snapshot of the referenced content.
    ///
    /// Fails with [`crate::Error::SourceUnavailable`] or
    /// [`crate::Error::AuthenticationFailed`].
    fn resolve(&self, reference: &SourceReference, notifier: &Notifier)
        -> Result<ResolvedSource>;
}
