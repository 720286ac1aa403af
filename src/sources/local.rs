use std::fs;

use super::{ResolvedSource, Source};
use crate::config::{Location, SourceReference};
use crate::error::{Error, Result};
use crate::notifier::Notifier;

/// Local folder implementation of the Source trait. The folder is used in place.
pub struct LocalSource;

impl LocalSource {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalSource {
    fn default() -> Self {
        Self::new()
    }
}

impl Source for LocalSource {
    fn name(&self) -> &str {
        "local"
    }

    fn resolve(&self, reference: &SourceReference, notifier: &Notifier) -> Result<ResolvedSource> {
        let path = match &reference.location {
            Location::Local(path) => path,
            Location::Remote(url) => {
                return Err(Error::SourceUnavailable(format!(
                    "not a local path: {}",
                    url
                )))
            }
        };

        if !path.exists() {
            return Err(Error::SourceUnavailable(format!(
                "path does not exist: {}",
                path.display()
            )));
        }

        if !path.is_dir() {
            return Err(Error::SourceUnavailable(format!(
                "path is not a directory: {}",
                path.display()
            )));
        }

        fs::read_dir(path).map_err(|e| {
            Error::SourceUnavailable(format!("cannot read {}: {}", path.display(), e))
        })?;

        notifier.debug(&format!("Using local folder {}", path.display()));
        Ok(ResolvedSource::borrowed(path.clone()))
    }
}
