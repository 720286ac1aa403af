//! Registry of temporary paths that must not outlive an interrupted run.
//!
//! [`tempfile::TempDir`] and [`tempfile::NamedTempFile`] already remove clone directories
//! and staged artifacts when the pipeline unwinds. A Ctrl-C terminates the process without
//! running destructors, so the interrupt handler calls [`ScratchDirs::purge`] before
//! exiting.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, Default)]
pub struct ScratchDirs {
    dirs: Arc<Mutex<Vec<PathBuf>>>,
}

impl ScratchDirs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn track(&self, path: &Path) {
        if let Ok(mut dirs) = self.dirs.lock() {
            dirs.push(path.to_path_buf());
        }
    }

    pub fn tracked(&self) -> Vec<PathBuf> {
        self.dirs.lock().map(|dirs| dirs.clone()).unwrap_or_default()
    }

    /// Removes every tracked directory or file that still exists. Returns how many were
    /// removed.
    pub fn purge(&self) -> usize {
        let Ok(mut dirs) = self.dirs.lock() else {
            return 0;
        };
        let mut removed = 0;
        for path in dirs.drain(..) {
            let result = match fs::symlink_metadata(&path) {
                Ok(meta) if meta.is_dir() => fs::remove_dir_all(&path),
                Ok(_) => fs::remove_file(&path),
                Err(_) => continue,
            };
            if result.is_ok() {
                removed += 1;
            }
        }
        removed
    }
}
