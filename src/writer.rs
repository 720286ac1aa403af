//! Atomic output of the rendered artifacts.
//!
//! All artifacts are first staged as temporary files inside the destination directory,
//! flushed and synced. Only when every one is staged are they renamed into place. An
//! artifact left by an earlier run is moved aside first and restored if a later rename
//! fails, so a failure leaves the previous set exactly as it was.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::{NamedTempFile, TempPath};

use crate::error::{Error, Result};
use crate::render::{Artifact, RenderedOutputs};
use crate::scratch::ScratchDirs;

const STAGE_PREFIX: &str = ".git2md-";

/// An artifact renamed into place, with the file it replaced.
struct Placed {
    target: PathBuf,
    previous: Option<TempPath>,
}

/// Writes `README.md`, `structure.mmd` and `llms.txt` into `dir`, creating it if needed.
///
/// Staged files are registered with `scratch` so an interrupt can remove them.
/// Returns the paths written, in [`Artifact::ALL`] order.
pub fn write_outputs(
    dir: &Path,
    outputs: &RenderedOutputs,
    scratch: &ScratchDirs,
) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir).map_err(|e| Error::write(dir, e))?;

    let mut staged = Vec::with_capacity(Artifact::ALL.len());
    for (artifact, content) in outputs.iter() {
        let target = dir.join(artifact.file_name());
        let file = stage(dir, content).map_err(|e| Error::write(&target, e))?;
        scratch.track(file.path());
        staged.push((file, target));
    }

    let mut placed: Vec<Placed> = Vec::with_capacity(staged.len());
    for (file, target) in staged {
        let previous = match set_aside(dir, &target) {
            Ok(previous) => previous,
            Err(e) => {
                roll_back(placed);
                return Err(Error::write(target, e));
            }
        };
        if let Err(e) = file.persist(&target) {
            if let Some(previous) = previous {
                let _ = previous.persist(&target);
            }
            roll_back(placed);
            return Err(Error::write(target, e.error));
        }
        placed.push(Placed { target, previous });
    }

    Ok(placed.into_iter().map(|p| p.target).collect())
}

fn stage(dir: &Path, content: &str) -> std::io::Result<NamedTempFile> {
    let mut file = tempfile::Builder::new()
        .prefix(STAGE_PREFIX)
        .suffix(".tmp")
        .tempfile_in(dir)?;
    file.write_all(content.as_bytes())?;
    file.flush()?;
    file.as_file().sync_all()?;
    Ok(file)
}

/// Moves an existing regular file at `target` to a backup path that is deleted on drop.
fn set_aside(dir: &Path, target: &Path) -> std::io::Result<Option<TempPath>> {
    match fs::symlink_metadata(target) {
        Ok(meta) if meta.is_file() => {}
        _ => return Ok(None),
    }
    let backup = tempfile::Builder::new()
        .prefix(STAGE_PREFIX)
        .suffix(".bak")
        .tempfile_in(dir)?
        .into_temp_path();
    fs::rename(target, &backup)?;
    Ok(Some(backup))
}

/// Undoes the renames of this call, newest first.
fn roll_back(placed: Vec<Placed>) {
    for Placed { target, previous } in placed.into_iter().rev() {
        match previous {
            Some(previous) => {
                let _ = previous.persist(&target);
            }
            None => {
                let _ = fs::remove_file(&target);
            }
        }
    }
}
