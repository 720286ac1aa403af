//! End-to-end "repository → documentation" pipeline orchestrator.
//!
//! [`DocProcessor`] runs the four stages in strict sequence:
//! - resolves the source through a concrete [`crate::sources::Source`],
//! - enumerates the snapshot into a [`FileSet`],
//! - renders `README.md`, `structure.mmd` and `llms.txt`,
//! - and writes them atomically into the output directory.
//!
//! A cloned snapshot is removed when the processor returns, whether or not it succeeded.

use console::{style, Emoji};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::config::Config;
use crate::enumerator;
use crate::error::Result;
use crate::file_set::{format_size, FileSet};
use crate::git;
use crate::notifier::Notifier;
use crate::render::{self, Project};
use crate::scratch::ScratchDirs;
use crate::sources::Source;
use crate::writer;

static SPARK: Emoji<'_, '_> = Emoji("✨ ", "");
static CHART: Emoji<'_, '_> = Emoji("📊 ", "");

/// Outcome of a successful conversion.
#[derive(Debug, Clone)]
pub struct Report {
    pub project: Project,
    pub files: FileSet,
    pub written: Vec<PathBuf>,
    pub elapsed: Duration,
}

impl Report {
    /// Human-readable statistics block printed after a run.
    pub fn summary(&self) -> String {
        let stats = self.files.stats();
        let mut lines = vec![
            format!("{}{}", CHART, style("Repository Statistics:").cyan()),
            format!("• Total files: {}", stats.total_files),
            format!("• Text files: {}", stats.text_files),
            format!("• Binary files: {}", stats.binary_files),
        ];
        if stats.skipped_files > 0 {
            lines.push(format!("• Skipped (too large): {}", stats.skipped_files));
        }
        if stats.unreadable_files > 0 {
            lines.push(format!("• Unreadable: {}", stats.unreadable_files));
        }
        lines.push(format!("• Total lines: {}", stats.total_lines));
        lines.push(format!("• Total size: {}", format_size(stats.total_size)));
        lines.push(format!(
            "• Processing time: {:.2} seconds",
            self.elapsed.as_secs_f64()
        ));
        lines.push(String::new());

        let out_dir = self
            .written
            .first()
            .and_then(|p| p.parent())
            .map(|p| p.display().to_string())
            .unwrap_or_default();
        lines.push(format!(
            "{}{}",
            SPARK,
            style(format!("Files generated successfully in {}:", out_dir)).green()
        ));
        for path in &self.written {
            if let Some(name) = path.file_name() {
                lines.push(format!("• {}", name.to_string_lossy()));
            }
        }
        lines.join("\n")
    }
}

/// Orchestrates the documentation pipeline for a concrete [`Source`].
///
/// The processor holds no state between runs; reuse it for several configs with the
/// same source type.
pub struct DocProcessor<S: Source> {
    source: S,
    notifier: Notifier,
    scratch: ScratchDirs,
}

impl<S: Source> DocProcessor<S> {
    pub fn new(source: S, notifier: Notifier) -> Self {
        Self {
            source,
            notifier,
            scratch: ScratchDirs::new(),
        }
    }

    /// Registers staged output files with `scratch` so an interrupt handler can remove them.
    pub fn with_scratch(mut self, scratch: ScratchDirs) -> Self {
        self.scratch = scratch;
        self
    }

    /// Runs resolve → enumerate → render → write.
    ///
    /// # Errors
    /// - [`crate::Error::SourceUnavailable`] / [`crate::Error::AuthenticationFailed`] when
    ///   the source cannot be resolved. Nothing is written in that case.
    /// - [`crate::Error::Write`] when the artifacts cannot be written.
    ///
    /// Unreadable files are not errors; they are reported in the returned [`FileSet`].
    pub fn convert(&self, config: &Config) -> Result<Report> {
        let result = self.run(config);
        if result.is_err() {
            self.notifier.clear();
        }
        result
    }

    fn run(&self, config: &Config) -> Result<Report> {
        let started = Instant::now();
        let project_name = config.source.project_name();
        self.notifier.info(&format!(
            "Starting conversion of {} with {} source",
            project_name,
            self.source.name()
        ));
        self.notifier
            .debug(&format!("Output directory: {}", config.output_dir.display()));

        let resolved = self.source.resolve(&config.source, &self.notifier)?;

        self.notifier.info("Analyzing repository structure...");
        let mut scan = config.scan.clone();
        if let Some(relative) = nested_output_dir(resolved.root(), &config.output_dir) {
            self.notifier.debug(&format!(
                "Excluding output directory {} from the scan",
                relative.display()
            ));
            scan.excluded_paths.push(relative);
        }
        let files = enumerator::enumerate(resolved.root(), &scan, &self.notifier);
        self.notifier.debug(&format!(
            "Enumerated {} ({} warnings)",
            files.stats().headline(),
            files.all_warnings().count()
        ));

        let project = Project::new(project_name).with_revision(git::revision_of(resolved.root()));
        if let Some(revision) = &project.revision {
            self.notifier.debug(&format!("Revision: {}", revision));
        }

        self.notifier.info("Generating documentation...");
        let outputs = render::render(&project, &files);

        self.notifier.info(&format!(
            "Writing documentation to {}...",
            config.output_dir.display()
        ));
        let written = writer::write_outputs(&config.output_dir, &outputs, &self.scratch)?;

        drop(resolved);
        self.notifier.finish(&format!(
            "Generated {} files in {}",
            written.len(),
            config.output_dir.display()
        ));

        Ok(Report {
            project,
            files,
            written,
            elapsed: started.elapsed(),
        })
    }
}

/// Path of `output_dir` relative to `root` when it lies inside the source tree.
fn nested_output_dir(root: &Path, output_dir: &Path) -> Option<PathBuf> {
    let root = root.canonicalize().ok()?;
    let output = absolute_lexical(output_dir)?;
    let relative = output.strip_prefix(&root).ok()?;
    if relative.as_os_str().is_empty() {
        None
    } else {
        Some(relative.to_path_buf())
    }
}

/// Absolute form of a possibly not yet existing path, resolving the longest existing
/// ancestor so that symlinked temp dirs compare equal to canonical roots.
fn absolute_lexical(path: &Path) -> Option<PathBuf> {
    let absolute = std::path::absolute(path).ok()?;
    let mut existing = absolute.as_path();
    let mut rest = Vec::new();
    loop {
        if let Ok(canonical) = existing.canonicalize() {
            let mut result = canonical;
            for part in rest.iter().rev() {
                result.push(part);
            }
            return Some(result);
        }
        rest.push(existing.file_name()?.to_os_string());
        existing = existing.parent()?;
    }
}
