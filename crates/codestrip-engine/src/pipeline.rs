//! Run orchestration
//!
//! For every configured feature and macro, enumerates the files of each syntax
//! family, strips them and writes them back in place. Files are independent,
//! so a pass can run on the rayon pool without changing the result.

use crate::prune::{PruneOutcome, Pruner};
use crate::syntax::{Pass, SyntaxAdapter};
use crate::walker::TreeWalker;
use crate::{split_lines, strip_guarded, Diagnostic};
use codestrip_core::{Error, ExclusionConfig, Result, StripOptions};
use rayon::prelude::*;
use std::fmt;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

/// A path that could not be processed; the run went on without it
#[derive(Debug)]
pub struct FileFailure {
    pub path: PathBuf,
    pub error: Error,
}

/// Totals of a run over one or more roots
#[derive(Debug, Default)]
pub struct RunReport {
    /// Files read, counted once per pass
    pub files_scanned: usize,
    /// Files whose content changed, counted once per pass
    pub files_changed: usize,
    pub files_deleted: usize,
    pub folders_deleted: usize,
    /// Duplicate start tags seen
    pub warnings: usize,
    pub failures: Vec<FileFailure>,
}

impl RunReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Fold another report into this one
    pub fn merge(&mut self, other: RunReport) {
        self.files_scanned += other.files_scanned;
        self.files_changed += other.files_changed;
        self.files_deleted += other.files_deleted;
        self.folders_deleted += other.folders_deleted;
        self.warnings += other.warnings;
        self.failures.extend(other.failures);
    }

    fn record_prune(&mut self, outcome: PruneOutcome, folders: bool) {
        if folders {
            self.folders_deleted += outcome.deleted.len();
        } else {
            self.files_deleted += outcome.deleted.len();
        }
        self.failures.extend(
            outcome
                .failures
                .into_iter()
                .map(|(path, error)| FileFailure { path, error }),
        );
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} scanned, {} changed, {} files and {} folders deleted, {} warnings, {} failures",
            self.files_scanned,
            self.files_changed,
            self.files_deleted,
            self.folders_deleted,
            self.warnings,
            self.failures.len()
        )
    }
}

/// Result of one pass over one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileResult {
    pub changed: bool,
    pub diagnostics: Vec<Diagnostic>,
}

/// Applies an exclusion configuration to source trees
#[derive(Debug)]
pub struct Orchestrator {
    config: ExclusionConfig,
    adapter: SyntaxAdapter,
    pruner: Pruner,
    walker: TreeWalker,
    options: StripOptions,
}

impl Orchestrator {
    /// Prepare a run. Fails on invalid glob patterns, before anything is touched.
    pub fn new(config: ExclusionConfig, options: StripOptions) -> Result<Self> {
        let pruner = Pruner::new(&config.files, &config.folders)?;
        Ok(Self {
            adapter: SyntaxAdapter::from_config(&config),
            walker: TreeWalker::new(options.follow_symlinks),
            pruner,
            config,
            options,
        })
    }

    pub fn options(&self) -> &StripOptions {
        &self.options
    }

    /// Apply the whole configuration to one root: Files, Folders, Features,
    /// then Ifdefs.
    pub fn run(&self, root: &Path) -> RunReport {
        info!("Processing {}", root.display());
        let mut report = RunReport::default();

        report.record_prune(self.pruner.delete_files(root, self.options.dry_run), false);
        report.record_prune(self.pruner.delete_folders(root, self.options.dry_run), true);

        for name in &self.config.features {
            info!("start processing {}", name);
            for pass in self.adapter.feature_passes(name) {
                self.run_pass(&pass, root, &mut report);
            }
        }

        for name in &self.config.ifdefs {
            info!("start processing {}", name);
            for pass in self.adapter.ifdef_passes(name) {
                self.run_pass(&pass, root, &mut report);
            }
        }

        report
    }

    /// Strip one (name, family) pass from every matching file under `root`
    pub fn run_pass(&self, pass: &Pass, root: &Path, report: &mut RunReport) {
        let files = self.walker.find_files(root, &pass.suffixes);
        debug!(
            "{} pass for {}: {} candidate files",
            pass.family,
            pass.name,
            files.len()
        );

        let results: Vec<(PathBuf, Result<FileResult>)> = if self.options.parallel {
            files
                .into_par_iter()
                .map(|path| {
                    let result = self.strip_file(&path, pass);
                    (path, result)
                })
                .collect()
        } else {
            files
                .into_iter()
                .map(|path| {
                    let result = self.strip_file(&path, pass);
                    (path, result)
                })
                .collect()
        };

        for (path, result) in results {
            report.files_scanned += 1;
            match result {
                Ok(file) => {
                    for diagnostic in &file.diagnostics {
                        warn!("{}: {} ({})", path.display(), diagnostic, pass.pair.start);
                    }
                    report.warnings += file.diagnostics.len();
                    if file.changed {
                        debug!("Stripped {} from {}", pass.name, path.display());
                        report.files_changed += 1;
                    }
                }
                Err(error) => {
                    warn!("Failed to process {}: {}", path.display(), error);
                    report.failures.push(FileFailure { path, error });
                }
            }
        }
    }

    /// Read one file whole, strip it, and write it back if it changed
    pub fn strip_file(&self, path: &Path, pass: &Pass) -> Result<FileResult> {
        let content = std::fs::read(path)?;

        let stripped = strip_guarded(&split_lines(&content), &pass.pair, self.options.match_mode);
        let output = stripped.lines.concat();
        let changed = output != content;

        if changed && !self.options.dry_run {
            replace_file(path, &output)?;
        }

        Ok(FileResult {
            changed,
            diagnostics: stripped.diagnostics,
        })
    }
}

/// Replace a file's content through a temporary sibling and a rename, so the
/// file holds either the old or the new content, never a partial write.
/// Symlinks are written through to their target; permissions are kept.
fn replace_file(path: &Path, content: &[u8]) -> Result<()> {
    let target = if path.is_symlink() {
        std::fs::canonicalize(path)?
    } else {
        path.to_path_buf()
    };
    let dir = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let permissions = std::fs::metadata(&target)?.permissions();

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.as_file().set_permissions(permissions)?;
    tmp.persist(&target).map_err(|err| err.error)?;
    Ok(())
}
