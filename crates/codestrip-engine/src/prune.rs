//! File and folder pruning
//!
//! Deletes the `Files` globs and `Folders` entries of an exclusion
//! configuration. Missing targets are warnings, removal failures are collected
//! per path.

use codestrip_core::{Error, Result};
use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use std::path::{Component, Path, PathBuf};
use tracing::{info, warn};
use walkdir::WalkDir;

/// What a prune step removed, or failed to
#[derive(Debug, Default)]
pub struct PruneOutcome {
    pub deleted: Vec<PathBuf>,
    pub failures: Vec<(PathBuf, Error)>,
}

/// Compiled `Files` patterns plus the `Folders` list
#[derive(Debug)]
pub struct Pruner {
    patterns: Vec<String>,
    glob_set: GlobSet,
    folders: Vec<String>,
}

impl Pruner {
    /// Compile the glob patterns. An invalid pattern is a configuration error.
    pub fn new(files: &[String], folders: &[String]) -> Result<Self> {
        let mut builder = GlobSetBuilder::new();
        let mut patterns = Vec::with_capacity(files.len());

        for pattern in files {
            let pattern = pattern.trim().trim_start_matches("./");
            let glob = GlobBuilder::new(pattern).literal_separator(true).build()?;
            builder.add(glob);
            patterns.push(pattern.to_string());
        }

        Ok(Self {
            patterns,
            glob_set: builder.build()?,
            folders: folders.to_vec(),
        })
    }

    /// Delete every regular file under `root` matched by a pattern
    pub fn delete_files(&self, root: &Path, dry_run: bool) -> PruneOutcome {
        let mut outcome = PruneOutcome::default();
        if self.patterns.is_empty() {
            return outcome;
        }

        let mut hits = vec![false; self.patterns.len()];
        let mut targets = Vec::new();

        for entry in WalkDir::new(root).min_depth(1) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    warn!("Skipping unreadable entry: {}", err);
                    continue;
                }
            };
            let Ok(relative) = entry.path().strip_prefix(root) else {
                continue;
            };
            let matched = self.glob_set.matches(relative);
            if matched.is_empty() {
                continue;
            }
            for idx in &matched {
                hits[*idx] = true;
            }
            if entry.file_type().is_dir() {
                warn!("{} matches a file pattern but is a directory, not deleting", entry.path().display());
            } else {
                targets.push(entry.into_path());
            }
        }

        for (pattern, hit) in self.patterns.iter().zip(&hits) {
            if !hit {
                warn!("No file matches {}", pattern);
            }
        }

        for path in targets {
            info!("Start delete {}", path.display());
            if dry_run {
                outcome.deleted.push(path);
                continue;
            }
            match std::fs::remove_file(&path) {
                Ok(()) => outcome.deleted.push(path),
                Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                    warn!("{} disappeared before deletion", path.display());
                }
                Err(err) => outcome.failures.push((path, err.into())),
            }
        }

        outcome
    }

    /// Recursively delete each configured folder under `root`
    pub fn delete_folders(&self, root: &Path, dry_run: bool) -> PruneOutcome {
        let mut outcome = PruneOutcome::default();

        for folder in &self.folders {
            let relative = Path::new(folder.trim());
            if escapes_root(relative) {
                warn!("Folder {} is outside the root, not deleting", folder);
                continue;
            }

            let path = root.join(relative);
            if !path.exists() {
                warn!("Folder {} does not exist", path.display());
                continue;
            }
            if !path.is_dir() {
                warn!("{} is not a folder, not deleting", path.display());
                continue;
            }

            info!("Start delete {}", path.display());
            if dry_run {
                outcome.deleted.push(path);
                continue;
            }
            match std::fs::remove_dir_all(&path) {
                Ok(()) => outcome.deleted.push(path),
                Err(err) => outcome.failures.push((path, err.into())),
            }
        }

        outcome
    }
}

/// Absolute paths, `..` components and the empty path all reach outside the
/// folder they are joined to (or name it entirely).
fn escapes_root(relative: &Path) -> bool {
    relative.as_os_str().is_empty()
        || relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir))
        || relative.components().all(|c| matches!(c, Component::CurDir))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn strings(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, "x").unwrap();
    }

    #[test]
    fn test_delete_files_by_glob() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "src/a/Android.cpp");
        touch(dir.path(), "src/b/c/AndroidUtil.cpp");
        touch(dir.path(), "src/keep.cpp");
        touch(dir.path(), "Android.mk");

        let pruner = Pruner::new(&strings(&["src/**/Android*.cpp", "*.mk"]), &[]).unwrap();
        let outcome = pruner.delete_files(dir.path(), false);

        assert_eq!(outcome.deleted.len(), 3);
        assert!(outcome.failures.is_empty());
        assert!(!dir.path().join("src/a/Android.cpp").exists());
        assert!(!dir.path().join("src/b/c/AndroidUtil.cpp").exists());
        assert!(!dir.path().join("Android.mk").exists());
        assert!(dir.path().join("src/keep.cpp").exists());
    }

    #[test]
    fn test_single_star_stays_in_one_directory() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "a/x.c");
        touch(dir.path(), "a/b/y.c");

        let pruner = Pruner::new(&strings(&["a/*.c"]), &[]).unwrap();
        let outcome = pruner.delete_files(dir.path(), false);

        assert_eq!(outcome.deleted, vec![dir.path().join("a/x.c")]);
        assert!(dir.path().join("a/b/y.c").exists());
    }

    #[test]
    fn test_dry_run_deletes_nothing() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "gone.c");
        touch(dir.path(), "old/f.c");

        let pruner = Pruner::new(&strings(&["gone.c"]), &strings(&["old"])).unwrap();
        assert_eq!(pruner.delete_files(dir.path(), true).deleted.len(), 1);
        assert_eq!(pruner.delete_folders(dir.path(), true).deleted.len(), 1);
        assert!(dir.path().join("gone.c").exists());
        assert!(dir.path().join("old/f.c").exists());
    }

    #[test]
    fn test_delete_folders() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "halv1/x/y.cpp");
        touch(dir.path(), "keep/z.cpp");

        let pruner = Pruner::new(&[], &strings(&["halv1", "missing", "../keep", "/"])).unwrap();
        let outcome = pruner.delete_folders(dir.path(), false);

        assert_eq!(outcome.deleted, vec![dir.path().join("halv1")]);
        assert!(outcome.failures.is_empty());
        assert!(!dir.path().join("halv1").exists());
        assert!(dir.path().join("keep/z.cpp").exists());
    }

    #[test]
    fn test_escapes_root() {
        assert!(escapes_root(Path::new("")));
        assert!(escapes_root(Path::new(".")));
        assert!(escapes_root(Path::new("../x")));
        assert!(escapes_root(Path::new("/etc")));
        assert!(!escapes_root(Path::new("a/b")));
        assert!(!escapes_root(Path::new("./a")));
    }

    #[test]
    fn test_invalid_glob_is_error() {
        assert!(matches!(
            Pruner::new(&strings(&["src/[a"]), &[]),
            Err(Error::Glob(_))
        ));
    }
}
