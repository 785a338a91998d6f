//! Tree walking
//!
//! Enumerates regular files under a root whose names end with one of a set of
//! suffixes.

use std::path::{Path, PathBuf};
use tracing::warn;
use walkdir::WalkDir;

/// Recursive file enumerator
#[derive(Debug, Clone, Copy, Default)]
pub struct TreeWalker {
    follow_symlinks: bool,
}

impl TreeWalker {
    pub fn new(follow_symlinks: bool) -> Self {
        Self { follow_symlinks }
    }

    /// Every regular file under `root` whose name ends with one of `suffixes`.
    ///
    /// Symlinks to regular files count as files. Unreadable directories and
    /// symlink loops are logged and skipped.
    pub fn find_files(&self, root: &Path, suffixes: &[String]) -> Vec<PathBuf> {
        WalkDir::new(root)
            .follow_links(self.follow_symlinks)
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(err) => {
                    warn!("Skipping unreadable entry: {}", err);
                    None
                }
            })
            .filter(|e| e.file_type().is_file() || (e.path_is_symlink() && e.path().is_file()))
            .filter(|e| has_suffix(&e.file_name().to_string_lossy(), suffixes))
            .map(|e| e.into_path())
            .collect()
    }
}

/// Whether a file name ends with any of `suffixes`
pub fn has_suffix(name: &str, suffixes: &[String]) -> bool {
    suffixes.iter().any(|s| name.ends_with(s.as_str()))
}
