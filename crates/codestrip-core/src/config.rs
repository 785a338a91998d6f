//! Configuration types

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::warn;

use crate::types::MatchMode;

/// Suffixes scanned for custom tags and `#ifdef` blocks when the
/// configuration does not name any
pub const DEFAULT_FILE_APPENDIX: &[&str] =
    &[".h", ".hh", ".hpp", ".c", ".cc", ".cpp", ".cxx", ".java"];

/// Exclusion configuration, read from a YAML file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ExclusionConfig {
    /// File name suffixes for source files
    #[serde(default)]
    pub file_appendix: Vec<String>,

    /// Glob patterns, relative to the root, of files to delete
    #[serde(default)]
    pub files: Vec<String>,

    /// Folders, relative to the root, to delete recursively
    #[serde(default)]
    pub folders: Vec<String>,

    /// Names stripped via `NAME_S` / `NAME_E` tags
    #[serde(default)]
    pub features: Vec<String>,

    /// Macro names stripped from sources, Makefile.am and CMake files
    #[serde(default)]
    pub ifdefs: Vec<String>,

    /// Keys this tool does not use; kept so shared exclusion files still load
    #[serde(flatten)]
    pub unknown: BTreeMap<String, serde_yaml::Value>,
}

impl ExclusionConfig {
    /// Load configuration from a YAML file
    pub fn load_yaml<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Parse and validate configuration from YAML text
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        // An empty document deserializes as unit, not as an empty mapping
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let mut config: ExclusionConfig = serde_yaml::from_str(content)?;
        for key in config.unknown.keys() {
            warn!("Ignoring unknown configuration key {}", key);
        }
        config.normalize()?;
        Ok(config)
    }

    fn normalize(&mut self) -> Result<()> {
        for (key, names) in [("Features", &mut self.features), ("Ifdefs", &mut self.ifdefs)] {
            for name in names.iter_mut() {
                let trimmed = name.trim();
                if trimmed.is_empty() {
                    return Err(Error::Config(format!("empty name in {}", key)));
                }
                *name = trimmed.to_string();
            }
        }
        if self.file_appendix.iter().any(|s| s.is_empty()) {
            return Err(Error::Config("empty suffix in FileAppendix".into()));
        }
        Ok(())
    }

    /// Suffixes used for the custom tag and preprocessor families
    pub fn source_suffixes(&self) -> Vec<String> {
        if self.file_appendix.is_empty() {
            DEFAULT_FILE_APPENDIX.iter().map(|s| s.to_string()).collect()
        } else {
            self.file_appendix.clone()
        }
    }

    /// Whether the configuration asks for anything at all
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
            && self.folders.is_empty()
            && self.features.is_empty()
            && self.ifdefs.is_empty()
    }
}

/// Runtime options for a strip run
#[derive(Debug, Clone, Default)]
pub struct StripOptions {
    /// How marker lines are recognized
    pub match_mode: MatchMode,

    /// Process the files of one pass on the rayon pool
    pub parallel: bool,

    /// Descend into symlinked directories (loops are detected and skipped)
    pub follow_symlinks: bool,

    /// Compute everything but write and delete nothing
    pub dry_run: bool,
}

/// Refuse a root that is empty or made only of `/` characters.
pub fn guard_root(root: &str) -> Result<()> {
    let root = root.trim();
    if root.chars().all(|c| c == '/') {
        return Err(Error::RootGuard(root.to_string()));
    }
    Ok(())
}
