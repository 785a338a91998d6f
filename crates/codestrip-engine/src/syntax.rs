//! Syntax families
//!
//! Maps a feature or macro name to the concrete marker strings of each
//! supported file family, and to the file suffixes that family lives in.

use codestrip_core::{ExclusionConfig, MarkerPair, SyntaxFamily};

/// Suffixes of Makefile.am files
pub const MAKEFILE_SUFFIXES: &[&str] = &[".am"];

/// Suffixes of CMake files (`CMakeLists.txt`, `*.cmake`)
pub const CMAKE_SUFFIXES: &[&str] = &[".txt", ".cmake"];

/// Marker pair guarding `name` in the given family
pub fn marker_pair(family: SyntaxFamily, name: &str) -> MarkerPair {
    match family {
        SyntaxFamily::CustomTag => MarkerPair::new(format!("{}_S", name), format!("{}_E", name)),
        SyntaxFamily::Preprocessor => MarkerPair::new(format!("#ifdef {}", name), "#endif"),
        SyntaxFamily::Makefile => {
            MarkerPair::new(format!("if {}", name), format!("endif #{}", name))
        }
        SyntaxFamily::CMake => {
            MarkerPair::new(format!("if ({})", name), format!("endif() #{}", name))
        }
    }
}

/// One (name, family) stripping pass over a tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pass {
    pub name: String,
    pub family: SyntaxFamily,
    pub pair: MarkerPair,
    pub suffixes: Vec<String>,
}

/// Derives passes for features and ifdefs
#[derive(Debug, Clone)]
pub struct SyntaxAdapter {
    source_suffixes: Vec<String>,
}

impl SyntaxAdapter {
    /// Create an adapter scanning `source_suffixes` for custom tags and `#ifdef`
    pub fn new(source_suffixes: Vec<String>) -> Self {
        Self { source_suffixes }
    }

    pub fn from_config(config: &ExclusionConfig) -> Self {
        Self::new(config.source_suffixes())
    }

    /// File suffixes a family applies to
    pub fn suffixes(&self, family: SyntaxFamily) -> Vec<String> {
        match family {
            SyntaxFamily::CustomTag | SyntaxFamily::Preprocessor => self.source_suffixes.clone(),
            SyntaxFamily::Makefile => MAKEFILE_SUFFIXES.iter().map(|s| s.to_string()).collect(),
            SyntaxFamily::CMake => CMAKE_SUFFIXES.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn pass(&self, name: &str, family: SyntaxFamily) -> Pass {
        Pass {
            name: name.to_string(),
            family,
            pair: marker_pair(family, name),
            suffixes: self.suffixes(family),
        }
    }

    /// Passes for an entry of `Features`
    pub fn feature_passes(&self, name: &str) -> Vec<Pass> {
        vec![self.pass(name, SyntaxFamily::CustomTag)]
    }

    /// Passes for an entry of `Ifdefs`, in the order they run
    pub fn ifdef_passes(&self, name: &str) -> Vec<Pass> {
        [SyntaxFamily::Preprocessor, SyntaxFamily::Makefile, SyntaxFamily::CMake]
            .into_iter()
            .map(|family| self.pass(name, family))
            .collect()
    }
}
