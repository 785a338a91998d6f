//! Codestrip Engine
//!
//! Deletes code guarded by excluded features or macros from a source tree.
//! Works on raw byte lines and marker substrings only; no target language is
//! parsed and no encoding is assumed.
//!
//! ## Modules
//!
//! - `marker` - start/end marker classification of a single line
//! - `remover` - guarded block removal with `#else` branch inversion
//! - `wrapper` - removal of negated wrapper lines, keeping their body
//! - `syntax` - marker pairs and file suffixes per syntax family
//! - `walker` - recursive file enumeration by suffix
//! - `prune` - deletion of configured files and folders
//! - `pipeline` - per-file orchestration and run reporting

pub mod marker;
pub mod pipeline;
pub mod prune;
pub mod remover;
pub mod syntax;
pub mod walker;
pub mod wrapper;

pub use pipeline::{FileFailure, Orchestrator, RunReport};
pub use remover::strip_blocks;
pub use syntax::{Pass, SyntaxAdapter};
pub use wrapper::strip_wrappers;

use codestrip_core::{MarkerPair, MatchMode};
use std::fmt;

/// Kind of a non-fatal finding during a pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// Start marker seen while a block was already open
    DuplicateStart,
    /// Negated start marker seen while a wrapper was already open
    DuplicateWrapper,
}

/// A non-fatal finding, tied to a 1-based line of the pass input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Diagnostic {
    pub line: usize,
    pub kind: DiagnosticKind,
}

impl Diagnostic {
    pub fn new(line: usize, kind: DiagnosticKind) -> Self {
        Self { line, kind }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            DiagnosticKind::DuplicateStart => write!(f, "line {}: duplicated start tag", self.line),
            DiagnosticKind::DuplicateWrapper => {
                write!(f, "line {}: duplicated negated start tag", self.line)
            }
        }
    }
}

/// Output of a pass over one line buffer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stripped {
    /// Lines kept as raw bytes, terminators included when the input had them
    pub lines: Vec<Vec<u8>>,
    /// Findings reported along the way
    pub diagnostics: Vec<Diagnostic>,
}

/// Full pipeline for one marker pair: block removal, then, when the start
/// marker has a negated form, removal of the negated wrappers.
pub fn strip_guarded<S: AsRef<[u8]>>(lines: &[S], pair: &MarkerPair, mode: MatchMode) -> Stripped {
    let mut stripped = strip_blocks(lines, pair, mode);

    if let Some(wrapper) = pair.negated() {
        let unwrapped = strip_wrappers(&stripped.lines, &wrapper, mode);
        stripped.lines = unwrapped.lines;
        stripped.diagnostics.extend(unwrapped.diagnostics);
    }

    stripped
}

/// Split file content into lines, each keeping its terminator.
///
/// No decoding happens: files in any ASCII-compatible encoding are handled.
pub fn split_lines(content: &[u8]) -> Vec<&[u8]> {
    content.split_inclusive(|b| *b == b'\n').collect()
}

#[cfg(test)]
pub(crate) fn text(lines: &[Vec<u8>]) -> Vec<String> {
    lines
        .iter()
        .map(|line| String::from_utf8_lossy(line).into_owned())
        .collect()
}

#[cfg(test)]
mod tests;
