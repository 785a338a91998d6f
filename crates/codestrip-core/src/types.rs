//! Core type definitions

use serde::{Deserialize, Serialize};
use std::fmt;

/// The literal substrings that open and close a guarded region
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MarkerPair {
    /// Opening marker (e.g. `#ifdef FOO`)
    pub start: String,
    /// Closing marker (e.g. `#endif`)
    pub end: String,
}

impl MarkerPair {
    /// Create a marker pair
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    /// Keyword that starts the alternative branch of this block, if the
    /// start marker is a conditional that has one.
    ///
    /// CMake `if (X)` blocks are removed wholesale and have no branch here.
    pub fn else_keyword(&self) -> Option<&'static str> {
        if self.start.starts_with("#ifdef") {
            Some("#else")
        } else if self.start.starts_with("if ") && !self.start.starts_with("if (") {
            Some("else")
        } else {
            None
        }
    }

    /// Start marker with its leading keyword swapped for the negated form.
    ///
    /// `#ifdef X` -> `#ifndef X`, `if (X)` -> `if (NOT X)`, `if X` -> `if NOT X`.
    pub fn negated_start(&self) -> Option<String> {
        if let Some(rest) = self.start.strip_prefix("#ifdef") {
            Some(format!("#ifndef{}", rest))
        } else if let Some(rest) = self.start.strip_prefix("if (") {
            Some(format!("if (NOT {}", rest))
        } else {
            self.start
                .strip_prefix("if ")
                .map(|rest| format!("if NOT {}", rest))
        }
    }

    /// The wrapper pair a second pass unwraps: negated start, same end.
    pub fn negated(&self) -> Option<MarkerPair> {
        self.negated_start()
            .map(|start| MarkerPair::new(start, self.end.clone()))
    }
}

impl fmt::Display for MarkerPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} .. {}", self.start, self.end)
    }
}

/// Marker convention a guarded block is written in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SyntaxFamily {
    /// `NAME_S` / `NAME_E` tags
    CustomTag,
    /// `#ifdef NAME` / `#endif`
    Preprocessor,
    /// Makefile.am `if NAME` / `endif #NAME`
    Makefile,
    /// CMake `if (NAME)` / `endif() #NAME`
    CMake,
}

impl SyntaxFamily {
    pub fn name(&self) -> &'static str {
        match self {
            SyntaxFamily::CustomTag => "custom tag",
            SyntaxFamily::Preprocessor => "preprocessor",
            SyntaxFamily::Makefile => "makefile",
            SyntaxFamily::CMake => "cmake",
        }
    }
}

impl fmt::Display for SyntaxFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How a line is tested against a marker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MatchMode {
    /// Plain substring containment anywhere in the line
    #[default]
    Substring,
    /// Marker must open the line and end on an identifier boundary;
    /// comment lines never match
    Directive,
}
