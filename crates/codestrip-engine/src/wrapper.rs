//! Negated wrapper removal
//!
//! Second pass over the output of [`crate::remover`]. Only the negated start
//! line and its closing marker are dropped; every line between them is kept,
//! since the branch they guard is meant to survive unconditionally.
//!
//! The end marker is a plain substring test, so an unrelated terminator inside
//! the wrapper body (a second `#endif` from another conditional) is taken as
//! the wrapper's own end.

use crate::marker::{classify, Marker};
use crate::{Diagnostic, DiagnosticKind, Stripped};
use codestrip_core::{MarkerPair, MatchMode};

/// Drop the wrapper lines of every block delimited by `wrapper`, keeping bodies.
pub fn strip_wrappers<S: AsRef<[u8]>>(lines: &[S], wrapper: &MarkerPair, mode: MatchMode) -> Stripped {
    let mut kept = Vec::with_capacity(lines.len());
    let mut diagnostics = Vec::new();
    let mut inside = false;

    for (idx, line) in lines.iter().enumerate() {
        let line = line.as_ref();

        match classify(line, wrapper, mode) {
            Marker::Start => {
                if inside {
                    diagnostics.push(Diagnostic::new(idx + 1, DiagnosticKind::DuplicateWrapper));
                }
                inside = true;
            }
            Marker::End if inside => inside = false,
            Marker::End | Marker::None => kept.push(line.to_vec()),
        }
    }

    Stripped {
        lines: kept,
        diagnostics,
    }
}
