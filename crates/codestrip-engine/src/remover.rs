//! Guarded block removal
//!
//! Single forward pass that drops every line between a start marker and its
//! end marker. When the block has an `#else` / `else` branch, the branch line
//! is replaced by the negated start marker so that the surviving branch
//! becomes a negated block of its own, ready for [`crate::wrapper`] to unwrap.

use crate::marker::{classify, line_ending, opens_branch, Marker};
use crate::{Diagnostic, DiagnosticKind, Stripped};
use codestrip_core::{MarkerPair, MatchMode};

/// Remove every top-level guarded block delimited by `pair`.
///
/// Nesting of the same pair is not supported: a second start marker inside an
/// open block is reported and the block simply continues.
pub fn strip_blocks<S: AsRef<[u8]>>(lines: &[S], pair: &MarkerPair, mode: MatchMode) -> Stripped {
    let branch = pair.else_keyword().zip(pair.negated_start());

    let mut kept = Vec::with_capacity(lines.len());
    let mut diagnostics = Vec::new();
    // discarding lines of an open block
    let mut inside = false;

    for (idx, line) in lines.iter().enumerate() {
        let line = line.as_ref();

        match classify(line, pair, mode) {
            Marker::Start => {
                if inside {
                    diagnostics.push(Diagnostic::new(idx + 1, DiagnosticKind::DuplicateStart));
                }
                inside = true;
                continue;
            }
            Marker::End => {
                if inside {
                    inside = false;
                } else {
                    // foreign terminator
                    kept.push(line.to_vec());
                }
                continue;
            }
            Marker::None => {}
        }

        if inside {
            if let Some((keyword, negated)) = &branch {
                if opens_branch(line.trim_ascii(), keyword, mode) {
                    let mut synthetic = negated.as_bytes().to_vec();
                    synthetic.extend_from_slice(line_ending(line));
                    kept.push(synthetic);
                    inside = false;
                }
            }
            continue;
        }

        kept.push(line.to_vec());
    }

    Stripped {
        lines: kept,
        diagnostics,
    }
}
