//! Marker line classification
//!
//! Decides whether a line opens or closes a guarded block. Lines are raw
//! bytes; matching works on the whitespace-trimmed line and never looks at
//! lexical context or encoding.

use codestrip_core::{MarkerPair, MatchMode};

/// What a line is with respect to one marker pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    Start,
    End,
    None,
}

/// Classify a line against a marker pair.
///
/// The start marker is tested first, so a line containing both is a start.
pub fn classify(line: &[u8], pair: &MarkerPair, mode: MatchMode) -> Marker {
    let body = line.trim_ascii();
    if matches_marker(body, pair.start.as_bytes(), mode) {
        Marker::Start
    } else if matches_marker(body, pair.end.as_bytes(), mode) {
        Marker::End
    } else {
        Marker::None
    }
}

/// Whether a trimmed line opens the alternative branch named by `keyword`
pub fn opens_branch(body: &[u8], keyword: &str, mode: MatchMode) -> bool {
    match mode {
        MatchMode::Substring => body.starts_with(keyword.as_bytes()),
        MatchMode::Directive => starts_with_token(body, keyword.as_bytes()),
    }
}

fn matches_marker(body: &[u8], marker: &[u8], mode: MatchMode) -> bool {
    match mode {
        MatchMode::Substring => contains(body, marker),
        MatchMode::Directive => !is_comment(body) && starts_with_token(body, marker),
    }
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    if needle.is_empty() {
        return true;
    }
    haystack.windows(needle.len()).any(|window| window == needle)
}

fn starts_with_token(body: &[u8], token: &[u8]) -> bool {
    match body.strip_prefix(token) {
        Some(rest) => !rest
            .first()
            .is_some_and(|c| c.is_ascii_alphanumeric() || *c == b'_'),
        None => false,
    }
}

fn is_comment(body: &[u8]) -> bool {
    body.starts_with(b"//") || body.starts_with(b"/*") || body.starts_with(b"*")
}

/// Line terminator carried by a line (`"\r\n"`, `"\n"` or nothing)
pub fn line_ending(line: &[u8]) -> &[u8] {
    if line.ends_with(b"\r\n") {
        b"\r\n"
    } else if line.ends_with(b"\n") {
        b"\n"
    } else {
        b""
    }
}
