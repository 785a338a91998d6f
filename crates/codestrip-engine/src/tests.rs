//! Scenario tests for the two-pass stripping pipeline
//!
//! These cover the block shapes found in real trees: plain feature tags,
//! `#ifdef`/`#else` pairs, Makefile.am conditionals and CMake guards.

use super::*;
use crate::syntax::marker_pair;
use codestrip_core::SyntaxFamily;
use pretty_assertions::assert_eq;

fn run(lines: &[&str], family: SyntaxFamily, name: &str) -> Vec<String> {
    text(&strip_guarded(lines, &marker_pair(family, name), MatchMode::Substring).lines)
}

#[test]
fn test_ifdef_else_keeps_else_branch() {
    let input = ["#ifdef FOO", "keep-a", "#else", "keep-b", "#endif", "tail"];
    assert_eq!(run(&input, SyntaxFamily::Preprocessor, "FOO"), vec!["keep-b", "tail"]);
}

#[test]
fn test_custom_tag_block_removed() {
    let input = ["FOO_S", "dead", "FOO_E", "alive"];
    assert_eq!(run(&input, SyntaxFamily::CustomTag, "FOO"), vec!["alive"]);
}

#[test]
fn test_minimal_ifdef_else_yields_else_body() {
    let input = ["#ifdef X", "A", "#else", "B", "#endif"];
    assert_eq!(run(&input, SyntaxFamily::Preprocessor, "X"), vec!["B"]);
}

#[test]
fn test_makefile_else_yields_else_body() {
    let input = ["if X", "A", "else", "B", "endif #X"];
    assert_eq!(run(&input, SyntaxFamily::Makefile, "X"), vec!["B"]);
}

#[test]
fn test_cmake_block_removed_wholesale() {
    let input = [
        "project(hal)",
        "if (ENABLE_RAW)",
        "  add_subdirectory(raw)",
        "endif() #ENABLE_RAW",
        "add_subdirectory(core)",
    ];
    assert_eq!(
        run(&input, SyntaxFamily::CMake, "ENABLE_RAW"),
        vec!["project(hal)", "add_subdirectory(core)"]
    );
}

#[test]
fn test_unmarked_input_is_identity() {
    let input = [
        "#include <stdio.h>\n",
        "#ifdef OTHER\n",
        "int x;\n",
        "#endif\n",
        "int main(void) { return 0; }",
    ];
    for family in [
        SyntaxFamily::CustomTag,
        SyntaxFamily::Preprocessor,
        SyntaxFamily::Makefile,
        SyntaxFamily::CMake,
    ] {
        assert_eq!(run(&input, family, "FOO"), input.to_vec());
    }
}

#[test]
fn test_only_block_lines_are_removed() {
    let input = ["a", "b", "FEATURE_S", "x", "y", "FEATURE_E", "c"];
    assert_eq!(run(&input, SyntaxFamily::CustomTag, "FEATURE"), vec!["a", "b", "c"]);
}

#[test]
fn test_dangling_end_marker_passes_through() {
    let input = ["x", "FOO_E", "y"];
    assert_eq!(run(&input, SyntaxFamily::CustomTag, "FOO"), vec!["x", "FOO_E", "y"]);
}

#[test]
fn test_pipeline_is_idempotent() {
    let cases: [(&[&str], SyntaxFamily); 4] = [
        (
            &["#ifdef FOO", "a", "#else", "b", "#endif", "#ifndef FOO", "c", "#endif", "d"],
            SyntaxFamily::Preprocessor,
        ),
        (&["FOO_S", "a", "FOO_E", "b", "FOO_E"], SyntaxFamily::CustomTag),
        (&["if FOO", "a", "else", "b", "endif #FOO"], SyntaxFamily::Makefile),
        (&["if (FOO)", "a", "endif() #FOO", "if (NOT FOO)", "b", "endif() #FOO"], SyntaxFamily::CMake),
    ];

    for (input, family) in cases {
        let once = run(input, family, "FOO");
        let twice = text(&strip_guarded(&once, &marker_pair(family, "FOO"), MatchMode::Substring).lines);
        assert_eq!(once, twice, "{:?}", family);
    }
}

#[test]
fn test_existing_ifndef_is_unwrapped() {
    let input = ["#ifndef FOO", "fallback();", "#endif", "done();"];
    assert_eq!(
        run(&input, SyntaxFamily::Preprocessor, "FOO"),
        vec!["fallback();", "done();"]
    );
}

#[test]
fn test_ifdef_without_else_is_removed() {
    let input = ["a", "#ifdef FOO", "b", "#endif", "#ifdef BAR", "c", "#endif"];
    assert_eq!(
        run(&input, SyntaxFamily::Preprocessor, "FOO"),
        vec!["a", "#ifdef BAR", "c", "#endif"]
    );
}

#[test]
fn test_two_features_need_two_passes() {
    let input = ["A_S", "a", "A_E", "B_S", "b", "B_E", "keep"];
    let first = run(&input, SyntaxFamily::CustomTag, "A");
    assert_eq!(first, vec!["B_S", "b", "B_E", "keep"]);

    let second = strip_guarded(&first, &marker_pair(SyntaxFamily::CustomTag, "B"), MatchMode::Substring);
    assert_eq!(text(&second.lines), vec!["keep"]);
}

#[test]
fn test_line_terminators_preserved() {
    let content = b"#ifdef FOO\r\nint a;\r\n#else\r\nint b;\r\n#endif\r\nint c;";
    let stripped = strip_guarded(
        &split_lines(content),
        &marker_pair(SyntaxFamily::Preprocessor, "FOO"),
        MatchMode::Substring,
    );
    assert_eq!(stripped.lines.concat(), b"int b;\r\nint c;");
}

#[test]
fn test_substring_mode_matches_longer_names() {
    let input = ["#ifdef FOO_EXTRA", "x", "#endif", "y"];
    assert_eq!(run(&input, SyntaxFamily::Preprocessor, "FOO"), vec!["y"]);

    let strict = strip_guarded(
        &input,
        &marker_pair(SyntaxFamily::Preprocessor, "FOO"),
        MatchMode::Directive,
    );
    assert_eq!(text(&strict.lines), input.to_vec());
}

#[test]
fn test_strict_mode_ignores_commented_markers() {
    let input = ["// FOO_S is documented here", "code();", "/* FOO_E */"];
    let strict = strip_guarded(
        &input,
        &marker_pair(SyntaxFamily::CustomTag, "FOO"),
        MatchMode::Directive,
    );
    assert_eq!(text(&strict.lines), input.to_vec());
    assert_eq!(run(&input, SyntaxFamily::CustomTag, "FOO"), Vec::<String>::new());
}

#[test]
fn test_diagnostics_collected_from_both_passes() {
    let input = ["#ifdef FOO", "#ifdef FOO", "#else", "b", "#endif"];
    let stripped = strip_guarded(
        &input,
        &marker_pair(SyntaxFamily::Preprocessor, "FOO"),
        MatchMode::Substring,
    );
    assert_eq!(text(&stripped.lines), vec!["b"]);
    assert_eq!(
        stripped.diagnostics,
        vec![Diagnostic::new(2, DiagnosticKind::DuplicateStart)]
    );
}

#[test]
fn test_latin1_bytes_do_not_block_stripping() {
    let content: &[u8] = b"/* Copyright \xa9 Intel */\nFOO_S\nsecret();\nFOO_E\nkeep();\n";
    let stripped = strip_guarded(
        &split_lines(content),
        &marker_pair(SyntaxFamily::CustomTag, "FOO"),
        MatchMode::Substring,
    );
    assert_eq!(
        stripped.lines.concat(),
        b"/* Copyright \xa9 Intel */\nkeep();\n".to_vec()
    );
}
