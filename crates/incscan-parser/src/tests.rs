//! Extended tests for the include scanner
//!
//! These tests cover the lexical traps that make naive text matching
//! report includes that the preprocessor would never see.

use super::*;
use incscan_core::{IncludeKind, ScanError};
use pretty_assertions::assert_eq;

fn found(source: &str) -> Vec<(String, IncludeKind, u32)> {
    extract_includes(source)
        .unwrap()
        .into_iter()
        .map(|d| (d.target, d.kind, d.source_line))
        .collect()
}

fn quoted(target: &str, line: u32) -> (String, IncludeKind, u32) {
    (target.to_string(), IncludeKind::Quoted, line)
}

fn angle(target: &str, line: u32) -> (String, IncludeKind, u32) {
    (target.to_string(), IncludeKind::AngleBracket, line)
}

/// Directive text inside string literals with escaped quotes
#[test]
fn test_escaped_quotes_in_string() {
    let source = r##"
const char* include_foo1 = "#include \"foo.h\"";
const char* include_test1 = "\"#include \"test.h\"\"";
"##;
    assert!(found(source).is_empty());
}

/// Angle-bracket look-alikes inside string literals
#[test]
fn test_angle_form_in_string() {
    let source = r##"
const char* include_foo2 = "#include <foo.h>";
const char* include_test2 = "\"#include <test.h>\"";
"##;
    assert!(found(source).is_empty());
}

/// A closed block comment with a stray quote does not hide the directive
#[test]
fn test_directive_after_block_comment() {
    let source = "/* \" */ #include <more/baz.h> // \"\n";
    assert_eq!(found(source), vec![angle("more/baz.h", 1)]);
}

/// A string continued over several physical lines is one literal
#[test]
fn test_continued_string() {
    let source = "const char* include_multiple = \"\\\n#include <foo.h> \\\n#include <bar.h> \\\n\\\"#include <test.h>\\\" \\\n\";\n#include \"after.h\"\n";
    assert_eq!(found(source), vec![quoted("after.h", 6)]);
}

/// Adjacent string literals are scanned independently
#[test]
fn test_adjacent_literals() {
    let source = "const char* include_concat = \"\"\"#include <foo.h>\";\n";
    assert!(found(source).is_empty());
}

/// A char literal holding a double quote does not open a string
#[test]
fn test_char_literal_quote() {
    let source = "char quote = '\"';\n#include \"bar.h\"\nchar esc = '\\'';\n#include <baz.h>\n";
    assert_eq!(found(source), vec![quoted("bar.h", 2), angle("baz.h", 4)]);
}

/// Commented-out directives are ignored
#[test]
fn test_commented_directives() {
    let source = r##"
// #include <line.h>
/*
#include "block.h"
*/
#include "real.h"
"##;
    assert_eq!(found(source), vec![quoted("real.h", 6)]);
}

/// A line comment ending in a backslash swallows the next physical line
#[test]
fn test_continued_line_comment() {
    let source = "// comment \\\n#include <hidden.h>\n#include <shown.h>\n";
    assert_eq!(found(source), vec![angle("shown.h", 3)]);
}

/// Blanks and comments may separate the directive tokens
#[test]
fn test_blanks_inside_directive() {
    let source = "  #\tinclude\t<a.h>\n# /* note */ include /* x */ \"b.h\"\n#include<c.h>\n";
    assert_eq!(
        found(source),
        vec![angle("a.h", 1), quoted("b.h", 2), angle("c.h", 3)]
    );
}

/// A directive keyword split by a splice still counts
#[test]
fn test_spliced_directive() {
    let source = "#inc\\\nlude \\\n<split.h>\nint x;\n";
    assert_eq!(found(source), vec![angle("split.h", 1)]);
}

/// Other directives and macro includes are skipped without error
#[test]
fn test_unrecognized_forms_are_skipped() {
    let source = r##"
#pragma once
#define HEADER "#include <macro.h>"
#include HEADER
#include_next <next.h>
#include ""
#error do not do this
#include "kept.h"
"##;
    assert_eq!(found(source), vec![quoted("kept.h", 8)]);
}

/// `#` that is not the first token of its logical line
#[test]
fn test_hash_mid_line() {
    let source = "x = y; #include <no.h>\n#define CAT(a, b) a ## b\n";
    assert!(found(source).is_empty());
}

/// Quoted paths keep their escapes verbatim
#[test]
fn test_escaped_quote_in_path() {
    let source = "#include \"we\\\"ird.h\"\n";
    assert_eq!(found(source), vec![quoted("we\\\"ird.h", 1)]);
}

/// Non-ASCII content passes through untouched
#[test]
fn test_utf8_targets() {
    let source = "// café\n#include \"ünïcode.h\"\n";
    assert_eq!(found(source), vec![quoted("ünïcode.h", 2)]);
}

/// A path delimiter left open at end of buffer
#[test]
fn test_unterminated_path_at_eof() {
    assert_eq!(
        extract_includes("#include <unterminated"),
        Err(ScanError::MalformedDirective { line: 1 })
    );
}

/// A path delimiter left open at end of line
#[test]
fn test_unterminated_path_at_eol() {
    let source = "int a;\n#include \"open.h\n#include <fine.h>\n";
    assert_eq!(
        extract_includes(source),
        Err(ScanError::MalformedDirective { line: 2 })
    );
}

/// Literals open at end of buffer fail with the opening line
#[test]
fn test_unterminated_literal() {
    assert_eq!(
        extract_includes("#include <a.h>\nconst char* s = \"abc"),
        Err(ScanError::UnterminatedLiteral { line: 2 })
    );
    assert_eq!(
        extract_includes("char c = '\\"),
        Err(ScanError::UnterminatedLiteral { line: 1 })
    );
}

/// Raw newlines do not close a literal
#[test]
fn test_literal_spans_raw_newlines() {
    assert_eq!(
        extract_includes("const char* s = \"abc\n"),
        Err(ScanError::UnterminatedLiteral { line: 1 })
    );
    assert_eq!(
        extract_includes("char c = 'x\n#include <x.h>\n"),
        Err(ScanError::UnterminatedLiteral { line: 1 })
    );
}

/// A stray apostrophe hides directives until its partner
#[test]
fn test_stray_apostrophe_pairs_across_lines() {
    let source = "#error don't\n#include <hidden.h>\n// closed here: '\n#include <shown.h>\n";
    assert_eq!(found(source), vec![angle("shown.h", 4)]);
}

/// Block comments open at end of buffer fail with the opening line
#[test]
fn test_unterminated_comment() {
    assert_eq!(
        extract_includes("int a;\n\n/* open\n#include <x.h>\n"),
        Err(ScanError::UnterminatedComment { line: 3 })
    );
    assert_eq!(
        extract_includes("#include /* open"),
        Err(ScanError::UnterminatedComment { line: 1 })
    );
}

/// Directives before an error are still delivered lazily
#[test]
fn test_lazy_until_error() {
    let results: Vec<_> = scan_includes("#include <a.h>\n#include <b.h>\n\"open").collect();
    assert_eq!(results.len(), 3);
    assert_eq!(results[0].as_ref().unwrap().target, "a.h");
    assert_eq!(results[1].as_ref().unwrap().target, "b.h");
    assert_eq!(results[2], Err(ScanError::UnterminatedLiteral { line: 3 }));
}

/// Scanning the same buffer twice gives identical results
#[test]
fn test_idempotent() {
    let source = "#include <a.h>\n/* \" */ #include \"b.h\"\nconst char* s = \"#include <c.h>\";\n";
    let first = extract_includes(source).unwrap();
    let second = extract_includes(source).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.len(), 2);
}

/// Stopping early has no effect on a later full scan
#[test]
fn test_partial_consumption() {
    let source = "#include <a.h>\n#include <b.h>\n";
    let first = scan_includes(source).next().unwrap().unwrap();
    assert_eq!(first.target, "a.h");
    assert_eq!(extract_includes(source).unwrap().len(), 2);
}
