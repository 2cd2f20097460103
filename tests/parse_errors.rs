//! Syntax error reporting.
//!
//! Parsing stops at the first token that does not fit; the error names that
//! token, what would have been accepted instead, and where it is.

use gosubset_parser::{
    parse_source, parse_source_with, Config, DiagKind, Error, LexErrorKind, ParseError, Span,
    TokenKind, TokenSet,
};

/// Newline-terminated sources read naturally; the positions asserted below
/// do not depend on semicolon insertion.
fn expect_error(source: &str) -> Error {
    match parse_source_with(source, &Config::go()) {
        Ok(file) => panic!("Expected parse error, but parsing succeeded: {file:?}"),
        Err(e) => e,
    }
}

fn expect_parse_error(source: &str) -> ParseError {
    match expect_error(source) {
        Error::Parse(e) => e,
        other => panic!("Expected a syntax error, got {other:?}"),
    }
}

// =============================================================================
// Package clause
// =============================================================================

#[test]
fn missing_package_name() {
    let e = expect_parse_error("package");
    assert!(e.expected.contains(TokenKind::Ident));
    assert_eq!(e.found, TokenKind::Eof);
    assert_eq!(e.position.offset, 7);
    assert_eq!((e.position.line, e.position.column), (1, 8));
    assert_eq!(e.span, Span::empty_at(7));
}

#[test]
fn missing_package_clause() {
    let e = expect_parse_error("const X = +\n");
    assert_eq!(e.expected, TokenSet::from(TokenKind::KwPackage));
    assert_eq!(e.found, TokenKind::KwConst);
    assert_eq!(e.span, Span::new(0, 5));
}

#[test]
fn empty_input() {
    let e = expect_parse_error("");
    assert_eq!(e.found, TokenKind::Eof);
    assert_eq!(e.position.offset, 0);
}

#[test]
fn package_name_on_next_line() {
    // No semicolon follows `package`, so the newline is plain whitespace.
    let file = parse_source_with("package\np\n", &Config::go()).expect("parses");
    assert_eq!(file.package_name, "p");
}

#[test]
fn two_package_names() {
    let e = expect_parse_error("package p q\n");
    assert_eq!(e.expected, TokenSet::from(TokenKind::Semi));
    assert_eq!(e.found, TokenKind::Ident);
    assert_eq!(e.found_text, "q");
    assert_eq!(e.position.column, 11);
}

// =============================================================================
// Imports
// =============================================================================

#[test]
fn import_without_path() {
    let e = expect_parse_error("package p\nimport\n");
    assert_eq!(e.found, TokenKind::Eof);
    for k in [TokenKind::Dot, TokenKind::Ident, TokenKind::StringLit, TokenKind::LParen] {
        assert!(e.expected.contains(k), "missing {k:?} in {}", e.expected);
    }
    assert_eq!(e.position.offset, 16);
}

#[test]
fn import_alias_without_path() {
    let e = expect_parse_error("package p\nimport f\n");
    assert_eq!(e.expected, TokenSet::from(TokenKind::StringLit));
    assert_eq!(e.found, TokenKind::Semi);
    assert_eq!(e.found_text, "");
    assert_eq!(e.to_string(), "2:9: expected string literal, found newline");
}

#[test]
fn empty_import_path() {
    let e = expect_error("package p\nimport \"\"\n");
    assert!(matches!(e, Error::EmptyImportPath { .. }), "{e:?}");
    assert_eq!(e.span(), Span::new(17, 19));
    assert_eq!(e.diag().kind, DiagKind::Parse);
}

#[test]
fn empty_raw_import_path() {
    let e = expect_error("package p\nimport ( ``; )\n");
    assert!(matches!(e, Error::EmptyImportPath { .. }), "{e:?}");
}

#[test]
fn unclosed_import_group() {
    let e = expect_parse_error("package p\nimport (\n\t\"a\"\n");
    assert_eq!(e.found, TokenKind::Eof);
    assert!(e.expected.contains(TokenKind::RParen));
}

#[test]
fn import_after_declaration() {
    let e = expect_parse_error("package p\nconst X = +\nimport \"a\"\n");
    assert_eq!(e.found, TokenKind::KwImport);
    assert!(!e.expected.contains(TokenKind::KwImport));
    assert!(e.expected.contains(TokenKind::Eof));
    assert_eq!(e.position.line, 3);
}

#[test]
fn import_is_allowed_before_any_declaration() {
    let e = expect_parse_error("package p\nimport \"a\"\n]\n");
    assert!(e.expected.contains(TokenKind::KwImport));
    assert!(e.expected.contains(TokenKind::KwConst));
}

// =============================================================================
// Declarations
// =============================================================================

#[test]
fn unexpected_top_level_token() {
    let e = expect_parse_error("package p\nstruct\n");
    assert_eq!(e.found, TokenKind::KwStruct);
    for k in [
        TokenKind::KwConst,
        TokenKind::KwIf,
        TokenKind::KwVar,
        TokenKind::KwBreak,
        TokenKind::KwReturn,
        TokenKind::Eof,
    ] {
        assert!(e.expected.contains(k), "missing {k:?}");
    }
}

#[test]
fn const_without_spec() {
    let e = expect_parse_error("package p\nconst\n");
    assert_eq!(e.found, TokenKind::Eof);
    assert_eq!(e.expected, TokenSet::of(&[TokenKind::Ident, TokenKind::LParen]));
}

#[test]
fn typed_const_needs_value() {
    let e = expect_parse_error("package p\nconst X int\n");
    assert_eq!(e.expected, TokenSet::from(TokenKind::Assign));
    assert_eq!(e.found, TokenKind::Semi);
}

#[test]
fn const_value_missing_after_assign() {
    let e = expect_parse_error("package p\nconst X = \n");
    assert_eq!(e.found, TokenKind::Eof);
    for k in [TokenKind::Plus, TokenKind::Ident, TokenKind::IntLit, TokenKind::StringLit] {
        assert!(e.expected.contains(k), "missing {k:?}");
    }
}

#[test]
fn trailing_comma_in_identifier_list() {
    let e = expect_parse_error("package p\nconst A, = +\n");
    assert_eq!(e.expected, TokenSet::from(TokenKind::Ident));
    assert_eq!(e.found, TokenKind::Assign);
}

#[test]
fn placeholder_decl_takes_no_operands() {
    let e = expect_parse_error("package p\nvar x\n");
    assert_eq!(e.expected, TokenSet::from(TokenKind::Semi));
    assert_eq!(e.found_text, "x");
}

// =============================================================================
// Types
// =============================================================================

#[test]
fn unclosed_array_length() {
    let e = expect_parse_error("package p\nconst X [3 T = +\n");
    assert_eq!(e.expected, TokenSet::from(TokenKind::RBrack));
    assert_eq!(e.found, TokenKind::Ident);
}

#[test]
fn array_without_element_type() {
    let e = expect_parse_error("package p\nconst X [3] = +\n");
    assert_eq!(e.found, TokenKind::Assign);
    for k in [TokenKind::Ident, TokenKind::LBrack, TokenKind::KwStruct, TokenKind::LParen] {
        assert!(e.expected.contains(k), "missing {k:?}");
    }
}

#[test]
fn unclosed_struct() {
    let e = expect_parse_error("package p\nconst X struct {\n\ta int\n");
    assert_eq!(e.found, TokenKind::Eof);
    assert!(e.expected.contains(TokenKind::RBrace));
}

#[test]
fn struct_without_brace() {
    let e = expect_parse_error("package p\nconst X struct = +\n");
    assert_eq!(e.expected, TokenSet::from(TokenKind::LBrace));
}

#[test]
fn pointer_field_needs_type_name() {
    let e = expect_parse_error("package p\nconst X struct { *[2]T } = +\n");
    assert_eq!(e.expected, TokenSet::from(TokenKind::Ident));
    assert_eq!(e.found, TokenKind::LBrack);
}

#[test]
fn qualified_name_needs_selector() {
    let e = expect_parse_error("package p\nconst X io. = +\n");
    assert_eq!(e.expected, TokenSet::from(TokenKind::Ident));
    assert_eq!(e.found, TokenKind::Assign);
}

#[test]
fn unclosed_paren_type() {
    let e = expect_parse_error("package p\nconst X (T = +\n");
    assert_eq!(e.expected, TokenSet::from(TokenKind::RParen));
}

#[test]
fn fields_need_separators() {
    let e = expect_parse_error("package p; const X struct { a int b int } = +;");
    assert_eq!(e.found_text, "b");
    assert!(e.expected.contains(TokenKind::Semi));
    assert!(e.expected.contains(TokenKind::RBrace));
}

// =============================================================================
// Configuration
// =============================================================================

#[test]
fn by_default_newlines_do_not_terminate() {
    let err = parse_source("package p\nconst X = +\n").unwrap_err();
    let e = err.as_parse().expect("syntax error");
    assert_eq!(e.found, TokenKind::KwConst);
    assert_eq!(e.expected, TokenSet::from(TokenKind::Semi));

    assert!(parse_source("package p; const X = +;").is_ok());
}

#[test]
fn by_default_a_newline_is_only_whitespace() {
    let src = "package p;\nconst X\n= +;";
    let file = parse_source(src).expect("grammar as written");
    assert_eq!(file.decls.len(), 1);

    // With insertion the newline after `X` ends the spec early.
    let e = parse_source_with(src, &Config::go()).unwrap_err();
    assert_eq!(e.as_parse().map(|p| p.found), Some(TokenKind::Assign));
}

#[test]
fn nesting_limit() {
    let config = Config::default().max_depth(2);
    assert!(parse_source_with("package p; const X [1](T) = +;", &config).is_ok());

    let err = parse_source_with("package p; const X [1][2]struct{} = +;", &config).unwrap_err();
    let Error::NestingTooDeep { limit, span, .. } = err else {
        panic!("unexpected {err:?}");
    };
    assert_eq!(limit, 2);
    assert_eq!(span, Span::new(25, 31));
}

fn nested_structs(depth: usize) -> String {
    format!(
        "package p; const X {}T{} = +;",
        "struct { a ".repeat(depth),
        " }".repeat(depth)
    )
}

#[test]
fn deeply_nested_input_is_an_error_not_a_crash() {
    let limit = Config::DEFAULT_MAX_DEPTH;
    let src = format!("package p; const X {}T = +;", "[1]".repeat(100_000));
    let err = parse_source(&src).unwrap_err();
    assert!(matches!(err, Error::NestingTooDeep { limit: l, .. } if l == limit), "{err:?}");

    let err = parse_source(&nested_structs(100_000)).unwrap_err();
    assert!(matches!(err, Error::NestingTooDeep { .. }), "{err:?}");
}

#[test]
fn struct_nesting_up_to_the_default_limit_parses() {
    let limit = Config::DEFAULT_MAX_DEPTH as usize;
    assert!(parse_source(&nested_structs(limit - 1)).is_ok());
    assert!(parse_source(&nested_structs(limit)).is_ok());

    let err = parse_source(&nested_structs(limit + 1)).unwrap_err();
    assert!(matches!(err, Error::NestingTooDeep { .. }), "{err:?}");
}

#[test]
fn mixed_nesting_up_to_the_default_limit_parses() {
    // Three levels per repetition: struct, array, parens.
    let reps = Config::DEFAULT_MAX_DEPTH as usize / 3;
    let src = format!(
        "package p; const X {}T{} = +;",
        "struct { a [1](".repeat(reps),
        ") }".repeat(reps)
    );
    let file = parse_source(&src).expect("within the limit");
    assert_eq!(parse_source(&file.to_string()), Ok(file));
}

// =============================================================================
// Lexical errors surface unchanged
// =============================================================================

#[test]
fn lex_errors_pass_through() {
    let e = expect_error("package p\nconst X = 'ab'\n");
    let lex = e.as_lex().expect("lex error");
    assert_eq!(lex.kind, LexErrorKind::InvalidRune);
    assert_eq!((lex.position.line, lex.position.column), (2, 11));
    assert_eq!(e.diag().kind, DiagKind::Lex);
}

#[test]
fn rune_literal_is_not_an_operand() {
    let e = expect_parse_error("package p\nconst X = 'a'\n");
    assert_eq!(e.found, TokenKind::RuneLit);
    assert_eq!(e.found_text, "'a'");
    assert!(e.expected.contains(TokenKind::IntLit));
    assert!(!e.expected.contains(TokenKind::RuneLit));
    assert_eq!(
        e.to_string(),
        "2:11: expected identifier, integer literal, string literal or '+', found rune literal 'a'"
    );
}

#[test]
fn lex_error_wins_over_later_syntax_error() {
    // The whole input is lexed before parsing starts.
    let e = expect_error("package ; \"unterminated\n");
    assert!(e.as_lex().is_some(), "{e:?}");
}
