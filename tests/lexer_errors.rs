// tests/lexer_errors.rs
use gosubset_parser::lexer::tokenize;
use gosubset_parser::{Config, LexError, LexErrorKind, Span};

fn first_error(input: &str) -> LexError {
    tokenize(input, &Config::default())
        .expect_err(&format!("expected a lex error for {input:?}"))
}

struct ErrCase {
    input: &'static str,
    kind: LexErrorKind,
    span: (u32, u32),
    line: u32,
    column: u32,
}

#[rustfmt::skip]
const ERROR_TESTS: &[ErrCase] = &[
    ErrCase { input: "-", kind: LexErrorKind::InvalidCharacter, span: (0, 1), line: 1, column: 1 },
    ErrCase { input: "a := 1", kind: LexErrorKind::InvalidCharacter, span: (2, 3), line: 1, column: 3 },
    ErrCase { input: "package p\n\t#", kind: LexErrorKind::InvalidCharacter, span: (11, 12), line: 2, column: 2 },
    ErrCase { input: "x \u{FEFF}", kind: LexErrorKind::InvalidCharacter, span: (2, 5), line: 1, column: 3 },
    ErrCase { input: "a ? b", kind: LexErrorKind::InvalidCharacter, span: (2, 3), line: 1, column: 3 },

    ErrCase { input: "x ''", kind: LexErrorKind::InvalidRune, span: (2, 4), line: 1, column: 3 },
    ErrCase { input: "'ab'", kind: LexErrorKind::InvalidRune, span: (0, 4), line: 1, column: 1 },
    ErrCase { input: "\n'a", kind: LexErrorKind::UnterminatedRune, span: (1, 3), line: 2, column: 1 },
    ErrCase { input: "'\\q'", kind: LexErrorKind::InvalidEscape, span: (0, 4), line: 1, column: 1 },

    ErrCase { input: "const X = 08", kind: LexErrorKind::InvalidNumber, span: (10, 12), line: 1, column: 11 },
    ErrCase { input: "[1__0]", kind: LexErrorKind::InvalidNumber, span: (1, 5), line: 1, column: 2 },
    ErrCase { input: "0x", kind: LexErrorKind::InvalidNumber, span: (0, 2), line: 1, column: 1 },
    ErrCase { input: "12ab", kind: LexErrorKind::InvalidNumber, span: (0, 4), line: 1, column: 1 },

    ErrCase { input: "a /* open", kind: LexErrorKind::UnterminatedComment, span: (2, 9), line: 1, column: 3 },
    ErrCase { input: "\n\n\"abc", kind: LexErrorKind::UnterminatedString, span: (2, 6), line: 3, column: 1 },
    ErrCase { input: "x \"\\z\"", kind: LexErrorKind::InvalidEscape, span: (2, 6), line: 1, column: 3 },
];

#[test]
fn error_table() {
    for c in ERROR_TESTS {
        let e = first_error(c.input);
        assert_eq!(e.kind, c.kind, "input={:?}", c.input);
        assert_eq!(e.span, Span { start: c.span.0, end: c.span.1 }, "input={:?}", c.input);
        assert_eq!(
            (e.position.line, e.position.column),
            (c.line, c.column),
            "input={:?}",
            c.input
        );
        assert_eq!(e.position.offset, c.span.0 as usize, "input={:?}", c.input);
    }
}

#[test]
fn columns_count_bytes() {
    // 'é' is two bytes.
    let e = first_error("é -");
    assert_eq!(e.position.column, 4);
}

#[test]
fn message_carries_position() {
    let e = first_error("package p\nconst X = -\n");
    assert_eq!(e.to_string(), "2:11: invalid character");
}

#[test]
fn leading_bom_is_not_an_error() {
    assert!(tokenize("\u{FEFF}package p", &Config::default()).is_ok());
}
