use gosubset_parser::lexer::{unquote, Lexer, Tok};
use gosubset_parser::{LexError, LexErrorKind};

fn lex1(input: &str) -> Result<Tok<'_>, LexError> {
    let mut lx = Lexer::new(input);
    lx.next().expect("at least one token").map(|(_, t, _)| t)
}

fn lex_err(input: &str) -> LexErrorKind {
    Lexer::new(input)
        .find_map(|r| r.err())
        .unwrap_or_else(|| panic!("{input:?} lexed without error"))
        .kind
}

#[test]
fn raw_string_basic() {
    let t = lex1("`abc`").unwrap();
    assert_eq!(t, Tok::RawStringLit("`abc`"));
}

#[test]
fn raw_string_spans_lines_and_keeps_backslashes() {
    let t = lex1("`a\\n\nb`").unwrap();
    assert!(matches!(t, Tok::RawStringLit(_)));
    assert_eq!(unquote("`a\\n\nb`"), "a\\n\nb");
}

#[test]
fn interpreted_string_basic_escapes_ok() {
    for s in [
        r#""\n""#,
        r#""\t""#,
        r#""\\\"""#,
        r#""\x41""#,
        r#""A""#,
        r#""\U00000041""#,
        r#""\101""#,
        r#""\a\b\f\r\v""#,
    ] {
        let t = lex1(s).unwrap_or_else(|e| panic!("{s} failed: {e}"));
        assert!(matches!(t, Tok::StringLit(_)), "{s} -> {t:?}");
    }
}

#[test]
fn decoded_values() {
    let cases = [
        (r#""plain""#, "plain"),
        (r#""\x41B\U00000043\104""#, "ABCD"),
        (r#""tab\there""#, "tab\there"),
        (r#""json:\"x\"""#, "json:\"x\""),
        (r#""日本語""#, "日本語"),
        (r#""\xe6\x97\xa5""#, "日"),
        (r#""""#, ""),
        ("`raw\r\ntext`", "raw\ntext"),
    ];
    for (lit, want) in cases {
        assert_eq!(unquote(lit), want, "{lit}");
    }
}

#[test]
fn invalid_escapes() {
    for s in [
        r#""\q""#,
        r#""\'""#,
        r#""\x4""#,
        r#""\xZZ""#,
        r#""\u12""#,
        r#""\U0011FFFF""#,
        r#""\uDFFF""#,
        r#""\777""#,
        r#""\8""#,
    ] {
        assert_eq!(lex_err(s), LexErrorKind::InvalidEscape, "{s}");
    }
}

#[test]
fn unterminated_strings() {
    for s in ["\"abc", "\"abc\ndef\"", "\"abc\\", "\"abc\\\n\"", "`abc"] {
        assert_eq!(lex_err(s), LexErrorKind::UnterminatedString, "{s:?}");
    }
}

#[test]
fn escaped_quote_does_not_close() {
    let t = lex1(r#""a\"b" x"#).unwrap();
    assert_eq!(t, Tok::StringLit(r#""a\"b""#));
}
