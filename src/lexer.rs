//! Logos-based lexer with optional Go-style semicolon insertion.

use logos::{Lexer as LogosLexer, Logos, Skip};

use crate::config::Config;
use crate::error::{LexError, LexErrorKind};
use crate::span::{LineIndex, Span};
use crate::token::TokenKind;

// =============================================================================
// 1. Trivia scanners (manual; logos hands over at the opening delimiter)
// =============================================================================

fn skip_line_comment(lex: &mut LogosLexer<'_, RawTok>) -> Skip {
    let rem = lex.remainder();
    let end = rem.find(|c: char| c == '\n' || c == '\r').unwrap_or(rem.len());
    lex.bump(end);
    Skip
}

fn lex_block_comment(lex: &mut LogosLexer<'_, RawTok>) -> Result<(), LexErrorKind> {
    match lex.remainder().find("*/") {
        Some(i) => {
            lex.bump(i + 2);
            Ok(())
        }
        None => {
            lex.bump(lex.remainder().len());
            Err(LexErrorKind::UnterminatedComment)
        }
    }
}

// =============================================================================
// 2. String literals
// =============================================================================

/// Scans an interpreted string after its opening quote.
///
/// The extent is found first (a backslash protects the next byte unless it is
/// a line break); escapes are validated only once the literal is closed.
fn lex_interpreted_string(lex: &mut LogosLexer<'_, RawTok>) -> Result<(), LexErrorKind> {
    let rem = lex.remainder().as_bytes();
    let mut i = 0;

    while i < rem.len() {
        match rem[i] {
            b'"' => {
                let body = &lex.remainder()[..i];
                lex.bump(i + 1);
                return esc::validate(body, b'"');
            }
            b'\n' | b'\r' => break,
            b'\\' => match rem.get(i + 1) {
                None | Some(b'\n' | b'\r') => {
                    i += 1;
                    break;
                }
                Some(_) => i += 2,
            },
            _ => i += 1,
        }
    }

    lex.bump(i);
    Err(LexErrorKind::UnterminatedString)
}

/// Scans a rune literal after its opening quote.
///
/// Same extent rules as interpreted strings; the body must then be exactly
/// one character or one escape.
fn lex_rune(lex: &mut LogosLexer<'_, RawTok>) -> Result<(), LexErrorKind> {
    let rem = lex.remainder().as_bytes();
    let mut i = 0;

    while i < rem.len() {
        match rem[i] {
            b'\'' => {
                let body = &lex.remainder()[..i];
                lex.bump(i + 1);
                return validate_rune(body);
            }
            b'\n' | b'\r' => break,
            b'\\' => match rem.get(i + 1) {
                None | Some(b'\n' | b'\r') => {
                    i += 1;
                    break;
                }
                Some(_) => i += 2,
            },
            _ => i += 1,
        }
    }

    lex.bump(i);
    Err(LexErrorKind::UnterminatedRune)
}

fn validate_rune(body: &str) -> Result<(), LexErrorKind> {
    let used = match body.as_bytes() {
        [] => return Err(LexErrorKind::InvalidRune),
        [b'\\', rest @ ..] => 1 + esc::decode(rest, b'\'')?.1,
        _ => body.chars().next().map_or(0, char::len_utf8),
    };
    if used == body.len() {
        Ok(())
    } else {
        Err(LexErrorKind::InvalidRune)
    }
}

fn lex_raw_string(lex: &mut LogosLexer<'_, RawTok>) -> Result<(), LexErrorKind> {
    match lex.remainder().find('`') {
        Some(i) => {
            lex.bump(i + 1);
            Ok(())
        }
        None => {
            lex.bump(lex.remainder().len());
            Err(LexErrorKind::UnterminatedString)
        }
    }
}

mod esc {
    use crate::error::LexErrorKind;

    /// One decoded escape: either a raw byte or a code point.
    pub(super) enum Unit {
        Byte(u8),
        Char(char),
    }

    /// Decodes the escape starting right after a backslash.
    ///
    /// Returns the unit and the number of bytes consumed after the backslash.
    pub(super) fn decode(rest: &[u8], quote: u8) -> Result<(Unit, usize), LexErrorKind> {
        let Some(&c) = rest.first() else {
            return Err(LexErrorKind::InvalidEscape);
        };
        let simple = match c {
            b'a' => Some(0x07),
            b'b' => Some(0x08),
            b'f' => Some(0x0C),
            b'n' => Some(b'\n'),
            b'r' => Some(b'\r'),
            b't' => Some(b'\t'),
            b'v' => Some(0x0B),
            b'\\' => Some(b'\\'),
            _ if c == quote => Some(quote),
            _ => None,
        };
        if let Some(b) = simple {
            return Ok((Unit::Byte(b), 1));
        }

        match c {
            b'x' => {
                let v = digits(&rest[1..], 2, 16)?;
                Ok((Unit::Byte(v as u8), 3))
            }
            b'0'..=b'7' => {
                let v = digits(rest, 3, 8)?;
                if v > 0xFF {
                    return Err(LexErrorKind::InvalidEscape);
                }
                Ok((Unit::Byte(v as u8), 3))
            }
            b'u' => {
                let v = digits(&rest[1..], 4, 16)?;
                let ch = char::from_u32(v).ok_or(LexErrorKind::InvalidEscape)?;
                Ok((Unit::Char(ch), 5))
            }
            b'U' => {
                let v = digits(&rest[1..], 8, 16)?;
                let ch = char::from_u32(v).ok_or(LexErrorKind::InvalidEscape)?;
                Ok((Unit::Char(ch), 9))
            }
            _ => Err(LexErrorKind::InvalidEscape),
        }
    }

    fn digits(s: &[u8], n: usize, radix: u32) -> Result<u32, LexErrorKind> {
        if s.len() < n {
            return Err(LexErrorKind::InvalidEscape);
        }
        s[..n].iter().try_fold(0u32, |acc, &b| {
            (b as char)
                .to_digit(radix)
                .map(|d| acc * radix + d)
                .ok_or(LexErrorKind::InvalidEscape)
        })
    }

    pub(super) fn validate(body: &str, quote: u8) -> Result<(), LexErrorKind> {
        let bytes = body.as_bytes();
        let mut i = 0;
        while i < bytes.len() {
            if bytes[i] == b'\\' {
                let (_, used) = decode(&bytes[i + 1..], quote)?;
                i += 1 + used;
            } else {
                i += 1;
            }
        }
        Ok(())
    }
}

/// Decodes the value of a string token (interpreted or raw).
///
/// The literal must come from the lexer, which has already validated it.
/// Byte escapes that do not form valid UTF-8 decode to U+FFFD.
pub fn unquote(lit: &str) -> String {
    if let Some(body) = lit.strip_prefix('`').and_then(|s| s.strip_suffix('`')) {
        // Carriage returns are discarded from raw literals.
        return body.chars().filter(|&c| c != '\r').collect();
    }

    let body = lit
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(lit);
    if !body.contains('\\') {
        return body.to_string();
    }

    let bytes = body.as_bytes();
    let mut out: Vec<u8> = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] != b'\\' {
            out.push(bytes[i]);
            i += 1;
            continue;
        }
        match esc::decode(&bytes[i + 1..], b'"') {
            Ok((esc::Unit::Byte(b), used)) => {
                out.push(b);
                i += 1 + used;
            }
            Ok((esc::Unit::Char(c), used)) => {
                let mut buf = [0u8; 4];
                out.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
                i += 1 + used;
            }
            Err(_) => {
                out.push(b'\\');
                i += 1;
            }
        }
    }

    match String::from_utf8(out) {
        Ok(s) => s,
        Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
    }
}

// =============================================================================
// 3. Integer literals
// =============================================================================

fn validate_int(lex: &mut LogosLexer<'_, RawTok>) -> Result<(), LexErrorKind> {
    if is_int_lit(lex.slice()) {
        Ok(())
    } else {
        Err(LexErrorKind::InvalidNumber)
    }
}

#[inline(always)]
const fn is_oct_digit(b: u8) -> bool {
    matches!(b, b'0'..=b'7')
}

#[inline(always)]
const fn is_bin_digit(b: u8) -> bool {
    matches!(b, b'0' | b'1')
}

/// Go `int_lit`: decimal, `0b`, `0o`/legacy `0` octal, `0x`, with `_`
/// separators between digits (and right after a base prefix).
pub(crate) fn is_int_lit(s: &str) -> bool {
    match s.as_bytes() {
        [b'0', b'x' | b'X', rest @ ..] => digits_ok(rest, true, |b| b.is_ascii_hexdigit()),
        [b'0', b'b' | b'B', rest @ ..] => digits_ok(rest, true, is_bin_digit),
        [b'0', b'o' | b'O', rest @ ..] => digits_ok(rest, true, is_oct_digit),
        [b'0'] => true,
        [b'0', rest @ ..] => digits_ok(rest, true, is_oct_digit),
        digits => digits_ok(digits, false, |b| b.is_ascii_digit()),
    }
}

fn digits_ok(digits: &[u8], leading_sep: bool, is_digit: fn(u8) -> bool) -> bool {
    let digits = match digits {
        [b'_', rest @ ..] if leading_sep => rest,
        d => d,
    };
    if digits.is_empty() {
        return false;
    }

    let mut prev_was_digit = false;
    for &b in digits {
        if b == b'_' {
            if !prev_was_digit {
                return false;
            }
            prev_was_digit = false;
        } else if is_digit(b) {
            prev_was_digit = true;
        } else {
            return false;
        }
    }
    prev_was_digit
}

// =============================================================================
// 4. Raw tokens (logos DFA)
// =============================================================================

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(error = LexErrorKind)]
#[logos(skip r"[ \t\x0C]+")]
#[rustfmt::skip]
enum RawTok {
    #[token("\u{FEFF}")] Bom,

    // Trivia
    #[regex(r"\r\n|\n|\r")] Newline,
    #[token("//", skip_line_comment)] _LineComment,
    #[token("/*", lex_block_comment)] BlockComment,

    // Keywords (before Ident)
    #[token("package")] KwPackage,
    #[token("import")] KwImport,
    #[token("const")] KwConst,
    #[token("struct")] KwStruct,
    #[token("var")] KwVar,
    #[token("if")] KwIf,
    #[token("break")] KwBreak,
    #[token("return")] KwReturn,

    #[regex(r"[_\p{L}][_\p{L}\p{Nd}]*")] Ident,
    #[regex(r"[0-9][0-9A-Za-z_]*", validate_int)] Int,
    #[token("\"", lex_interpreted_string)] String,
    #[token("`", lex_raw_string)] RawString,
    #[token("'", lex_rune)] Rune,

    #[token("*")] Star,
    #[token(".")] Dot,
    #[token(",")] Comma,
    #[token(";")] Semi,
    #[token("(")] LParen,
    #[token(")")] RParen,
    #[token("{")] LBrace,
    #[token("}")] RBrace,
    #[token("[")] LBrack,
    #[token("]")] RBrack,
    #[token("=")] Assign,
    #[token("+")] Plus,
}

impl RawTok {
    #[inline]
    fn to_token<'src>(self, slice: &'src str) -> Option<Tok<'src>> {
        let tok = match self {
            Self::Bom | Self::Newline | Self::_LineComment | Self::BlockComment => return None,
            Self::Ident => Tok::Ident(slice),
            Self::Int => Tok::IntLit(slice),
            Self::String => Tok::StringLit(slice),
            Self::RawString => Tok::RawStringLit(slice),
            Self::Rune => Tok::RuneLit(slice),
            Self::KwPackage => Tok::KwPackage,
            Self::KwImport => Tok::KwImport,
            Self::KwConst => Tok::KwConst,
            Self::KwStruct => Tok::KwStruct,
            Self::KwVar => Tok::KwVar,
            Self::KwIf => Tok::KwIf,
            Self::KwBreak => Tok::KwBreak,
            Self::KwReturn => Tok::KwReturn,
            Self::Star => Tok::Star,
            Self::Dot => Tok::Dot,
            Self::Comma => Tok::Comma,
            Self::Semi => Tok::Semi,
            Self::LParen => Tok::LParen,
            Self::RParen => Tok::RParen,
            Self::LBrace => Tok::LBrace,
            Self::RBrace => Tok::RBrace,
            Self::LBrack => Tok::LBrack,
            Self::RBrack => Tok::RBrack,
            Self::Assign => Tok::Assign,
            Self::Plus => Tok::Plus,
        };
        Some(tok)
    }
}

// =============================================================================
// 5. Public tokens (zero-copy)
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tok<'input> {
    Ident(&'input str),
    IntLit(&'input str),
    /// Interpreted literal, quotes included.
    StringLit(&'input str),
    /// Raw literal, backquotes included.
    RawStringLit(&'input str),
    /// Quotes included. No production takes one; the parser reports it.
    RuneLit(&'input str),

    KwPackage,
    KwImport,
    KwConst,
    KwStruct,
    KwVar,
    KwIf,
    KwBreak,
    KwReturn,

    Star,
    Dot,
    Comma,
    Semi,
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBrack,
    RBrack,
    Assign,
    Plus,

    /// Never produced by the lexer; the token stream's end sentinel.
    Eof,
}

impl<'input> Tok<'input> {
    pub const fn kind(&self) -> TokenKind {
        match self {
            Tok::Ident(_) => TokenKind::Ident,
            Tok::IntLit(_) => TokenKind::IntLit,
            Tok::StringLit(_) | Tok::RawStringLit(_) => TokenKind::StringLit,
            Tok::RuneLit(_) => TokenKind::RuneLit,
            Tok::KwPackage => TokenKind::KwPackage,
            Tok::KwImport => TokenKind::KwImport,
            Tok::KwConst => TokenKind::KwConst,
            Tok::KwStruct => TokenKind::KwStruct,
            Tok::KwVar => TokenKind::KwVar,
            Tok::KwIf => TokenKind::KwIf,
            Tok::KwBreak => TokenKind::KwBreak,
            Tok::KwReturn => TokenKind::KwReturn,
            Tok::Star => TokenKind::Star,
            Tok::Dot => TokenKind::Dot,
            Tok::Comma => TokenKind::Comma,
            Tok::Semi => TokenKind::Semi,
            Tok::LParen => TokenKind::LParen,
            Tok::RParen => TokenKind::RParen,
            Tok::LBrace => TokenKind::LBrace,
            Tok::RBrace => TokenKind::RBrace,
            Tok::LBrack => TokenKind::LBrack,
            Tok::RBrack => TokenKind::RBrack,
            Tok::Assign => TokenKind::Assign,
            Tok::Plus => TokenKind::Plus,
            Tok::Eof => TokenKind::Eof,
        }
    }

    /// Whether a following line break turns into `;`.
    ///
    /// Go's rule, extended to the placeholder tokens since each of them is
    /// a complete production on its own.
    #[inline(always)]
    pub const fn ends_statement(&self) -> bool {
        matches!(
            self,
            Tok::Ident(_)
                | Tok::IntLit(_)
                | Tok::StringLit(_)
                | Tok::RawStringLit(_)
                | Tok::RuneLit(_)
                | Tok::RParen
                | Tok::RBrack
                | Tok::RBrace
                | Tok::KwVar
                | Tok::KwIf
                | Tok::KwBreak
                | Tok::KwReturn
                | Tok::Plus
        )
    }
}

impl<'input> std::fmt::Display for Tok<'input> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Tok::Ident(s)
            | Tok::IntLit(s)
            | Tok::StringLit(s)
            | Tok::RawStringLit(s)
            | Tok::RuneLit(s) => f.write_str(s),
            other => f.write_str(other.kind().describe()),
        }
    }
}

pub type SpannedTok<'src> = (usize, Tok<'src>, usize);

// =============================================================================
// 6. Lexer wrapper: semicolon insertion + first-error stop
// =============================================================================

pub struct Lexer<'src> {
    logos: LogosLexer<'src, RawTok>,
    pending: Option<SpannedTok<'src>>,
    insert_semis: bool,
    last_can_insert_semi: bool,
    src_len: usize,
    done: bool,
}

impl<'src> Lexer<'src> {
    pub fn new(input: &'src str) -> Self {
        Self::with_config(input, &Config::default())
    }

    pub fn with_config(input: &'src str, config: &Config) -> Self {
        Self {
            logos: RawTok::lexer(input),
            pending: None,
            insert_semis: config.insert_semicolons,
            last_can_insert_semi: false,
            src_len: input.len(),
            done: false,
        }
    }

    #[inline]
    fn emit_semi_at(&mut self, pos: usize) {
        self.last_can_insert_semi = false;
        if self.insert_semis {
            self.pending = Some((pos, Tok::Semi, pos));
        }
    }

    fn error(&mut self, kind: LexErrorKind, span: std::ops::Range<usize>) -> LexError {
        self.done = true;
        self.pending = None;
        let position = LineIndex::new(self.logos.source()).position(span.start);
        tracing::debug!(?kind, %position, "lex error");
        LexError {
            kind,
            span: Span::from_range(span),
            position,
        }
    }
}

impl<'src> Iterator for Lexer<'src> {
    type Item = Result<SpannedTok<'src>, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(tok) = self.pending.take() {
                return Some(Ok(tok));
            }
            if self.done {
                return None;
            }

            let raw = match self.logos.next() {
                None => {
                    self.done = true;
                    if self.last_can_insert_semi {
                        self.emit_semi_at(self.src_len);
                    }
                    continue;
                }
                Some(Err(kind)) => {
                    let span = self.logos.span();
                    return Some(Err(self.error(kind, span)));
                }
                Some(Ok(raw)) => raw,
            };

            let span = self.logos.span();
            let slice = self.logos.slice();

            match raw {
                // BOM is only valid as the very first character.
                RawTok::Bom if span.start == 0 => continue,
                RawTok::Bom => {
                    return Some(Err(self.error(LexErrorKind::InvalidCharacter, span)));
                }
                RawTok::Newline => {
                    if self.last_can_insert_semi {
                        self.emit_semi_at(span.start);
                    }
                    continue;
                }
                RawTok::BlockComment => {
                    if self.last_can_insert_semi {
                        if let Some(off) = slice.find(|c: char| c == '\n' || c == '\r') {
                            self.emit_semi_at(span.start + off);
                        }
                    }
                    continue;
                }
                _ => {}
            }

            if let Some(tok) = raw.to_token(slice) {
                self.last_can_insert_semi = tok.ends_statement();
                return Some(Ok((span.start, tok, span.end)));
            }
        }
    }
}

/// Lexes the whole input, stopping at the first error.
pub fn tokenize<'src>(input: &'src str, config: &Config) -> Result<Vec<SpannedTok<'src>>, LexError> {
    Lexer::with_config(input, config).collect()
}
