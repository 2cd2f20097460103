use thiserror::Error;

use crate::span::{Position, Span};
use crate::token::{TokenKind, TokenSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagKind {
    Lex,
    Parse,
}

/// A rendered diagnostic, ready for a front end to print.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diag {
    pub kind: DiagKind,
    pub span: Span,
    pub position: Position,
    pub message: String,
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum LexErrorKind {
    #[error("invalid character")]
    InvalidCharacter,
    #[error("unterminated string")]
    UnterminatedString,
    #[error("unterminated rune literal")]
    UnterminatedRune,
    #[error("rune literal must hold exactly one character")]
    InvalidRune,
    #[error("invalid escape")]
    InvalidEscape,
    #[error("invalid numeric literal")]
    InvalidNumber,
    #[error("unterminated comment")]
    UnterminatedComment,
}

impl Default for LexErrorKind {
    #[inline]
    fn default() -> Self {
        LexErrorKind::InvalidCharacter
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{position}: {kind}")]
pub struct LexError {
    pub kind: LexErrorKind,
    pub span: Span,
    pub position: Position,
}

/// The first token that did not fit the grammar.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{position}: expected {expected}, found {}", found_display(.found, .found_text))]
pub struct ParseError {
    pub expected: TokenSet,
    pub found: TokenKind,
    /// Source text of the found token; empty at end of input and for
    /// inserted semicolons.
    pub found_text: String,
    pub span: Span,
    pub position: Position,
}

fn found_display(found: &TokenKind, text: &str) -> String {
    match *found {
        TokenKind::Ident | TokenKind::IntLit | TokenKind::StringLit | TokenKind::RuneLit
            if !text.is_empty() =>
        {
            format!("{} {}", found.describe(), text)
        }
        TokenKind::Semi if text.is_empty() => "newline".to_string(),
        _ => found.describe().to_string(),
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("{position}: import path must not be empty")]
    EmptyImportPath { span: Span, position: Position },

    #[error("{position}: type nesting exceeds the limit of {limit}")]
    NestingTooDeep {
        limit: u32,
        span: Span,
        position: Position,
    },
}

impl Error {
    #[inline]
    pub fn span(&self) -> Span {
        match self {
            Error::Lex(e) => e.span,
            Error::Parse(e) => e.span,
            Error::EmptyImportPath { span, .. } | Error::NestingTooDeep { span, .. } => *span,
        }
    }

    #[inline]
    pub fn position(&self) -> Position {
        match self {
            Error::Lex(e) => e.position,
            Error::Parse(e) => e.position,
            Error::EmptyImportPath { position, .. } | Error::NestingTooDeep { position, .. } => {
                *position
            }
        }
    }

    pub fn as_parse(&self) -> Option<&ParseError> {
        match self {
            Error::Parse(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_lex(&self) -> Option<&LexError> {
        match self {
            Error::Lex(e) => Some(e),
            _ => None,
        }
    }

    pub fn diag(&self) -> Diag {
        let (kind, message) = match self {
            Error::Lex(e) => (DiagKind::Lex, e.kind.to_string()),
            Error::Parse(e) => (
                DiagKind::Parse,
                format!(
                    "expected {}, found {}",
                    e.expected,
                    found_display(&e.found, &e.found_text)
                ),
            ),
            Error::EmptyImportPath { .. } => {
                (DiagKind::Parse, "import path must not be empty".to_string())
            }
            Error::NestingTooDeep { limit, .. } => (
                DiagKind::Parse,
                format!("type nesting exceeds the limit of {limit}"),
            ),
        };
        Diag {
            kind,
            span: self.span(),
            position: self.position(),
            message,
        }
    }
}
