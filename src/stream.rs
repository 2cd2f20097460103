//! Token cursor for the recursive-descent parser.

use crate::error::ParseError;
use crate::lexer::{SpannedTok, Tok};
use crate::span::{LineIndex, Position, Span};
use crate::token::{TokenKind, TokenSet};

/// Cursor over a lexed token sequence with one token of lookahead.
///
/// Past the last token the stream keeps yielding a zero-width [`Tok::Eof`]
/// at the end of the source; it never runs dry and never panics.
pub struct TokenStream<'src> {
    source: &'src str,
    tokens: Vec<SpannedTok<'src>>,
    pos: usize,
    /// End offset of the last consumed token.
    prev_end: usize,
    eof: SpannedTok<'src>,
}

impl<'src> TokenStream<'src> {
    pub fn new(source: &'src str, tokens: Vec<SpannedTok<'src>>) -> Self {
        let len = source.len();
        Self {
            source,
            tokens,
            pos: 0,
            prev_end: 0,
            eof: (len, Tok::Eof, len),
        }
    }

    #[inline]
    fn current(&self) -> &SpannedTok<'src> {
        self.tokens.get(self.pos).unwrap_or(&self.eof)
    }

    /// Current token, not consumed.
    #[inline]
    pub fn peek(&self) -> &Tok<'src> {
        &self.current().1
    }

    #[inline]
    pub fn peek_kind(&self) -> TokenKind {
        self.peek().kind()
    }

    /// Consumes and returns the current token.
    pub fn advance(&mut self) -> SpannedTok<'src> {
        let tok = *self.current();
        if self.pos < self.tokens.len() {
            self.pos += 1;
            self.prev_end = tok.2;
        }
        tok
    }

    #[inline]
    pub fn at(&self, kind: TokenKind) -> bool {
        self.peek_kind() == kind
    }

    #[inline]
    pub fn at_any(&self, set: TokenSet) -> bool {
        set.contains(self.peek_kind())
    }

    /// Consumes the current token if it is of `kind`.
    pub fn eat(&mut self, kind: TokenKind) -> Option<Span> {
        if self.at(kind) {
            let (s, _, e) = self.advance();
            Some(Span::new(s, e))
        } else {
            None
        }
    }

    pub fn expect(&mut self, kind: TokenKind) -> Result<Span, ParseError> {
        self.eat(kind).ok_or_else(|| self.unexpected(kind.into()))
    }

    pub fn is_eof(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    pub fn current_span(&self) -> Span {
        let (s, _, e) = *self.current();
        Span::new(s, e)
    }

    /// Offset where a diagnostic about the current token points.
    ///
    /// At end of input that is right after the last consumed token.
    pub fn error_offset(&self) -> usize {
        if self.is_eof() {
            self.prev_end
        } else {
            self.current().0
        }
    }

    pub fn position_at(&self, offset: usize) -> Position {
        LineIndex::new(self.source).position(offset)
    }

    /// Builds the error for a current token that is not in `expected`.
    pub fn unexpected(&self, expected: TokenSet) -> ParseError {
        let (s, tok, e) = *self.current();
        let offset = self.error_offset();
        let span = if self.is_eof() {
            Span::empty_at(offset)
        } else {
            Span::new(s, e)
        };
        ParseError {
            expected,
            found: tok.kind(),
            found_text: self.source.get(s..e).unwrap_or_default().to_string(),
            span,
            position: self.position_at(offset),
        }
    }
}
