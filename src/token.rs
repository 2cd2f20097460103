//! Token kinds and first-set bitsets.

use std::fmt;

/// Payload-free classification of a token.
///
/// The discriminant doubles as the bit index inside a [`TokenSet`].
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TokenKind {
    Ident,
    IntLit,
    StringLit,
    RuneLit,

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

    Eof,
}

impl TokenKind {
    pub const ALL: [TokenKind; 25] = [
        TokenKind::Ident,
        TokenKind::IntLit,
        TokenKind::StringLit,
        TokenKind::RuneLit,
        TokenKind::KwPackage,
        TokenKind::KwImport,
        TokenKind::KwConst,
        TokenKind::KwStruct,
        TokenKind::KwVar,
        TokenKind::KwIf,
        TokenKind::KwBreak,
        TokenKind::KwReturn,
        TokenKind::Star,
        TokenKind::Dot,
        TokenKind::Comma,
        TokenKind::Semi,
        TokenKind::LParen,
        TokenKind::RParen,
        TokenKind::LBrace,
        TokenKind::RBrace,
        TokenKind::LBrack,
        TokenKind::RBrack,
        TokenKind::Assign,
        TokenKind::Plus,
        TokenKind::Eof,
    ];

    /// How the kind is named in diagnostics.
    pub const fn describe(self) -> &'static str {
        match self {
            TokenKind::Ident => "identifier",
            TokenKind::IntLit => "integer literal",
            TokenKind::StringLit => "string literal",
            TokenKind::RuneLit => "rune literal",
            TokenKind::KwPackage => "'package'",
            TokenKind::KwImport => "'import'",
            TokenKind::KwConst => "'const'",
            TokenKind::KwStruct => "'struct'",
            TokenKind::KwVar => "'var'",
            TokenKind::KwIf => "'if'",
            TokenKind::KwBreak => "'break'",
            TokenKind::KwReturn => "'return'",
            TokenKind::Star => "'*'",
            TokenKind::Dot => "'.'",
            TokenKind::Comma => "','",
            TokenKind::Semi => "';'",
            TokenKind::LParen => "'('",
            TokenKind::RParen => "')'",
            TokenKind::LBrace => "'{'",
            TokenKind::RBrace => "'}'",
            TokenKind::LBrack => "'['",
            TokenKind::RBrack => "']'",
            TokenKind::Assign => "'='",
            TokenKind::Plus => "'+'",
            TokenKind::Eof => "end of input",
        }
    }

    #[inline(always)]
    const fn bit(self) -> u32 {
        1 << (self as u8)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

/// A set of token kinds, stored as a bitset.
///
/// First-sets are `const` values built with [`TokenSet::of`], so predictive
/// dispatch is a single mask test.
#[derive(Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct TokenSet(u32);

impl TokenSet {
    pub const EMPTY: Self = Self(0);

    pub const fn of(kinds: &[TokenKind]) -> Self {
        let mut bits = 0;
        let mut i = 0;
        while i < kinds.len() {
            bits |= kinds[i].bit();
            i += 1;
        }
        Self(bits)
    }

    #[inline(always)]
    pub const fn contains(self, kind: TokenKind) -> bool {
        self.0 & kind.bit() != 0
    }

    #[inline(always)]
    pub const fn with(self, kind: TokenKind) -> Self {
        Self(self.0 | kind.bit())
    }

    #[inline(always)]
    pub const fn union(self, other: TokenSet) -> Self {
        Self(self.0 | other.0)
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Members in declaration order of [`TokenKind`].
    pub fn iter(self) -> impl Iterator<Item = TokenKind> {
        TokenKind::ALL.into_iter().filter(move |k| self.contains(*k))
    }
}

impl From<TokenKind> for TokenSet {
    fn from(kind: TokenKind) -> Self {
        Self(kind.bit())
    }
}

impl FromIterator<TokenKind> for TokenSet {
    fn from_iter<I: IntoIterator<Item = TokenKind>>(iter: I) -> Self {
        iter.into_iter().fold(Self::EMPTY, TokenSet::with)
    }
}

impl fmt::Debug for TokenSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// Renders as `a, b or c`.
impl fmt::Display for TokenSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = self.len();
        for (i, kind) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(if i + 1 == n { " or " } else { ", " })?;
            }
            f.write_str(kind.describe())?;
        }
        Ok(())
    }
}
