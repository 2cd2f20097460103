//! Predictive recursive-descent parser.
//!
//! One method per production of the grammar below; alternatives are chosen
//! by testing the lookahead token against constant first-sets. The parser
//! stops at the first token that does not fit.
//!
//! ```text
//! SourceFile     = PackageClause ";" { ImportDecl ";" } { TopLevelDecl ";" } .
//! PackageClause  = "package" PackageName .
//! ImportDecl     = "import" ( ImportSpec | "(" { ImportSpec ";" } ")" ) .
//! ImportSpec     = [ "." | PackageName ] ImportPath .
//! TopLevelDecl   = ConstDecl | TypeDecl | VarDecl | FunctionDecl | MethodDecl .
//! ConstDecl      = "const" ( ConstSpec | "(" { ConstSpec ";" } ")" ) .
//! ConstSpec      = IdentifierList [ [ Type ] "=" ExpressionList ] .
//! Type           = TypeName | ArrayType | StructType | "(" Type ")" .
//! TypeName       = identifier [ "." identifier ] .
//! ArrayType      = "[" Expression "]" Type .
//! StructType     = "struct" "{" { FieldDecl ";" } "}" .
//! FieldDecl      = ( IdentifierList Type | [ "*" ] TypeName ) [ Tag ] .
//! Tag            = string_lit .
//! TypeDecl = "if" .  VarDecl = "var" .  FunctionDecl = "break" .  MethodDecl = "return" .
//! Expression     = "+" | identifier | int_lit | string_lit .
//! ```
//!
//! Inside `( … )` and `{ … }` lists the `;` after the last element may be
//! left out.

use smallvec::smallvec;

use crate::ast::*;
use crate::config::Config;
use crate::error::Error;
use crate::lexer::{unquote, SpannedTok, Tok};
use crate::stream::TokenStream;
use crate::token::TokenKind as K;
use crate::token::TokenSet;

type PResult<T> = Result<T, Error>;

// =============================================================================
// First-sets
// =============================================================================

const FIRST_TOP_LEVEL_DECL: TokenSet =
    TokenSet::of(&[K::KwConst, K::KwIf, K::KwVar, K::KwBreak, K::KwReturn]);
const FIRST_IMPORT_SPEC: TokenSet = TokenSet::of(&[K::Dot, K::Ident, K::StringLit]);
const FIRST_TYPE: TokenSet = TokenSet::of(&[K::Ident, K::LBrack, K::KwStruct, K::LParen]);
const FIRST_EXPR: TokenSet = TokenSet::of(&[K::Plus, K::Ident, K::IntLit, K::StringLit]);
const FIRST_FIELD_DECL: TokenSet = TokenSet::of(&[K::Star, K::Ident]);

pub struct Parser<'src> {
    stream: TokenStream<'src>,
    depth: u32,
    max_depth: u32,
}

impl<'src> Parser<'src> {
    pub fn new(source: &'src str, tokens: Vec<SpannedTok<'src>>, config: &Config) -> Self {
        Self {
            stream: TokenStream::new(source, tokens),
            depth: 0,
            max_depth: config.max_depth,
        }
    }

    /// Parses the whole token sequence as one `SourceFile`.
    pub fn parse_source_file(mut self) -> PResult<SourceFile> {
        self.source_file()
    }

    // -------------------------------------------------------------------------
    // Shared shapes
    // -------------------------------------------------------------------------

    fn unexpected(&self, expected: TokenSet) -> Error {
        self.stream.unexpected(expected).into()
    }

    /// Body of a parenthesized or braced list, after the opener.
    ///
    /// Reads `item ";"` pairs until `close`; the final `;` is optional.
    fn group<T>(
        &mut self,
        close: K,
        first: TokenSet,
        mut item: impl FnMut(&mut Self) -> PResult<T>,
    ) -> PResult<Vec<T>> {
        let mut items = Vec::new();
        loop {
            if self.stream.eat(close).is_some() {
                return Ok(items);
            }
            if !self.stream.at_any(first) {
                return Err(self.unexpected(first.with(close)));
            }
            items.push(item(self)?);
            if self.stream.eat(K::Semi).is_none() && !self.stream.at(close) {
                return Err(self.unexpected(TokenSet::of(&[K::Semi, close])));
            }
        }
    }

    /// Runs `f` one type-nesting level deeper.
    fn nested<T>(&mut self, f: impl FnOnce(&mut Self) -> PResult<T>) -> PResult<T> {
        if self.depth >= self.max_depth {
            let offset = self.stream.error_offset();
            return Err(Error::NestingTooDeep {
                limit: self.max_depth,
                span: self.stream.current_span(),
                position: self.stream.position_at(offset),
            });
        }
        self.depth += 1;
        let out = f(self);
        self.depth -= 1;
        out
    }

    fn ident(&mut self) -> PResult<Ident> {
        match *self.stream.peek() {
            Tok::Ident(name) => {
                self.stream.advance();
                Ok(name.to_string())
            }
            _ => Err(self.unexpected(K::Ident.into())),
        }
    }

    fn string_lit(&mut self) -> PResult<String> {
        match *self.stream.peek() {
            Tok::StringLit(lit) | Tok::RawStringLit(lit) => {
                self.stream.advance();
                Ok(unquote(lit))
            }
            _ => Err(self.unexpected(K::StringLit.into())),
        }
    }

    // -------------------------------------------------------------------------
    // SourceFile, package, imports
    // -------------------------------------------------------------------------

    fn source_file(&mut self) -> PResult<SourceFile> {
        let package_name = self.package_clause()?;
        self.stream.expect(K::Semi)?;

        let mut imports = Vec::new();
        while self.stream.at(K::KwImport) {
            self.import_decl(&mut imports)?;
            self.stream.expect(K::Semi)?;
        }

        let mut decls = Vec::new();
        while self.stream.at_any(FIRST_TOP_LEVEL_DECL) {
            decls.push(self.top_level_decl()?);
            self.stream.expect(K::Semi)?;
        }

        if !self.stream.at(K::Eof) {
            let mut expected = FIRST_TOP_LEVEL_DECL.with(K::Eof);
            if decls.is_empty() {
                expected = expected.with(K::KwImport);
            }
            return Err(self.unexpected(expected));
        }

        Ok(SourceFile {
            package_name,
            imports,
            decls,
        })
    }

    fn package_clause(&mut self) -> PResult<Ident> {
        self.stream.expect(K::KwPackage)?;
        self.ident()
    }

    /// Appends the specs of one `import` declaration to `out`.
    fn import_decl(&mut self, out: &mut Vec<ImportSpec>) -> PResult<()> {
        self.stream.expect(K::KwImport)?;

        if self.stream.eat(K::LParen).is_some() {
            out.extend(self.group(K::RParen, FIRST_IMPORT_SPEC, Self::import_spec)?);
        } else if self.stream.at_any(FIRST_IMPORT_SPEC) {
            out.push(self.import_spec()?);
        } else {
            return Err(self.unexpected(FIRST_IMPORT_SPEC.with(K::LParen)));
        }
        Ok(())
    }

    fn import_spec(&mut self) -> PResult<ImportSpec> {
        let alias = match *self.stream.peek() {
            Tok::Dot => {
                self.stream.advance();
                Some(ImportAlias::Dot)
            }
            Tok::Ident(name) => {
                self.stream.advance();
                Some(ImportAlias::Name(name.to_string()))
            }
            _ => None,
        };
        let path = self.import_path()?;
        Ok(ImportSpec { alias, path })
    }

    fn import_path(&mut self) -> PResult<String> {
        let span = self.stream.current_span();
        let path = self.string_lit()?;
        if path.is_empty() {
            return Err(Error::EmptyImportPath {
                span,
                position: self.stream.position_at(span.start as usize),
            });
        }
        Ok(path)
    }

    // -------------------------------------------------------------------------
    // Declarations
    // -------------------------------------------------------------------------

    fn top_level_decl(&mut self) -> PResult<TopLevelDecl> {
        let decl = match self.stream.peek_kind() {
            K::KwConst => TopLevelDecl::Const(self.const_decl()?),
            K::KwIf => TopLevelDecl::Type(self.type_decl()?),
            K::KwVar => TopLevelDecl::Var(self.var_decl()?),
            K::KwBreak => TopLevelDecl::Function(self.function_decl()?),
            K::KwReturn => TopLevelDecl::Method(self.method_decl()?),
            _ => return Err(self.unexpected(FIRST_TOP_LEVEL_DECL)),
        };
        tracing::trace!(keyword = decl.keyword(), "top-level decl");
        Ok(decl)
    }

    fn const_decl(&mut self) -> PResult<ConstDecl> {
        self.stream.expect(K::KwConst)?;

        let specs = if self.stream.eat(K::LParen).is_some() {
            self.group(K::RParen, K::Ident.into(), Self::const_spec)?
        } else if self.stream.at(K::Ident) {
            vec![self.const_spec()?]
        } else {
            return Err(self.unexpected(TokenSet::of(&[K::Ident, K::LParen])));
        };
        Ok(ConstDecl { specs })
    }

    fn const_spec(&mut self) -> PResult<ConstSpec> {
        let names = self.identifier_list()?;

        let (ty, values) = if self.stream.at_any(FIRST_TYPE) {
            let ty = self.type_()?;
            self.stream.expect(K::Assign)?;
            (Some(ty), self.expression_list()?)
        } else if self.stream.eat(K::Assign).is_some() {
            (None, self.expression_list()?)
        } else {
            (None, Vec::new())
        };

        Ok(ConstSpec { names, ty, values })
    }

    fn type_decl(&mut self) -> PResult<TypeDecl> {
        self.stream.expect(K::KwIf)?;
        Ok(TypeDecl)
    }

    fn var_decl(&mut self) -> PResult<VarDecl> {
        self.stream.expect(K::KwVar)?;
        Ok(VarDecl)
    }

    fn function_decl(&mut self) -> PResult<FunctionDecl> {
        self.stream.expect(K::KwBreak)?;
        Ok(FunctionDecl)
    }

    fn method_decl(&mut self) -> PResult<MethodDecl> {
        self.stream.expect(K::KwReturn)?;
        Ok(MethodDecl)
    }

    // -------------------------------------------------------------------------
    // Lists & expressions
    // -------------------------------------------------------------------------

    fn identifier_list(&mut self) -> PResult<IdentList> {
        let first = self.ident()?;
        self.identifier_list_from(first)
    }

    /// Rest of an `IdentifierList` whose first identifier is already read.
    fn identifier_list_from(&mut self, first: Ident) -> PResult<IdentList> {
        let mut names: IdentList = smallvec![first];
        while self.stream.eat(K::Comma).is_some() {
            names.push(self.ident()?);
        }
        Ok(names)
    }

    fn expression_list(&mut self) -> PResult<Vec<Expr>> {
        let mut exprs = vec![self.expression()?];
        while self.stream.eat(K::Comma).is_some() {
            exprs.push(self.expression()?);
        }
        Ok(exprs)
    }

    fn expression(&mut self) -> PResult<Expr> {
        let expr = match *self.stream.peek() {
            Tok::Plus => Expr::Placeholder,
            Tok::Ident(name) => Expr::Ident(name.to_string()),
            Tok::IntLit(text) => Expr::Int(text.to_string()),
            Tok::StringLit(lit) | Tok::RawStringLit(lit) => Expr::Str(unquote(lit)),
            _ => return Err(self.unexpected(FIRST_EXPR)),
        };
        self.stream.advance();
        Ok(expr)
    }

    // -------------------------------------------------------------------------
    // Types
    // -------------------------------------------------------------------------

    fn type_(&mut self) -> PResult<Type> {
        match self.stream.peek_kind() {
            K::Ident => Ok(self.type_name()?.into()),
            K::LBrack => self.nested(|p| Ok(Type::Array(Box::new(p.array_type()?)))),
            K::KwStruct => self.nested(|p| Ok(Type::Struct(p.struct_type()?))),
            K::LParen => self.nested(|p| {
                p.stream.expect(K::LParen)?;
                let inner = p.type_()?;
                p.stream.expect(K::RParen)?;
                Ok(Type::Paren(Box::new(inner)))
            }),
            _ => Err(self.unexpected(FIRST_TYPE)),
        }
    }

    fn type_name(&mut self) -> PResult<TypeName> {
        let first = self.ident()?;
        self.type_name_from(first)
    }

    fn type_name_from(&mut self, first: Ident) -> PResult<TypeName> {
        if self.stream.eat(K::Dot).is_some() {
            let name = self.ident()?;
            Ok(TypeName::Qualified(QualifiedIdent {
                package: first,
                name,
            }))
        } else {
            Ok(TypeName::Simple(first))
        }
    }

    fn array_type(&mut self) -> PResult<ArrayType> {
        self.stream.expect(K::LBrack)?;
        let len = self.expression()?;
        self.stream.expect(K::RBrack)?;
        let elem = self.type_()?;
        Ok(ArrayType { len, elem })
    }

    fn struct_type(&mut self) -> PResult<StructType> {
        self.stream.expect(K::KwStruct)?;
        self.stream.expect(K::LBrace)?;
        let fields = self.group(K::RBrace, FIRST_FIELD_DECL, Self::field_decl)?;
        Ok(StructType { fields })
    }

    /// Left-factored on the leading identifier: the token after it decides
    /// between named fields and an embedded type name.
    fn field_decl(&mut self) -> PResult<FieldDecl> {
        let kind = match *self.stream.peek() {
            Tok::Star => {
                self.stream.advance();
                FieldKind::Embedded {
                    pointer: true,
                    type_name: self.type_name()?,
                }
            }
            Tok::Ident(first) => {
                self.stream.advance();
                let first = first.to_string();
                match self.stream.peek_kind() {
                    K::Dot => FieldKind::Embedded {
                        pointer: false,
                        type_name: self.type_name_from(first)?,
                    },
                    k if k == K::Comma || FIRST_TYPE.contains(k) => {
                        let names = self.identifier_list_from(first)?;
                        let ty = self.type_()?;
                        FieldKind::Named { names, ty }
                    }
                    _ => FieldKind::Embedded {
                        pointer: false,
                        type_name: TypeName::Simple(first),
                    },
                }
            }
            _ => return Err(self.unexpected(FIRST_FIELD_DECL)),
        };

        let tag = self.tag()?;
        Ok(FieldDecl { kind, tag })
    }

    fn tag(&mut self) -> PResult<Option<String>> {
        if self.stream.at(K::StringLit) {
            self.string_lit().map(Some)
        } else {
            Ok(None)
        }
    }
}
