//! # Syntax tree for the Go declaration subset
//!
//! Owned, immutable tree produced by [`crate::parser`]. Every node is built
//! once by the parse procedure of its production and owned by its parent; no
//! sharing, no cycles.
//!
//! Nodes carry no spans: two trees are equal exactly when they have the same
//! structure, which is what the print/re-parse round trip relies on.
//! Diagnostics carry their own positions (see [`crate::error`]).
//!
//! Traversal lives in [`crate::walk`]; canonical text output in
//! [`crate::print`].

use smallvec::SmallVec;

/// Identifier text.
pub type Ident = String;

/// `IdentifierList`: one or more identifiers, rarely more than two.
pub type IdentList = SmallVec<[Ident; 2]>;

// =============================================================================
// Source file & imports
// =============================================================================

/// Root node: `package` clause, imports, then top-level declarations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub package_name: Ident,
    /// Flattened across all `import` declarations, in source order.
    pub imports: Vec<ImportSpec>,
    pub decls: Vec<TopLevelDecl>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSpec {
    pub alias: Option<ImportAlias>,
    /// Decoded path; never empty.
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportAlias {
    /// `import . "path"`
    Dot,
    /// `import name "path"`
    Name(Ident),
}

// =============================================================================
// Declarations
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TopLevelDecl {
    Const(ConstDecl),
    Type(TypeDecl),
    Var(VarDecl),
    Function(FunctionDecl),
    Method(MethodDecl),
}

/// `const X = …` or `const ( … )`.
///
/// The single and grouped forms are not distinguished; a group with exactly
/// one spec is the same tree as the single form.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConstDecl {
    pub specs: Vec<ConstSpec>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstSpec {
    pub names: IdentList,
    /// Only present together with `values`.
    pub ty: Option<Type>,
    pub values: Vec<Expr>,
}

/// Placeholder production, the single token `if`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TypeDecl;

/// Placeholder production, the single token `var`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VarDecl;

/// Placeholder production, the single token `break`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FunctionDecl;

/// Placeholder production, the single token `return`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MethodDecl;

impl TopLevelDecl {
    /// Leading keyword, as written in source.
    pub const fn keyword(&self) -> &'static str {
        match self {
            TopLevelDecl::Const(_) => "const",
            TopLevelDecl::Type(_) => "if",
            TopLevelDecl::Var(_) => "var",
            TopLevelDecl::Function(_) => "break",
            TopLevelDecl::Method(_) => "return",
        }
    }
}

// =============================================================================
// Types
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Type {
    Named(Ident),
    Qualified(QualifiedIdent),
    Array(Box<ArrayType>),
    Struct(StructType),
    Paren(Box<Type>),
}

/// `pkg.Name`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QualifiedIdent {
    pub package: Ident,
    pub name: Ident,
}

/// `[len]elem`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrayType {
    pub len: Expr,
    pub elem: Type,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StructType {
    pub fields: Vec<FieldDecl>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDecl {
    pub kind: FieldKind,
    /// Decoded tag value.
    pub tag: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    /// `a, b T`
    Named { names: IdentList, ty: Type },
    /// `T`, `*T`, `pkg.T` or `*pkg.T`
    Embedded { pointer: bool, type_name: TypeName },
}

/// `TypeName`: plain or package-qualified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeName {
    Simple(Ident),
    Qualified(QualifiedIdent),
}

impl From<TypeName> for Type {
    fn from(name: TypeName) -> Self {
        match name {
            TypeName::Simple(id) => Type::Named(id),
            TypeName::Qualified(q) => Type::Qualified(q),
        }
    }
}

impl PartialEq<str> for TypeName {
    fn eq(&self, other: &str) -> bool {
        match self {
            TypeName::Simple(id) => id == other,
            TypeName::Qualified(q) => other
                .split_once('.')
                .is_some_and(|(p, n)| p == q.package && n == q.name),
        }
    }
}

impl PartialEq<&str> for TypeName {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

// =============================================================================
// Expressions
// =============================================================================

/// Single-token expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// The fixed `+` token.
    Placeholder,
    Ident(Ident),
    /// Integer literal text, as written.
    Int(String),
    /// Decoded string value.
    Str(String),
}
