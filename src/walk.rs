use crate::ast::*;

// Core traits
pub trait Walk<'ast> {
    fn walk<V: Visitor<'ast> + ?Sized>(&'ast self, v: &mut V);
}

/// Each `visit_*` defaults to walking the node's children; override the ones
/// you care about and call `node.walk(self)` to keep descending.
pub trait Visitor<'ast> {
    #[inline(always)]
    fn visit_source_file(&mut self, f: &'ast SourceFile) {
        f.walk(self);
    }

    #[inline(always)]
    fn visit_import_spec(&mut self, spec: &'ast ImportSpec) {
        spec.walk(self);
    }

    #[inline(always)]
    fn visit_decl(&mut self, decl: &'ast TopLevelDecl) {
        decl.walk(self);
    }

    #[inline(always)]
    fn visit_const_spec(&mut self, spec: &'ast ConstSpec) {
        spec.walk(self);
    }

    #[inline(always)]
    fn visit_type(&mut self, ty: &'ast Type) {
        ty.walk(self);
    }

    #[inline(always)]
    fn visit_field(&mut self, field: &'ast FieldDecl) {
        field.walk(self);
    }

    #[inline(always)]
    fn visit_type_name(&mut self, name: &'ast TypeName) {
        name.walk(self);
    }

    #[inline(always)]
    fn visit_expr(&mut self, expr: &'ast Expr) {
        expr.walk(self);
    }

    /// Every identifier that names something: package, alias, constant,
    /// field, type or operand.
    #[inline(always)]
    fn visit_ident(&mut self, _ident: &'ast Ident) {}
}

impl<'ast> Walk<'ast> for SourceFile {
    fn walk<V: Visitor<'ast> + ?Sized>(&'ast self, v: &mut V) {
        v.visit_ident(&self.package_name);
        for spec in &self.imports {
            v.visit_import_spec(spec);
        }
        for decl in &self.decls {
            v.visit_decl(decl);
        }
    }
}

impl<'ast> Walk<'ast> for ImportSpec {
    #[inline(always)]
    fn walk<V: Visitor<'ast> + ?Sized>(&'ast self, v: &mut V) {
        if let Some(ImportAlias::Name(name)) = &self.alias {
            v.visit_ident(name);
        }
    }
}

impl<'ast> Walk<'ast> for TopLevelDecl {
    #[inline(always)]
    fn walk<V: Visitor<'ast> + ?Sized>(&'ast self, v: &mut V) {
        if let TopLevelDecl::Const(c) = self {
            for spec in &c.specs {
                v.visit_const_spec(spec);
            }
        }
    }
}

impl<'ast> Walk<'ast> for ConstSpec {
    fn walk<V: Visitor<'ast> + ?Sized>(&'ast self, v: &mut V) {
        self.names.walk(v);
        if let Some(ty) = &self.ty {
            v.visit_type(ty);
        }
        for value in &self.values {
            v.visit_expr(value);
        }
    }
}

impl<'ast> Walk<'ast> for Type {
    fn walk<V: Visitor<'ast> + ?Sized>(&'ast self, v: &mut V) {
        match self {
            Type::Named(name) => v.visit_ident(name),
            Type::Qualified(q) => q.walk(v),
            Type::Array(arr) => {
                v.visit_expr(&arr.len);
                v.visit_type(&arr.elem);
            }
            Type::Struct(st) => {
                for field in &st.fields {
                    v.visit_field(field);
                }
            }
            Type::Paren(inner) => v.visit_type(inner),
        }
    }
}

impl<'ast> Walk<'ast> for FieldDecl {
    fn walk<V: Visitor<'ast> + ?Sized>(&'ast self, v: &mut V) {
        match &self.kind {
            FieldKind::Named { names, ty } => {
                names.walk(v);
                v.visit_type(ty);
            }
            FieldKind::Embedded { type_name, .. } => v.visit_type_name(type_name),
        }
    }
}

impl<'ast> Walk<'ast> for TypeName {
    #[inline(always)]
    fn walk<V: Visitor<'ast> + ?Sized>(&'ast self, v: &mut V) {
        match self {
            TypeName::Simple(name) => v.visit_ident(name),
            TypeName::Qualified(q) => q.walk(v),
        }
    }
}

impl<'ast> Walk<'ast> for QualifiedIdent {
    #[inline(always)]
    fn walk<V: Visitor<'ast> + ?Sized>(&'ast self, v: &mut V) {
        v.visit_ident(&self.package);
        v.visit_ident(&self.name);
    }
}

impl<'ast> Walk<'ast> for Expr {
    #[inline(always)]
    fn walk<V: Visitor<'ast> + ?Sized>(&'ast self, v: &mut V) {
        if let Expr::Ident(name) = self {
            v.visit_ident(name);
        }
    }
}

// Utilities
impl<'ast> Walk<'ast> for IdentList {
    #[inline(always)]
    fn walk<V: Visitor<'ast> + ?Sized>(&'ast self, v: &mut V) {
        for name in self {
            v.visit_ident(name);
        }
    }
}
