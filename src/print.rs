//! Canonical source text for syntax trees.
//!
//! Every node implements `Display`. Output terminates each element with an
//! explicit `;`, so it parses back to an equal tree whether or not
//! semicolon insertion is enabled.

use std::fmt::{self, Display, Write as _};

use crate::ast::*;

/// Writes `items` separated by `", "`.
fn comma_list<T: Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

/// Quotes `s` as an interpreted string literal.
///
/// Backslash, double quote and control characters are escaped; everything
/// else is written as is.
pub fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x80 && c.is_control() => {
                let _ = write!(out, "\\x{:02x}", c as u32);
            }
            c if c.is_control() && (c as u32) <= 0xFFFF => {
                let _ = write!(out, "\\u{:04x}", c as u32);
            }
            c if c.is_control() => {
                let _ = write!(out, "\\U{:08x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

impl fmt::Display for SourceFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "package {};", self.package_name)?;
        for spec in &self.imports {
            writeln!(f, "import {spec};")?;
        }
        for decl in &self.decls {
            writeln!(f, "{decl};")?;
        }
        Ok(())
    }
}

impl fmt::Display for ImportSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.alias {
            Some(ImportAlias::Dot) => f.write_str(". ")?,
            Some(ImportAlias::Name(name)) => write!(f, "{name} ")?,
            None => {}
        }
        f.write_str(&quote(&self.path))
    }
}

impl fmt::Display for TopLevelDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TopLevelDecl::Const(c) => c.fmt(f),
            other => f.write_str(other.keyword()),
        }
    }
}

impl fmt::Display for ConstDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.specs.as_slice() {
            [] => f.write_str("const ()"),
            [spec] => write!(f, "const {spec}"),
            specs => {
                f.write_str("const (\n")?;
                for spec in specs {
                    writeln!(f, "\t{spec};")?;
                }
                f.write_str(")")
            }
        }
    }
}

impl fmt::Display for ConstSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        comma_list(f, &self.names)?;
        if let Some(ty) = &self.ty {
            write!(f, " {ty}")?;
        }
        if !self.values.is_empty() {
            f.write_str(" = ")?;
            comma_list(f, &self.values)?;
        }
        Ok(())
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Named(name) => f.write_str(name),
            Type::Qualified(q) => q.fmt(f),
            Type::Array(arr) => arr.fmt(f),
            Type::Struct(st) => st.fmt(f),
            Type::Paren(inner) => write!(f, "({inner})"),
        }
    }
}

impl fmt::Display for QualifiedIdent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.package, self.name)
    }
}

impl fmt::Display for ArrayType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]{}", self.len, self.elem)
    }
}

impl fmt::Display for StructType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.fields.is_empty() {
            return f.write_str("struct {}");
        }
        f.write_str("struct {")?;
        for field in &self.fields {
            write!(f, " {field};")?;
        }
        f.write_str(" }")
    }
}

impl fmt::Display for FieldDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            FieldKind::Named { names, ty } => {
                comma_list(f, names)?;
                write!(f, " {ty}")?;
            }
            FieldKind::Embedded { pointer, type_name } => {
                if *pointer {
                    f.write_str("*")?;
                }
                type_name.fmt(f)?;
            }
        }
        if let Some(tag) = &self.tag {
            write!(f, " {}", quote(tag))?;
        }
        Ok(())
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeName::Simple(name) => f.write_str(name),
            TypeName::Qualified(q) => q.fmt(f),
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Placeholder => f.write_str("+"),
            Expr::Ident(name) => f.write_str(name),
            Expr::Int(text) => f.write_str(text),
            Expr::Str(value) => f.write_str(&quote(value)),
        }
    }
}
