//! Go declaration-subset lexer + parser (Logos + hand-written LL(1) descent).
//!
//! - Lexer uses Logos; Go semicolon insertion is available through
//!   [`Config::go`].
//! - Parser is predictive recursive descent, one procedure per production,
//!   stopping at the first error.
//! - Output is an owned syntax tree ([`ast::SourceFile`]).

pub mod ast;
pub mod config;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod print;
pub mod span;
pub mod stream;
pub mod token;
pub mod walk;

// Re-exports for convenience
pub use config::Config;
pub use error::{Diag, DiagKind, Error, LexError, LexErrorKind, ParseError};
pub use lexer::Lexer;
pub use span::{Position, Span};
pub use token::{TokenKind, TokenSet};

use crate::ast::SourceFile;

/// Parse one source file with the default [`Config`]: the grammar as
/// written, with explicit semicolons.
///
/// Returns the tree, or the first lexical or syntax error.
pub fn parse_source(input: &str) -> Result<SourceFile, Error> {
    parse_source_with(input, &Config::default())
}

pub fn parse_source_with(input: &str, config: &Config) -> Result<SourceFile, Error> {
    tracing::debug!(len = input.len(), semis = config.insert_semicolons, "parse start");

    let tokens = lexer::tokenize(input, config)?;
    let result = parser::Parser::new(input, tokens, config).parse_source_file();

    match &result {
        Ok(file) => tracing::debug!(
            package = %file.package_name,
            imports = file.imports.len(),
            decls = file.decls.len(),
            "parse ok"
        ),
        Err(e) => tracing::debug!(error = %e, "parse failed"),
    }
    result
}
