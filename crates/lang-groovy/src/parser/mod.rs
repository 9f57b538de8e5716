//! Groovy source parsing.
//!
//! The parser is error tolerant: it always produces a [`CompilationUnit`],
//! recording problems in [`CompilationUnit::errors`] and substituting
//! `Error` nodes for what it could not understand.

pub mod ast;
pub mod lexer;
mod parser;
pub mod signature;

pub use ast::{
    BinaryOp, CompilationUnit, Expr, ExprId, ExprKind, LiteralKind, MapKey, Stmt, StmtId, StmtKind,
    UnaryOp,
};
pub use signature::SignatureError;

use groovyscope_api::Span;
use thiserror::Error;

/// A syntax problem found while parsing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message} at {}..{}", span.start, span.end)]
pub struct ParseError {
    pub message: String,
    pub span: Span,
}

/// Parse a Groovy script or class file.
pub fn parse(source: &str) -> CompilationUnit {
    parser::Parser::new(source).parse()
}
