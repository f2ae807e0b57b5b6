//! SQL front-end for mp-db.
//!
//! This module contains the lexer (tokenizer), abstract syntax tree (AST)
//! definitions, a recursive-descent parser, the tree formatter, and the
//! [`ParseResult`] record that the shell renders.

pub mod lexer;
pub mod ast;
pub mod parser;
pub mod format;
pub mod result;

pub use ast::*;
pub use format::format_ast;
pub use lexer::{tokenize, Token, TokenKind};
pub use parser::{parse_statement, Parser};
pub use result::{parse_and_validate, sql_kind, ParseResult};
