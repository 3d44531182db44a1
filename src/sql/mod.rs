//! Command language module
//!
//! This module turns one line of command text into a `Command`:
//! - Lexer (whitespace tokens, quote-aware value lists)
//! - AST
//! - Parser

pub mod ast;
pub mod lexer;
pub mod parser;

pub use ast::{AddColumnCommand, Command, InsertCommand};
pub use parser::{parse_command, Parser};
