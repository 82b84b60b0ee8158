//! cipp source code parser
//!
//! This module transforms cipp source text into an Abstract Syntax Tree (AST):
//! - [`lexer`]: Tokenization (source text → tokens, trivia included)
//! - [`stream`]: Cursor over the significant tokens
//! - [`parse`]: Parser struct, errors and entry points (tokens → AST)
//! - [`ast`]: AST node definitions
//!
//! # Language
//!
//! - Functions: `def Type @name(Type arg, ...) statement`
//! - Statements: blocks, `let`, assignment, array element assignment,
//!   `while`, `if`/`else`, `return`
//! - Expressions: one optional comparison over `+ -` terms over `* /`
//!   factors; variables, integers, parentheses, `@calls(...)`
//! - Keywords are ordinary identifiers, recognised by position
//!
//! # Parser Implementation
//!
//! Hand-written recursive descent parser, one method per grammar production.
//! The first syntax error aborts the parse; there is no recovery.

pub mod ast;
mod declarations;
mod expressions;
pub mod lexer;
pub mod parse;
mod statements;
pub mod stream;

pub use parse::{parse_source, ParseError, Parser, SyntaxError};
