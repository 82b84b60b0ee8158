//! # Introduction
//!
//! `cipp` is the syntactic front end for a small imperative language: it
//! turns source text into an abstract syntax tree, prints trees back as
//! canonical source, and ships a terminal explorer for looking at the result.
//!
//! ## Pipeline
//!
//! ```text
//! Source → Lexer → TokenStream → Parser → Program
//! ```
//!
//! 1. [`parser`]: tokenises the source and builds the AST. The first syntax
//!    error aborts the parse.
//! 2. [`printer`]: `Display` for every AST node; output re-parses to the
//!    same tree.
//! 3. [`ui`]: ratatui-based AST explorer; not part of the stable library API.
//!
//! ## Language
//!
//! ```text
//! def int @fib(int n) {
//!     if (n < 2) return n;
//!     return @fib(n - 1) + @fib(n - 2);
//! }
//! ```
//!
//! Types are bare identifiers, functions are called with `@name(...)`, and an
//! expression holds at most one comparison.

pub mod parser;
pub mod printer;
pub mod ui;

pub use parser::{parse_source, ParseError, Parser, SyntaxError};
