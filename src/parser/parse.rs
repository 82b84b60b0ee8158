//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct and core parsing infrastructure,
//! including error types, the lookahead and `accept_*` primitives, and the
//! program entry point.
//!
//! # Parser Architecture
//!
//! The Parser uses a recursive descent approach with the following organization:
//! - This module: Parser struct, helper methods, and coordination
//! - `declarations`: Parsing functions, arguments and types
//! - `statements`: Parsing statements (blocks, `let`, `while`, `if`, ...)
//! - `expressions`: Parsing expressions, one method per precedence level
//!
//! # Implementation
//!
//! Parser methods are split across multiple files using `impl Parser` blocks,
//! allowing each module to extend the Parser with related functionality while
//! maintaining access to the shared token stream. The stream position is the
//! only state; AST nodes travel upward through return values.

use crate::parser::ast::*;
use crate::parser::lexer::{LexError, Lexer, Token};
use crate::parser::stream::TokenStream;
use thiserror::Error;

/// The single syntax error kind: what was expected versus what was found
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Syntax error at line {}, column {}: {message}", location.line, location.column)]
pub struct SyntaxError {
    pub message: String,
    pub location: SourceLocation,
}

/// Failure of the whole source → AST pipeline
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
}

impl ParseError {
    pub fn location(&self) -> SourceLocation {
        match self {
            ParseError::Lex(err) => err.location,
            ParseError::Syntax(err) => err.location,
        }
    }
}

/// Tokenize and parse a complete program
pub fn parse_source(source: &str) -> Result<Program, ParseError> {
    let mut parser = Parser::new(source)?;
    Ok(parser.parse_program()?)
}

/// Deepest statement/expression nesting accepted before the parse fails
pub const MAX_NESTING: usize = 256;

/// Recursive descent parser for cipp
pub struct Parser {
    pub(crate) tokens: TokenStream,
    depth: usize,
}

impl Parser {
    pub fn new(source: &str) -> Result<Self, ParseError> {
        let tokens = Lexer::new(source).tokenize_stream()?;
        Ok(Self::from_stream(tokens))
    }

    pub fn from_stream(tokens: TokenStream) -> Self {
        Self { tokens, depth: 0 }
    }

    /// Parse the entire program: functions for as long as the next token is `def`
    pub fn parse_program(&mut self) -> Result<Program, SyntaxError> {
        let mut program = Program::new();

        while self.next_is_keyword("def") {
            program.functions.push(self.parse_function()?);
        }

        Ok(program)
    }

    pub fn is_at_end(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Tokens left unconsumed, e.g. trailing input after the last function
    pub fn remaining(&self) -> usize {
        self.tokens.remaining()
    }

    /// Run `production` one nesting level deeper, failing past [`MAX_NESTING`]
    pub(crate) fn nested<T>(
        &mut self,
        production: impl FnOnce(&mut Self) -> Result<T, SyntaxError>,
    ) -> Result<T, SyntaxError> {
        if self.depth >= MAX_NESTING {
            return Err(SyntaxError {
                message: format!("nesting too deep: more than {} levels", MAX_NESTING),
                location: self.tokens.location(),
            });
        }

        self.depth += 1;
        let result = production(self);
        self.depth -= 1;
        result
    }

    // ===== Lookahead =====

    pub(crate) fn next_is_keyword(&self, keyword: &str) -> bool {
        matches!(self.tokens.peek(), Some(Token::Ident(name, _)) if name == keyword)
    }

    pub(crate) fn next_is_symbol(&self, symbol: char) -> bool {
        matches!(self.tokens.peek(), Some(Token::Symbol(c, _)) if *c == symbol)
    }

    pub(crate) fn next_is_one_of_symbols(&self, symbols: &[char]) -> bool {
        symbols.iter().any(|&c| self.next_is_symbol(c))
    }

    pub(crate) fn next_is_identifier(&self) -> bool {
        matches!(self.tokens.peek(), Some(Token::Ident(..)))
    }

    pub(crate) fn next_is_integer(&self) -> bool {
        matches!(self.tokens.peek(), Some(Token::Int(..)))
    }

    // ===== Accept primitives =====

    pub(crate) fn accept_keyword(&mut self, keyword: &str) -> Result<(), SyntaxError> {
        if self.next_is_keyword(keyword) {
            self.tokens.take();
            Ok(())
        } else {
            Err(self.expected(&format!("keyword '{}'", keyword)))
        }
    }

    pub(crate) fn accept_symbol(&mut self, symbol: char) -> Result<(), SyntaxError> {
        if self.next_is_symbol(symbol) {
            self.tokens.take();
            Ok(())
        } else {
            Err(self.expected(&format!("token '{}'", symbol)))
        }
    }

    pub(crate) fn accept_identifier(&mut self) -> Result<String, SyntaxError> {
        match self.tokens.peek() {
            Some(Token::Ident(name, _)) => {
                let name = name.clone();
                self.tokens.take();
                Ok(name)
            }
            _ => Err(self.expected("identifier")),
        }
    }

    pub(crate) fn accept_integer(&mut self) -> Result<i64, SyntaxError> {
        match self.tokens.peek() {
            Some(Token::Int(value, _)) => {
                let value = *value;
                self.tokens.take();
                Ok(value)
            }
            _ => Err(self.expected("integer")),
        }
    }

    /// Error at the current lookahead, naming what the grammar wanted there
    pub(crate) fn expected(&self, what: &str) -> SyntaxError {
        let message = match self.tokens.peek() {
            Some(token) => format!("expected {}, found {}", what, token),
            None => format!("expected {}, but the token stream is exhausted", what),
        };
        SyntaxError {
            message,
            location: self.tokens.location(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_function() {
        let mut parser = Parser::new("def int @main() { return 0; }").unwrap();
        let program = parser.parse_program().unwrap();

        assert_eq!(program.functions.len(), 1);
        let function = &program.functions[0];
        assert_eq!(function.name, "main");
        assert_eq!(function.return_type, Type::new("int"));
        assert!(function.arguments.is_empty());
        assert_eq!(function.body, Stmt::Return(Expr::ConstInt(0)));
        assert!(parser.is_at_end());
    }

    #[test]
    fn test_accept_keyword_mismatch() {
        let mut parser = Parser::new("define").unwrap();
        let err = parser.accept_keyword("def").unwrap_err();

        assert_eq!(err.message, "expected keyword 'def', found identifier 'define'");
        assert_eq!(err.location, SourceLocation::new(1, 1));
    }

    #[test]
    fn test_accept_symbol_on_exhausted_stream() {
        let mut parser = Parser::new("x ").unwrap();
        parser.accept_identifier().unwrap();
        let err = parser.accept_symbol(';').unwrap_err();

        assert_eq!(err.message, "expected token ';', but the token stream is exhausted");
        assert_eq!(err.location, SourceLocation::new(1, 3));
    }

    #[test]
    fn test_accept_integer() {
        let mut parser = Parser::new("42 x").unwrap();
        assert_eq!(parser.accept_integer().unwrap(), 42);

        let err = parser.accept_integer().unwrap_err();
        assert_eq!(err.message, "expected integer, found identifier 'x'");
    }

    #[test]
    fn test_lookahead_does_not_consume() {
        let parser = Parser::new("( 1").unwrap();

        assert!(parser.next_is_symbol('('));
        assert!(parser.next_is_one_of_symbols(&['+', '(']));
        assert!(!parser.next_is_identifier());
        assert!(!parser.next_is_integer());
        assert_eq!(parser.remaining(), 2);
    }

    #[test]
    fn test_keywords_are_identifiers() {
        let parser = Parser::new("while").unwrap();

        assert!(parser.next_is_keyword("while"));
        assert!(parser.next_is_identifier());
    }

    #[test]
    fn test_nesting_limit() {
        let mut parser = Parser::new("x").unwrap();
        parser.depth = MAX_NESTING;

        let err = parser.nested(|p| p.accept_identifier()).unwrap_err();
        assert_eq!(err.message, "nesting too deep: more than 256 levels");
        assert_eq!(err.location, SourceLocation::new(1, 1));

        parser.depth = MAX_NESTING - 1;
        assert_eq!(parser.nested(|p| p.accept_identifier()).unwrap(), "x");
        assert_eq!(parser.depth, MAX_NESTING - 1);
    }

    #[test]
    fn test_parse_source_reports_lex_errors() {
        let err = parse_source("def int @main() { return 1 % 2; }").unwrap_err();
        assert!(matches!(err, ParseError::Lex(_)));
        assert_eq!(err.location(), SourceLocation::new(1, 28));
    }
}
