//! Declaration parsing implementation
//!
//! This module handles parsing of function definitions, the only top-level
//! declaration cipp has:
//!
//! - Function definitions: `def Type @name(args) statement`
//! - Argument lists: `Type name, Type name, ...`
//! - Types: a single identifier
//!
//! # Grammar
//!
//! ```text
//! function ::= "def" type "@" identifier "(" (arg ("," arg)*)? ")" statement
//! arg      ::= type identifier
//! type     ::= identifier
//! ```
//!
//! All parsing methods are implemented on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::parse::{Parser, SyntaxError};

impl Parser {
    /// Parse function definition: def Type @name(args) body
    pub fn parse_function(&mut self) -> Result<Function, SyntaxError> {
        self.accept_keyword("def")?;
        let return_type = self.parse_type()?;
        self.accept_symbol('@')?;
        let name = self.accept_identifier()?;
        let arguments = self.parse_arguments()?;
        let body = self.parse_statement()?;

        Ok(Function {
            name,
            return_type,
            arguments,
            body,
        })
    }

    /// Parse argument list, parentheses included
    fn parse_arguments(&mut self) -> Result<Vec<Argument>, SyntaxError> {
        self.accept_symbol('(')?;

        let mut arguments = Vec::new();
        if self.next_is_symbol(')') {
            self.accept_symbol(')')?;
            return Ok(arguments);
        }

        loop {
            arguments.push(self.parse_argument()?);
            if !self.next_is_symbol(',') {
                break;
            }
            self.accept_symbol(',')?;
        }

        self.accept_symbol(')')?;
        Ok(arguments)
    }

    fn parse_argument(&mut self) -> Result<Argument, SyntaxError> {
        let data_type = self.parse_type()?;
        let name = self.accept_identifier()?;
        Ok(Argument { name, data_type })
    }

    pub(crate) fn parse_type(&mut self) -> Result<Type, SyntaxError> {
        Ok(Type::new(self.accept_identifier()?))
    }
}
