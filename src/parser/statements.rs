//! Statement parsing implementation
//!
//! This module handles parsing of all cipp statement types:
//!
//! - Blocks: `{ ... }`
//! - Declarations: `let Type name = expr;`
//! - Assignments: `name = expr;` and `name[index] = expr;`
//! - Control flow: `while`, `if`, `if`/`else`
//! - `return expr;`
//!
//! # Grammar
//!
//! ```text
//! statement ::= block | return_stmt | let_stmt | while_stmt | if_stmt
//!             | array_assign | assign
//! block     ::= "{" statement* "}"
//! ```
//!
//! Dispatch needs exactly one token of lookahead, plus a peek for `[` after
//! the target name of an assignment.

use crate::parser::ast::*;
use crate::parser::parse::{Parser, SyntaxError};

impl Parser {
    /// Parse a statement
    pub fn parse_statement(&mut self) -> Result<Stmt, SyntaxError> {
        self.nested(Self::dispatch_statement)
    }

    fn dispatch_statement(&mut self) -> Result<Stmt, SyntaxError> {
        if self.next_is_symbol('{') {
            self.parse_block()
        } else if self.next_is_keyword("return") {
            self.parse_return_statement()
        } else if self.next_is_keyword("let") {
            self.parse_let_statement()
        } else if self.next_is_keyword("while") {
            self.parse_while_statement()
        } else if self.next_is_keyword("if") {
            self.parse_if_statement()
        } else if self.next_is_identifier() {
            self.parse_assignment_statement()
        } else {
            let mut err = self.expected("statement");
            err.message = format!("unknown statement type: {}", err.message);
            Err(err)
        }
    }

    /// Parse a block; a block of exactly one statement is that statement
    fn parse_block(&mut self) -> Result<Stmt, SyntaxError> {
        self.accept_symbol('{')?;

        let mut statements = Vec::new();
        while !self.next_is_symbol('}') {
            statements.push(self.parse_statement()?);
        }
        self.accept_symbol('}')?;

        if statements.len() == 1 {
            Ok(statements.remove(0))
        } else {
            Ok(Stmt::Block(statements))
        }
    }

    fn parse_return_statement(&mut self) -> Result<Stmt, SyntaxError> {
        self.accept_keyword("return")?;
        let expr = self.parse_expression()?;
        self.accept_symbol(';')?;
        Ok(Stmt::Return(expr))
    }

    fn parse_let_statement(&mut self) -> Result<Stmt, SyntaxError> {
        self.accept_keyword("let")?;
        let data_type = self.parse_type()?;
        let name = self.accept_identifier()?;
        self.accept_symbol('=')?;
        let value = self.parse_expression()?;
        self.accept_symbol(';')?;

        Ok(Stmt::Let {
            name,
            data_type,
            value,
        })
    }

    /// `name = expr;` or `name[index] = expr;`
    fn parse_assignment_statement(&mut self) -> Result<Stmt, SyntaxError> {
        let target = self.accept_identifier()?;

        if self.next_is_symbol('[') {
            self.accept_symbol('[')?;
            let index = self.parse_expression()?;
            self.accept_symbol(']')?;
            self.accept_symbol('=')?;
            let value = self.parse_expression()?;
            self.accept_symbol(';')?;
            return Ok(Stmt::ArrayAssignment {
                target,
                index,
                value,
            });
        }

        self.accept_symbol('=')?;
        let value = self.parse_expression()?;
        self.accept_symbol(';')?;
        Ok(Stmt::Assignment { target, value })
    }

    fn parse_while_statement(&mut self) -> Result<Stmt, SyntaxError> {
        self.accept_keyword("while")?;
        self.accept_symbol('(')?;
        let condition = self.parse_expression()?;
        self.accept_symbol(')')?;
        let body = Box::new(self.parse_statement()?);

        Ok(Stmt::While { condition, body })
    }

    /// `else` binds to the nearest `if`
    fn parse_if_statement(&mut self) -> Result<Stmt, SyntaxError> {
        self.accept_keyword("if")?;
        self.accept_symbol('(')?;
        let condition = self.parse_expression()?;
        self.accept_symbol(')')?;
        let then_branch = Box::new(self.parse_statement()?);

        if !self.next_is_keyword("else") {
            return Ok(Stmt::If {
                condition,
                then_branch,
            });
        }

        self.accept_keyword("else")?;
        let else_branch = Box::new(self.parse_statement()?);
        Ok(Stmt::IfElse {
            condition,
            then_branch,
            else_branch,
        })
    }
}
