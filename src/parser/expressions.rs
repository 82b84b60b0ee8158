//! Expression parsing implementation
//!
//! Expressions are parsed by direct recursion over four precedence levels,
//! lowest first:
//!
//! 1. comparison: `==`, `!=`, `<`, `<=`, `>`, `>=` (non-associative, at most one)
//! 2. add/sub: `+`, `-` (left-associative, flat term list)
//! 3. mul/div: `*`, `/` (left-associative, flat term list)
//! 4. factor: variables, integers, parenthesised expressions, `@calls(...)`
//!
//! Multi-term levels collect their operands into a single
//! [`Expr::AddSub`] / [`Expr::MulDiv`] node instead of nesting binary nodes,
//! and return the bare operand when there is only one.
//!
//! Comparison operators arrive from the lexer as single-character symbols and
//! are assembled here, so `< =` and `<=` are the same operator.

use crate::parser::ast::*;
use crate::parser::parse::{Parser, SyntaxError};

impl Parser {
    /// Parse expression (top-level entry point)
    pub fn parse_expression(&mut self) -> Result<Expr, SyntaxError> {
        self.nested(Self::parse_comparison)
    }

    /// Parse comparison: addsub (cmpop addsub)?
    fn parse_comparison(&mut self) -> Result<Expr, SyntaxError> {
        let left = self.parse_add_sub()?;

        match self.parse_comparison_operator()? {
            Some(op) => {
                let right = self.parse_add_sub()?;
                Ok(Expr::Comparison {
                    op,
                    left: Box::new(left),
                    right: Box::new(right),
                })
            }
            None => Ok(left),
        }
    }

    /// Returns `None` without consuming anything when the lookahead cannot
    /// start a comparison operator.
    fn parse_comparison_operator(&mut self) -> Result<Option<CmpOp>, SyntaxError> {
        let op = if self.next_is_symbol('=') {
            self.accept_symbol('=')?;
            self.accept_symbol('=')?;
            CmpOp::Eq
        } else if self.next_is_symbol('!') {
            self.accept_symbol('!')?;
            self.accept_symbol('=')?;
            CmpOp::Ne
        } else if self.next_is_symbol('<') {
            self.accept_symbol('<')?;
            if self.next_is_symbol('=') {
                self.accept_symbol('=')?;
                CmpOp::Le
            } else {
                CmpOp::Lt
            }
        } else if self.next_is_symbol('>') {
            self.accept_symbol('>')?;
            if self.next_is_symbol('=') {
                self.accept_symbol('=')?;
                CmpOp::Ge
            } else {
                CmpOp::Gt
            }
        } else {
            return Ok(None);
        };

        Ok(Some(op))
    }

    /// Parse additive level (+, -)
    fn parse_add_sub(&mut self) -> Result<Expr, SyntaxError> {
        let mut terms = vec![Term::new(AddOp::Add, self.parse_mul_div()?)];

        while self.next_is_one_of_symbols(&['+', '-']) {
            let op = if self.next_is_symbol('+') {
                self.accept_symbol('+')?;
                AddOp::Add
            } else {
                self.accept_symbol('-')?;
                AddOp::Sub
            };
            terms.push(Term::new(op, self.parse_mul_div()?));
        }

        if terms.len() == 1 && terms[0].op == AddOp::Add {
            return Ok(terms.remove(0).expr);
        }
        Ok(Expr::AddSub(terms))
    }

    /// Parse multiplicative level (*, /)
    fn parse_mul_div(&mut self) -> Result<Expr, SyntaxError> {
        let mut terms = vec![Term::new(MulOp::Mul, self.parse_factor()?)];

        while self.next_is_one_of_symbols(&['*', '/']) {
            let op = if self.next_is_symbol('*') {
                self.accept_symbol('*')?;
                MulOp::Mul
            } else {
                self.accept_symbol('/')?;
                MulOp::Div
            };
            terms.push(Term::new(op, self.parse_factor()?));
        }

        if terms.len() == 1 && terms[0].op == MulOp::Mul {
            return Ok(terms.remove(0).expr);
        }
        Ok(Expr::MulDiv(terms))
    }

    /// Parse factor: identifier, integer, (expr), or @call(...)
    fn parse_factor(&mut self) -> Result<Expr, SyntaxError> {
        if self.next_is_identifier() {
            Ok(Expr::Variable(self.accept_identifier()?))
        } else if self.next_is_integer() {
            Ok(Expr::ConstInt(self.accept_integer()?))
        } else if self.next_is_symbol('(') {
            self.accept_symbol('(')?;
            let expr = self.parse_expression()?;
            self.accept_symbol(')')?;
            Ok(expr)
        } else if self.next_is_symbol('@') {
            self.parse_function_call()
        } else {
            Err(self.expected("expression"))
        }
    }

    /// Parse function call: @name(args)
    fn parse_function_call(&mut self) -> Result<Expr, SyntaxError> {
        self.accept_symbol('@')?;
        let name = self.accept_identifier()?;
        let arguments = self.parse_call_arguments()?;
        Ok(Expr::FunctionCall { name, arguments })
    }

    fn parse_call_arguments(&mut self) -> Result<Vec<Expr>, SyntaxError> {
        self.accept_symbol('(')?;

        let mut arguments = Vec::new();
        if !self.next_is_symbol(')') {
            loop {
                arguments.push(self.parse_expression()?);
                if !self.next_is_symbol(',') {
                    break;
                }
                self.accept_symbol(',')?;
            }
        }

        self.accept_symbol(')')?;
        Ok(arguments)
    }
}
