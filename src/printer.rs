//! Canonical source rendering for cipp ASTs
//!
//! Every AST node implements [`Display`](fmt::Display). The output is valid
//! cipp that parses back to the same tree:
//!
//! - operands are parenthesised only where precedence requires it, including
//!   a nested add/sub term inside another add/sub (`1 - (2 - 3)`), which the
//!   parser would otherwise flatten;
//! - a then-branch that ends in an open `if` is braced when an `else`
//!   follows, since the parser binds `else` to the nearest `if`. The braces
//!   hold one statement, so they collapse away again on re-parse.
//!
//! Trees the parser never produces (a single-statement block, a leading `-`
//! term) are printed as faithfully as the grammar allows but will not round
//! trip.

use crate::parser::ast::*;
use std::fmt;

const INDENT: &str = "    ";

/// Render a whole program as source text
pub fn print_program(program: &Program) -> String {
    program.to_string()
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, function) in self.functions.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            writeln!(f, "{}", function)?;
        }
        Ok(())
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "def {} @{}(", self.return_type, self.name)?;
        for (i, argument) in self.arguments.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{} {}", argument.data_type, argument.name)?;
        }
        write!(f, ")")?;
        write_body(f, &self.body, 0)
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl fmt::Display for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_stmt(f, self, 0)
    }
}

fn write_indent(f: &mut fmt::Formatter<'_>, indent: usize) -> fmt::Result {
    for _ in 0..indent {
        f.write_str(INDENT)?;
    }
    Ok(())
}

/// Writes `stmt` assuming the cursor is already at the right column
fn write_stmt(f: &mut fmt::Formatter<'_>, stmt: &Stmt, indent: usize) -> fmt::Result {
    match stmt {
        Stmt::Block(statements) => write_block(f, statements, indent),
        Stmt::Return(expr) => write!(f, "return {};", expr),
        Stmt::Let {
            name,
            data_type,
            value,
        } => write!(f, "let {} {} = {};", data_type, name, value),
        Stmt::Assignment { target, value } => write!(f, "{} = {};", target, value),
        Stmt::ArrayAssignment {
            target,
            index,
            value,
        } => write!(f, "{}[{}] = {};", target, index, value),
        Stmt::While { condition, body } => {
            write!(f, "while ({})", condition)?;
            write_body(f, body, indent)
        }
        Stmt::If {
            condition,
            then_branch,
        } => {
            write!(f, "if ({})", condition)?;
            write_body(f, then_branch, indent)
        }
        Stmt::IfElse {
            condition,
            then_branch,
            else_branch,
        } => {
            write!(f, "if ({})", condition)?;
            let braced = ends_with_open_if(then_branch);
            if braced {
                writeln!(f, " {{")?;
                write_indent(f, indent + 1)?;
                write_stmt(f, then_branch, indent + 1)?;
                writeln!(f)?;
                write_indent(f, indent)?;
                write!(f, "}}")?;
            } else {
                write_body(f, then_branch, indent)?;
            }

            if braced || matches!(**then_branch, Stmt::Block(_)) {
                write!(f, " else")?;
            } else {
                writeln!(f)?;
                write_indent(f, indent)?;
                write!(f, "else")?;
            }

            match **else_branch {
                Stmt::If { .. } | Stmt::IfElse { .. } => {
                    write!(f, " ")?;
                    write_stmt(f, else_branch, indent)
                }
                _ => write_body(f, else_branch, indent),
            }
        }
    }
}

fn write_block(f: &mut fmt::Formatter<'_>, statements: &[Stmt], indent: usize) -> fmt::Result {
    if statements.is_empty() {
        return write!(f, "{{}}");
    }
    writeln!(f, "{{")?;
    for stmt in statements {
        write_indent(f, indent + 1)?;
        write_stmt(f, stmt, indent + 1)?;
        writeln!(f)?;
    }
    write_indent(f, indent)?;
    write!(f, "}}")
}

/// Body of a function, loop or branch: blocks stay on the header line,
/// anything else goes on its own indented line
fn write_body(f: &mut fmt::Formatter<'_>, body: &Stmt, indent: usize) -> fmt::Result {
    if let Stmt::Block(statements) = body {
        write!(f, " ")?;
        return write_block(f, statements, indent);
    }
    writeln!(f)?;
    write_indent(f, indent + 1)?;
    write_stmt(f, body, indent + 1)
}

/// True when a following `else` would attach to an `if` inside `stmt`
fn ends_with_open_if(stmt: &Stmt) -> bool {
    match stmt {
        Stmt::If { .. } => true,
        Stmt::IfElse { else_branch, .. } => ends_with_open_if(else_branch),
        Stmt::While { body, .. } => ends_with_open_if(body),
        _ => false,
    }
}

impl fmt::Display for CmpOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CmpOp::Eq => "==",
            CmpOp::Ne => "!=",
            CmpOp::Lt => "<",
            CmpOp::Le => "<=",
            CmpOp::Gt => ">",
            CmpOp::Ge => ">=",
        };
        f.write_str(s)
    }
}

impl fmt::Display for AddOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AddOp::Add => "+",
            AddOp::Sub => "-",
        })
    }
}

impl fmt::Display for MulOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MulOp::Mul => "*",
            MulOp::Div => "/",
        })
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Comparison { op, left, right } => {
                write_operand(f, left, 1)?;
                write!(f, " {} ", op)?;
                write_operand(f, right, 1)
            }
            Expr::AddSub(terms) => write_terms(f, terms, AddOp::Add, 2),
            Expr::MulDiv(terms) => write_terms(f, terms, MulOp::Mul, 3),
            Expr::Variable(name) => write!(f, "{}", name),
            Expr::ConstInt(value) => write!(f, "{}", value),
            Expr::FunctionCall { name, arguments } => {
                write!(f, "@{}(", name)?;
                for (i, argument) in arguments.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", argument)?;
                }
                write!(f, ")")
            }
        }
    }
}

/// Operands binding looser than `min_precedence` get parentheses
fn write_operand(f: &mut fmt::Formatter<'_>, expr: &Expr, min_precedence: u8) -> fmt::Result {
    if expr.precedence() < min_precedence {
        write!(f, "({})", expr)
    } else {
        write!(f, "{}", expr)
    }
}

fn write_terms<Op>(
    f: &mut fmt::Formatter<'_>,
    terms: &[Term<Op>],
    implicit: Op,
    min_precedence: u8,
) -> fmt::Result
where
    Op: fmt::Display + PartialEq,
{
    for (i, term) in terms.iter().enumerate() {
        if i > 0 {
            write!(f, " {} ", term.op)?;
        } else if term.op != implicit {
            write!(f, "{}", term.op)?;
        }
        write_operand(f, &term.expr, min_precedence)?;
    }
    Ok(())
}
