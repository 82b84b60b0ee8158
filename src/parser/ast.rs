// AST definitions for cipp programs

/// Source location information for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// Root of the tree: every function in source order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Program {
    pub functions: Vec<Function>,
}

impl Program {
    pub fn new() -> Self {
        Self::default()
    }
}

/// `def Type @name(args) body`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Function {
    pub name: String,
    pub return_type: Type,
    pub arguments: Vec<Argument>,
    pub body: Stmt,
}

/// Function argument
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Argument {
    pub name: String,
    pub data_type: Type,
}

/// A type is a single identifier; there are no compound types
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Type {
    pub name: String,
}

impl Type {
    pub fn new(name: impl Into<String>) -> Self {
        Type { name: name.into() }
    }
}

/// Statements
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stmt {
    /// Never holds exactly one statement: `{ s }` parses as `s`
    Block(Vec<Stmt>),
    Return(Expr),
    Let {
        name: String,
        data_type: Type,
        value: Expr,
    },
    Assignment {
        target: String,
        value: Expr,
    },
    ArrayAssignment {
        target: String,
        index: Expr,
        value: Expr,
    },
    While {
        condition: Expr,
        body: Box<Stmt>,
    },
    If {
        condition: Expr,
        then_branch: Box<Stmt>,
    },
    IfElse {
        condition: Expr,
        then_branch: Box<Stmt>,
        else_branch: Box<Stmt>,
    },
}

/// Comparison operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CmpOp {
    Eq, // ==
    Ne, // !=
    Lt, // <
    Le, // <=
    Gt, // >
    Ge, // >=
}

/// Sign of a term at the add/sub level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOp {
    Add,
    Sub,
}

/// Operator of a term at the mul/div level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MulOp {
    Mul,
    Div,
}

/// One operand of a multi-term expression, tagged with the operator that
/// applies it to the running result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Term<Op> {
    pub op: Op,
    pub expr: Expr,
}

impl<Op> Term<Op> {
    pub fn new(op: Op, expr: Expr) -> Self {
        Term { op, expr }
    }
}

/// Expressions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    Comparison {
        op: CmpOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    /// Flat, left to right. A single `Add` term is never wrapped.
    AddSub(Vec<Term<AddOp>>),
    /// Flat, left to right. A single `Mul` term is never wrapped.
    MulDiv(Vec<Term<MulOp>>),
    Variable(String),
    ConstInt(i64),
    FunctionCall {
        name: String,
        arguments: Vec<Expr>,
    },
}

impl Expr {
    /// Binding strength used by the printer: higher binds tighter
    pub fn precedence(&self) -> u8 {
        match self {
            Expr::Comparison { .. } => 0,
            Expr::AddSub(_) => 1,
            Expr::MulDiv(_) => 2,
            Expr::Variable(_) | Expr::ConstInt(_) | Expr::FunctionCall { .. } => 3,
        }
    }
}
