//! Collapsible tree model of a parsed program
//!
//! The AST is converted once into generic [`TreeNode`]s carrying display
//! labels. Collapse state is kept separately as a set of node paths (child
//! indices from the root) so that the tree itself stays immutable.

use crate::parser::ast::*;
use crate::parser::ParseError;
use rustc_hash::FxHashSet;

/// Category of a node, used by the tree pane to pick colours
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Program,
    Function,
    Argument,
    Statement,
    Expression,
    Literal,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
    pub kind: NodeKind,
    /// Position of this node in its parent, e.g. `cond`, `body`, `-`
    pub role: Option<String>,
    pub label: String,
    /// Extra text shown dimmed after the label
    pub detail: Option<String>,
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    fn new(kind: NodeKind, label: impl Into<String>) -> Self {
        TreeNode {
            kind,
            role: None,
            label: label.into(),
            detail: None,
            children: Vec::new(),
        }
    }

    fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    fn with_children(mut self, children: Vec<TreeNode>) -> Self {
        self.children = children;
        self
    }

    /// Number of nodes in this subtree, itself included
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(TreeNode::count).sum::<usize>()
    }
}

/// Path of child indices from the root
pub type NodePath = Vec<usize>;

/// One visible line of the tree
#[derive(Debug)]
pub struct TreeRow<'a> {
    pub node: &'a TreeNode,
    pub depth: usize,
    pub path: NodePath,
    pub collapsed: bool,
}

/// Tree plus collapse state
pub struct AstTree {
    root: TreeNode,
    collapsed: FxHashSet<NodePath>,
}

impl AstTree {
    pub fn from_program(program: &Program) -> Self {
        let functions = program.functions.iter().map(function_node).collect::<Vec<_>>();
        let root = TreeNode::new(NodeKind::Program, "Program")
            .with_detail(plural(functions.len(), "function"))
            .with_children(functions);
        Self::new(root)
    }

    pub fn from_error(error: &ParseError) -> Self {
        let location = error.location();
        let root = TreeNode::new(NodeKind::Error, "Parse failed")
            .with_detail(format!("line {}, column {}", location.line, location.column))
            .with_children(vec![TreeNode::new(NodeKind::Error, error.to_string())]);
        Self::new(root)
    }

    fn new(root: TreeNode) -> Self {
        Self {
            root,
            collapsed: FxHashSet::default(),
        }
    }

    pub fn root(&self) -> &TreeNode {
        &self.root
    }

    pub fn node_count(&self) -> usize {
        self.root.count()
    }

    /// Visible rows in display order, skipping children of collapsed nodes
    pub fn rows(&self) -> Vec<TreeRow<'_>> {
        let mut rows = Vec::new();
        self.collect_rows(&self.root, 0, Vec::new(), &mut rows);
        rows
    }

    fn collect_rows<'a>(
        &self,
        node: &'a TreeNode,
        depth: usize,
        path: NodePath,
        rows: &mut Vec<TreeRow<'a>>,
    ) {
        let collapsed = self.collapsed.contains(&path);
        rows.push(TreeRow {
            node,
            depth,
            path: path.clone(),
            collapsed,
        });

        if collapsed {
            return;
        }
        for (i, child) in node.children.iter().enumerate() {
            let mut child_path = path.clone();
            child_path.push(i);
            self.collect_rows(child, depth + 1, child_path, rows);
        }
    }

    pub fn is_collapsed(&self, path: &[usize]) -> bool {
        self.collapsed.contains(path)
    }

    /// Returns false when the path has no children to hide
    pub fn collapse(&mut self, path: &[usize]) -> bool {
        match self.node_at(path) {
            Some(node) if !node.children.is_empty() => self.collapsed.insert(path.to_vec()),
            _ => false,
        }
    }

    pub fn expand(&mut self, path: &[usize]) -> bool {
        self.collapsed.remove(path)
    }

    pub fn toggle(&mut self, path: &[usize]) {
        if !self.expand(path) {
            self.collapse(path);
        }
    }

    /// Collapses every function, leaving the root open
    pub fn collapse_all(&mut self) {
        self.collapsed.clear();
        for i in 0..self.root.children.len() {
            self.collapse(&[i]);
        }
    }

    pub fn expand_all(&mut self) {
        self.collapsed.clear();
    }

    pub fn node_at(&self, path: &[usize]) -> Option<&TreeNode> {
        let mut node = &self.root;
        for &i in path {
            node = node.children.get(i)?;
        }
        Some(node)
    }
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("1 {}", word)
    } else {
        format!("{} {}s", n, word)
    }
}

fn function_node(function: &Function) -> TreeNode {
    let mut children: Vec<TreeNode> = function
        .arguments
        .iter()
        .map(|argument| {
            TreeNode::new(NodeKind::Argument, format!("Argument {}", argument.name))
                .with_detail(argument.data_type.name.clone())
        })
        .collect();
    children.push(stmt_node(&function.body).with_role("body"));

    TreeNode::new(NodeKind::Function, format!("Function @{}", function.name))
        .with_detail(format!("-> {}", function.return_type))
        .with_children(children)
}

fn stmt_node(stmt: &Stmt) -> TreeNode {
    let node = |label: &str| TreeNode::new(NodeKind::Statement, label);

    match stmt {
        Stmt::Block(statements) => node("Block")
            .with_detail(plural(statements.len(), "statement"))
            .with_children(statements.iter().map(stmt_node).collect()),
        Stmt::Return(expr) => node("Return").with_children(vec![expr_node(expr)]),
        Stmt::Let {
            name,
            data_type,
            value,
        } => node(&format!("Let {}", name))
            .with_detail(data_type.name.clone())
            .with_children(vec![expr_node(value).with_role("value")]),
        Stmt::Assignment { target, value } => node(&format!("Assignment {}", target))
            .with_children(vec![expr_node(value).with_role("value")]),
        Stmt::ArrayAssignment {
            target,
            index,
            value,
        } => node(&format!("ArrayAssignment {}", target)).with_children(vec![
            expr_node(index).with_role("index"),
            expr_node(value).with_role("value"),
        ]),
        Stmt::While { condition, body } => node("While").with_children(vec![
            expr_node(condition).with_role("cond"),
            stmt_node(body).with_role("body"),
        ]),
        Stmt::If {
            condition,
            then_branch,
        } => node("If").with_children(vec![
            expr_node(condition).with_role("cond"),
            stmt_node(then_branch).with_role("then"),
        ]),
        Stmt::IfElse {
            condition,
            then_branch,
            else_branch,
        } => node("IfElse").with_children(vec![
            expr_node(condition).with_role("cond"),
            stmt_node(then_branch).with_role("then"),
            stmt_node(else_branch).with_role("else"),
        ]),
    }
}

fn expr_node(expr: &Expr) -> TreeNode {
    match expr {
        Expr::Comparison { op, left, right } => {
            TreeNode::new(NodeKind::Expression, format!("Comparison {}", op))
                .with_detail(expr.to_string())
                .with_children(vec![expr_node(left), expr_node(right)])
        }
        Expr::AddSub(terms) => TreeNode::new(NodeKind::Expression, "AddSub")
            .with_detail(expr.to_string())
            .with_children(
                terms
                    .iter()
                    .map(|term| expr_node(&term.expr).with_role(term.op.to_string()))
                    .collect(),
            ),
        Expr::MulDiv(terms) => TreeNode::new(NodeKind::Expression, "MulDiv")
            .with_detail(expr.to_string())
            .with_children(
                terms
                    .iter()
                    .map(|term| expr_node(&term.expr).with_role(term.op.to_string()))
                    .collect(),
            ),
        Expr::Variable(name) => TreeNode::new(NodeKind::Expression, format!("Variable {}", name)),
        Expr::ConstInt(value) => TreeNode::new(NodeKind::Literal, format!("ConstInt {}", value)),
        Expr::FunctionCall { name, arguments } => {
            TreeNode::new(NodeKind::Expression, format!("FunctionCall @{}", name))
                .with_detail(plural(arguments.len(), "argument"))
                .with_children(
                    arguments
                        .iter()
                        .enumerate()
                        .map(|(i, argument)| expr_node(argument).with_role(format!("arg{}", i)))
                        .collect(),
                )
        }
    }
}
