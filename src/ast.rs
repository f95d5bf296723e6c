//! Abstract syntax tree for Arbor programs.
//!
//! Node kinds are closed enums; the evaluator and the printer match on them
//! exhaustively.  Every node owns its children, so a parsed [`Program`] is a
//! plain tree with no sharing.

use serde::Serialize;

use crate::token::TokenKind;

/// Infix operators, in the order the grammar introduces them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Gt,
    Lt,
    Eq,
    Le,
    Ge,
    Ne,
}

impl BinaryOp {
    pub const fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Gt => ">",
            BinaryOp::Lt => "<",
            BinaryOp::Eq => "==",
            BinaryOp::Le => "<=",
            BinaryOp::Ge => ">=",
            BinaryOp::Ne => "!=",
        }
    }

    /// Map an operator token to its node operator.
    pub fn from_kind(kind: TokenKind) -> Option<Self> {
        let op = match kind {
            TokenKind::PLUS => BinaryOp::Add,
            TokenKind::MINUS => BinaryOp::Sub,
            TokenKind::MULT => BinaryOp::Mul,
            TokenKind::DIV => BinaryOp::Div,
            TokenKind::GT => BinaryOp::Gt,
            TokenKind::LT => BinaryOp::Lt,
            TokenKind::EQ => BinaryOp::Eq,
            TokenKind::LE => BinaryOp::Le,
            TokenKind::GE => BinaryOp::Ge,
            TokenKind::NE => BinaryOp::Ne,
            _ => return None,
        };

        Some(op)
    }

    pub const fn is_comparison(self) -> bool {
        matches!(
            self,
            BinaryOp::Gt | BinaryOp::Lt | BinaryOp::Eq | BinaryOp::Le | BinaryOp::Ge | BinaryOp::Ne
        )
    }
}

/// **Expression** nodes; each evaluates to a runtime value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Expr {
    /// Integer literal.
    Int(i64),

    /// String literal without surrounding quotes.
    Str(String),

    /// `[a, b, c]`; elements are evaluated in order when the node runs.
    List(Vec<Expr>),

    /// Variable access.
    Identifier(String),

    /// Infix operation: `left op right`.
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
}

impl Expr {
    pub fn binary(op: BinaryOp, left: Expr, right: Expr) -> Self {
        Expr::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }
}

/// Where a `grow x in ...` loop takes its items from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum LoopSource {
    /// A list bound to a name in the enclosing scopes.
    Name(String),

    /// A literal list written in the loop header.  It is evaluated once and
    /// held by the loop itself, so it never occupies a scope slot.
    Literal(Vec<Expr>),
}

/// An ordered sequence of statements: a program body or a `{ ... }` body.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Block {
    pub statements: Vec<Stmt>,
}

impl Block {
    pub fn new(statements: Vec<Stmt>) -> Self {
        Self { statements }
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}

/// A whole parsed source file.
pub type Program = Block;

/// **Statement** nodes; they act only through the environment or output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Stmt {
    /// `seed name (= initializer)?`
    Declaration {
        name: String,
        initializer: Option<Expr>,
    },

    /// `name = value`
    Assignment { name: String, value: Expr },

    /// `branch condition then { ... } (else { ... })?`
    Conditional {
        condition: Expr,
        then_branch: Block,
        else_branch: Option<Block>,
    },

    /// `grow while condition { ... }`
    While { condition: Expr, body: Block },

    /// `grow binding in source { ... }`
    ForEach {
        binding: String,
        source: LoopSource,
        body: Block,
    },

    /// `print value`
    Print(Expr),
}
