//! Method-body syntax trees
//!
//! Closed sum types over statement and expression kinds. Every node carries
//! a process-unique `NodeId`, its span and (for expressions) its source text.

use super::declaration::Declaration;
use super::types::TypeUse;
use crate::shared::models::{ClassId, MethodId, NodeId, Span};

// ═══════════════════════════════════════════════════════════════════════════
// Expressions
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub id: NodeId,
    pub span: Span,
    pub text: String,
    pub kind: ExprKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralKind {
    Int,
    Long,
    Float,
    Double,
    Char,
    String,
    Boolean,
    Null,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    Literal(LiteralKind),
    /// `this` or `super`
    This { is_super: bool },
    /// Name, possibly qualified (`x`, `obj.field`, `System.out`)
    Reference(ReferenceExpr),
    Call(CallExpr),
    New(NewExpr),
    Parenthesized(Box<Expr>),
    Unary {
        operator: String,
        operand: Box<Expr>,
        prefix: bool,
    },
    Binary {
        operator: String,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Conditional {
        condition: Box<Expr>,
        then_expr: Box<Expr>,
        else_expr: Box<Expr>,
    },
    Cast {
        ty: TypeUse,
        operand: Box<Expr>,
    },
    Assignment {
        operator: String,
        target: Box<Expr>,
        value: Box<Expr>,
    },
    ArrayAccess {
        array: Box<Expr>,
        index: Box<Expr>,
    },
    /// `new T[n]`, `new T[] { .. }` or a bare `{ .. }` initializer
    NewArray {
        element: Option<TypeUse>,
        dimensions: Vec<Expr>,
        initializer: Vec<Expr>,
    },
    Lambda {
        parameters: Vec<LocalVariable>,
        body: Box<Stmt>,
    },
    /// Kinds the analyses do not distinguish (instanceof, method
    /// references, switch expressions, class literals); children kept
    Other(Vec<Expr>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceExpr {
    pub name: String,
    pub qualifier: Option<Box<Expr>>,
    pub target: Option<Declaration>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CallExpr {
    pub name: String,
    pub qualifier: Option<Box<Expr>>,
    pub arguments: Vec<Expr>,
    pub target: Option<MethodId>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewExpr {
    pub ty: TypeUse,
    pub arguments: Vec<Expr>,
    pub constructor: Option<MethodId>,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span, text: impl Into<String>) -> Self {
        Self {
            id: NodeId::fresh(),
            span,
            text: text.into(),
            kind,
        }
    }

    pub fn as_call(&self) -> Option<&CallExpr> {
        match &self.kind {
            ExprKind::Call(call) => Some(call),
            _ => None,
        }
    }

    pub fn as_reference(&self) -> Option<&ReferenceExpr> {
        match &self.kind {
            ExprKind::Reference(reference) => Some(reference),
            _ => None,
        }
    }

    /// Innermost expression below any parentheses
    pub fn strip_parens(&self) -> &Expr {
        match &self.kind {
            ExprKind::Parenthesized(inner) => inner.strip_parens(),
            _ => self,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Statements
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq)]
pub struct Stmt {
    pub id: NodeId,
    pub span: Span,
    pub kind: StmtKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StmtKind {
    LocalDecl(Vec<LocalVariable>),
    Expression(Expr),
    Block(Vec<Stmt>),
    If {
        condition: Expr,
        then_branch: Box<Stmt>,
        else_branch: Option<Box<Stmt>>,
    },
    /// `for`, `while` and `do` loops
    Loop {
        init: Vec<Stmt>,
        condition: Option<Expr>,
        update: Vec<Expr>,
        body: Box<Stmt>,
    },
    ForEach {
        variable: LocalVariable,
        iterable: Expr,
        body: Box<Stmt>,
    },
    Return(Option<Expr>),
    Throw(Expr),
    Try(TryStmt),
    Assert {
        condition: Expr,
        message: Option<Expr>,
    },
    LocalClass(ClassId),
    /// `switch`, `synchronized`, labeled, `break`, `continue`, empty;
    /// nested statements and expressions kept for traversal
    Other {
        statements: Vec<Stmt>,
        expressions: Vec<Expr>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct TryStmt {
    /// Try-with-resources declarations (or expression resources)
    pub resources: Vec<Stmt>,
    pub body: Box<Stmt>,
    pub catches: Vec<CatchClause>,
    pub finally: Option<Box<Stmt>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CatchClause {
    pub parameter: LocalVariable,
    pub body: Stmt,
}

impl Stmt {
    pub fn new(kind: StmtKind, span: Span) -> Self {
        Self {
            id: NodeId::fresh(),
            span,
            kind,
        }
    }

    pub fn empty(span: Span) -> Self {
        Self::new(
            StmtKind::Other {
                statements: Vec::new(),
                expressions: Vec::new(),
            },
            span,
        )
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Variables
// ═══════════════════════════════════════════════════════════════════════════

/// Local variable declaration (also lambda, for-each and catch parameters)
#[derive(Debug, Clone, PartialEq)]
pub struct LocalVariable {
    pub id: NodeId,
    pub name: String,
    pub ty: TypeUse,
    pub initializer: Option<Expr>,
    pub span: Span,
}

impl LocalVariable {
    pub fn new(name: impl Into<String>, ty: TypeUse, initializer: Option<Expr>, span: Span) -> Self {
        Self {
            id: NodeId::fresh(),
            name: name.into(),
            ty,
            initializer,
            span,
        }
    }
}

/// Method parameter
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub id: NodeId,
    pub name: String,
    pub ty: TypeUse,
    pub span: Span,
}

impl Parameter {
    pub fn new(name: impl Into<String>, ty: TypeUse, span: Span) -> Self {
        Self {
            id: NodeId::fresh(),
            name: name.into(),
            ty,
            span,
        }
    }
}
