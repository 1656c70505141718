//! Pre-order traversal over method bodies
//!
//! Override a `visit_*` hook and call the matching `walk_*` function to keep
//! descending. Every `StmtKind` and `ExprKind` variant is matched explicitly.

use super::entities::Method;
use super::syntax::{Expr, ExprKind, LocalVariable, Parameter, Stmt, StmtKind};
use crate::shared::models::{ClassId, NodeId};

pub trait Visitor<'a> {
    fn visit_parameter(&mut self, _parameter: &'a Parameter) {}

    fn visit_stmt(&mut self, stmt: &'a Stmt) {
        walk_stmt(self, stmt);
    }

    fn visit_expr(&mut self, expr: &'a Expr) {
        walk_expr(self, expr);
    }

    fn visit_local(&mut self, local: &'a LocalVariable) {
        walk_local(self, local);
    }

    /// Class declared inside a method body; its members live in the arena
    fn visit_local_class(&mut self, _class: ClassId) {}
}

pub fn walk_method<'a, V: Visitor<'a> + ?Sized>(visitor: &mut V, method: &'a Method) {
    for parameter in &method.parameters {
        visitor.visit_parameter(parameter);
    }
    if let Some(body) = &method.body {
        visitor.visit_stmt(body);
    }
}

pub fn walk_local<'a, V: Visitor<'a> + ?Sized>(visitor: &mut V, local: &'a LocalVariable) {
    if let Some(init) = &local.initializer {
        visitor.visit_expr(init);
    }
}

pub fn walk_stmt<'a, V: Visitor<'a> + ?Sized>(visitor: &mut V, stmt: &'a Stmt) {
    match &stmt.kind {
        StmtKind::LocalDecl(locals) => {
            for local in locals {
                visitor.visit_local(local);
            }
        }
        StmtKind::Expression(expr) | StmtKind::Throw(expr) => visitor.visit_expr(expr),
        StmtKind::Block(stmts) => {
            for s in stmts {
                visitor.visit_stmt(s);
            }
        }
        StmtKind::If {
            condition,
            then_branch,
            else_branch,
        } => {
            visitor.visit_expr(condition);
            visitor.visit_stmt(then_branch);
            if let Some(else_branch) = else_branch {
                visitor.visit_stmt(else_branch);
            }
        }
        StmtKind::Loop {
            init,
            condition,
            update,
            body,
        } => {
            for s in init {
                visitor.visit_stmt(s);
            }
            if let Some(condition) = condition {
                visitor.visit_expr(condition);
            }
            for e in update {
                visitor.visit_expr(e);
            }
            visitor.visit_stmt(body);
        }
        StmtKind::ForEach {
            variable,
            iterable,
            body,
        } => {
            visitor.visit_local(variable);
            visitor.visit_expr(iterable);
            visitor.visit_stmt(body);
        }
        StmtKind::Return(value) => {
            if let Some(value) = value {
                visitor.visit_expr(value);
            }
        }
        StmtKind::Try(try_stmt) => {
            for resource in &try_stmt.resources {
                visitor.visit_stmt(resource);
            }
            visitor.visit_stmt(&try_stmt.body);
            for catch in &try_stmt.catches {
                visitor.visit_local(&catch.parameter);
                visitor.visit_stmt(&catch.body);
            }
            if let Some(finally) = &try_stmt.finally {
                visitor.visit_stmt(finally);
            }
        }
        StmtKind::Assert { condition, message } => {
            visitor.visit_expr(condition);
            if let Some(message) = message {
                visitor.visit_expr(message);
            }
        }
        StmtKind::LocalClass(class) => visitor.visit_local_class(*class),
        StmtKind::Other {
            statements,
            expressions,
        } => {
            for e in expressions {
                visitor.visit_expr(e);
            }
            for s in statements {
                visitor.visit_stmt(s);
            }
        }
    }
}

pub fn walk_expr<'a, V: Visitor<'a> + ?Sized>(visitor: &mut V, expr: &'a Expr) {
    match &expr.kind {
        ExprKind::Literal(_) | ExprKind::This { .. } => {}
        ExprKind::Reference(reference) => {
            if let Some(qualifier) = &reference.qualifier {
                visitor.visit_expr(qualifier);
            }
        }
        ExprKind::Call(call) => {
            if let Some(qualifier) = &call.qualifier {
                visitor.visit_expr(qualifier);
            }
            for arg in &call.arguments {
                visitor.visit_expr(arg);
            }
        }
        ExprKind::New(new) => {
            for arg in &new.arguments {
                visitor.visit_expr(arg);
            }
        }
        ExprKind::Parenthesized(inner) => visitor.visit_expr(inner),
        ExprKind::Unary { operand, .. } => visitor.visit_expr(operand),
        ExprKind::Binary { left, right, .. } => {
            visitor.visit_expr(left);
            visitor.visit_expr(right);
        }
        ExprKind::Conditional {
            condition,
            then_expr,
            else_expr,
        } => {
            visitor.visit_expr(condition);
            visitor.visit_expr(then_expr);
            visitor.visit_expr(else_expr);
        }
        ExprKind::Cast { operand, .. } => visitor.visit_expr(operand),
        ExprKind::Assignment { target, value, .. } => {
            visitor.visit_expr(target);
            visitor.visit_expr(value);
        }
        ExprKind::ArrayAccess { array, index } => {
            visitor.visit_expr(array);
            visitor.visit_expr(index);
        }
        ExprKind::NewArray {
            dimensions,
            initializer,
            ..
        } => {
            for e in dimensions.iter().chain(initializer) {
                visitor.visit_expr(e);
            }
        }
        ExprKind::Lambda { parameters, body } => {
            for p in parameters {
                visitor.visit_local(p);
            }
            visitor.visit_stmt(body);
        }
        ExprKind::Other(children) => {
            for e in children {
                visitor.visit_expr(e);
            }
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Collectors
// ═══════════════════════════════════════════════════════════════════════════

/// Every method-call expression under `method`'s body, in pre-order
pub fn collect_calls(method: &Method) -> Vec<&Expr> {
    struct Calls<'a>(Vec<&'a Expr>);
    impl<'a> Visitor<'a> for Calls<'a> {
        fn visit_expr(&mut self, expr: &'a Expr) {
            if matches!(expr.kind, ExprKind::Call(_)) {
                self.0.push(expr);
            }
            walk_expr(self, expr);
        }
    }

    let mut calls = Calls(Vec::new());
    walk_method(&mut calls, method);
    calls.0
}

/// Local variable declared by node `id` anywhere in `method`
pub fn find_local(method: &Method, id: NodeId) -> Option<&LocalVariable> {
    struct Finder<'a> {
        id: NodeId,
        found: Option<&'a LocalVariable>,
    }
    impl<'a> Visitor<'a> for Finder<'a> {
        fn visit_stmt(&mut self, stmt: &'a Stmt) {
            if self.found.is_none() {
                walk_stmt(self, stmt);
            }
        }
        fn visit_local(&mut self, local: &'a LocalVariable) {
            if local.id == self.id {
                self.found = Some(local);
            } else {
                walk_local(self, local);
            }
        }
    }

    let mut finder = Finder { id, found: None };
    walk_method(&mut finder, method);
    finder.found
}
