//! Exceptions: `throw`, `try` and `throws` clauses

use crate::features::program_model::visitor::{walk_method, walk_stmt};
use crate::features::program_model::{Stmt, StmtKind, Visitor};
use crate::features::rule_checks::domain::{messages, ProblemsHolder, RuleContext, RuleKind, Severity, ViolationTarget};
use crate::features::rule_checks::ports::KernelRule;

pub struct ThrowRule;

#[derive(Default)]
struct Traps<'a> {
    throws: Vec<&'a Stmt>,
    tries: Vec<&'a Stmt>,
}

impl<'a> Visitor<'a> for Traps<'a> {
    fn visit_stmt(&mut self, stmt: &'a Stmt) {
        match &stmt.kind {
            StmtKind::Throw(_) => self.throws.push(stmt),
            StmtKind::Try(_) => self.tries.push(stmt),
            _ => {}
        }
        walk_stmt(self, stmt);
    }
}

impl KernelRule for ThrowRule {
    fn kind(&self) -> RuleKind {
        RuleKind::Throw
    }

    fn check(&self, ctx: &RuleContext<'_>, holder: &mut ProblemsHolder) {
        for method in ctx.analyzable_methods() {
            let context = ctx.helper_context(method);
            let mut traps = Traps::default();
            walk_method(&mut traps, method);

            for stmt in traps.throws {
                ctx.flag_kernel();
                holder.register(
                    ViolationTarget::Node(stmt.id),
                    stmt.span,
                    method.id,
                    format!("{}{}", messages::THROW, context),
                    Severity::Error,
                );
            }
            for stmt in traps.tries {
                ctx.flag_kernel();
                holder.register(
                    ViolationTarget::Node(stmt.id),
                    stmt.span,
                    method.id,
                    format!("{}{}", messages::TRY_CATCH, context),
                    Severity::Error,
                );
            }
            for exception in &method.throws {
                ctx.flag_kernel();
                holder.register(
                    ViolationTarget::Node(exception.id),
                    exception.span,
                    method.id,
                    messages::throws_clause(&exception.ty.to_string()) + &context,
                    Severity::Error,
                );
            }
        }
    }
}
