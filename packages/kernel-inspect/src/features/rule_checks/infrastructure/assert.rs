use crate::features::program_model::visitor::{walk_method, walk_stmt};
use crate::features::program_model::{Stmt, StmtKind, Visitor};
use crate::features::rule_checks::domain::{messages, ProblemsHolder, RuleContext, RuleKind, Severity, ViolationTarget};
use crate::features::rule_checks::ports::KernelRule;

pub struct AssertRule;

struct Asserts<'a>(Vec<&'a Stmt>);

impl<'a> Visitor<'a> for Asserts<'a> {
    fn visit_stmt(&mut self, stmt: &'a Stmt) {
        if matches!(stmt.kind, StmtKind::Assert { .. }) {
            self.0.push(stmt);
        }
        walk_stmt(self, stmt);
    }
}

impl KernelRule for AssertRule {
    fn kind(&self) -> RuleKind {
        RuleKind::Assert
    }

    fn check(&self, ctx: &RuleContext<'_>, holder: &mut ProblemsHolder) {
        for method in ctx.analyzable_methods() {
            let context = ctx.helper_context(method);
            let mut asserts = Asserts(Vec::new());
            walk_method(&mut asserts, method);
            for stmt in asserts.0 {
                ctx.flag_kernel();
                holder.register(
                    ViolationTarget::Node(stmt.id),
                    stmt.span,
                    method.id,
                    format!("{}{}", messages::ASSERT, context),
                    Severity::Error,
                );
            }
        }
    }
}
