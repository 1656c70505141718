//! Static task-graph state
//!
//! Flags references to static fields of the task-graph type, and calls to
//! its task-registration method made through a static context: the method
//! itself is static, it is called on the class, or the receiver is a static
//! field.

use crate::features::program_model::visitor::{walk_expr, walk_method};
use crate::features::program_model::{Declaration, Expr, ExprKind, ProgramModel, Visitor};
use crate::features::rule_checks::domain::{messages, ProblemsHolder, RuleContext, RuleKind, Severity, ViolationTarget};
use crate::features::rule_checks::ports::KernelRule;

pub struct StaticTaskGraphRule;

struct StaticUses<'a, 'c> {
    model: &'a dyn ProgramModel,
    graph_type: &'c str,
    task_method: &'c str,
    found: Vec<&'a Expr>,
}

impl<'a, 'c> StaticUses<'a, 'c> {
    fn is_static_graph_field(&self, expr: &Expr) -> bool {
        let Some(Declaration::Field(field)) = expr.as_reference().and_then(|r| r.target) else {
            return false;
        };
        self.model
            .field(field)
            .is_some_and(|f| f.modifiers.is_static && f.ty.ty.canonical == self.graph_type && f.ty.ty.array_dims == 0)
    }

    fn is_static_task_call(&self, expr: &Expr) -> bool {
        let Some(call) = expr.as_call() else {
            return false;
        };
        let Some(callee) = self.model.resolve_call(call) else {
            return false;
        };
        if callee.name != self.task_method
            || self.model.containing_class_name(callee) != Some(self.graph_type)
        {
            return false;
        }
        let through_class = call
            .qualifier
            .as_deref()
            .and_then(|q| q.as_reference())
            .is_some_and(|r| matches!(r.target, Some(Declaration::Class(_))));
        let through_static_field = call
            .qualifier
            .as_deref()
            .is_some_and(|q| self.is_static_graph_field(q.strip_parens()));
        callee.modifiers.is_static || through_class || through_static_field
    }
}

impl<'a, 'c> Visitor<'a> for StaticUses<'a, 'c> {
    fn visit_expr(&mut self, expr: &'a Expr) {
        let flagged = match &expr.kind {
            ExprKind::Reference(_) => self.is_static_graph_field(expr),
            ExprKind::Call(_) => self.is_static_task_call(expr),
            _ => false,
        };
        if flagged {
            self.found.push(expr);
        }
        walk_expr(self, expr);
    }
}

impl KernelRule for StaticTaskGraphRule {
    fn kind(&self) -> RuleKind {
        RuleKind::StaticTaskGraph
    }

    fn check(&self, ctx: &RuleContext<'_>, holder: &mut ProblemsHolder) {
        for method in ctx.analyzable_methods() {
            let context = ctx.helper_context(method);
            let mut uses = StaticUses {
                model: ctx.model,
                graph_type: &ctx.config.task_graph_type,
                task_method: &ctx.config.task_method_name,
                found: Vec::new(),
            };
            walk_method(&mut uses, method);
            for expr in uses.found {
                ctx.flag_kernel();
                holder.register(
                    ViolationTarget::Node(expr.id),
                    expr.span,
                    method.id,
                    format!("{}{}", messages::STATIC_TASK_GRAPH, context),
                    Severity::Error,
                );
            }
        }
    }
}
