//! Recursion detection
//!
//! Depth-first over resolved calls with a path-local set: a method is on the
//! path while its callees are explored and removed on backtrack. Methods
//! proven to reach no cycle are remembered for the rest of the check.

use rustc_hash::FxHashSet;

use crate::features::program_model::visitor::collect_calls;
use crate::features::program_model::{Method, ProgramModel};
use crate::features::rule_checks::domain::{messages, ProblemsHolder, RuleContext, RuleKind, Severity, ViolationTarget};
use crate::features::rule_checks::ports::KernelRule;
use crate::shared::models::MethodId;

pub struct RecursionRule;

struct CycleSearch<'a> {
    model: &'a dyn ProgramModel,
    path: FxHashSet<MethodId>,
    acyclic: FxHashSet<MethodId>,
}

impl<'a> CycleSearch<'a> {
    fn new(model: &'a dyn ProgramModel) -> Self {
        Self {
            model,
            path: FxHashSet::default(),
            acyclic: FxHashSet::default(),
        }
    }

    /// Whether following calls from `method` revisits a method on the path
    fn is_recursive(&mut self, method: &Method) -> bool {
        if !self.path.insert(method.id) {
            return true;
        }
        if self.acyclic.contains(&method.id) {
            self.path.remove(&method.id);
            return false;
        }

        let model = self.model;
        for call in collect_calls(method) {
            let Some(callee) = call.as_call().and_then(|c| model.resolve_call(c)) else {
                continue;
            };
            if self.is_recursive(callee) {
                return true;
            }
        }

        self.path.remove(&method.id);
        self.acyclic.insert(method.id);
        false
    }
}

impl KernelRule for RecursionRule {
    fn kind(&self) -> RuleKind {
        RuleKind::Recursion
    }

    fn check(&self, ctx: &RuleContext<'_>, holder: &mut ProblemsHolder) {
        let mut search = CycleSearch::new(ctx.model);
        for method in ctx.analyzable_methods() {
            let context = ctx.helper_context(method);
            for call in collect_calls(method) {
                let Some(callee) = call.as_call().and_then(|c| ctx.model.resolve_call(c)) else {
                    continue;
                };
                search.path.clear();
                if !search.is_recursive(callee) {
                    continue;
                }
                ctx.flag_kernel();
                holder.register(
                    ViolationTarget::Method(callee.id),
                    callee.name_span,
                    callee.id,
                    format!("{}{}", messages::RECURSION, context),
                    Severity::Error,
                );
            }
        }
    }
}
