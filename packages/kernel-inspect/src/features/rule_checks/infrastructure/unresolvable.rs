use crate::features::rule_checks::domain::{messages, ProblemsHolder, RuleContext, RuleKind, Severity, ViolationTarget};
use crate::features::rule_checks::ports::KernelRule;

/// Surfaces the scope's non-analyzable call sites as weak warnings
pub struct UnresolvableHelperRule;

impl KernelRule for UnresolvableHelperRule {
    fn kind(&self) -> RuleKind {
        RuleKind::UnresolvableHelper
    }

    fn check(&self, ctx: &RuleContext<'_>, holder: &mut ProblemsHolder) {
        for site in &ctx.scope.non_analyzable {
            holder.register(
                ViolationTarget::Node(site.call),
                site.span,
                site.caller,
                messages::helper_unresolvable(&site.reason),
                Severity::WeakWarning,
            );
        }
    }
}
