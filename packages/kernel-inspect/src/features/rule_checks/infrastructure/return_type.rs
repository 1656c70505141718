use crate::features::rule_checks::domain::{messages, ProblemsHolder, RuleContext, RuleKind, Severity, ViolationTarget};
use crate::features::rule_checks::ports::KernelRule;

/// Kernel entry points return void
///
/// Only the kernel itself is checked; helpers may return values. The kernel
/// is not registered as a problem method for this finding.
pub struct NonVoidReturnRule;

impl KernelRule for NonVoidReturnRule {
    fn kind(&self) -> RuleKind {
        RuleKind::NonVoidReturn
    }

    fn check(&self, ctx: &RuleContext<'_>, holder: &mut ProblemsHolder) {
        let Some(return_type) = &ctx.kernel.return_type else {
            return;
        };
        if return_type.ty.is_void() {
            return;
        }
        holder.register(
            ViolationTarget::Node(return_type.id),
            return_type.span,
            ctx.kernel.id,
            messages::NON_VOID_RETURN,
            Severity::Warning,
        );
    }
}
