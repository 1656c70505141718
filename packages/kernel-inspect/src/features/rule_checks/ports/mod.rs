//! Rule port

use crate::features::rule_checks::domain::{ProblemsHolder, RuleContext, RuleKind};

pub trait KernelRule: Send + Sync {
    fn kind(&self) -> RuleKind;

    /// Inspect one kernel and append findings to `holder`
    fn check(&self, ctx: &RuleContext<'_>, holder: &mut ProblemsHolder);
}
