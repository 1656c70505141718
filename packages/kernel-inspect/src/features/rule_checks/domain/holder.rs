use rustc_hash::FxHashSet;

use super::violation::{RuleKind, Severity, Violation, ViolationTarget};
use crate::shared::models::{MethodId, Span};

/// Collects the findings of one rule for one kernel
///
/// The same message on the same target is kept once.
#[derive(Debug)]
pub struct ProblemsHolder {
    rule: RuleKind,
    kernel: MethodId,
    violations: Vec<Violation>,
    seen: FxHashSet<(ViolationTarget, String)>,
}

impl ProblemsHolder {
    pub fn new(rule: RuleKind, kernel: MethodId) -> Self {
        Self {
            rule,
            kernel,
            violations: Vec::new(),
            seen: FxHashSet::default(),
        }
    }

    pub fn register(
        &mut self,
        target: ViolationTarget,
        span: Span,
        method: MethodId,
        message: impl Into<String>,
        severity: Severity,
    ) -> bool {
        let message = message.into();
        if !self.seen.insert((target, message.clone())) {
            return false;
        }
        self.violations.push(Violation {
            rule: self.rule,
            severity,
            message,
            target,
            span,
            method,
            kernel: self.kernel,
        });
        true
    }

    pub fn rule(&self) -> RuleKind {
        self.rule
    }

    pub fn len(&self) -> usize {
        self.violations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    pub fn into_violations(self) -> Vec<Violation> {
        self.violations
    }
}
