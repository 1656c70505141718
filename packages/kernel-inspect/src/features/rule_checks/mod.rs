//! Rule checks over an analysis scope
//!
//! Each rule is independent: it reads the kernel, its analysis scope and the
//! program model, and appends findings to its own holder. Rules that find a
//! violation register the kernel in the problem-method registry.

pub mod domain;
pub mod infrastructure;
pub mod ports;

pub use domain::{messages, ProblemsHolder, RuleContext, RuleKind, Severity, Violation, ViolationTarget};
pub use infrastructure::{
    default_rules, AssertRule, DataTypeRule, ExternalLibraryRule, NonVoidReturnRule,
    RecursionRule, StaticTaskGraphRule, SystemCallRule, ThrowRule, UnresolvableHelperRule,
};
pub use ports::KernelRule;
