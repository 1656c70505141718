//! Calls leaving the kernel: native and restricted APIs, external libraries

use crate::features::program_model::visitor::collect_calls;
use crate::features::restricted_api::restricted_namespace;
use crate::features::rule_checks::domain::{messages, ProblemsHolder, RuleContext, RuleKind, Severity, ViolationTarget};
use crate::features::rule_checks::ports::KernelRule;

/// Class-name prefix of placeholder classes generated for harnesses
const DUMMY_CLASS_PREFIX: &str = "_Dummy_";

pub struct SystemCallRule;

impl KernelRule for SystemCallRule {
    fn kind(&self) -> RuleKind {
        RuleKind::SystemCall
    }

    fn check(&self, ctx: &RuleContext<'_>, holder: &mut ProblemsHolder) {
        for method in ctx.analyzable_methods() {
            let context = ctx.helper_context(method);
            for expr in collect_calls(method) {
                let Some(callee) = expr.as_call().and_then(|c| ctx.model.resolve_call(c)) else {
                    continue;
                };
                if callee.is_native() {
                    ctx.flag_kernel();
                    holder.register(
                        ViolationTarget::Node(expr.id),
                        expr.span,
                        method.id,
                        format!("{}{}", messages::NATIVE_CALL, context),
                        Severity::Error,
                    );
                }
                let restricted = ctx
                    .model
                    .containing_class_name(callee)
                    .and_then(restricted_namespace);
                if let Some(namespace) = restricted {
                    ctx.flag_kernel();
                    holder.register(
                        ViolationTarget::Node(expr.id),
                        expr.span,
                        method.id,
                        messages::restricted_call(namespace.prefix()) + &context,
                        Severity::Error,
                    );
                }
            }
        }
    }
}

pub struct ExternalLibraryRule;

impl KernelRule for ExternalLibraryRule {
    fn kind(&self) -> RuleKind {
        RuleKind::ExternalLibrary
    }

    fn check(&self, ctx: &RuleContext<'_>, holder: &mut ProblemsHolder) {
        for method in ctx.analyzable_methods() {
            let context = ctx.helper_context(method);
            for expr in collect_calls(method) {
                let Some(callee) = expr.as_call().and_then(|c| ctx.model.resolve_call(c)) else {
                    continue;
                };
                if ctx.model.is_project_source(callee) {
                    continue;
                }
                let Some(class_name) = ctx.model.containing_class_name(callee) else {
                    continue;
                };
                if class_name.starts_with("java.")
                    || ctx.config.is_trusted(class_name)
                    || class_name.starts_with(DUMMY_CLASS_PREFIX)
                {
                    continue;
                }
                ctx.flag_kernel();
                holder.register(
                    ViolationTarget::Node(expr.id),
                    expr.span,
                    method.id,
                    format!("{}{}", messages::EXTERNAL_LIBRARY, context),
                    Severity::Warning,
                );
            }
        }
    }
}
