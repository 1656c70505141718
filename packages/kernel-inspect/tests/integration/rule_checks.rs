//! Each rule against a kernel written to trigger it

#[path = "../common/mod.rs"]
mod common;

use common::*;
use kernel_inspect::features::rule_checks::{messages, ViolationTarget};
use kernel_inspect::{InspectionConfig, InspectionSession, Preset, ProgramModel, RuleKind, Severity};
use pretty_assertions::assert_eq;

#[test]
fn test_clean_kernel_has_no_findings() {
    let program = program_of(VECTOR_ADD);
    let report = inspect(&program);
    assert_eq!(report.kernels, 1);
    assert_clean(&report);
}

#[test]
fn test_throw_in_helper_names_the_helper() {
    let program = program_of(THROWING_HELPER);
    let report = inspect(&program);

    assert_rule_count(&report, RuleKind::Throw, 1);
    assert_eq!(
        messages_of(&report, RuleKind::Throw),
        vec![format!(
            "{} (in helper 'Helpers.check' inlined into kernel)",
            messages::THROW
        )]
    );
    let check = method(&program, "Helpers", "check");
    assert_eq!(violations_of(&report, RuleKind::Throw)[0].method, check.id);
}

#[test]
fn test_recursion_is_reported_on_the_declaration() {
    let program = program_of(RECURSIVE_HELPER);
    let report = inspect(&program);
    let fib = method(&program, "Recursive", "fib");

    let found = violations_of(&report, RuleKind::Recursion);
    assert!(!found.is_empty());
    for violation in &found {
        assert_eq!(violation.target, ViolationTarget::Method(fib.id));
        assert_eq!(violation.span, fib.name_span);
        assert_eq!(violation.severity, Severity::Error);
    }
    assert_eq!(
        messages_of(&report, RuleKind::Recursion),
        vec![
            messages::RECURSION.to_string(),
            format!("{} (in helper 'Recursive.fib' inlined into kernel)", messages::RECURSION),
        ]
    );
}

#[test]
fn test_direct_self_call_is_recursion() {
    let program = program_of(
        r#"
        import uk.ac.manchester.tornado.api.KernelContext;
        public class Kernels {
            public static void k(KernelContext context, int[] a) {
                if (a[0] > 0) { a[0]--; k(context, a); }
            }
        }
        "#,
    );
    let report = inspect(&program);
    assert_rule_count(&report, RuleKind::Recursion, 1);
}

#[test]
fn test_system_and_io_calls() {
    let program = program_of(SYSTEM_CALLS);
    let report = inspect(&program);

    let mut found = messages_of(&report, RuleKind::SystemCall);
    found.sort();
    let mut expected = vec![
        messages::NATIVE_CALL.to_string(),
        messages::restricted_call("java.lang.System"),
        messages::restricted_call("java.io"),
    ];
    expected.sort();
    assert_eq!(found, expected);
    assert_rule_severity(&report, RuleKind::SystemCall, Severity::Error);
}

#[test]
fn test_reflection_call_is_reported_once_and_registers_the_kernel() {
    let program = program_of(REFLECTION_CALL);
    let session = InspectionSession::new(InspectionConfig::default());
    let report = session.inspect_file(&program, program.files()[0]);
    let kernel = method(&program, "Reflective", "kernel");

    let found = violations_of(&report, RuleKind::SystemCall);
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].message, messages::restricted_call("java.lang.reflect"));
    assert_eq!(found[0].severity, Severity::Error);
    assert_eq!(found[0].method, kernel.id);
    assert!(session.registry().contains_method(kernel));
    assert_eq!(session.registry().len(), 1);
}

#[test]
fn test_mutual_recursion_is_reported_on_both_helpers() {
    let program = program_of(MUTUAL_RECURSION);
    let report = inspect(&program);
    let ping = method(&program, "Mutual", "ping");
    let pong = method(&program, "Mutual", "pong");

    let found = violations_of(&report, RuleKind::Recursion);
    assert!(!found.is_empty());
    let mut targets: Vec<_> = found.iter().map(|v| v.target).collect();
    targets.sort();
    targets.dedup();
    let mut expected = vec![ViolationTarget::Method(ping.id), ViolationTarget::Method(pong.id)];
    expected.sort();
    assert_eq!(targets, expected);
    assert_rule_severity(&report, RuleKind::Recursion, Severity::Error);
}

#[test]
fn test_traps_and_asserts() {
    let program = program_of(TRAPS);
    let report = inspect(&program);

    assert_rule_count(&report, RuleKind::Throw, 2);
    let throws = messages_of(&report, RuleKind::Throw);
    assert!(throws.contains(&messages::throws_clause("java.lang.Exception")));
    assert!(throws.contains(&messages::TRY_CATCH.to_string()));

    assert_eq!(messages_of(&report, RuleKind::Assert), vec![messages::ASSERT.to_string()]);
}

#[test]
fn test_unsupported_data_types() {
    let program = program_of(BAD_TYPES);
    let report = inspect(&program);

    assert_eq!(
        messages_of(&report, RuleKind::DataType),
        vec![
            messages::unsupported_data_type("String"),
            messages::unsupported_data_type("int[][]"),
            messages::unsupported_data_type("Integer"),
        ]
    );
}

#[test]
fn test_vector_allowlist_is_configurable() {
    let source = r#"
        import uk.ac.manchester.tornado.api.annotations.Parallel;
        public class Kernels {
            public static void k(float[] a, Float4 v) {
                for (@Parallel int i = 0; i < a.length; i++) { a[i] = 0.0f; }
            }
        }
    "#;
    let program = program_of(source);
    assert_rule_count(&inspect(&program), RuleKind::DataType, 1);

    let mut config = InspectionConfig::default();
    config.vector_type_allowlist.push("Float4".to_string());
    assert_rule_count(&inspect_with(&program, config), RuleKind::DataType, 0);
}

#[test]
fn test_static_task_graph() {
    let program = program_of(STATIC_GRAPH);
    let report = inspect(&program);

    let found = messages_of(&report, RuleKind::StaticTaskGraph);
    assert!(!found.is_empty());
    assert!(found.iter().all(|m| m == messages::STATIC_TASK_GRAPH));
    assert_rule_severity(&report, RuleKind::StaticTaskGraph, Severity::Error);
}

#[test]
fn test_external_library_is_a_warning() {
    let program = ProgramBuilder::new()
        .with_source("UsesLibrary.java", LIBRARY_CALLER)
        .with_library("Ops.java", LIBRARY_OPS)
        .build();
    let report = inspect(&program);

    assert_eq!(
        messages_of(&report, RuleKind::ExternalLibrary),
        vec![messages::EXTERNAL_LIBRARY.to_string()]
    );
    assert_rule_severity(&report, RuleKind::ExternalLibrary, Severity::Warning);
    assert!(!report.has_errors());
}

#[test]
fn test_non_void_kernel_and_unresolved_helper() {
    let program = program_of(NON_VOID_AND_UNRESOLVED);
    let session = InspectionSession::new(InspectionConfig::default());
    let report = session.inspect_file(&program, program.files()[0]);

    assert_eq!(
        messages_of(&report, RuleKind::NonVoidReturn),
        vec![messages::NON_VOID_RETURN.to_string()]
    );
    assert_rule_severity(&report, RuleKind::NonVoidReturn, Severity::Warning);

    assert_eq!(
        messages_of(&report, RuleKind::UnresolvableHelper),
        vec![messages::helper_unresolvable("Cannot resolve method 'missing(1)'")]
    );
    assert_rule_severity(&report, RuleKind::UnresolvableHelper, Severity::WeakWarning);

    // Neither finding marks a kernel as a problem method
    assert!(session.registry().is_empty());
}

#[test]
fn test_deep_helpers_are_checked_only_within_the_bound() {
    let program = program_of(&helper_chain(5));

    let fast = inspect_with(&program, InspectionConfig::preset(Preset::Fast));
    assert_rule_count(&fast, RuleKind::Throw, 0);

    let balanced = inspect_with(&program, InspectionConfig::preset(Preset::Balanced));
    assert_eq!(
        messages_of(&balanced, RuleKind::Throw),
        vec![format!("{} (in helper 'Chain.h5' inlined into kernel)", messages::THROW)]
    );
}

#[test]
fn test_disabled_rule_is_not_run() {
    let program = program_of(TRAPS);
    let config = InspectionConfig::default().disable_rule(RuleKind::Assert);
    let report = inspect_with(&program, config);

    assert_rule_count(&report, RuleKind::Assert, 0);
    assert_rule_count(&report, RuleKind::Throw, 2);
}

#[test]
fn test_violations_are_sorted_by_position() {
    let program = program_of(BAD_TYPES);
    let report = inspect(&program);
    let spans: Vec<_> = report.violations.iter().map(|v| v.span).collect();
    let mut sorted = spans.clone();
    sorted.sort();
    assert_eq!(spans, sorted);
}
