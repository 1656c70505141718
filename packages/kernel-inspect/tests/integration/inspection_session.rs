//! Session orchestration: registry lifecycle, listeners, fan-out, config files

#[path = "../common/mod.rs"]
mod common;

use common::*;
use kernel_inspect::{
    InspectionConfig, InspectionSession, OwnerContext, ProblemMethodRegistry, ProgramModel, RuleKind,
    Severity,
};
use pretty_assertions::assert_eq;
use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tempfile::NamedTempFile;

#[test]
fn test_flagged_kernel_is_registered_once_and_listeners_hear_it() {
    let program = program_of(THROWING_HELPER);
    let registry = Arc::new(ProblemMethodRegistry::new());
    let owners = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&owners);
    registry.subscribe(Arc::new(move |owner: &OwnerContext| {
        sink.lock().unwrap().push(owner.path.clone());
    }));

    let session = InspectionSession::with_registry(InspectionConfig::default(), Arc::clone(&registry));
    let file = program.files()[0];
    session.inspect_file(&program, file);
    session.inspect_file(&program, file);

    let kernel = method(&program, "Helpers", "kernel");
    assert!(registry.contains_method(kernel));
    assert_eq!(registry.len(), 1);
    assert_eq!(
        *owners.lock().unwrap(),
        vec![std::path::PathBuf::from("Kernels.java")]
    );
}

#[test]
fn test_edits_clear_the_registry_before_the_next_run() {
    let mut program = program_of(THROWING_HELPER);
    let session = InspectionSession::new(InspectionConfig::default());
    let notified = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&notified);
    session.registry().subscribe(Arc::new(move |_: &OwnerContext| {
        counter.fetch_add(1, Ordering::SeqCst);
    }));
    let file = program.files()[0];

    session.inspect_file(&program, file);
    assert_eq!(notified.load(Ordering::SeqCst), 1);

    program.touch();
    session.inspect_file(&program, file);
    // cleared, then registered again
    assert_eq!(notified.load(Ordering::SeqCst), 2);
    assert_eq!(session.registry().len(), 1);
}

#[test]
fn test_kernel_helpers_in_other_files_report_against_the_helper() {
    let program = ProgramBuilder::new()
        .with_source(
            "Kernel.java",
            r#"
            import uk.ac.manchester.tornado.api.annotations.Parallel;
            public class Kernel {
                public static void k(int[] a) {
                    for (@Parallel int i = 0; i < a.length; i++) { a[i] = Checks.positive(a[i]); }
                }
            }
            "#,
        )
        .with_source(
            "Checks.java",
            r#"
            public class Checks {
                static int positive(int x) { assert x > 0; return x; }
            }
            "#,
        )
        .build();
    let session = InspectionSession::new(InspectionConfig::default());
    let reports = session.inspect_program(&program);

    assert_eq!(reports.len(), 2);
    assert_eq!(reports[0].kernels, 1);
    assert_eq!(reports[1].kernels, 0);

    let asserts = violations_of(&reports[0], RuleKind::Assert);
    assert_eq!(asserts.len(), 1);
    let helper = method(&program, "Checks", "positive");
    assert_eq!(asserts[0].method, helper.id);
    assert_eq!(program.method(asserts[0].method).unwrap().file, program.files()[1]);
    assert!(asserts[0].message.ends_with("(in helper 'Checks.positive' inlined into kernel)"));
}

#[test]
fn test_parallel_and_sequential_runs_agree() {
    let mut source = clean_kernels(12);
    // one failing kernel in the middle of the file
    source = source.replacen(
        "public static void k6(KernelContext context, float[] a) {",
        "public static void k6(KernelContext context, float[] a) { assert a.length > 0;",
        1,
    );
    let program = program_of(&source);

    let sequential = inspect_with(&program, InspectionConfig::default().with_parallel(false));
    let parallel = inspect_with(&program, InspectionConfig::default().with_parallel(true));

    assert_eq!(sequential.kernels, 12);
    assert_eq!(sequential.violations, parallel.violations);
    assert_eq!(sequential.counts, parallel.counts);
    assert_eq!(sequential.count(Severity::Error), 1);
}

#[test]
fn test_yaml_config_drives_the_session() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
version: 1
preset: balanced
overrides:
  disabled_rules: [assert, throw]
  parallel: false
"#
    )
    .unwrap();
    let config = InspectionConfig::from_yaml(file.path()).unwrap();
    assert!(!config.parallel);

    let program = program_of(TRAPS);
    let report = inspect_with(&program, config);
    assert_rule_count(&report, RuleKind::Assert, 0);
    assert_rule_count(&report, RuleKind::Throw, 0);
}

#[test]
fn test_invalid_yaml_config_is_rejected() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "version: 1\noverrides:\n  max_inline_depth: 0\n").unwrap();
    assert!(InspectionConfig::from_yaml(file.path()).is_err());

    let mut unknown = NamedTempFile::new().unwrap();
    writeln!(unknown, "version: 1\nunexpected: true\n").unwrap();
    assert!(InspectionConfig::from_yaml(unknown.path()).is_err());
}

#[test]
fn test_report_serializes_to_json() {
    let program = program_of(TRAPS);
    let report = inspect(&program);
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["kernels"], 1);
    assert!(json["counts"]["error"].as_u64().unwrap() >= 3);
    assert_eq!(json["violations"][0]["severity"], "error");
    assert!(json.get("duration").is_none());
}
