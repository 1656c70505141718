//! Scope resolution across files, libraries and edits

#[path = "../common/mod.rs"]
mod common;

use common::{
    helper_chain, method, program_of, ProgramBuilder, LIBRARY_CALLER, LIBRARY_OPS, MUTUAL_RECURSION,
};
use kernel_inspect::{CallGraphResolver, InspectionConfig, Preset, ProgramModel};
use pretty_assertions::assert_eq;
use std::sync::Arc;

#[test]
fn test_helpers_in_other_files_are_inlined() {
    let program = ProgramBuilder::new()
        .with_source(
            "Kernel.java",
            r#"
            public class Kernel {
                public static void k(float[] a) { Scale.apply(a, 2.0f); }
            }
            "#,
        )
        .with_source(
            "Scale.java",
            r#"
            public class Scale {
                static void apply(float[] a, float f) { a[0] = a[0] * f; }
            }
            "#,
        )
        .build();

    let kernel = method(&program, "Kernel", "k");
    let helper = method(&program, "Scale", "apply");
    let scope = CallGraphResolver::new().resolve(&program, kernel);

    assert_eq!(scope.analyzable, vec![kernel.id, helper.id]);
    assert_eq!(scope.helpers().collect::<Vec<_>>(), vec![helper.id]);
    assert!(scope.non_analyzable.is_empty());
}

#[test]
fn test_library_methods_are_never_inlined() {
    let program = ProgramBuilder::new()
        .with_source("UsesLibrary.java", LIBRARY_CALLER)
        .with_library("Ops.java", LIBRARY_OPS)
        .build();

    let kernel = method(&program, "UsesLibrary", "kernel");
    let scope = CallGraphResolver::new().resolve(&program, kernel);

    assert_eq!(scope.analyzable, vec![kernel.id]);
    assert!(scope.non_analyzable.is_empty());
}

#[test]
fn test_trusted_runtime_calls_are_intrinsics() {
    let program = program_of(
        r#"
        import uk.ac.manchester.tornado.api.KernelContext;
        public class Kernels {
            public static void k(KernelContext context, float[] a) {
                context.localBarrier();
                a[context.globalIdx] = 0.0f;
            }
        }
        "#,
    );
    let kernel = method(&program, "Kernels", "k");
    let scope = CallGraphResolver::new().resolve(&program, kernel);

    assert_eq!(scope.analyzable, vec![kernel.id]);
    assert!(scope.non_analyzable.is_empty());
}

#[test]
fn test_preset_depth_bounds_the_walk() {
    let program = program_of(&helper_chain(6));
    let kernel = method(&program, "Chain", "kernel");

    let fast = CallGraphResolver::from_config(&InspectionConfig::preset(Preset::Fast));
    let balanced = CallGraphResolver::from_config(&InspectionConfig::preset(Preset::Balanced));

    // kernel, then h1..h4: the walk stops expanding at depth 4
    assert_eq!(fast.resolve(&program, kernel).analyzable.len(), 5);
    assert_eq!(balanced.resolve(&program, kernel).analyzable.len(), 7);
}

#[test]
fn test_each_helper_appears_once() {
    let program = program_of(
        r#"
        public class Kernels {
            static void k(int[] a) { left(a); right(a); shared(a); }
            static void left(int[] a) { shared(a); }
            static void right(int[] a) { shared(a); left(a); }
            static void shared(int[] a) { a[0]++; }
        }
        "#,
    );
    let kernel = method(&program, "Kernels", "k");
    let scope = CallGraphResolver::new().resolve(&program, kernel);

    let mut ids = scope.analyzable.clone();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), scope.analyzable.len());
    assert_eq!(scope.analyzable.len(), 4);
    assert_eq!(scope.analyzable[0], kernel.id);
}

#[test]
fn test_mutual_recursion_terminates_with_each_helper_once() {
    let program = program_of(MUTUAL_RECURSION);
    let kernel = method(&program, "Mutual", "kernel");
    let ping = method(&program, "Mutual", "ping");
    let pong = method(&program, "Mutual", "pong");

    let scope = CallGraphResolver::new().resolve(&program, kernel);
    assert_eq!(scope.analyzable, vec![kernel.id, ping.id, pong.id]);
    assert!(scope.non_analyzable.is_empty());
}

#[test]
fn test_removed_helper_becomes_unresolvable() {
    let mut program = program_of(
        r#"
        public class Kernels {
            static void k(int[] a) { h(a); }
            static void h(int[] a) { a[0] = 1; }
        }
        "#,
    );
    let resolver = CallGraphResolver::new();
    let kernel_id = method(&program, "Kernels", "k").id;
    let helper_id = method(&program, "Kernels", "h").id;

    let before = resolver.resolve(&program, program.method(kernel_id).unwrap());
    assert_eq!(before.analyzable, vec![kernel_id, helper_id]);

    program.remove_method(helper_id);
    let after = resolver.resolve(&program, program.method(kernel_id).unwrap());
    assert_eq!(after.analyzable, vec![kernel_id]);
    assert_eq!(
        after.reason_for(after.non_analyzable[0].call),
        Some("Cannot resolve method 'h(a)'")
    );
    assert_eq!(after.revision, program.modification_count());
}

#[test]
fn test_cache_serves_until_next_edit() {
    let mut program = program_of(&helper_chain(3));
    let resolver = CallGraphResolver::new();
    let kernel_id = method(&program, "Chain", "kernel").id;

    let first = resolver.resolve(&program, program.method(kernel_id).unwrap());
    let again = resolver.resolve(&program, program.method(kernel_id).unwrap());
    assert!(Arc::ptr_eq(&first, &again));

    let helper_id = method(&program, "Chain", "h2").id;
    program.rename_method(helper_id, "renamed").unwrap();

    let fresh = resolver.resolve(&program, program.method(kernel_id).unwrap());
    assert!(!Arc::ptr_eq(&first, &fresh));
    assert_eq!(fresh.revision, program.modification_count());
    let stats = resolver.stats();
    assert_eq!((stats.hits, stats.misses, stats.entries), (1, 2, 1));
}
