//! Local-memory parameter flow through parsed kernels

#[path = "../common/mod.rs"]
mod common;

use common::{method, program_of, LOCAL_MEMORY};
use kernel_inspect::{InspectionConfig, InspectionSession, LocalMemoryAnalyzer, ProgramModel};
use pretty_assertions::assert_eq;
use std::collections::BTreeSet;

fn names(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_parameter_through_local_initializer() {
    let program = program_of(LOCAL_MEMORY);
    let reduce = method(&program, "Reduce", "reduce");
    let found = LocalMemoryAnalyzer::new().find_local_memory_parameters(&program, reduce);
    assert_eq!(found, names(&["groupSize"]));
}

#[test]
fn test_parameters_in_compound_size_expression() {
    let program = program_of(LOCAL_MEMORY);
    let direct = method(&program, "Reduce", "direct");
    let found = LocalMemoryAnalyzer::new().find_local_memory_parameters(&program, direct);
    assert_eq!(found, names(&["height", "width"]));
}

#[test]
fn test_reassigned_local_contributes_every_source() {
    let program = program_of(
        r#"
        import uk.ac.manchester.tornado.api.KernelContext;
        public class Kernels {
            public static void k(KernelContext context, int base, int extra, boolean wide) {
                int size = base;
                if (wide) {
                    size += extra;
                }
                long[] scratch = context.allocateLongLocalArray(size);
            }
        }
        "#,
    );
    let kernel = method(&program, "Kernels", "k");
    let found = LocalMemoryAnalyzer::new().find_local_memory_parameters(&program, kernel);
    assert_eq!(found, names(&["base", "extra"]));
}

#[test]
fn test_other_receivers_are_ignored() {
    let program = program_of(
        r#"
        public class Kernels {
            static class Pool {
                float[] allocateFloatLocalArray(int n) { return new float[n]; }
            }
            public static void k(Pool pool, int n) {
                float[] buffer = pool.allocateFloatLocalArray(n);
            }
        }
        "#,
    );
    let kernel = method(&program, "Kernels", "k");
    assert!(LocalMemoryAnalyzer::new()
        .find_local_memory_parameters(&program, kernel)
        .is_empty());
}

#[test]
fn test_runnable_tasks_expose_local_memory_parameters() {
    let program = program_of(LOCAL_MEMORY);
    let session = InspectionSession::new(InspectionConfig::default());
    let tasks = session.runnable_tasks(&program, program.files()[0]);

    let summary: Vec<(String, BTreeSet<String>)> = tasks
        .into_iter()
        .map(|t| (t.display_name, t.local_memory_parameters))
        .collect();
    assert_eq!(
        summary,
        vec![
            (
                "reduce(KernelContext, float[], int, int): void".to_string(),
                names(&["groupSize"])
            ),
            (
                "direct(KernelContext, int, int): void".to_string(),
                names(&["height", "width"])
            ),
        ]
    );
}
