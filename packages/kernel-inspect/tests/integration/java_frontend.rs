//! tree-sitter front end: names, calls and kernel markers

#[path = "../common/mod.rs"]
mod common;

use common::{method, program_of, ProgramBuilder};
use kernel_inspect::features::call_graph::{kernel_marker, KernelMarker};
use kernel_inspect::features::program_model::{visitor::collect_calls, Method};
use kernel_inspect::{
    InspectionConfig, InspectionSession, JavaFrontend, Program, ProgramModel, ProblemMethodRegistry,
    SourceOrigin, TaskCatalog,
};
use pretty_assertions::assert_eq;
use std::sync::Arc;

/// Callee of every call in `method`, in source order
fn callees<'p>(program: &'p Program, method: &Method) -> Vec<Option<&'p Method>> {
    collect_calls(method)
        .into_iter()
        .map(|expr| expr.as_call().and_then(|call| program.resolve_call(call)))
        .collect()
}

#[test]
fn test_imports_resolve_across_packages() {
    let program = ProgramBuilder::new()
        .with_source(
            "com/acme/kernels/Blur.java",
            r#"
            package com.acme.kernels;
            import com.acme.util.MathUtil;
            public class Blur {
                public static void k(float[] a) { a[0] = MathUtil.clamp(a[0]); }
            }
            "#,
        )
        .with_source(
            "com/acme/util/MathUtil.java",
            r#"
            package com.acme.util;
            public class MathUtil {
                public static float clamp(float x) { return x < 0 ? 0 : x; }
            }
            "#,
        )
        .build();

    let kernel = method(&program, "com.acme.kernels.Blur", "k");
    let clamp = method(&program, "com.acme.util.MathUtil", "clamp");
    let resolved: Vec<_> = callees(&program, kernel).into_iter().map(|m| m.map(|m| m.id)).collect();
    assert_eq!(resolved, vec![Some(clamp.id)]);
    assert!(program.is_project_source(clamp));
}

#[test]
fn test_overloads_are_picked_by_arity() {
    let program = program_of(
        r#"
        public class Kernels {
            static int f(int a) { return a; }
            static int f(int a, int b) { return a + b; }
            static void k(int[] x) { x[0] = f(x[1], x[2]); }
        }
        "#,
    );
    let kernel = method(&program, "Kernels", "k");
    let callee = callees(&program, kernel)[0].unwrap();
    assert_eq!(callee.parameters.len(), 2);
}

#[test]
fn test_nested_and_inherited_helpers_resolve() {
    let program = program_of(
        r#"
        public class Kernels {
            static class Base {
                int base(int x) { return x; }
            }
            static class Derived extends Base {
                int run(int x) { return base(x) + Inner.twice(x); }
            }
            static class Inner {
                static int twice(int x) { return 2 * x; }
            }
        }
        "#,
    );
    let run = method(&program, "Kernels.Derived", "run");
    let names: Vec<String> = callees(&program, run)
        .into_iter()
        .map(|m| program.display_name(m.unwrap()))
        .collect();
    assert_eq!(names, vec!["Base.base".to_string(), "Inner.twice".to_string()]);
}

#[test]
fn test_parameter_annotation_marks_a_kernel() {
    let program = program_of(
        r#"
        import uk.ac.manchester.tornado.api.annotations.Reduce;
        public class Kernels {
            public static void sum(float[] input, @Reduce float[] result) {
                result[0] = 0.0f;
            }
            public static void helper(float[] input) { }
        }
        "#,
    );
    let config = InspectionConfig::default();
    let sum = method(&program, "Kernels", "sum");
    let helper = method(&program, "Kernels", "helper");

    assert_eq!(
        kernel_marker(sum, &config),
        Some(KernelMarker::Annotation(
            "uk.ac.manchester.tornado.api.annotations.Reduce".to_string()
        ))
    );
    assert_eq!(kernel_marker(helper, &config), None);
}

#[test]
fn test_context_parameter_marks_a_kernel() {
    let program = program_of(
        r#"
        import uk.ac.manchester.tornado.api.KernelContext;
        public class Kernels {
            public static void k(float[] a, KernelContext context) { }
        }
        "#,
    );
    let k = method(&program, "Kernels", "k");
    assert_eq!(
        kernel_marker(k, &InspectionConfig::default()),
        Some(KernelMarker::ContextParameter(1))
    );
}

#[test]
fn test_kernels_with_syntax_errors_are_not_runnable() {
    let program = program_of(
        r#"
        import uk.ac.manchester.tornado.api.KernelContext;
        public class Kernels {
            public static void ok(KernelContext context, int[] a) { a[0] = 1; }
            public static void broken(KernelContext context, int[] a) { a[0] = ; }
        }
        "#,
    );
    let file = program.files()[0];
    let catalog = TaskCatalog::new(
        Arc::new(InspectionConfig::default()),
        Arc::new(ProblemMethodRegistry::new()),
    );

    assert_eq!(catalog.find_kernel_methods(&program, file).len(), 2);
    let runnable: Vec<String> = catalog
        .runnable_tasks(&program, file)
        .into_iter()
        .map(|t| t.display_name)
        .collect();
    assert_eq!(runnable, vec!["ok(KernelContext, int[]): void".to_string()]);
}

#[test]
fn test_library_sources_are_resolvable_but_not_inspected() {
    let program = ProgramBuilder::new()
        .with_source(
            "App.java",
            r#"
            import uk.ac.manchester.tornado.api.KernelContext;
            public class App {
                public static void k(KernelContext context, float[] a) { a[0] = 1.0f; }
            }
            "#,
        )
        .with_library(
            "Vendor.java",
            r#"
            import uk.ac.manchester.tornado.api.KernelContext;
            public class Vendor {
                public static void k(KernelContext context, float[] a) { throw new RuntimeException(); }
            }
            "#,
        )
        .build();

    let origins: Vec<SourceOrigin> = program
        .files()
        .into_iter()
        .filter_map(|id| program.file(id))
        .filter(|f| f.path.extension().is_some_and(|ext| ext == "java"))
        .map(|f| f.origin)
        .collect();
    assert_eq!(origins, vec![SourceOrigin::Project, SourceOrigin::Library]);

    let reports = InspectionSession::new(InspectionConfig::default()).inspect_program(&program);
    assert_eq!(reports.len(), 1);
    assert!(reports[0].is_clean());
}

#[test]
fn test_frontend_can_be_reused_across_programs() {
    let mut frontend = JavaFrontend::new().unwrap();
    let first = frontend
        .parse_program(&[("A.java", "class A { void a() { } }")])
        .unwrap();
    let second = frontend
        .parse_program(&[("B.java", "class B { void b() { } }")])
        .unwrap();
    assert!(first.find_class("A").is_some());
    assert!(second.find_class("A").is_none());
    assert!(second.find_class("B").is_some());
}
