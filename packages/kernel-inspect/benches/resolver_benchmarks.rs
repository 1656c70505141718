//! Performance benchmarks for scope resolution
//!
//! - Cold resolution of a helper chain (cache cleared every iteration)
//! - Warm lookups served from the scope cache
//! - Full inspection of a file with many kernels

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use kernel_inspect::{
    CallGraphResolver, InspectionConfig, InspectionSession, JavaFrontend, Program, ProgramModel,
};

// ============================================================================
// Fixtures
// ============================================================================

/// One kernel calling a chain of `length` helpers, each also calling a
/// shared leaf
fn helper_chain(length: usize) -> String {
    let mut source = String::from(
        "import uk.ac.manchester.tornado.api.annotations.Parallel;\nclass Chain {\n",
    );
    source.push_str(
        "  static void kernel(float[] a) {\n    for (@Parallel int i = 0; i < a.length; i++) { a[i] = h0(a[i]); }\n  }\n",
    );
    for n in 0..length {
        let body = if n + 1 < length {
            format!("return h{}(leaf(x));", n + 1)
        } else {
            "return leaf(x);".to_string()
        };
        source.push_str(&format!("  static float h{}(float x) {{ {} }}\n", n, body));
    }
    source.push_str("  static float leaf(float x) { return x * 2.0f; }\n}\n");
    source
}

/// `count` independent kernels sharing one helper
fn many_kernels(count: usize) -> String {
    let mut source = String::from(
        "import uk.ac.manchester.tornado.api.KernelContext;\nclass Many {\n  static float helper(float x) { return x + 1.0f; }\n",
    );
    for n in 0..count {
        source.push_str(&format!(
            "  static void k{}(KernelContext context, float[] a) {{ int i = context.globalIdx; a[i] = helper(a[i]); }}\n",
            n
        ));
    }
    source.push_str("}\n");
    source
}

fn build(source: &str) -> Program {
    JavaFrontend::new()
        .unwrap()
        .parse_program(&[("Bench.java", source)])
        .unwrap()
}

// ============================================================================
// Resolution
// ============================================================================

fn bench_cold_resolution(c: &mut Criterion) {
    let mut group = c.benchmark_group("cold_resolution");

    for length in [4usize, 16, 64] {
        let program = build(&helper_chain(length));
        let kernel = program.find_method("Chain", "kernel").unwrap();
        let resolver = CallGraphResolver::new().with_max_depth(length + 1);

        group.throughput(Throughput::Elements(length as u64));
        group.bench_with_input(BenchmarkId::from_parameter(length), &length, |b, _| {
            b.iter(|| {
                resolver.invalidate_all();
                black_box(resolver.resolve(&program, kernel))
            });
        });
    }

    group.finish();
}

fn bench_warm_lookup(c: &mut Criterion) {
    let program = build(&helper_chain(16));
    let kernel = program.find_method("Chain", "kernel").unwrap();
    let resolver = CallGraphResolver::new();
    resolver.resolve(&program, kernel);

    c.bench_function("warm_lookup", |b| {
        b.iter(|| black_box(resolver.resolve(&program, black_box(kernel))));
    });
}

// ============================================================================
// Inspection
// ============================================================================

fn bench_inspect_file(c: &mut Criterion) {
    let mut group = c.benchmark_group("inspect_file");

    for parallel in [false, true] {
        let program = build(&many_kernels(64));
        let file = program.files()[0];
        let session = InspectionSession::new(InspectionConfig::default().with_parallel(parallel));

        group.bench_with_input(
            BenchmarkId::from_parameter(if parallel { "parallel" } else { "sequential" }),
            &parallel,
            |b, _| {
                b.iter(|| black_box(session.inspect_file(&program, file)));
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_cold_resolution, bench_warm_lookup, bench_inspect_file);
criterion_main!(benches);
