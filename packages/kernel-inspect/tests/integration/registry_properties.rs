//! Property-based tests for the problem registry and the scope cache
//!
//! Invariants that hold for any sequence of operations:
//! - Registry: each distinct method is stored and announced exactly once
//! - Registry: a revision change always empties it
//! - Cache: a served scope always belongs to the current revision and
//!   equals a scope computed from scratch

#[path = "../common/mod.rs"]
mod common;

use common::{clean_kernels, helper_chain, program_of};
use kernel_inspect::features::program_model::Method;
use kernel_inspect::{CallGraphResolver, OwnerContext, ProblemMethodRegistry, Program, ProgramModel};
use proptest::prelude::*;
use std::collections::BTreeSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

const KERNELS: usize = 8;

fn kernels(program: &Program) -> Vec<&Method> {
    (0..KERNELS)
        .map(|n| {
            program
                .find_method("Many", &format!("k{}", n))
                .expect("generated kernel")
        })
        .collect()
}

#[derive(Debug, Clone)]
enum CacheOp {
    Resolve(usize),
    Touch,
    Invalidate,
}

fn cache_op() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        4 => (0..4usize).prop_map(CacheOp::Resolve),
        1 => Just(CacheOp::Touch),
        1 => Just(CacheOp::Invalidate),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_registry_stores_and_announces_each_method_once(
        picks in prop::collection::vec(0..KERNELS, 0..40)
    ) {
        let program = program_of(&clean_kernels(KERNELS));
        let methods = kernels(&program);
        let owner = OwnerContext::new(program.files()[0], "Kernels.java");

        let registry = ProblemMethodRegistry::new();
        let notified = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&notified);
        registry.subscribe(Arc::new(move |_: &OwnerContext| {
            counter.fetch_add(1, Ordering::SeqCst);
        }));

        let mut inserted = 0;
        for &n in &picks {
            if registry.add_method(&owner, methods[n]) {
                inserted += 1;
            }
        }

        let distinct: BTreeSet<usize> = picks.iter().copied().collect();
        prop_assert_eq!(registry.len(), distinct.len());
        prop_assert_eq!(inserted, distinct.len());
        prop_assert_eq!(notified.load(Ordering::SeqCst), distinct.len());
        for n in 0..KERNELS {
            prop_assert_eq!(registry.contains_method(methods[n]), distinct.contains(&n));
        }
    }

    #[test]
    fn prop_revision_change_empties_the_registry(
        picks in prop::collection::vec(0..KERNELS, 1..20),
        revision in 1u64..1000,
    ) {
        let program = program_of(&clean_kernels(KERNELS));
        let methods = kernels(&program);
        let owner = OwnerContext::new(program.files()[0], "Kernels.java");

        let registry = ProblemMethodRegistry::new();
        registry.sync_revision(0);
        for &n in &picks {
            registry.add_method(&owner, methods[n]);
        }
        prop_assert!(!registry.is_empty());

        prop_assert!(!registry.sync_revision(0));
        prop_assert!(!registry.is_empty());
        prop_assert!(registry.sync_revision(revision));
        prop_assert!(registry.is_empty());
    }

    #[test]
    fn prop_cached_scopes_match_fresh_resolution(
        ops in prop::collection::vec(cache_op(), 1..30)
    ) {
        let mut program = program_of(&helper_chain(4));
        let names = ["kernel", "h1", "h2", "h3"];
        let ids: Vec<_> = names
            .iter()
            .map(|name| program.find_method("Chain", name).expect("chain method").id)
            .collect();
        let resolver = CallGraphResolver::new();

        for op in ops {
            match op {
                CacheOp::Touch => program.touch(),
                CacheOp::Invalidate => resolver.invalidate_all(),
                CacheOp::Resolve(n) => {
                    let method = program.method(ids[n]).expect("live method");
                    let served = resolver.resolve(&program, method);
                    let fresh = CallGraphResolver::new().resolve(&program, method);
                    prop_assert_eq!(served.revision, program.modification_count());
                    prop_assert_eq!(&*served, &*fresh);
                }
            }
        }
    }
}
