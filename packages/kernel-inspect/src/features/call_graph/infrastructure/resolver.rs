//! Depth-bounded transitive call resolution with a revision-keyed memo table

use dashmap::DashMap;
use rustc_hash::FxHashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::debug;

use crate::config::{InspectionConfig, DEFAULT_TRUSTED_NAMESPACE};
use crate::features::call_graph::domain::{
    check_eligibility, AnalysisScope, Eligibility, NonAnalyzableCallSite,
};
use crate::features::program_model::visitor::collect_calls;
use crate::features::program_model::{Method, ProgramModel};
use crate::shared::models::MethodId;

/// Default bound on helper nesting below the kernel
pub const MAX_INLINE_DEPTH: usize = 10;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
}

/// Resolves and memoizes analysis scopes per kernel method
///
/// Entries remember the modification count they were computed at. Any change
/// of the count clears the whole table before the next lookup, and a stale
/// entry is never returned.
pub struct CallGraphResolver {
    max_depth: usize,
    trusted_namespace: String,
    cache: DashMap<MethodId, Arc<AnalysisScope>>,
    revision: AtomicU64,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl Default for CallGraphResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl CallGraphResolver {
    pub fn new() -> Self {
        Self {
            max_depth: MAX_INLINE_DEPTH,
            trusted_namespace: DEFAULT_TRUSTED_NAMESPACE.to_string(),
            cache: DashMap::new(),
            revision: AtomicU64::new(0),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    pub fn from_config(config: &InspectionConfig) -> Self {
        Self {
            max_depth: config.max_inline_depth,
            trusted_namespace: config.trusted_namespace.clone(),
            ..Self::new()
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Analysis scope of `kernel`, served from the cache while the program
    /// is unchanged
    pub fn resolve(&self, model: &dyn ProgramModel, kernel: &Method) -> Arc<AnalysisScope> {
        let current = model.modification_count();
        self.sync_revision(current);

        if let Some(entry) = self.cache.get(&kernel.id) {
            if entry.revision == current {
                self.hits.fetch_add(1, Ordering::Relaxed);
                debug!(kernel = %kernel.id, revision = current, "scope cache hit");
                return Arc::clone(entry.value());
            }
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        let scope = Arc::new(self.compute(model, kernel, current));
        debug!(
            kernel = %kernel.id,
            revision = current,
            analyzable = scope.analyzable.len(),
            non_analyzable = scope.non_analyzable.len(),
            "scope cache miss"
        );
        self.cache.insert(kernel.id, Arc::clone(&scope));
        scope
    }

    /// Drop every cached scope
    pub fn invalidate_all(&self) {
        self.cache.clear();
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.cache.len(),
        }
    }

    fn sync_revision(&self, current: u64) {
        let previous = self.revision.swap(current, Ordering::AcqRel);
        if previous != current && !self.cache.is_empty() {
            debug!(previous, current, "program changed, invalidating scope cache");
            self.cache.clear();
        }
    }

    fn compute(&self, model: &dyn ProgramModel, kernel: &Method, revision: u64) -> AnalysisScope {
        let mut walk = Walk {
            model,
            trusted_namespace: &self.trusted_namespace,
            max_depth: self.max_depth,
            visited: FxHashSet::default(),
            analyzable: vec![kernel.id],
            non_analyzable: Vec::new(),
        };
        walk.visited.insert(kernel.id);
        walk.collect(kernel, 0);

        AnalysisScope {
            kernel: kernel.id,
            analyzable: walk.analyzable,
            non_analyzable: walk.non_analyzable,
            revision,
        }
    }
}

/// State of one resolution; `visited` only ever grows
struct Walk<'m> {
    model: &'m dyn ProgramModel,
    trusted_namespace: &'m str,
    max_depth: usize,
    visited: FxHashSet<MethodId>,
    analyzable: Vec<MethodId>,
    non_analyzable: Vec<NonAnalyzableCallSite>,
}

impl<'m> Walk<'m> {
    fn collect(&mut self, method: &Method, depth: usize) {
        if depth >= self.max_depth {
            debug!(method = %method.id, depth, "inline depth reached, truncating");
            return;
        }
        if method.body.is_none() {
            return;
        }

        let model = self.model;
        for expr in collect_calls(method) {
            let Some(call) = expr.as_call() else {
                continue;
            };
            let Some(callee) = model.resolve_call(call) else {
                self.non_analyzable.push(NonAnalyzableCallSite {
                    call: expr.id,
                    span: expr.span,
                    call_text: expr.text.clone(),
                    caller: method.id,
                    reason: format!("Cannot resolve method '{}'", expr.text),
                });
                continue;
            };

            if self.visited.contains(&callee.id) {
                continue;
            }

            match check_eligibility(model, callee, self.trusted_namespace) {
                Eligibility::ProjectMethod => {
                    self.visited.insert(callee.id);
                    self.analyzable.push(callee.id);
                    self.collect(callee, depth + 1);
                }
                Eligibility::NonAnalyzable(reason) => {
                    if model.is_project_source(callee) {
                        self.non_analyzable.push(NonAnalyzableCallSite {
                            call: expr.id,
                            span: expr.span,
                            call_text: expr.text.clone(),
                            caller: method.id,
                            reason,
                        });
                    }
                }
                Eligibility::Restricted(_)
                | Eligibility::TrustedIntrinsic
                | Eligibility::OpaqueLibrary => {}
            }
        }
    }
}
