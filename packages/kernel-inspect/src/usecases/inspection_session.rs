//! Inspection Session - Usecase Layer for Kernel Inspection
//!
//! Wires the analysis services together for one session and runs every
//! enabled rule against every kernel of a file.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │                  InspectionSession                        │
//! │                                                           │
//! │   inspect_file(model, file)                               │
//! │        │                                                  │
//! │        ├─▶ ProblemMethodRegistry::sync_revision           │
//! │        ├─▶ TaskCatalog::find_kernel_methods               │
//! │        │                                                  │
//! │        └─▶ per kernel (rayon)                             │
//! │              ├─▶ CallGraphResolver::resolve  (cached)     │
//! │              └─▶ KernelRule::check × enabled rules        │
//! │                                                           │
//! │   ◀── InspectionReport (sorted violations + counts)       │
//! └───────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example Usage
//!
//! ```rust,ignore
//! use kernel_inspect::{InspectionConfig, InspectionSession, JavaFrontend};
//!
//! let program = JavaFrontend::new()?.parse_program(&[("Kernels.java", source)])?;
//! let session = InspectionSession::new(InspectionConfig::default());
//! for file in program.files() {
//!     let report = session.inspect_file(&program, file);
//!     println!("{} errors", report.errors());
//! }
//! ```

use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::config::InspectionConfig;
use crate::features::call_graph::{CallGraphResolver, KernelMarker};
use crate::features::problem_registry::{OwnerContext, ProblemMethodRegistry};
use crate::features::program_model::{Method, ProgramModel, SourceOrigin};
use crate::features::rule_checks::{
    default_rules, KernelRule, ProblemsHolder, RuleContext, Severity, Violation,
};
use crate::features::task_catalog::{TaskCatalog, TaskEntry};
use crate::shared::models::FileId;

/// Inspection result for one file
#[derive(Debug, Clone, Default, Serialize)]
pub struct InspectionReport {
    /// Path of the inspected file
    pub path: PathBuf,

    /// Number of kernels found in the file
    pub kernels: usize,

    /// Findings in reading order
    pub violations: Vec<Violation>,

    /// Number of findings per severity
    pub counts: BTreeMap<Severity, usize>,

    /// Wall time of the inspection
    #[serde(skip)]
    pub duration: Duration,
}

impl InspectionReport {
    fn new(path: PathBuf, kernels: usize, mut violations: Vec<Violation>, duration: Duration) -> Self {
        violations.sort_by(|a, b| {
            (a.span, a.rule, &a.message, a.kernel).cmp(&(b.span, b.rule, &b.message, b.kernel))
        });
        let mut counts = BTreeMap::new();
        for violation in &violations {
            *counts.entry(violation.severity).or_insert(0) += 1;
        }
        Self {
            path,
            kernels,
            violations,
            counts,
            duration,
        }
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.counts.get(&severity).copied().unwrap_or(0)
    }

    pub fn errors(&self) -> usize {
        self.count(Severity::Error)
    }

    pub fn has_errors(&self) -> bool {
        self.errors() > 0
    }

    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }
}

/// One analysis session over a program
///
/// # Thread Safety
/// The resolver cache and the registry are concurrent, so a session can be
/// shared across threads behind an `Arc`.
pub struct InspectionSession {
    config: Arc<InspectionConfig>,
    resolver: CallGraphResolver,
    registry: Arc<ProblemMethodRegistry>,
    rules: Vec<Box<dyn KernelRule>>,
    catalog: TaskCatalog,
}

impl InspectionSession {
    /// Create a session with every rule the configuration enables
    pub fn new(config: InspectionConfig) -> Self {
        Self::with_registry(config, Arc::new(ProblemMethodRegistry::new()))
    }

    /// Create a session that records flagged kernels into `registry`
    pub fn with_registry(config: InspectionConfig, registry: Arc<ProblemMethodRegistry>) -> Self {
        let config = Arc::new(config);
        let rules = default_rules(&config);
        Self {
            resolver: CallGraphResolver::from_config(&config),
            catalog: TaskCatalog::new(Arc::clone(&config), Arc::clone(&registry)),
            config,
            registry,
            rules,
        }
    }

    /// Replace the rule set
    pub fn with_rules(mut self, rules: Vec<Box<dyn KernelRule>>) -> Self {
        self.rules = rules;
        self
    }

    pub fn config(&self) -> &InspectionConfig {
        &self.config
    }

    pub fn resolver(&self) -> &CallGraphResolver {
        &self.resolver
    }

    pub fn registry(&self) -> &Arc<ProblemMethodRegistry> {
        &self.registry
    }

    pub fn catalog(&self) -> &TaskCatalog {
        &self.catalog
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // Inspection
    // ═══════════════════════════════════════════════════════════════════════════

    /// Run every rule against every kernel declared in `file`
    pub fn inspect_file(&self, model: &dyn ProgramModel, file: FileId) -> InspectionReport {
        let start = Instant::now();
        self.registry.sync_revision(model.modification_count());

        let path = model
            .file(file)
            .map(|f| f.path.clone())
            .unwrap_or_default();
        let owner = OwnerContext::new(file, path.clone());
        let kernels = self.catalog.find_kernel_methods(model, file);

        let violations: Vec<Violation> = self
            .run_kernels(&kernels, |(kernel, marker)| {
                self.inspect_kernel(model, kernel, marker, &owner)
            })
            .into_iter()
            .flatten()
            .collect();

        let report = InspectionReport::new(path, kernels.len(), violations, start.elapsed());
        info!(
            file = %report.path.display(),
            kernels = report.kernels,
            errors = report.errors(),
            warnings = report.count(Severity::Warning),
            weak_warnings = report.count(Severity::WeakWarning),
            duration_ms = report.duration.as_millis() as u64,
            "file inspected"
        );
        report
    }

    /// Inspect every project file of the program, in file order
    pub fn inspect_program(&self, model: &dyn ProgramModel) -> Vec<InspectionReport> {
        model
            .files()
            .into_iter()
            .filter(|id| {
                model
                    .file(*id)
                    .is_some_and(|f| f.origin == SourceOrigin::Project)
            })
            .map(|id| self.inspect_file(model, id))
            .collect()
    }

    /// Runnable kernels of `file`, after inspecting it so the registry is
    /// current
    pub fn runnable_tasks(&self, model: &dyn ProgramModel, file: FileId) -> Vec<TaskEntry> {
        self.inspect_file(model, file);
        self.catalog.runnable_tasks(model, file)
    }

    /// Findings of every enabled rule for one kernel
    pub fn inspect_kernel(
        &self,
        model: &dyn ProgramModel,
        kernel: &Method,
        marker: &KernelMarker,
        owner: &OwnerContext,
    ) -> Vec<Violation> {
        let scope = self.resolver.resolve(model, kernel);
        let ctx = RuleContext {
            model,
            config: &self.config,
            kernel,
            marker,
            scope: &scope,
            registry: &self.registry,
            owner,
        };

        let mut violations = Vec::new();
        for rule in &self.rules {
            let mut holder = ProblemsHolder::new(rule.kind(), kernel.id);
            rule.check(&ctx, &mut holder);
            if !holder.is_empty() {
                debug!(kernel = %kernel.name, rule = %rule.kind(), found = holder.len(), "rule findings");
            }
            violations.extend(holder.into_violations());
        }
        violations
    }

    #[cfg(feature = "parallel")]
    fn run_kernels<T, F>(&self, kernels: &[(&Method, KernelMarker)], f: F) -> Vec<T>
    where
        T: Send,
        F: Fn(&(&Method, KernelMarker)) -> T + Send + Sync,
    {
        if self.config.parallel && kernels.len() > 1 {
            kernels.par_iter().map(f).collect()
        } else {
            kernels.iter().map(f).collect()
        }
    }

    #[cfg(not(feature = "parallel"))]
    fn run_kernels<T, F>(&self, kernels: &[(&Method, KernelMarker)], f: F) -> Vec<T>
    where
        F: Fn(&(&Method, KernelMarker)) -> T,
    {
        kernels.iter().map(f).collect()
    }
}
