/*
 * Kernel Inspect - Static eligibility analysis for parallel kernels
 *
 * Feature-First Hexagonal Architecture:
 * - shared/      : Common models (Span, ids)
 * - features/    : Vertical slices (program model → call graph → rule checks → registry)
 * - usecases/    : Inspection session orchestration
 * - config/      : Inspection configuration (presets, YAML)
 *
 * Analysis:
 * - Cross-procedural helper inlining bounded by MAX_INLINE_DEPTH
 * - Scope cache keyed by (kernel, modification count)
 * - Rayon fan-out across kernels of a file
 */

// Crate-level lint configuration
#![allow(clippy::too_many_arguments)] // Resolution helpers thread several tables
#![allow(clippy::type_complexity)] // Scope maps are necessarily nested
#![allow(clippy::new_without_default)] // Default impl not always needed
#![allow(clippy::upper_case_acronyms)]

// ═══════════════════════════════════════════════════════════════════════════
// Module Exports - Feature-First Architecture
// ═══════════════════════════════════════════════════════════════════════════

/// Shared models and utilities
pub mod shared;

/// Feature modules (program model, call graph, rule checks, ...)
pub mod features;

/// Configuration system
pub mod config;

/// Error types
pub mod errors;

/// Usecase layer (InspectionSession)
pub mod usecases;

// ═══════════════════════════════════════════════════════════════════════════
// Re-exports for Public API
// ═══════════════════════════════════════════════════════════════════════════

pub use config::{InspectionConfig, Preset};
pub use errors::{InspectError, Result};
pub use features::call_graph::{AnalysisScope, CallGraphResolver, Eligibility, MAX_INLINE_DEPTH};
pub use features::java_frontend::JavaFrontend;
pub use features::local_memory::LocalMemoryAnalyzer;
pub use features::problem_registry::{OwnerContext, ProblemMethodRegistry, RefreshListener};
pub use features::program_model::{Program, ProgramModel, SourceOrigin};
pub use features::restricted_api::is_restricted_namespace;
pub use features::rule_checks::{RuleKind, Severity, Violation};
pub use features::task_catalog::{TaskCatalog, TaskEntry};
pub use usecases::{InspectionReport, InspectionSession};
