//! Call-graph resolution from kernel entry points
//!
//! Starting at a kernel method, follows every call transitively and splits
//! callees into methods whose bodies are analyzed as if inlined, and call
//! sites that cannot be analyzed (with a reason for the diagnostic).

pub mod domain;
pub mod infrastructure;

pub use domain::{
    check_eligibility, helper_context, kernel_marker, AnalysisScope, Eligibility, KernelMarker,
    NonAnalyzableCallSite,
};
pub use infrastructure::{CacheStats, CallGraphResolver, MAX_INLINE_DEPTH};
