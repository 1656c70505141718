mod eligibility;
mod kernel;
mod scope;

pub use eligibility::{check_eligibility, Eligibility};
pub use kernel::{kernel_marker, KernelMarker};
pub use scope::{helper_context, AnalysisScope, NonAnalyzableCallSite};
