mod context;
mod holder;
pub mod messages;
mod violation;

pub use context::RuleContext;
pub use holder::ProblemsHolder;
pub use violation::{RuleKind, Severity, Violation, ViolationTarget};
