//! Problem-method registry
//!
//! Deduplicated set of methods already reported by a rule check, keyed by
//! their declaration text. Owned by an inspection session and cleared when
//! the program changes.

mod registry;

pub use registry::{OwnerContext, ProblemMethodRegistry, RefreshListener, SubscriptionId};
