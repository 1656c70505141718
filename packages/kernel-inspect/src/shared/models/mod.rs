//! Shared models

mod ids;
mod span;

pub use ids::{ClassId, FieldId, FileId, MethodId, NodeId};
pub use span::{Location, Span};
