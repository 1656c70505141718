//! Analysis scope: the kernel plus every helper inlined into it

use serde::Serialize;

use crate::features::program_model::{Method, ProgramModel};
use crate::shared::models::{MethodId, NodeId, Span};

/// A call inside the scope that could not be resolved or inlined
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NonAnalyzableCallSite {
    /// Node of the call expression
    pub call: NodeId,
    pub span: Span,
    pub call_text: String,
    /// Method whose body contains the call
    pub caller: MethodId,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisScope {
    pub kernel: MethodId,
    /// Kernel first, then helpers in discovery order; no duplicates
    pub analyzable: Vec<MethodId>,
    /// In discovery order
    pub non_analyzable: Vec<NonAnalyzableCallSite>,
    /// Modification count the scope was computed against
    pub revision: u64,
}

impl AnalysisScope {
    pub fn contains(&self, method: MethodId) -> bool {
        self.analyzable.contains(&method)
    }

    /// Analyzable methods other than the kernel itself
    pub fn helpers(&self) -> impl Iterator<Item = MethodId> + '_ {
        self.analyzable.iter().copied().filter(move |m| *m != self.kernel)
    }

    pub fn reason_for(&self, call: NodeId) -> Option<&str> {
        self.non_analyzable
            .iter()
            .find(|site| site.call == call)
            .map(|site| site.reason.as_str())
    }

    pub fn is_self_contained(&self) -> bool {
        self.analyzable.len() == 1 && self.non_analyzable.is_empty()
    }
}

/// Message suffix for findings inside an inlined helper; empty for the
/// kernel itself
pub fn helper_context(model: &dyn ProgramModel, method: &Method, kernel: &Method) -> String {
    if method.id == kernel.id {
        String::new()
    } else {
        format!(
            " (in helper '{}' inlined into kernel)",
            model.display_name(method)
        )
    }
}
