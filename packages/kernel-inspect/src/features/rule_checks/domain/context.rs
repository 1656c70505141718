use crate::config::InspectionConfig;
use crate::features::call_graph::{helper_context, AnalysisScope, KernelMarker};
use crate::features::problem_registry::{OwnerContext, ProblemMethodRegistry};
use crate::features::program_model::{Method, ProgramModel};

/// Everything a rule may read for one kernel
pub struct RuleContext<'a> {
    pub model: &'a dyn ProgramModel,
    pub config: &'a InspectionConfig,
    pub kernel: &'a Method,
    pub marker: &'a KernelMarker,
    pub scope: &'a AnalysisScope,
    pub registry: &'a ProblemMethodRegistry,
    pub owner: &'a OwnerContext,
}

impl<'a> RuleContext<'a> {
    /// Kernel first, then inlined helpers
    pub fn analyzable_methods(&self) -> impl Iterator<Item = &'a Method> + '_ {
        let model = self.model;
        self.scope
            .analyzable
            .iter()
            .filter_map(move |id| model.method(*id))
    }

    pub fn helper_context(&self, method: &Method) -> String {
        helper_context(self.model, method, self.kernel)
    }

    /// Register the kernel as a problem method
    pub fn flag_kernel(&self) -> bool {
        self.registry.add_method(self.owner, self.kernel)
    }
}
