use serde::Serialize;
use std::collections::BTreeSet;
use std::sync::Arc;

use crate::config::InspectionConfig;
use crate::features::call_graph::{kernel_marker, KernelMarker};
use crate::features::local_memory::LocalMemoryAnalyzer;
use crate::features::problem_registry::ProblemMethodRegistry;
use crate::features::program_model::{Method, ProgramModel};
use crate::shared::models::{FileId, MethodId, Span};

/// One runnable kernel
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskEntry {
    pub method: MethodId,
    /// `name(T1, T2): R`
    pub display_name: String,
    pub span: Span,
    /// Parameters sizing local-memory allocations
    pub local_memory_parameters: BTreeSet<String>,
}

pub struct TaskCatalog {
    config: Arc<InspectionConfig>,
    registry: Arc<ProblemMethodRegistry>,
    local_memory: LocalMemoryAnalyzer,
}

impl TaskCatalog {
    pub fn new(config: Arc<InspectionConfig>, registry: Arc<ProblemMethodRegistry>) -> Self {
        let local_memory = LocalMemoryAnalyzer::from_config(&config);
        Self {
            config,
            registry,
            local_memory,
        }
    }

    /// Kernels declared in `file`, in declaration order, each once
    pub fn find_kernel_methods<'m>(&self, model: &'m dyn ProgramModel, file: FileId) -> Vec<(&'m Method, KernelMarker)> {
        let mut seen = BTreeSet::new();
        model
            .methods_in_file(file)
            .into_iter()
            .filter_map(|id| model.method(id))
            .filter_map(|m| kernel_marker(m, &self.config).map(|marker| (m, marker)))
            .filter(|(m, _)| seen.insert(m.text.clone()))
            .collect()
    }

    pub fn is_runnable(&self, method: &Method) -> bool {
        !method.has_syntax_errors && method.returns_void() && !self.registry.contains_method(method)
    }

    pub fn display_name(method: &Method) -> String {
        let params: Vec<String> = method
            .parameters
            .iter()
            .map(|p| p.ty.ty.presentable_text())
            .collect();
        let ret = method
            .return_type
            .as_ref()
            .map(|r| r.ty.presentable_text())
            .unwrap_or_else(|| "void".to_string());
        format!("{}({}): {}", method.name, params.join(", "), ret)
    }

    /// Runnable kernels of `file`; run the rule checks first so the registry
    /// reflects the current program
    pub fn runnable_tasks(&self, model: &dyn ProgramModel, file: FileId) -> Vec<TaskEntry> {
        self.find_kernel_methods(model, file)
            .into_iter()
            .map(|(method, _)| method)
            .filter(|method| self.is_runnable(method))
            .map(|method| TaskEntry {
                method: method.id,
                display_name: Self::display_name(method),
                span: method.span,
                local_memory_parameters: self.local_memory.find_local_memory_parameters(model, method),
            })
            .collect()
    }
}
