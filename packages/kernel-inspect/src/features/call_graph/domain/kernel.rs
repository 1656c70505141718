//! Kernel entry-point detection

use crate::config::InspectionConfig;
use crate::features::program_model::Method;

/// Why a method is treated as a kernel
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KernelMarker {
    /// Qualified name of the marking annotation (`...Parallel`, `...Reduce`)
    /// on the method or anywhere in its parameters and body
    Annotation(String),
    /// Index of the kernel-context parameter
    ContextParameter(usize),
}

impl KernelMarker {
    pub fn is_annotation(&self) -> bool {
        matches!(self, KernelMarker::Annotation(_))
    }
}

/// Annotation markers win over context parameters
pub fn kernel_marker(method: &Method, config: &InspectionConfig) -> Option<KernelMarker> {
    if let Some(annotation) = method
        .annotations
        .iter()
        .chain(&method.inner_annotations)
        .find(|a| config.is_kernel_annotation(&a.qualified_name))
    {
        return Some(KernelMarker::Annotation(annotation.qualified_name.clone()));
    }
    method
        .parameters
        .iter()
        .position(|p| p.ty.ty.canonical.ends_with(&config.kernel_context_type))
        .map(KernelMarker::ContextParameter)
}
