//! Per-callee inlining decision

use crate::features::program_model::{Method, ProgramModel};
use crate::features::restricted_api::{restricted_namespace, RestrictedNamespace};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Eligibility {
    /// Project method with a body: inlined and walked
    ProjectMethod,
    /// Forbidden at runtime; left to the system-call check
    Restricted(RestrictedNamespace),
    /// Runtime API handled intrinsically
    TrustedIntrinsic,
    /// Library code; expected to be opaque
    OpaqueLibrary,
    NonAnalyzable(String),
}

impl Eligibility {
    pub fn is_inlinable(&self) -> bool {
        matches!(self, Eligibility::ProjectMethod)
    }

    /// Diagnostic text for callees that should have been analyzable
    pub fn reason(&self) -> Option<&str> {
        match self {
            Eligibility::NonAnalyzable(reason) => Some(reason),
            _ => None,
        }
    }
}

/// Decide whether `callee` is inlined into the analysis scope
///
/// A missing body or `native` is reported before any namespace test; the
/// resolver only surfaces that reason when the callee is project source.
pub fn check_eligibility(
    model: &dyn ProgramModel,
    callee: &Method,
    trusted_namespace: &str,
) -> Eligibility {
    if callee.body.is_none() {
        return Eligibility::NonAnalyzable(format!(
            "Method '{}' has no source body available for analysis",
            callee.name
        ));
    }
    if callee.is_native() {
        return Eligibility::NonAnalyzable(format!("Method '{}' is native", callee.name));
    }

    if let Some(class_name) = model.containing_class_name(callee) {
        if let Some(namespace) = restricted_namespace(class_name) {
            return Eligibility::Restricted(namespace);
        }
        if class_name.starts_with(trusted_namespace) {
            return Eligibility::TrustedIntrinsic;
        }
    }

    if !model.is_project_source(callee) {
        return Eligibility::OpaqueLibrary;
    }

    Eligibility::ProjectMethod
}
