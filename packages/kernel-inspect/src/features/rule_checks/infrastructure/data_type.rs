//! Data-type legality of parameters, locals and local-class fields

use crate::config::InspectionConfig;
use crate::features::program_model::visitor::{walk_local, walk_method};
use crate::features::program_model::{LocalVariable, Method, ProgramModel, TypeRef, TypeUse, Visitor};
use crate::features::rule_checks::domain::{messages, ProblemsHolder, RuleContext, RuleKind, Severity, ViolationTarget};
use crate::features::rule_checks::ports::KernelRule;
use crate::shared::models::ClassId;

pub struct DataTypeRule;

/// Primitives, one-dimensional primitive arrays, allowlisted vector types
/// and anything under the trusted namespace; unknown types are skipped
pub fn is_supported_type(config: &InspectionConfig, ty: &TypeRef) -> bool {
    if ty.is_unknown() {
        return true;
    }
    if ty.element_is_primitive() {
        return ty.array_dims <= 1;
    }
    if ty.canonical.starts_with(&config.trusted_namespace) {
        return true;
    }
    ty.array_dims == 0
        && config
            .vector_type_allowlist
            .iter()
            .any(|v| *v == ty.canonical || v == ty.simple_name())
}

/// Declared types inside one method body
struct DeclaredTypes<'a> {
    model: &'a dyn ProgramModel,
    uses: Vec<&'a TypeUse>,
}

impl<'a> Visitor<'a> for DeclaredTypes<'a> {
    fn visit_local(&mut self, local: &'a LocalVariable) {
        self.uses.push(&local.ty);
        walk_local(self, local);
    }

    fn visit_local_class(&mut self, class: ClassId) {
        let model = self.model;
        if let Some(class) = model.class(class) {
            for field in class.fields.iter().filter_map(|f| model.field(*f)) {
                self.uses.push(&field.ty);
            }
        }
    }
}

fn declared_types<'a>(model: &'a dyn ProgramModel, method: &'a Method) -> Vec<&'a TypeUse> {
    let mut collector = DeclaredTypes {
        model,
        uses: method.parameters.iter().map(|p| &p.ty).collect(),
    };
    walk_method(&mut collector, method);
    collector.uses
}

impl KernelRule for DataTypeRule {
    fn kind(&self) -> RuleKind {
        RuleKind::DataType
    }

    fn check(&self, ctx: &RuleContext<'_>, holder: &mut ProblemsHolder) {
        for method in ctx.analyzable_methods() {
            let context = ctx.helper_context(method);
            for ty in declared_types(ctx.model, method) {
                if is_supported_type(ctx.config, &ty.ty) {
                    continue;
                }
                ctx.flag_kernel();
                holder.register(
                    ViolationTarget::Node(ty.id),
                    ty.span,
                    method.id,
                    messages::unsupported_data_type(&ty.ty.presentable_text()) + &context,
                    Severity::Error,
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn supported(ty: TypeRef) -> bool {
        is_supported_type(&InspectionConfig::default(), &ty)
    }

    #[test]
    fn test_supported_types() {
        assert!(supported(TypeRef::new("int")));
        assert!(supported(TypeRef::array("float", 1)));
        assert!(supported(TypeRef::new("Int3")));
        assert!(supported(TypeRef::new("uk.ac.manchester.tornado.api.types.arrays.FloatArray")));
        assert!(supported(TypeRef::unknown()));
    }

    #[test]
    fn test_unsupported_types() {
        assert!(!supported(TypeRef::new("java.lang.String")));
        assert!(!supported(TypeRef::array("int", 2)));
        assert!(!supported(TypeRef::array("java.lang.Integer", 1)));
        assert!(!supported(TypeRef::new("java.util.List")));
    }
}
