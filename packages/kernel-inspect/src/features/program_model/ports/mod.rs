//! Program model port
//!
//! Read-only access to the program tree consumed by the call-graph resolver,
//! the flow analyzer and the rule checks.

use crate::features::program_model::domain::{
    visitor, CallExpr, Class, Declaration, Expr, ExprKind, Field, LiteralKind, LocalVariable,
    Method, SourceFile, SourceOrigin, TypeRef,
};
use crate::shared::models::{ClassId, FieldId, FileId, MethodId, NodeId};

pub trait ProgramModel: Send + Sync {
    fn file(&self, id: FileId) -> Option<&SourceFile>;
    fn class(&self, id: ClassId) -> Option<&Class>;
    fn method(&self, id: MethodId) -> Option<&Method>;
    fn field(&self, id: FieldId) -> Option<&Field>;

    fn files(&self) -> Vec<FileId>;

    /// Every live method declared in `file`, nested and local classes included
    fn methods_in_file(&self, file: FileId) -> Vec<MethodId>;

    /// Monotonic counter bumped on every edit of the tree
    fn modification_count(&self) -> u64;

    // ═══════════════════════════════════════════════════════════════════════
    // Provided queries
    // ═══════════════════════════════════════════════════════════════════════

    fn is_project_source(&self, method: &Method) -> bool {
        self.file(method.file)
            .is_some_and(|f| f.origin == SourceOrigin::Project)
    }

    fn containing_class(&self, method: &Method) -> Option<&Class> {
        method.class.and_then(|c| self.class(c))
    }

    /// Qualified name of the class declaring `method`
    fn containing_class_name(&self, method: &Method) -> Option<&str> {
        self.containing_class(method)
            .map(|c| c.qualified_name.as_str())
    }

    /// `Class.method` using the simple class name
    fn display_name(&self, method: &Method) -> String {
        match self.containing_class(method) {
            Some(class) => format!("{}.{}", class.name, method.name),
            None => method.name.clone(),
        }
    }

    fn resolve_call(&self, call: &CallExpr) -> Option<&Method> {
        call.target.and_then(|id| self.method(id))
    }

    fn find_variable<'m>(&self, method: &'m Method, id: NodeId) -> Option<&'m LocalVariable> {
        visitor::find_local(method, id)
    }

    /// Declared type of a variable-like declaration seen from `context`
    fn declared_type(&self, decl: &Declaration, context: &Method) -> Option<TypeRef> {
        match decl {
            Declaration::Parameter { method, index } => {
                let owner = if *method == context.id {
                    context
                } else {
                    self.method(*method)?
                };
                owner.parameters.get(*index).map(|p| p.ty.ty.clone())
            }
            Declaration::Local(id) => self.find_variable(context, *id).map(|l| l.ty.ty.clone()),
            Declaration::Field(id) => self.field(*id).map(|f| f.ty.ty.clone()),
            Declaration::Class(id) => self.class(*id).map(|c| c.as_type()),
            Declaration::Method(_) => None,
        }
    }

    /// Static type of `expr`, when the model can tell
    fn expression_type(&self, expr: &Expr, context: &Method) -> Option<TypeRef> {
        match &expr.kind {
            ExprKind::Literal(kind) => Some(TypeRef::new(match kind {
                LiteralKind::Int => "int",
                LiteralKind::Long => "long",
                LiteralKind::Float => "float",
                LiteralKind::Double => "double",
                LiteralKind::Char => "char",
                LiteralKind::Boolean => "boolean",
                LiteralKind::String => "java.lang.String",
                LiteralKind::Null => return None,
            })),
            ExprKind::This { .. } => self.containing_class(context).map(|c| c.as_type()),
            ExprKind::Reference(reference) => reference
                .target
                .and_then(|decl| self.declared_type(&decl, context)),
            ExprKind::Call(call) => self
                .resolve_call(call)
                .and_then(|m| m.return_type.as_ref())
                .map(|t| t.ty.clone()),
            ExprKind::New(new) => Some(new.ty.ty.clone()),
            ExprKind::Cast { ty, .. } => Some(ty.ty.clone()),
            ExprKind::Parenthesized(inner) => self.expression_type(inner, context),
            ExprKind::Assignment { target, .. } => self.expression_type(target, context),
            ExprKind::NewArray { element, .. } => element.as_ref().map(|t| t.ty.clone()),
            ExprKind::ArrayAccess { array, .. } => {
                let array_ty = self.expression_type(array, context)?;
                (array_ty.array_dims > 0)
                    .then(|| TypeRef::array(array_ty.canonical, array_ty.array_dims - 1))
            }
            ExprKind::Unary { .. }
            | ExprKind::Binary { .. }
            | ExprKind::Conditional { .. }
            | ExprKind::Lambda { .. }
            | ExprKind::Other(_) => None,
        }
    }
}
