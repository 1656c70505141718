//! Files, classes, methods and fields

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::syntax::{Expr, Parameter, Stmt};
use super::types::{Annotation, Modifiers, TypeRef, TypeUse};
use crate::shared::models::{ClassId, FieldId, FileId, MethodId, Span};

/// Whether a file belongs to the user's project or to a dependency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceOrigin {
    Project,
    Library,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Import {
    /// `java.util.List`, or `java.util` for on-demand imports
    pub path: String,
    pub is_static: bool,
    pub on_demand: bool,
}

#[derive(Debug, Clone)]
pub struct SourceFile {
    pub id: FileId,
    pub path: PathBuf,
    pub package: Option<String>,
    pub imports: Vec<Import>,
    /// Top-level classes
    pub classes: Vec<ClassId>,
    pub origin: SourceOrigin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassKind {
    Class,
    Interface,
    Enum,
    Record,
    Annotation,
}

#[derive(Debug, Clone)]
pub struct Class {
    pub id: ClassId,
    pub name: String,
    pub qualified_name: String,
    pub kind: ClassKind,
    pub file: FileId,
    /// Enclosing class for nested, inner and local classes
    pub outer: Option<ClassId>,
    pub super_class: Option<String>,
    pub modifiers: Modifiers,
    pub methods: Vec<MethodId>,
    pub fields: Vec<FieldId>,
    pub nested: Vec<ClassId>,
    pub is_local: bool,
    pub span: Span,
}

impl Class {
    pub fn as_type(&self) -> TypeRef {
        TypeRef::new(self.qualified_name.clone())
    }
}

#[derive(Debug, Clone)]
pub struct Method {
    pub id: MethodId,
    pub name: String,
    pub class: Option<ClassId>,
    pub file: FileId,
    pub parameters: Vec<Parameter>,
    /// `None` for constructors
    pub return_type: Option<TypeUse>,
    pub throws: Vec<TypeUse>,
    pub modifiers: Modifiers,
    pub annotations: Vec<Annotation>,
    /// Annotations on parameters and locals (`@Parallel` loop variables)
    pub inner_annotations: Vec<Annotation>,
    /// `None` for abstract, interface, native and library stub methods
    pub body: Option<Stmt>,
    /// Source text of the whole declaration
    pub text: String,
    pub span: Span,
    pub name_span: Span,
    pub has_syntax_errors: bool,
}

impl Method {
    pub fn is_constructor(&self) -> bool {
        self.return_type.is_none()
    }

    pub fn is_native(&self) -> bool {
        self.modifiers.is_native
    }

    pub fn returns_void(&self) -> bool {
        self.return_type.as_ref().is_some_and(|t| t.ty.is_void())
    }

    pub fn parameter_index(&self, name: &str) -> Option<usize> {
        self.parameters.iter().position(|p| p.name == name)
    }
}

#[derive(Debug, Clone)]
pub struct Field {
    pub id: FieldId,
    pub name: String,
    pub class: ClassId,
    pub ty: TypeUse,
    pub modifiers: Modifiers,
    pub initializer: Option<Expr>,
    pub span: Span,
}
