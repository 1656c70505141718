//! Type descriptors, modifiers and annotations

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::shared::models::{NodeId, Span};

/// Java primitive type keywords
pub const PRIMITIVE_TYPES: [&str; 8] = [
    "int", "boolean", "double", "long", "char", "float", "byte", "short",
];

/// Erased type descriptor: canonical (fully-qualified when resolvable)
/// element name plus array dimension count
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeRef {
    pub canonical: String,
    pub array_dims: u32,
}

impl TypeRef {
    pub fn new(canonical: impl Into<String>) -> Self {
        Self {
            canonical: canonical.into(),
            array_dims: 0,
        }
    }

    pub fn array(canonical: impl Into<String>, array_dims: u32) -> Self {
        Self {
            canonical: canonical.into(),
            array_dims,
        }
    }

    pub fn void() -> Self {
        Self::new("void")
    }

    /// Placeholder for types that were not written and could not be
    /// inferred (`var` without initializer type, implicit lambda parameters)
    pub fn unknown() -> Self {
        Self::new("?")
    }

    pub fn is_unknown(&self) -> bool {
        self.canonical == "?"
    }

    pub fn is_void(&self) -> bool {
        self.array_dims == 0 && self.canonical == "void"
    }

    /// Scalar primitive (`int`, not `int[]`)
    pub fn is_primitive(&self) -> bool {
        self.array_dims == 0 && self.element_is_primitive()
    }

    pub fn element_is_primitive(&self) -> bool {
        PRIMITIVE_TYPES.contains(&self.canonical.as_str())
    }

    /// Element type with the array dimensions stripped
    pub fn element(&self) -> TypeRef {
        TypeRef::new(self.canonical.clone())
    }

    /// Last segment of the canonical name
    pub fn simple_name(&self) -> &str {
        self.canonical
            .rsplit('.')
            .next()
            .unwrap_or(self.canonical.as_str())
    }

    /// Short display form: simple name plus `[]` per dimension
    pub fn presentable_text(&self) -> String {
        format!(
            "{}{}",
            self.simple_name(),
            "[]".repeat(self.array_dims as usize)
        )
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}",
            self.canonical,
            "[]".repeat(self.array_dims as usize)
        )
    }
}

/// A type as written at a source position (declaration type, throws entry,
/// cast target, return type)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeUse {
    pub id: NodeId,
    pub ty: TypeRef,
    pub span: Span,
}

impl TypeUse {
    pub fn new(ty: TypeRef, span: Span) -> Self {
        Self {
            id: NodeId::fresh(),
            ty,
            span,
        }
    }
}

/// Declaration modifiers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    pub is_public: bool,
    pub is_protected: bool,
    pub is_private: bool,
    pub is_static: bool,
    pub is_final: bool,
    pub is_abstract: bool,
    pub is_native: bool,
    pub is_synchronized: bool,
}

impl Modifiers {
    /// Apply a single Java modifier keyword, ignoring unknown ones
    pub fn set_keyword(&mut self, keyword: &str) {
        match keyword {
            "public" => self.is_public = true,
            "protected" => self.is_protected = true,
            "private" => self.is_private = true,
            "static" => self.is_static = true,
            "final" => self.is_final = true,
            "abstract" => self.is_abstract = true,
            "native" => self.is_native = true,
            "synchronized" => self.is_synchronized = true,
            _ => {}
        }
    }
}

/// Annotation usage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    /// Qualified through imports when resolvable, otherwise as written
    pub qualified_name: String,
    pub span: Span,
}
